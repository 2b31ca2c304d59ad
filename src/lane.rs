//! Lane arena.
//!
//! Every node of every lane lives in one `Vec`, addressed by `Idx`. The lane
//! heads sit at the fixed indices `0..LANES`, so a head never moves and never
//! goes on the free list. Each logical element is an `Entry` that owns its
//! value once and remembers which node it has in each lane it occupies.
//!
//! ```text
//! L2: head ------------> 5:2 -------------> NULL
//! L1: head ----> 3:1 --> 5:1 ------> 9:2 -> NULL
//! L0: head -> 1:0 -> 3:1 -> 5:1 -> 8:1 -> 9:1 -> NULL
//! ```
//!
//! The number after each value is its span: the rank distance back to the
//! previous node in the same lane, where a head counts as rank 0. Summing the
//! spans along any lane therefore lands on the node's 0-based rank.

use smallvec::SmallVec;

/// Number of lanes. Lane 0 holds every element.
pub const LANES: usize = 32;

/// Arena index type. u32 saves space vs usize on 64-bit.
pub type Idx = u32;

/// Null index marker.
pub const NULL: Idx = Idx::MAX;

/// Head of the given lane.
pub fn head(lane: usize) -> Idx {
    debug_assert!(lane < LANES);
    return lane as Idx;
}

/// What a slot in the node arena stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The sentinel anchoring a lane.
    Head,
    /// A lane node of the entry at this index.
    Element(Idx),
}

/// A node in exactly one lane.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub kind: NodeKind,
    /// Rank distance from `prev`. Always 0 on heads.
    pub span: usize,
    pub prev: Idx,
    pub next: Idx,
}

impl Node {
    fn head() -> Self {
        return Node {
            kind: NodeKind::Head,
            span: 0,
            prev: NULL,
            next: NULL,
        };
    }
}

/// One logical element and the nodes representing it, lane 0 first.
pub struct Entry<T> {
    pub value: T,
    pub nodes: SmallVec<[Idx; 4]>,
}

impl<T> Entry<T> {
    /// Highest lane this entry occupies.
    pub fn height(&self) -> usize {
        return self.nodes.len() - 1;
    }
}

/// Node and entry storage with free lists for reuse.
pub struct Lanes<T> {
    nodes: Vec<Node>,
    entries: Vec<Option<Entry<T>>>,
    free_nodes: Vec<Idx>,
    free_entries: Vec<Idx>,
}

impl<T> Lanes<T> {
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(LANES);
        nodes.resize_with(LANES, Node::head);
        return Lanes {
            nodes,
            entries: Vec::new(),
            free_nodes: Vec::new(),
            free_entries: Vec::new(),
        };
    }

    // --- Node access helpers ---

    pub fn node(&self, idx: Idx) -> &Node {
        return &self.nodes[idx as usize];
    }

    pub fn node_mut(&mut self, idx: Idx) -> &mut Node {
        return &mut self.nodes[idx as usize];
    }

    pub fn entry(&self, idx: Idx) -> &Entry<T> {
        return self.entries[idx as usize]
            .as_ref()
            .unwrap_or_else(|| panic!("entry {} is not live", idx));
    }

    /// Value held by an element node.
    pub fn value(&self, node: Idx) -> Option<&T> {
        return match self.node(node).kind {
            NodeKind::Head => None,
            NodeKind::Element(entry) => Some(&self.entry(entry).value),
        };
    }

    /// The node one lane below `node` that stands at the same position:
    /// the lower head for a head, otherwise the same entry's lower node.
    pub fn down(&self, node: Idx, lane: usize) -> Idx {
        debug_assert!(lane > 0);
        return match self.node(node).kind {
            NodeKind::Head => head(lane - 1),
            NodeKind::Element(entry) => self.entry(entry).nodes[lane - 1],
        };
    }

    // --- Allocation ---

    /// Store a new entry with no nodes yet.
    pub fn alloc_entry(&mut self, value: T, height: usize) -> Idx {
        let entry = Entry {
            value,
            nodes: SmallVec::with_capacity(height + 1),
        };
        if let Some(idx) = self.free_entries.pop() {
            self.entries[idx as usize] = Some(entry);
            return idx;
        }
        debug_assert!(self.entries.len() < NULL as usize, "entry table full");
        let idx = self.entries.len() as Idx;
        self.entries.push(Some(entry));
        return idx;
    }

    /// Create a node for `entry`, splice it in right after `boundary`, and
    /// record it as the entry's next-higher lane node.
    pub fn splice_after(&mut self, boundary: Idx, entry: Idx, span: usize) -> Idx {
        let next = self.node(boundary).next;
        let node = Node {
            kind: NodeKind::Element(entry),
            span,
            prev: boundary,
            next,
        };
        let idx = match self.free_nodes.pop() {
            Some(idx) => {
                *self.node_mut(idx) = node;
                idx
            }
            None => {
                debug_assert!(self.nodes.len() < NULL as usize, "node arena full");
                let idx = self.nodes.len() as Idx;
                self.nodes.push(node);
                idx
            }
        };
        self.node_mut(boundary).next = idx;
        if next != NULL {
            self.node_mut(next).prev = idx;
        }
        self.entries[entry as usize]
            .as_mut()
            .unwrap_or_else(|| panic!("entry {} is not live", entry))
            .nodes
            .push(idx);
        return idx;
    }

    /// Unlink every node of `entry`, folding each removed span into the
    /// successor, and hand back the value.
    pub fn unlink_entry(&mut self, entry: Idx) -> T {
        let Entry { value, nodes } = self.entries[entry as usize]
            .take()
            .unwrap_or_else(|| panic!("entry {} is not live", entry));
        for idx in nodes {
            let Node { span, prev, next, .. } = *self.node(idx);
            self.node_mut(prev).next = next;
            if next != NULL {
                let succ = self.node_mut(next);
                succ.prev = prev;
                succ.span = succ.span - 1 + span;
            }
            let node = self.node_mut(idx);
            node.prev = NULL;
            node.next = NULL;
            self.free_nodes.push(idx);
        }
        self.free_entries.push(entry);
        return value;
    }

    /// Drop every element and return the heads to their empty state.
    pub fn clear(&mut self) {
        self.nodes.truncate(LANES);
        for head in &mut self.nodes {
            *head = Node::head();
        }
        self.entries.clear();
        self.free_nodes.clear();
        self.free_entries.clear();
    }

    /// Number of live entries.
    pub fn live_entries(&self) -> usize {
        return self.entries.len() - self.free_entries.len();
    }

    /// Size of the entry table, live or not. Bounds every entry index.
    pub fn entry_slots(&self) -> usize {
        return self.entries.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane0(lanes: &Lanes<i32>) -> Vec<(i32, usize)> {
        let mut out = Vec::new();
        let mut idx = lanes.node(head(0)).next;
        while idx != NULL {
            out.push((*lanes.value(idx).unwrap(), lanes.node(idx).span));
            idx = lanes.node(idx).next;
        }
        out
    }

    #[test]
    fn heads_start_empty() {
        let lanes: Lanes<i32> = Lanes::new();
        for lane in 0..LANES {
            let head = lanes.node(head(lane));
            assert_eq!(head.kind, NodeKind::Head);
            assert_eq!(head.next, NULL);
        }
        assert_eq!(lanes.live_entries(), 0);
    }

    #[test]
    fn splice_links_both_directions() {
        let mut lanes = Lanes::new();
        let head = head(0);
        let b = lanes.alloc_entry(2, 0);
        let nb = lanes.splice_after(head, b, 0);
        let a = lanes.alloc_entry(1, 0);
        let na = lanes.splice_after(head, a, 0);
        lanes.node_mut(nb).span = 1;

        assert_eq!(lanes.node(head).next, na);
        assert_eq!(lanes.node(na).next, nb);
        assert_eq!(lanes.node(nb).prev, na);
        assert_eq!(lanes.node(na).prev, head);
        assert_eq!(lane0(&lanes), vec![(1, 0), (2, 1)]);
    }

    #[test]
    fn unlink_merges_span_and_reuses_slots() {
        let mut lanes = Lanes::new();
        let head = head(0);
        let mut prev = head;
        for (i, v) in [10, 20, 30].into_iter().enumerate() {
            let e = lanes.alloc_entry(v, 0);
            prev = lanes.splice_after(prev, e, if i == 0 { 0 } else { 1 });
        }
        let first = lanes.node(lanes.node(head).next).kind;
        let NodeKind::Element(first) = first else {
            panic!("expected element");
        };

        assert_eq!(lanes.unlink_entry(first), 10);
        assert_eq!(lane0(&lanes), vec![(20, 0), (30, 1)]);
        assert_eq!(lanes.live_entries(), 2);

        let slots = lanes.entry_slots();
        let e = lanes.alloc_entry(5, 0);
        assert_eq!(lanes.entry_slots(), slots);
        lanes.splice_after(head, e, 0);
        assert_eq!(lanes.node(lanes.node(head).next).kind, NodeKind::Element(e));
    }

    #[test]
    fn down_follows_entry() {
        let mut lanes = Lanes::new();
        let e = lanes.alloc_entry(7, 1);
        let n0 = lanes.splice_after(head(0), e, 0);
        let n1 = lanes.splice_after(head(1), e, 0);
        assert_eq!(lanes.down(n1, 1), n0);
        assert_eq!(lanes.down(head(3), 3), head(2));
        assert_eq!(lanes.entry(e).height(), 1);
    }

    #[test]
    #[should_panic(expected = "is not live")]
    fn splice_for_released_entry_panics() {
        let mut lanes = Lanes::new();
        let e = lanes.alloc_entry(1, 0);
        lanes.splice_after(head(0), e, 0);
        lanes.unlink_entry(e);
        lanes.splice_after(head(0), e, 0);
    }

    #[test]
    fn clear_resets() {
        let mut lanes = Lanes::new();
        let e = lanes.alloc_entry(1, 0);
        lanes.splice_after(head(0), e, 0);
        lanes.clear();
        assert_eq!(lanes.live_entries(), 0);
        assert_eq!(lanes.node(head(0)).next, NULL);
    }
}
