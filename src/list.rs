//! Indexable Skip List
//!
//! A sorted set with O(log n) expected insert, remove, membership and
//! rank-indexed access. Each lane node records its span, the rank distance to
//! its predecessor in the same lane, so a descent can count how many elements
//! it has stepped over without visiting them.
//!
//! # Operations
//!
//! - `insert(value)`: O(log n) - false if already present
//! - `remove(&value)` / `take(&value)`: O(log n)
//! - `remove_at(index)`: O(log n) - remove the element of rank `index`
//! - `get(index)`: O(log n) - element of rank `index`
//! - `contains(&value)` / `rank_of(&value)`: O(log n)
//! - `len()`: O(1)

use std::borrow::Borrow;
use std::fmt;
use std::fmt::Write as _;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_core::RngCore;

use crate::error::IndexError;
use crate::height::HeightConfig;
use crate::lane::Idx;
use crate::lane::Lanes;
use crate::lane::NULL;
use crate::lane::NodeKind;
use crate::lane::head;
use crate::search;
use crate::search::Hit;

/// A sorted, duplicate-free set with rank-indexed access.
///
/// `R` supplies the randomness for element heights. Inject a seeded or
/// scripted generator with [`SkipList::with_rng`] for reproducible layouts.
pub struct SkipList<T, R = StdRng> {
    lanes: Lanes<T>,
    /// Highest lane holding any element. Every lane above it is empty.
    top: usize,
    /// Number of elements.
    len: usize,
    rng: R,
    config: HeightConfig,
}

impl<T> SkipList<T> {
    /// Create an empty list whose heights come from an entropy-seeded
    /// `StdRng`.
    pub fn new() -> Self {
        return SkipList::with_rng(StdRng::from_entropy());
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T, R: RngCore> SkipList<T, R> {
    /// Create an empty list drawing heights from `rng`.
    pub fn with_rng(rng: R) -> Self {
        return SkipList::with_config(rng, HeightConfig::default());
    }

    /// Create an empty list with custom height-cap constants.
    pub fn with_config(rng: R, config: HeightConfig) -> Self {
        return SkipList {
            lanes: Lanes::new(),
            top: 0,
            len: 0,
            rng,
            config,
        };
    }

    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Highest lane currently in use.
    pub fn top_lane(&self) -> usize {
        return self.top;
    }

    pub fn config(&self) -> &HeightConfig {
        return &self.config;
    }

    /// Remove every element. The generator and config are kept.
    pub fn clear(&mut self) {
        self.lanes.clear();
        self.top = 0;
        self.len = 0;
    }

    /// Element of rank `index`.
    pub fn get(&self, index: usize) -> Result<&T, IndexError> {
        let out_of_range = IndexError::OutOfRange {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }
        let hit = search::by_rank(&self.lanes, self.top, index).ok_or(out_of_range.clone())?;
        return self.lanes.value(hit.node).ok_or(out_of_range);
    }
}

impl<T: Ord, R: RngCore> SkipList<T, R> {
    /// Insert `value`. Returns false, leaving the list untouched, if an equal
    /// element is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let Some(path) = search::locate(&self.lanes, self.top, &value) else {
            return false;
        };

        let boundary = path.lanes[0];
        let rank = if boundary.node == head(0) {
            0
        } else {
            boundary.rank + 1
        };

        let height = self.config.choose(self.len, &mut self.rng);
        if height > self.top {
            #[cfg(feature = "tracing")]
            tracing::trace!(from = self.top, to = height, len = self.len, "raised top lane");
            self.top = height;
        }

        let entry = self.lanes.alloc_entry(value, height);
        for lane in 0..=self.top {
            let left = path.lanes[lane];
            let next = self.lanes.node(left.node).next;
            if lane <= height {
                let span = rank - left.rank;
                self.lanes.splice_after(left.node, entry, span);
                if next != NULL {
                    let succ = self.lanes.node_mut(next);
                    succ.span = succ.span + 1 - span;
                }
            } else if next != NULL {
                self.lanes.node_mut(next).span += 1;
            }
        }

        self.len += 1;
        self.check_invariants();
        return true;
    }

    /// Remove and return the element of rank `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, IndexError> {
        let out_of_range = IndexError::OutOfRange {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }
        let hit = search::by_rank(&self.lanes, self.top, index).ok_or(out_of_range.clone())?;
        return self.remove_hit(hit).ok_or(out_of_range);
    }

    // --- Core operations ---

    /// Unlink the element found by a descent.
    fn remove_hit(&mut self, hit: Hit) -> Option<T> {
        let NodeKind::Element(entry) = self.lanes.node(hit.node).kind else {
            return None;
        };
        let value = self.lanes.unlink_entry(entry);
        for node in hit.overflights {
            self.lanes.node_mut(node).span -= 1;
        }
        self.len -= 1;
        self.lower_top();
        self.check_invariants();
        return Some(value);
    }

    /// Drop empty lanes off the top so descents start where elements are.
    fn lower_top(&mut self) {
        let before = self.top;
        while self.top > 0 && self.lanes.node(head(self.top)).next == NULL {
            self.top -= 1;
        }
        if self.top != before {
            #[cfg(feature = "tracing")]
            tracing::trace!(from = before, to = self.top, len = self.len, "lowered top lane");
        }
    }

    /// Remove the element equal to `value`. Returns false if absent.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        return self.take(value).is_some();
    }

    /// Remove the element equal to `value` and return it.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let hit = search::by_value(&self.lanes, self.top, value)?;
        return self.remove_hit(hit);
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        return search::by_value(&self.lanes, self.top, value).is_some();
    }

    /// 0-based rank of the element equal to `value`, if present.
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        return search::by_value(&self.lanes, self.top, value).map(|hit| hit.rank);
    }
}

// --- Invariant checking ---

impl<T: Ord, R> SkipList<T, R> {
    /// Walk every lane and panic if the structure is inconsistent.
    ///
    /// Runs after every mutation in debug builds.
    #[cfg(debug_assertions)]
    pub(crate) fn check_invariants(&self) {
        // Rank of every live entry, read off lane 0.
        let mut ranks = vec![usize::MAX; self.lanes.entry_slots()];
        let mut count = 0usize;
        let mut prev_value: Option<&T> = None;
        let mut idx = self.lanes.node(head(0)).next;
        while idx != NULL {
            let node = self.lanes.node(idx);
            let NodeKind::Element(entry) = node.kind else {
                panic!("INVARIANT VIOLATED: head node {} linked into lane 0", idx);
            };
            let record = self.lanes.entry(entry);
            assert!(
                record.height() <= self.top,
                "INVARIANT VIOLATED: entry {} is taller than top lane {}",
                entry,
                self.top
            );
            let value = &record.value;
            if let Some(prev) = prev_value {
                assert!(prev < value, "INVARIANT VIOLATED: lane 0 not strictly increasing at rank {}", count);
            }
            prev_value = Some(value);
            ranks[entry as usize] = count;
            count += 1;
            idx = node.next;
        }
        assert_eq!(
            count, self.len,
            "INVARIANT VIOLATED: lane 0 length={} != len={}",
            count, self.len
        );
        assert_eq!(
            self.lanes.live_entries(),
            self.len,
            "INVARIANT VIOLATED: live entries != len"
        );

        assert!(
            self.top == 0 || self.lanes.node(head(self.top)).next != NULL,
            "INVARIANT VIOLATED: top lane {} is empty",
            self.top
        );

        for lane in 0..crate::lane::LANES {
            let lane_head = head(lane);
            if lane > self.top {
                assert_eq!(
                    self.lanes.node(lane_head).next,
                    NULL,
                    "INVARIANT VIOLATED: lane {} above top {} is not empty",
                    lane,
                    self.top
                );
                continue;
            }
            let mut prev = lane_head;
            let mut prev_rank = 0usize;
            let mut idx = self.lanes.node(lane_head).next;
            while idx != NULL {
                let node = self.lanes.node(idx);
                assert_eq!(node.prev, prev, "INVARIANT VIOLATED: broken prev link in lane {}", lane);
                let NodeKind::Element(entry) = node.kind else {
                    panic!("INVARIANT VIOLATED: head node {} linked into lane {}", idx, lane);
                };
                let nodes = &self.lanes.entry(entry).nodes;
                assert!(
                    nodes.get(lane) == Some(&idx),
                    "INVARIANT VIOLATED: entry {} does not own node {} at lane {}",
                    entry,
                    idx,
                    lane
                );
                let rank = ranks[entry as usize];
                assert_eq!(
                    node.span,
                    rank - prev_rank,
                    "INVARIANT VIOLATED: span of rank {} in lane {}",
                    rank,
                    lane
                );
                prev = idx;
                prev_rank = rank;
                idx = node.next;
            }
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub(crate) fn check_invariants(&self) {}
}

// --- Diagnostics ---

impl<T: fmt::Debug, R> SkipList<T, R> {
    /// Render every lane with its spans, top lane first.
    ///
    /// ```text
    /// L1: head, 3:1, 8:2
    /// L0: head, 1:0, 3:1, 5:1, 8:1
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for lane in (0..=self.top).rev() {
            let _ = write!(out, "L{}: head", lane);
            let mut idx = self.lanes.node(head(lane)).next;
            while idx != NULL {
                let node = self.lanes.node(idx);
                if let Some(value) = self.lanes.value(idx) {
                    let _ = write!(out, ", {:?}:{}", value, node.span);
                }
                idx = node.next;
            }
            out.push('\n');
        }
        return out;
    }
}

impl<T, R> SkipList<T, R> {
    /// Lane 0 in order, for rendering.
    fn base_values(&self) -> impl Iterator<Item = &T> + '_ {
        let mut idx: Idx = self.lanes.node(head(0)).next;
        return std::iter::from_fn(move || {
            if idx == NULL {
                return None;
            }
            let value = self.lanes.value(idx)?;
            idx = self.lanes.node(idx).next;
            return Some(value);
        });
    }
}

impl<T: fmt::Display, R> fmt::Display for SkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SkipList [")?;
        for (i, value) in self.base_values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        return write!(f, "]");
    }
}

impl<T: fmt::Debug, R> fmt::Debug for SkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Values<'a, T, R>(&'a SkipList<T, R>);

        impl<T: fmt::Debug, R> fmt::Debug for Values<'_, T, R> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                return f.debug_list().entries(self.0.base_values()).finish();
            }
        }

        return f
            .debug_struct("SkipList")
            .field("len", &self.len)
            .field("top", &self.top)
            .field("values", &Values(self))
            .finish();
    }
}

impl<T: Ord, R: RngCore> Extend<T> for SkipList<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        return list;
    }
}
