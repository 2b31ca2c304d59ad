//! Top-down descents through the lanes.
//!
//! Every operation starts at the head of the top lane and walks right while
//! the target lies beyond the next node, then drops one lane at the same
//! position. Insert wants the boundary left of the target on every lane;
//! removal and lookup want the node holding the target plus the nodes that
//! span over it on the lanes above.

use std::borrow::Borrow;
use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::lane::Idx;
use crate::lane::LANES;
use crate::lane::Lanes;
use crate::lane::NULL;
use crate::lane::head;

/// Boundary reached on one lane: the node just left of the target and the
/// span sum (0-based rank, head = 0) accumulated on reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry {
    pub node: Idx,
    pub rank: usize,
}

/// Per-lane boundaries for an insertion.
///
/// Lanes above the top lane at search time keep their head with rank 0,
/// which is exactly the boundary a freshly raised lane needs.
pub struct SearchPath {
    pub lanes: [PathEntry; LANES],
}

impl SearchPath {
    fn new() -> Self {
        return SearchPath {
            lanes: std::array::from_fn(|lane| PathEntry {
                node: head(lane),
                rank: 0,
            }),
        };
    }
}

/// Node holding the target, found on its highest lane, and the overflight
/// nodes recorded on the lanes above it.
pub struct Hit {
    pub node: Idx,
    pub rank: usize,
    pub overflights: SmallVec<[Idx; LANES]>,
}

/// Build the insertion path for `value`, or `None` if it is already present.
pub fn locate<T, Q>(lanes: &Lanes<T>, top: usize, value: &Q) -> Option<SearchPath>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut path = SearchPath::new();
    let mut current = head(top);
    let mut rank = 0usize;

    for lane in (0..=top).rev() {
        if lane < top {
            current = lanes.down(current, lane + 1);
        }
        loop {
            let next = lanes.node(current).next;
            if next == NULL {
                break;
            }
            let Some(next_value) = lanes.value(next) else {
                break;
            };
            match value.cmp(next_value.borrow()) {
                Ordering::Equal => return None,
                Ordering::Less => break,
                Ordering::Greater => {
                    rank += lanes.node(next).span;
                    current = next;
                }
            }
        }
        path.lanes[lane] = PathEntry {
            node: current,
            rank,
        };
    }

    return Some(path);
}

/// Generic descent. `probe(next_value, next_rank)` orders the target against
/// the next node: `Less` means the target lies before it, `Greater` after it.
pub fn descend<T, F>(lanes: &Lanes<T>, top: usize, mut probe: F) -> Option<Hit>
where
    F: FnMut(&T, usize) -> Ordering,
{
    let mut overflights = SmallVec::new();
    let mut current = head(top);
    let mut rank = 0usize;

    for lane in (0..=top).rev() {
        if lane < top {
            current = lanes.down(current, lane + 1);
        }
        loop {
            let next = lanes.node(current).next;
            if next == NULL {
                break;
            }
            let Some(next_value) = lanes.value(next) else {
                break;
            };
            let next_rank = rank + lanes.node(next).span;
            match probe(next_value, next_rank) {
                Ordering::Equal => {
                    return Some(Hit {
                        node: next,
                        rank: next_rank,
                        overflights,
                    });
                }
                Ordering::Less => {
                    overflights.push(next);
                    break;
                }
                Ordering::Greater => {
                    rank = next_rank;
                    current = next;
                }
            }
        }
    }

    return None;
}

/// Find the element equal to `value`.
pub fn by_value<T, Q>(lanes: &Lanes<T>, top: usize, value: &Q) -> Option<Hit>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    return descend(lanes, top, |next, _| value.cmp(next.borrow()));
}

/// Find the element at 0-based rank `index`.
pub fn by_rank<T>(lanes: &Lanes<T>, top: usize, index: usize) -> Option<Hit> {
    return descend(lanes, top, |_, next_rank| index.cmp(&next_rank));
}
