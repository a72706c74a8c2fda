//! Ordered list position management
//!
//! Items carry a floating-point `rank`; sorting by rank ascending yields the
//! visual order of a list. Moving an item computes a new rank for that item
//! alone: appends step by [`RANK_GAP`], insertions between two neighbors take
//! the arithmetic midpoint of their ranks. Repeated insertions into the same
//! narrow gap eventually exhaust floating-point precision; when the gap drops
//! below [`MIN_RANK_GAP`] the whole list is renumbered with evenly spaced
//! ranks instead.
//!
//! Everything here is a pure computation over the caller's snapshot of a
//! list. Persisting the returned rank(s) is the caller's job.

use std::collections::HashSet;
use thiserror::Error;

/// Spacing used when placing an item at either end of a list.
///
/// Chosen large enough that a fresh gap survives ~50 midpoint subdivisions
/// before compaction kicks in.
pub const RANK_GAP: f64 = 1000.0;

/// Smallest gap midpoint insertion is allowed to subdivide.
///
/// Below this, two adjacent ranks are treated as numerically exhausted and
/// the list is renumbered.
pub const MIN_RANK_GAP: f64 = 1e-6;

/// Anything that can live in a rank-ordered list.
pub trait Ranked {
    fn rank_id(&self) -> &str;
    fn rank(&self) -> f64;
}

impl<T: Ranked + ?Sized> Ranked for &T {
    fn rank_id(&self) -> &str {
        (**self).rank_id()
    }

    fn rank(&self) -> f64 {
        (**self).rank()
    }
}

/// Where a moving item should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget<'a> {
    /// Take the slot currently occupied by this item.
    Slot(&'a str),
    /// Move to the end of the list.
    End,
}

/// Invalid-input conditions for [`compute_rank_for_move`].
///
/// None of these are recoverable in place: the caller should re-fetch the
/// authoritative list and retry the whole operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RankError {
    #[error("target item '{0}' is not in the list")]
    TargetNotFound(String),
    #[error("list contains duplicate id '{0}'")]
    DuplicateId(String),
    #[error("list is not sorted by rank at index {0}")]
    Unsorted(usize),
}

/// Result of a move computation.
#[derive(Debug, Clone, PartialEq)]
pub enum RankOutcome {
    /// Only the moving item's rank changes.
    Moved(f64),
    /// Precision was exhausted between the target's neighbors; every item
    /// gets a fresh evenly spaced rank. Pairs are `(id, rank)` in final
    /// list order, the moving item included.
    Rebalanced(Vec<(String, f64)>),
}

impl RankOutcome {
    /// The rank assigned to `id` by this outcome, if the outcome names it.
    ///
    /// For [`RankOutcome::Moved`] the single rank belongs to the moving
    /// item, whatever its id.
    pub fn rank_of(&self, id: &str) -> Option<f64> {
        match self {
            RankOutcome::Moved(rank) => Some(*rank),
            RankOutcome::Rebalanced(ranks) => {
                ranks.iter().find(|(i, _)| i == id).map(|(_, r)| *r)
            }
        }
    }
}

/// Compute the rank that places `moving_id` at `target` within `list`.
///
/// `list` must be the current ordering of one logical list: sorted ascending
/// by rank, no duplicate ids. `moving_id` may or may not already be present
/// (an item entering from another list, or a brand-new item, is simply
/// absent).
///
/// Placement follows the slot the target currently occupies: an item that
/// was originally *before* the target lands immediately after it, an item
/// originally after (or not present) lands immediately before. This matches
/// what a drag gesture onto the target's row means in both directions.
///
/// Moving an item onto its own slot (or to the end while already last) is a
/// no-op and returns the existing rank unchanged.
///
/// # Errors
/// [`RankError`] when the target is missing or the list violates its
/// ordering contract. No partial results are produced on error.
pub fn compute_rank_for_move<T: Ranked>(
    list: &[T],
    moving_id: &str,
    target: MoveTarget<'_>,
) -> Result<RankOutcome, RankError> {
    validate(list)?;

    let moving_idx = list.iter().position(|it| it.rank_id() == moving_id);

    let target_idx = match target {
        MoveTarget::End => {
            return match list.last() {
                // Already last: nothing to do.
                Some(_) if moving_idx == Some(list.len() - 1) => {
                    Ok(RankOutcome::Moved(list[list.len() - 1].rank()))
                }
                Some(last) => Ok(RankOutcome::Moved(last.rank() + RANK_GAP)),
                None => Ok(RankOutcome::Moved(0.0)),
            };
        }
        MoveTarget::Slot(id) => list
            .iter()
            .position(|it| it.rank_id() == id)
            .ok_or_else(|| RankError::TargetNotFound(id.to_string()))?,
    };

    // Own slot: keep the existing rank so the sort order cannot thrash.
    if moving_idx == Some(target_idx) {
        return Ok(RankOutcome::Moved(list[target_idx].rank()));
    }

    // An item dragged down (originally before the target) goes immediately
    // after the target; dragged up or entering the list, immediately before.
    let after_target = matches!(moving_idx, Some(m) if m < target_idx);

    let (low, high) = if after_target {
        (Some(target_idx), list.get(target_idx + 1).map(|_| target_idx + 1))
    } else {
        (target_idx.checked_sub(1), Some(target_idx))
    };

    match (low, high) {
        // First slot: strictly below the current minimum, with room to spare.
        (None, Some(h)) => Ok(RankOutcome::Moved(list[h].rank() - RANK_GAP)),
        // Last slot: strictly above the current maximum.
        (Some(l), None) => Ok(RankOutcome::Moved(list[l].rank() + RANK_GAP)),
        (Some(l), Some(h)) => {
            let (r_low, r_high) = (list[l].rank(), list[h].rank());
            if r_high - r_low > MIN_RANK_GAP {
                Ok(RankOutcome::Moved((r_low + r_high) / 2.0))
            } else {
                Ok(rebalance(list, moving_id, moving_idx, target_idx, after_target))
            }
        }
        (None, None) => unreachable!("target index came from the list"),
    }
}

/// Renumber the whole list with evenly spaced ranks, the moving item placed
/// at its requested slot. O(n) compaction that recovers precision after many
/// narrow insertions.
fn rebalance<T: Ranked>(
    list: &[T],
    moving_id: &str,
    moving_idx: Option<usize>,
    target_idx: usize,
    after_target: bool,
) -> RankOutcome {
    let mut order: Vec<&str> = Vec::with_capacity(list.len() + 1);
    for (i, item) in list.iter().enumerate() {
        if Some(i) == moving_idx {
            continue;
        }
        if i == target_idx && !after_target {
            order.push(moving_id);
        }
        order.push(item.rank_id());
        if i == target_idx && after_target {
            order.push(moving_id);
        }
    }

    RankOutcome::Rebalanced(
        order
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id.to_string(), i as f64 * RANK_GAP))
            .collect(),
    )
}

fn validate<T: Ranked>(list: &[T]) -> Result<(), RankError> {
    let mut seen = HashSet::with_capacity(list.len());
    for (i, item) in list.iter().enumerate() {
        if !seen.insert(item.rank_id()) {
            return Err(RankError::DuplicateId(item.rank_id().to_string()));
        }
        if i > 0 && list[i - 1].rank() > item.rank() {
            return Err(RankError::Unsorted(i));
        }
    }
    Ok(())
}
