//! Reorder Algorithm
//!
//! Splice-out/splice-in reordering with destructive 1..N renumbering, and
//! the completeness checks a reorder submission must pass.

use std::collections::HashSet;

use crate::error::{OrderError, OrderResult};
use crate::lesson::{Lesson, ModuleId, OrderEntry};

/// Move the lesson at `source` to `target` and renumber the whole list.
///
/// `target` is a position in the list *after* the source element has been
/// removed, so this is a move, not a swap. Every returned lesson gets
/// `display_order = index + 1`, whatever it had before.
///
/// `source == target` returns the input untouched (not renumbered); callers
/// treat that as a no-op and must not submit it.
pub fn compute_reorder(list: &[Lesson], source: usize, target: usize) -> OrderResult<Vec<Lesson>> {
    let len = list.len();
    if source >= len || target >= len {
        return Err(OrderError::InvalidGesture(format!(
            "move {} -> {} out of range for {} lessons",
            source, target, len
        )));
    }
    if source == target {
        return Ok(list.to_vec());
    }

    let mut reordered = list.to_vec();
    let moved = reordered.remove(source);
    reordered.insert(target, moved);
    for (index, lesson) in reordered.iter_mut().enumerate() {
        lesson.display_order = index as u32 + 1;
    }
    Ok(reordered)
}

/// The `{id, display_order}` pairs of a list, in list order
pub fn order_entries(list: &[Lesson]) -> Vec<OrderEntry> {
    list.iter()
        .map(|lesson| OrderEntry {
            id: lesson.id,
            display_order: lesson.display_order,
        })
        .collect()
}

/// Check that `order` is a full, unambiguous ordering of `current`.
///
/// `current` holds every lesson the module owns right now. Partial
/// submissions, duplicate or foreign ids, and zero or repeated
/// `display_order` values are all rejected.
pub fn validate_order(module_id: ModuleId, current: &[Lesson], order: &[OrderEntry]) -> OrderResult<()> {
    let owned: HashSet<_> = current
        .iter()
        .filter(|lesson| lesson.module_id == module_id)
        .map(|lesson| lesson.id)
        .collect();

    let mut seen_ids = HashSet::with_capacity(order.len());
    let mut seen_orders = HashSet::with_capacity(order.len());
    for entry in order {
        if !owned.contains(&entry.id) {
            return Err(OrderError::Validation(format!(
                "{} does not belong to {}",
                entry.id, module_id
            )));
        }
        if !seen_ids.insert(entry.id) {
            return Err(OrderError::duplicate(entry.id));
        }
        if entry.display_order == 0 {
            return Err(OrderError::Validation(format!(
                "{} has display order 0",
                entry.id
            )));
        }
        if !seen_orders.insert(entry.display_order) {
            return Err(OrderError::Validation(format!(
                "display order {} is used twice",
                entry.display_order
            )));
        }
    }

    if seen_ids.len() != owned.len() {
        return Err(OrderError::Validation(format!(
            "partial order: {} of {} lessons submitted for {}",
            seen_ids.len(),
            owned.len(),
            module_id
        )));
    }
    Ok(())
}
