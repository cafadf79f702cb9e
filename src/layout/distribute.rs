//! Main-axis free space distribution
//!
//! The iterative "resolving flexible lengths" algorithm, applied once per
//! flex line. Items start unfrozen; each round distributes the remaining
//! free space proportionally to the unfrozen items' flex factors, clamps
//! the results, and freezes items that hit a bound. The loop runs at most
//! `item_count + 1` rounds.
//!
//! Growth is weighted by `flex-grow`; shrinking is weighted by
//! `flex-shrink × base size` so larger items give up more space.

use crate::layout::context::FlexItem;
use crate::layout::resolve::clamp_with_order;

/// Violation tolerance, in CSS pixels
const EPSILON: f32 = 0.001;

/// Assigns each item's final main-axis size (`target`)
///
/// `free_space` is the line's capacity minus the sum of base sizes,
/// margins, and gaps; callers pass 0 when the capacity is unconstrained.
/// Min/max clamps are always applied to the result, even when no space is
/// distributed, so an item whose base violates its bounds still ends up
/// clamped.
pub(crate) fn distribute_line(items: &mut [FlexItem], free_space: f32) {
  for item in items.iter_mut() {
    item.frozen = false;
    item.violation = 0.0;
    item.target = item.base;
  }
  if items.is_empty() {
    return;
  }

  if free_space != 0.0 {
    if items.len() == 1 {
      let item = &mut items[0];
      let can_flex = if free_space > 0.0 {
        item.grow > 0.0
      } else {
        item.shrink > 0.0
      };
      if can_flex {
        item.target = item.base + free_space;
      }
      item.frozen = true;
    } else {
      distribute_multi(items, free_space);
    }
  }

  // Final clamp: covers the zero-free-space no-op, inflexible items, and
  // anything the loop never touched. Idempotent for already-clamped
  // targets.
  for item in items.iter_mut() {
    item.target = clamp_with_order(item.target, item.min, item.max).max(0.0);
  }
}

fn distribute_multi(items: &mut [FlexItem], free_space: f32) {
  let growing = free_space > 0.0;
  // Fixed for the whole call; per-round free space is re-derived from it.
  let container_inner: f32 = free_space + items.iter().map(|item| item.base).sum::<f32>();
  let mut remaining = free_space;

  for _round in 0..=items.len() {
    let total_factor: f32 = items
      .iter()
      .filter(|item| !item.frozen)
      .map(|item| flex_factor(item, growing))
      .sum();
    if total_factor <= 0.0 {
      break;
    }

    // When grow factors sum below 1, only that fraction of the free
    // space is handed out; the rest is left unused.
    let magnitude = if growing && total_factor < 1.0 {
      remaining * total_factor
    } else {
      remaining
    };

    let mut total_violation = 0.0;
    for item in items.iter_mut().filter(|item| !item.frozen) {
      let factor = flex_factor(item, growing);
      let unclamped = item.base + magnitude * (factor / total_factor);
      let clamped = clamp_with_order(unclamped, item.min, item.max).max(0.0);
      item.violation = clamped - unclamped;
      item.target = clamped;
      total_violation += item.violation;
    }

    if total_violation.abs() < EPSILON {
      for item in items.iter_mut() {
        item.frozen = true;
      }
      break;
    }

    let mut froze_any = false;
    for item in items.iter_mut().filter(|item| !item.frozen) {
      let hit_bound = if total_violation > 0.0 {
        // Min violations dominate: freeze items clamped upward.
        item.violation > 0.0
      } else {
        // Max violations dominate: freeze items clamped downward.
        item.violation < 0.0
      };
      if hit_bound {
        item.frozen = true;
        froze_any = true;
      }
    }
    if !froze_any {
      break;
    }

    let consumed: f32 = items
      .iter()
      .map(|item| if item.frozen { item.target } else { item.base })
      .sum();
    remaining = container_inner - consumed;
  }
}

fn flex_factor(item: &FlexItem, growing: bool) -> f32 {
  if growing {
    item.grow
  } else {
    item.shrink * item.base
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::EdgeOffsets;
  use crate::node::Node;
  use crate::style::types::Align;

  fn item(base: f32, grow: f32, shrink: f32) -> FlexItem {
    FlexItem {
      node: Node::new(),
      child_index: 0,
      base,
      min: None,
      max: None,
      cross_min: None,
      cross_max: None,
      cross_styled: None,
      grow,
      shrink,
      frozen: false,
      violation: 0.0,
      target: base,
      cross: 0.0,
      margin: EdgeOffsets::ZERO,
      margin_auto: [false; 4],
      align: Align::FlexStart,
      line: 0,
      main_pos: 0.0,
      cross_pos: 0.0,
      baseline: 0.0,
    }
  }

  fn targets(items: &[FlexItem]) -> Vec<f32> {
    items.iter().map(|item| item.target).collect()
  }

  #[test]
  fn test_zero_free_space_keeps_bases() {
    let mut items = vec![item(30.0, 1.0, 1.0), item(70.0, 1.0, 1.0)];
    distribute_line(&mut items, 0.0);
    assert_eq!(targets(&items), vec![30.0, 70.0]);
  }

  #[test]
  fn test_zero_free_space_still_clamps() {
    let mut items = vec![item(20.0, 0.0, 0.0)];
    items[0].min = Some(30.0);
    distribute_line(&mut items, 0.0);
    assert_eq!(items[0].target, 30.0);
  }

  #[test]
  fn test_equal_grow_split() {
    let mut items = vec![item(0.0, 1.0, 0.0), item(0.0, 1.0, 0.0)];
    distribute_line(&mut items, 100.0);
    assert_eq!(targets(&items), vec![50.0, 50.0]);
  }

  #[test]
  fn test_weighted_grow() {
    let mut items = vec![item(0.0, 3.0, 0.0), item(0.0, 1.0, 0.0)];
    distribute_line(&mut items, 100.0);
    assert_eq!(targets(&items), vec![75.0, 25.0]);
  }

  #[test]
  fn test_grow_sum_below_one_leaves_space_unused() {
    let mut items = vec![item(0.0, 0.25, 0.0), item(0.0, 0.25, 0.0)];
    distribute_line(&mut items, 100.0);
    // Only half of the free space (sum of factors 0.5) is distributed.
    assert_eq!(targets(&items), vec![25.0, 25.0]);
  }

  #[test]
  fn test_shrink_weighted_by_base_size() {
    // Shrink is weighted by base size: the 200 item gives up twice as
    // much as the 100 item.
    let mut items = vec![item(200.0, 0.0, 1.0), item(100.0, 0.0, 1.0)];
    distribute_line(&mut items, -90.0);
    assert_eq!(targets(&items), vec![140.0, 70.0]);
  }

  #[test]
  fn test_uniform_shrink() {
    let mut items: Vec<FlexItem> = (0..100).map(|_| item(20.0, 0.0, 1.0)).collect();
    distribute_line(&mut items, 500.0 - 2000.0);
    for entry in &items {
      assert!((entry.target - 5.0).abs() < 1e-3);
    }
  }

  #[test]
  fn test_max_clamp_redistributes() {
    let mut items = vec![item(0.0, 1.0, 0.0), item(0.0, 1.0, 0.0)];
    items[0].max = Some(20.0);
    distribute_line(&mut items, 100.0);
    // Item 0 freezes at its max; item 1 takes the rest.
    assert_eq!(targets(&items), vec![20.0, 80.0]);
  }

  #[test]
  fn test_min_clamp_redistributes_shrink() {
    let mut items = vec![item(100.0, 0.0, 1.0), item(100.0, 0.0, 1.0)];
    items[0].min = Some(90.0);
    distribute_line(&mut items, -60.0);
    // Item 0 freezes at 90 (violating by 20); item 1 absorbs the rest.
    assert_eq!(targets(&items), vec![90.0, 50.0]);
  }

  #[test]
  fn test_single_child_fast_path() {
    let mut items = vec![item(10.0, 1.0, 0.0)];
    distribute_line(&mut items, 90.0);
    assert_eq!(items[0].target, 100.0);

    let mut inflexible = vec![item(10.0, 0.0, 0.0)];
    distribute_line(&mut inflexible, 90.0);
    assert_eq!(inflexible[0].target, 10.0);

    let mut capped = vec![item(10.0, 1.0, 0.0)];
    capped[0].max = Some(40.0);
    distribute_line(&mut capped, 90.0);
    assert_eq!(capped[0].target, 40.0);
  }

  #[test]
  fn test_inflexible_items_keep_base() {
    let mut items = vec![item(30.0, 0.0, 0.0), item(10.0, 1.0, 0.0)];
    distribute_line(&mut items, 60.0);
    assert_eq!(targets(&items), vec![30.0, 70.0]);
  }

  #[test]
  fn test_shrink_never_goes_negative() {
    let mut items = vec![item(10.0, 0.0, 1.0), item(10.0, 0.0, 1.0)];
    distribute_line(&mut items, -40.0);
    for entry in &items {
      assert!(entry.target >= 0.0);
    }
  }
}
