//! Styled value resolution
//!
//! Resolves tagged dimensions against available sizes, applies min/max
//! clamps, and folds the logical start/end edge slots onto physical
//! edges.

use crate::geometry::EdgeOffsets;
use crate::style::values::Dimension;
use crate::style::EdgeValues;

/// Clamps `value` into `[min, max]`, with min winning over max
///
/// Matches CSS behavior: when `min > max`, the minimum is authoritative.
pub fn clamp_with_order(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
  let mut clamped = value;
  if let Some(max) = max {
    clamped = clamped.min(max);
  }
  if let Some(min) = min {
    clamped = clamped.max(min);
  }
  clamped
}

/// Applies min/max constraints to a possibly-unresolved size
///
/// An explicit minimum establishes a floor even when the size itself is
/// unresolved: the result becomes the minimum. A maximum alone never
/// promotes an unresolved size to a concrete one.
pub fn apply_min_max(size: Option<f32>, min: Option<f32>, max: Option<f32>) -> Option<f32> {
  match size {
    Some(value) => Some(clamp_with_order(value, min, max)),
    None => min,
  }
}

/// Whether the logical `start` edge maps to the physical left edge
///
/// The mapping flips once for RTL text and once for a reversed row axis;
/// the two cancel out when both apply.
pub fn start_is_left(row_reversed: bool, rtl: bool) -> bool {
  row_reversed == rtl
}

/// The effective dimension for each physical edge after logical overrides
///
/// A set `start`/`end` slot always wins over the physical left/right value
/// it maps onto. Top and bottom have no logical slots.
pub fn effective_edges(values: &EdgeValues, start_maps_left: bool) -> [Dimension; 4] {
  let (left_override, right_override) = if start_maps_left {
    (values.start, values.end)
  } else {
    (values.end, values.start)
  };
  [
    left_override.unwrap_or(values.left),
    values.top,
    right_override.unwrap_or(values.right),
    values.bottom,
  ]
}

/// Resolves margin or padding edges to pixel offsets
///
/// Percentages resolve against the available *width* for all four edges,
/// per the box model convention adopted here. `Auto` resolves to 0 (auto
/// margins are detected separately via [`auto_edges`]).
pub fn resolve_edges(
  values: &EdgeValues,
  available_width: Option<f32>,
  start_maps_left: bool,
) -> EdgeOffsets {
  let [left, top, right, bottom] = effective_edges(values, start_maps_left);
  EdgeOffsets {
    left: left.resolve(available_width).unwrap_or(0.0).max(0.0),
    top: top.resolve(available_width).unwrap_or(0.0).max(0.0),
    right: right.resolve(available_width).unwrap_or(0.0).max(0.0),
    bottom: bottom.resolve(available_width).unwrap_or(0.0).max(0.0),
  }
}

/// Which physical edges carry an auto value (after logical overrides)
///
/// Returned in `[left, top, right, bottom]` order.
pub fn auto_edges(values: &EdgeValues, start_maps_left: bool) -> [bool; 4] {
  let edges = effective_edges(values, start_maps_left);
  [
    edges[0].is_auto(),
    edges[1].is_auto(),
    edges[2].is_auto(),
    edges[3].is_auto(),
  ]
}

/// Resolved position offsets; `None` means the edge is unset (auto)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedOffsets {
  pub left: Option<f32>,
  pub top: Option<f32>,
  pub right: Option<f32>,
  pub bottom: Option<f32>,
}

/// Resolves position offsets against the containing block
///
/// Horizontal edges resolve percentages against `base_width`, vertical
/// edges against `base_height`. Unset (auto) edges stay `None`.
pub fn resolve_offsets(
  values: &EdgeValues,
  base_width: Option<f32>,
  base_height: Option<f32>,
  start_maps_left: bool,
) -> ResolvedOffsets {
  let [left, top, right, bottom] = effective_edges(values, start_maps_left);
  ResolvedOffsets {
    left: left.resolve(base_width),
    top: top.resolve(base_height),
    right: right.resolve(base_width),
    bottom: bottom.resolve(base_height),
  }
}

/// Derives the missing dimension from an aspect ratio
///
/// Ratio is width / height. Only fills in a dimension that is `None`; an
/// explicitly sized axis is never overridden.
pub fn apply_aspect_ratio(
  width: Option<f32>,
  height: Option<f32>,
  ratio: Option<f32>,
) -> (Option<f32>, Option<f32>) {
  let Some(ratio) = ratio else {
    return (width, height);
  };
  if ratio <= 0.0 || !ratio.is_finite() {
    return (width, height);
  }
  match (width, height) {
    (Some(w), None) => (Some(w), Some(w / ratio)),
    (None, Some(h)) => (Some(h * ratio), Some(h)),
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::types::Edge;

  #[test]
  fn test_clamp_with_order_min_wins() {
    assert_eq!(clamp_with_order(50.0, Some(10.0), Some(40.0)), 40.0);
    assert_eq!(clamp_with_order(5.0, Some(10.0), Some(40.0)), 10.0);
    // min > max: min is authoritative
    assert_eq!(clamp_with_order(15.0, Some(30.0), Some(20.0)), 30.0);
  }

  #[test]
  fn test_apply_min_max_promotes_min_only() {
    assert_eq!(apply_min_max(None, Some(30.0), None), Some(30.0));
    assert_eq!(apply_min_max(None, None, Some(100.0)), None);
    assert_eq!(apply_min_max(Some(20.0), Some(30.0), None), Some(30.0));
    assert_eq!(apply_min_max(Some(200.0), None, Some(100.0)), Some(100.0));
  }

  #[test]
  fn test_start_is_left_mapping() {
    assert!(start_is_left(false, false)); // row, LTR
    assert!(!start_is_left(false, true)); // row, RTL
    assert!(!start_is_left(true, false)); // row-reverse, LTR
    assert!(start_is_left(true, true)); // row-reverse, RTL
  }

  #[test]
  fn test_logical_override_wins() {
    let mut margin = EdgeValues::uniform(Dimension::Points(1.0));
    margin.set(Edge::Start, Dimension::Points(9.0));
    let ltr = resolve_edges(&margin, Some(100.0), true);
    assert_eq!(ltr.left, 9.0);
    assert_eq!(ltr.right, 1.0);
    let rtl = resolve_edges(&margin, Some(100.0), false);
    assert_eq!(rtl.left, 1.0);
    assert_eq!(rtl.right, 9.0);
  }

  #[test]
  fn test_resolve_edges_percent_against_width() {
    let mut padding = EdgeValues::uniform(Dimension::Percent(10.0));
    padding.set(Edge::Bottom, Dimension::Percent(10.0));
    let resolved = resolve_edges(&padding, Some(200.0), true);
    // Vertical edges resolve against width too.
    assert_eq!(resolved.top, 20.0);
    assert_eq!(resolved.bottom, 20.0);
    assert_eq!(resolved.left, 20.0);
  }

  #[test]
  fn test_auto_edges_with_logical_override() {
    let mut margin = EdgeValues::uniform(Dimension::Points(0.0));
    margin.set(Edge::End, Dimension::Auto);
    assert_eq!(auto_edges(&margin, true), [false, false, true, false]);
    assert_eq!(auto_edges(&margin, false), [true, false, false, false]);
  }

  #[test]
  fn test_aspect_ratio_fills_missing_axis() {
    assert_eq!(
      apply_aspect_ratio(Some(100.0), None, Some(2.0)),
      (Some(100.0), Some(50.0))
    );
    assert_eq!(
      apply_aspect_ratio(None, Some(50.0), Some(2.0)),
      (Some(100.0), Some(50.0))
    );
    assert_eq!(
      apply_aspect_ratio(Some(10.0), Some(10.0), Some(2.0)),
      (Some(10.0), Some(10.0))
    );
    assert_eq!(apply_aspect_ratio(None, None, Some(2.0)), (None, None));
    assert_eq!(
      apply_aspect_ratio(Some(10.0), None, Some(0.0)),
      (Some(10.0), None)
    );
  }
}
