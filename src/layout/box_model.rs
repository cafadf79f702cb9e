//! Box model resolution for a single node
//!
//! Combines margin, border, and padding into resolved per-edge pixel
//! offsets and derives content-box geometry. Percentages on margins and
//! padding always resolve against the available width, never height, for
//! all four edges.

use crate::geometry::{EdgeOffsets, Size};
use crate::layout::resolve::{auto_edges, resolve_edges};
use crate::style::Style;

/// Resolved margin/border/padding for one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxMetrics {
  /// Resolved margins (auto edges resolve to 0 here)
  pub margin: EdgeOffsets,
  /// Which margin edges are auto, in `[left, top, right, bottom]` order
  pub margin_auto: [bool; 4],
  /// Resolved padding
  pub padding: EdgeOffsets,
  /// Border widths
  pub border: EdgeOffsets,
}

impl BoxMetrics {
  /// Resolves a style's box edges against the available width
  pub fn compute(style: &Style, available_width: Option<f32>, start_maps_left: bool) -> Self {
    Self {
      margin: resolve_edges(&style.margin, available_width, start_maps_left),
      margin_auto: auto_edges(&style.margin, start_maps_left),
      padding: resolve_edges(&style.padding, available_width, start_maps_left),
      border: EdgeOffsets {
        top: style.border.top.max(0.0),
        right: style.border.right.max(0.0),
        bottom: style.border.bottom.max(0.0),
        left: style.border.left.max(0.0),
      },
    }
  }

  /// Border + padding, edge by edge
  pub fn inner(&self) -> EdgeOffsets {
    self.border.add(self.padding)
  }

  /// Horizontal border + padding
  pub fn inner_horizontal(&self) -> f32 {
    self.inner().horizontal()
  }

  /// Vertical border + padding
  pub fn inner_vertical(&self) -> f32 {
    self.inner().vertical()
  }

  /// Content-box size for a given border-box size, floored at 0
  pub fn content_size(&self, outer: Size) -> Size {
    Size {
      width: (outer.width - self.inner_horizontal()).max(0.0),
      height: (outer.height - self.inner_vertical()).max(0.0),
    }
  }

  /// Floors a border-box width at the border + padding minimum
  ///
  /// A node's outer size can never be smaller than its border and
  /// padding; this is re-applied after shrink-wrap adjustments.
  pub fn floor_outer_width(&self, width: f32) -> f32 {
    width.max(self.inner_horizontal())
  }

  /// Floors a border-box height at the border + padding minimum
  pub fn floor_outer_height(&self, height: f32) -> f32 {
    height.max(self.inner_vertical())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::types::Edge;
  use crate::style::values::Dimension;

  #[test]
  fn test_content_size_floored_at_zero() {
    let mut style = Style::default();
    style.padding.set(Edge::Left, Dimension::Points(10.0));
    style.padding.set(Edge::Right, Dimension::Points(10.0));
    style.border = EdgeOffsets::all(5.0);
    let metrics = BoxMetrics::compute(&style, Some(100.0), true);
    assert_eq!(metrics.inner_horizontal(), 30.0);
    let content = metrics.content_size(Size::new(25.0, 8.0));
    assert_eq!(content.width, 0.0);
    // 8 - (5 + 5) border, no vertical padding
    assert_eq!(content.height, 0.0);
  }

  #[test]
  fn test_outer_floor() {
    let mut style = Style::default();
    style.padding = crate::style::EdgeValues::uniform(Dimension::Points(4.0));
    style.border = EdgeOffsets::all(1.0);
    let metrics = BoxMetrics::compute(&style, Some(100.0), true);
    assert_eq!(metrics.floor_outer_width(3.0), 10.0);
    assert_eq!(metrics.floor_outer_width(30.0), 30.0);
    assert_eq!(metrics.floor_outer_height(0.0), 10.0);
  }

  #[test]
  fn test_negative_border_clamped() {
    let mut style = Style::default();
    style.border = EdgeOffsets::new(-1.0, -2.0, -3.0, -4.0);
    let metrics = BoxMetrics::compute(&style, None, true);
    assert_eq!(metrics.border, EdgeOffsets::ZERO);
  }

  #[test]
  fn test_margin_auto_detection() {
    let mut style = Style::default();
    style.margin.set(Edge::Left, Dimension::Auto);
    let metrics = BoxMetrics::compute(&style, Some(100.0), true);
    assert_eq!(metrics.margin_auto, [true, false, false, false]);
    assert_eq!(metrics.margin.left, 0.0);
  }
}
