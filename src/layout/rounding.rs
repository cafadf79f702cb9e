//! Edge-based pixel rounding
//!
//! Sizes are never rounded directly. Each node's absolute (root-relative)
//! start and end edges are rounded to the nearest integer independently
//! and the rounded size is their difference. Two siblings that share an
//! unrounded edge therefore always share the rounded edge too; rounding
//! each size on its own would let a 1-pixel gap or overlap open up
//! between them.
//!
//! The unrounded layout stays authoritative inside the engine; rounding
//! is a derived view recomputed from it, so repeated layout calls cannot
//! accumulate rounding drift.

use crate::geometry::{Point, Size};

/// The final pixel-grid layout of one node
///
/// `left` and `top` are relative to the parent's border-box origin,
/// never absolute. Produced only by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedLayout {
  /// Offset from the parent's border-box left edge
  pub left: f32,
  /// Offset from the parent's border-box top edge
  pub top: f32,
  /// Border-box width
  pub width: f32,
  /// Border-box height
  pub height: f32,
}

impl ComputedLayout {
  /// An all-zero layout
  pub const ZERO: Self = Self {
    left: 0.0,
    top: 0.0,
    width: 0.0,
    height: 0.0,
  };
}

/// Rounds one node's box onto the pixel grid
///
/// `parent_abs` and `abs` are the unrounded absolute origins of the
/// parent and the node; `size` is the node's unrounded border-box size.
/// The relative offsets are differences of independently rounded absolute
/// edges, so they compose: a child's rounded absolute position equals the
/// sum of rounded relative offsets down the ancestor chain.
pub(crate) fn round_box(parent_abs: Point, abs: Point, size: Size) -> ComputedLayout {
  let left_edge = abs.x.round();
  let top_edge = abs.y.round();
  ComputedLayout {
    left: left_edge - parent_abs.x.round(),
    top: top_edge - parent_abs.y.round(),
    width: (abs.x + size.width).round() - left_edge,
    height: (abs.y + size.height).round() - top_edge,
  }
}
