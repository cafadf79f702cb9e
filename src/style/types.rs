//! Style type definitions
//!
//! One enum per flexbox style property. These are the computed forms: no
//! cascade, no inheritance, just the values the layout algorithm consumes.

/// Text direction
///
/// CSS: `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
  /// Left-to-right
  #[default]
  Ltr,
  /// Right-to-left
  Rtl,
}

/// Whether a node participates in layout at all
///
/// CSS: `display` (restricted to the flexbox-relevant values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Display {
  /// Laid out as a flex container
  #[default]
  Flex,
  /// Removed from layout; the node and its subtree get a zero layout
  None,
}

/// Positioning scheme
///
/// CSS: `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionType {
  /// Normal flow; position offsets are ignored
  #[default]
  Static,
  /// Normal flow, then shifted by the position offsets
  Relative,
  /// Out of flow; positioned against the parent's padding box
  Absolute,
}

/// Main axis orientation of a flex container
///
/// CSS: `flex-direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexDirection {
  /// Horizontal, following text direction
  #[default]
  Row,
  /// Horizontal, against text direction
  RowReverse,
  /// Vertical, top to bottom
  Column,
  /// Vertical, bottom to top
  ColumnReverse,
}

impl FlexDirection {
  /// Returns true for the horizontal directions
  pub fn is_row(self) -> bool {
    matches!(self, Self::Row | Self::RowReverse)
  }

  /// Returns true for the reversed directions
  pub fn is_reverse(self) -> bool {
    matches!(self, Self::RowReverse | Self::ColumnReverse)
  }
}

/// Line wrapping behavior of a flex container
///
/// CSS: `flex-wrap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexWrap {
  /// Single line, items may overflow
  #[default]
  NoWrap,
  /// Break into multiple lines when the main axis capacity is exceeded
  Wrap,
  /// Like `Wrap`, but lines stack in reverse cross-axis order
  WrapReverse,
}

/// Main-axis distribution of free space within a line
///
/// CSS: `justify-content`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Justify {
  /// Pack items at the main start
  #[default]
  FlexStart,
  /// Center items
  Center,
  /// Pack items at the main end
  FlexEnd,
  /// First and last items flush, equal gaps between
  SpaceBetween,
  /// Equal space around every item (half-size at the edges)
  SpaceAround,
  /// Equal space between items and at both edges
  SpaceEvenly,
}

/// Cross-axis alignment
///
/// CSS: `align-items`, `align-self`, `align-content`. One enum serves all
/// three; `Auto` is only meaningful for `align-self` (defer to the
/// container's `align-items`) and the `Space*` variants only for
/// `align-content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
  /// Defer to the container's `align-items` (align-self only)
  #[default]
  Auto,
  /// Align to the cross start
  FlexStart,
  /// Center on the cross axis
  Center,
  /// Align to the cross end
  FlexEnd,
  /// Fill the line's cross size (when no definite cross size is set)
  Stretch,
  /// Align text baselines (row containers only)
  Baseline,
  /// First and last lines flush, equal gaps between (align-content only)
  SpaceBetween,
  /// Equal space around every line (align-content only)
  SpaceAround,
}

/// Overflow behavior for content exceeding the container bounds
///
/// CSS: `overflow`. Layout only records the value; clipping is the
/// renderer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
  /// Content renders past the bounds
  #[default]
  Visible,
  /// Content is clipped
  Hidden,
  /// Content is clipped and scrollable
  Scroll,
}

/// Box edge selector for the per-edge setters
///
/// `Start` and `End` are logical horizontal edges resolved against the
/// text direction (and a reversed row axis); when set they take precedence
/// over `Left`/`Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
  /// Physical left edge
  Left,
  /// Physical top edge
  Top,
  /// Physical right edge
  Right,
  /// Physical bottom edge
  Bottom,
  /// Logical leading horizontal edge
  Start,
  /// Logical trailing horizontal edge
  End,
}

/// Gutter selector for the gap setters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gutter {
  /// Gap between flex lines (cross axis of a row container)
  Row,
  /// Gap between items within a line (main axis of a row container)
  Column,
}
