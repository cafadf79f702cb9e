//! Style configuration for layout nodes
//!
//! [`Style`] is the full set of flexbox inputs for one node, in computed
//! form. Defaults follow the engine-family convention rather than the CSS
//! initial values where the two differ; each deviation is documented on
//! the field.

pub mod types;
pub mod values;

use crate::geometry::EdgeOffsets;
use types::{
  Align, Display, Edge, FlexDirection, FlexWrap, Justify, Overflow, PositionType,
};
use values::Dimension;

/// Per-edge dimension values with optional logical start/end slots
///
/// Used for margins, padding, and position offsets. The logical `start`
/// and `end` slots, when set, take precedence over the physical
/// left/right edges they resolve to; this lets callers mix `margin_left`
/// and `margin_start` with well-defined precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeValues {
  /// Physical left edge
  pub left: Dimension,
  /// Physical top edge
  pub top: Dimension,
  /// Physical right edge
  pub right: Dimension,
  /// Physical bottom edge
  pub bottom: Dimension,
  /// Logical leading horizontal edge; overrides left or right
  pub start: Option<Dimension>,
  /// Logical trailing horizontal edge; overrides right or left
  pub end: Option<Dimension>,
}

impl EdgeValues {
  /// The same value on all four physical edges, logical slots unset
  pub const fn uniform(value: Dimension) -> Self {
    Self {
      left: value,
      top: value,
      right: value,
      bottom: value,
      start: None,
      end: None,
    }
  }

  /// Reads the stored value for an edge (no logical resolution)
  pub fn get(&self, edge: Edge) -> Dimension {
    match edge {
      Edge::Left => self.left,
      Edge::Top => self.top,
      Edge::Right => self.right,
      Edge::Bottom => self.bottom,
      Edge::Start => self.start.unwrap_or(Dimension::Auto),
      Edge::End => self.end.unwrap_or(Dimension::Auto),
    }
  }

  /// Stores a value for an edge
  pub fn set(&mut self, edge: Edge, value: Dimension) {
    match edge {
      Edge::Left => self.left = value,
      Edge::Top => self.top = value,
      Edge::Right => self.right = value,
      Edge::Bottom => self.bottom = value,
      Edge::Start => self.start = Some(value),
      Edge::End => self.end = Some(value),
    }
  }
}

/// Complete styling input for one node
///
/// Mutating a node's style always goes through the node's setters, which
/// mark the node (and its ancestors) dirty; the struct itself is plain
/// data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
  /// `display`; `None` removes the subtree from layout
  pub display: Display,
  /// `position`
  pub position_type: PositionType,
  /// Position offsets (`left`/`top`/`right`/`bottom`), default all auto
  pub position: EdgeValues,
  /// `flex-direction`
  pub flex_direction: FlexDirection,
  /// `flex-wrap`
  pub flex_wrap: FlexWrap,
  /// `flex-grow`; default 0
  pub flex_grow: f32,
  /// `flex-shrink`; default 0 (engine-family policy: items do not shrink
  /// below their basis unless asked — CSS initial would be 1)
  pub flex_shrink: f32,
  /// `flex-basis`; default auto
  pub flex_basis: Dimension,
  /// `align-items`; default stretch
  pub align_items: Align,
  /// `align-self`; default auto (defer to the container)
  pub align_self: Align,
  /// `align-content`; default flex-start
  pub align_content: Align,
  /// `justify-content`
  pub justify_content: Justify,
  /// `width`
  pub width: Dimension,
  /// `height`
  pub height: Dimension,
  /// `min-width`
  pub min_width: Dimension,
  /// `min-height`
  pub min_height: Dimension,
  /// `max-width`
  pub max_width: Dimension,
  /// `max-height`
  pub max_height: Dimension,
  /// `aspect-ratio` (width / height), or unset
  pub aspect_ratio: Option<f32>,
  /// Margins; auto margins absorb free space
  pub margin: EdgeValues,
  /// Padding; auto is treated as 0
  pub padding: EdgeValues,
  /// Border widths (numeric only)
  pub border: EdgeOffsets,
  /// Gap between flex lines
  pub row_gap: f32,
  /// Gap between items within a line
  pub column_gap: f32,
  /// `overflow`; recorded for renderers, no layout effect here
  pub overflow: Overflow,
}

impl Style {
  /// The default style
  ///
  /// Minimum sizes come only from explicit `min_width`/`min_height`;
  /// there is no implied `min-size: auto` floor for overflow containers.
  pub const DEFAULT: Self = Self {
    display: Display::Flex,
    position_type: PositionType::Static,
    position: EdgeValues::uniform(Dimension::Auto),
    flex_direction: FlexDirection::Row,
    flex_wrap: FlexWrap::NoWrap,
    flex_grow: 0.0,
    flex_shrink: 0.0,
    flex_basis: Dimension::Auto,
    align_items: Align::Stretch,
    align_self: Align::Auto,
    align_content: Align::FlexStart,
    justify_content: Justify::FlexStart,
    width: Dimension::Auto,
    height: Dimension::Auto,
    min_width: Dimension::Auto,
    min_height: Dimension::Auto,
    max_width: Dimension::Auto,
    max_height: Dimension::Auto,
    aspect_ratio: None,
    margin: EdgeValues::uniform(Dimension::Points(0.0)),
    padding: EdgeValues::uniform(Dimension::Points(0.0)),
    border: EdgeOffsets::ZERO,
    row_gap: 0.0,
    column_gap: 0.0,
    overflow: Overflow::Visible,
  };
}

impl Default for Style {
  fn default() -> Self {
    Self::DEFAULT
  }
}
