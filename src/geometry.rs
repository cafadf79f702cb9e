//! Core geometry types for layout
//!
//! All units are CSS pixels. The coordinate system has its origin at the
//! top-left corner: positive X extends to the right, positive Y downward.
//!
//! Flexbox works in logical main/cross coordinates that depend on the
//! container's `flex-direction` and the text direction. [`FlexAxes`]
//! captures that mapping once per container so the rest of the layout code
//! can work in main/cross terms and convert back at the edges.

use crate::style::types::{Direction, FlexDirection};

/// A 2D point in CSS pixel space
///
/// # Examples
///
/// ```
/// use flexlay::geometry::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Translates this point by another point's coordinates
  pub fn translate(self, other: Point) -> Self {
    Self {
      x: self.x + other.x,
      y: self.y + other.y,
    }
  }
}

/// A 2D size in CSS pixels
///
/// # Examples
///
/// ```
/// use flexlay::geometry::Size;
///
/// let size = Size::new(100.0, 50.0);
/// assert_eq!(size.width, 100.0);
/// assert_eq!(size.height, 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
  /// Width (horizontal extent)
  pub width: f32,
  /// Height (vertical extent)
  pub height: f32,
}

impl Size {
  /// A size with zero width and height
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }
}

/// Per-edge offsets for margin, padding, and border widths
///
/// Follows the CSS box model convention: top, right, bottom, left.
///
/// # Examples
///
/// ```
/// use flexlay::geometry::EdgeOffsets;
///
/// let padding = EdgeOffsets::all(10.0);
/// assert_eq!(padding.horizontal(), 20.0);
/// assert_eq!(padding.vertical(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeOffsets {
  /// Top edge offset
  pub top: f32,
  /// Right edge offset
  pub right: f32,
  /// Bottom edge offset
  pub bottom: f32,
  /// Left edge offset
  pub left: f32,
}

impl EdgeOffsets {
  /// Zero offsets on all sides
  pub const ZERO: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  /// Creates edge offsets with the same value on all sides
  pub const fn all(value: f32) -> Self {
    Self {
      top: value,
      right: value,
      bottom: value,
      left: value,
    }
  }

  /// Creates edge offsets with individual values for each side
  pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// Returns the sum of the left and right offsets
  pub fn horizontal(self) -> f32 {
    self.left + self.right
  }

  /// Returns the sum of the top and bottom offsets
  pub fn vertical(self) -> f32 {
    self.top + self.bottom
  }

  /// Sums this offset with another, edge by edge
  pub fn add(self, other: EdgeOffsets) -> EdgeOffsets {
    EdgeOffsets {
      top: self.top + other.top,
      right: self.right + other.right,
      bottom: self.bottom + other.bottom,
      left: self.left + other.left,
    }
  }
}

/// The main/cross axis mapping for one flex container
///
/// Derived from the container's `flex-direction` and the text direction
/// passed to layout. `main_reversed` answers "does the main axis run
/// against the physical left-to-right / top-to-bottom direction?", which
/// folds `row-reverse`/`column-reverse` together with RTL text.
///
/// # Examples
///
/// ```
/// use flexlay::geometry::{FlexAxes, Size};
/// use flexlay::style::types::{Direction, FlexDirection};
///
/// let axes = FlexAxes::new(FlexDirection::Row, Direction::Ltr);
/// assert!(axes.main_horizontal());
/// assert_eq!(axes.main(Size::new(100.0, 50.0)), 100.0);
/// assert_eq!(axes.cross(Size::new(100.0, 50.0)), 50.0);
///
/// let rtl = FlexAxes::new(FlexDirection::Row, Direction::Rtl);
/// assert!(rtl.main_reversed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexAxes {
  main_horizontal: bool,
  main_reversed: bool,
  cross_reversed: bool,
}

impl FlexAxes {
  /// Resolves the axis mapping for a container
  pub fn new(flex_direction: FlexDirection, direction: Direction) -> Self {
    let main_horizontal = flex_direction.is_row();
    let mut main_reversed = flex_direction.is_reverse();
    let rtl = direction == Direction::Rtl;
    // RTL flips the physical direction of a horizontal main axis; for a
    // vertical main axis it flips the (horizontal) cross axis instead.
    if main_horizontal && rtl {
      main_reversed = !main_reversed;
    }
    Self {
      main_horizontal,
      main_reversed,
      cross_reversed: !main_horizontal && rtl,
    }
  }

  /// Returns true when the main axis is horizontal (row direction)
  pub fn main_horizontal(self) -> bool {
    self.main_horizontal
  }

  /// Returns true when items flow against the physical axis direction
  pub fn main_reversed(self) -> bool {
    self.main_reversed
  }

  /// Returns true when the cross axis runs against its physical direction
  pub fn cross_reversed(self) -> bool {
    self.cross_reversed
  }

  /// Extracts the main-axis component of a size
  pub fn main(self, size: Size) -> f32 {
    if self.main_horizontal {
      size.width
    } else {
      size.height
    }
  }

  /// Extracts the cross-axis component of a size
  pub fn cross(self, size: Size) -> f32 {
    if self.main_horizontal {
      size.height
    } else {
      size.width
    }
  }

  /// Builds a size from main/cross components
  pub fn pack(self, main: f32, cross: f32) -> Size {
    if self.main_horizontal {
      Size::new(main, cross)
    } else {
      Size::new(cross, main)
    }
  }

  /// Sum of the main-axis edges of an offset set (e.g. horizontal margins
  /// for a row container)
  pub fn main_sum(self, edges: EdgeOffsets) -> f32 {
    if self.main_horizontal {
      edges.horizontal()
    } else {
      edges.vertical()
    }
  }

  /// Sum of the cross-axis edges of an offset set
  pub fn cross_sum(self, edges: EdgeOffsets) -> f32 {
    if self.main_horizontal {
      edges.vertical()
    } else {
      edges.horizontal()
    }
  }

  /// Physical leading edge of the main axis (ignoring reversal)
  pub fn main_start(self, edges: EdgeOffsets) -> f32 {
    if self.main_horizontal {
      edges.left
    } else {
      edges.top
    }
  }

  /// Physical trailing edge of the main axis (ignoring reversal)
  pub fn main_end(self, edges: EdgeOffsets) -> f32 {
    if self.main_horizontal {
      edges.right
    } else {
      edges.bottom
    }
  }

  /// Physical leading edge of the cross axis
  pub fn cross_start(self, edges: EdgeOffsets) -> f32 {
    if self.main_horizontal {
      edges.top
    } else {
      edges.left
    }
  }

  /// Physical trailing edge of the cross axis
  pub fn cross_end(self, edges: EdgeOffsets) -> f32 {
    if self.main_horizontal {
      edges.bottom
    } else {
      edges.right
    }
  }

  /// Logical leading edge of the main axis, honoring reversal
  ///
  /// For a reversed main axis the flow starts at the physical trailing
  /// edge, so the leading margin is `main_end`.
  pub fn main_leading(self, edges: EdgeOffsets) -> f32 {
    if self.main_reversed {
      self.main_end(edges)
    } else {
      self.main_start(edges)
    }
  }

  /// Logical trailing edge of the main axis, honoring reversal
  pub fn main_trailing(self, edges: EdgeOffsets) -> f32 {
    if self.main_reversed {
      self.main_start(edges)
    } else {
      self.main_end(edges)
    }
  }

  /// Logical leading edge of the cross axis, honoring reversal
  pub fn cross_leading(self, edges: EdgeOffsets) -> f32 {
    if self.cross_reversed {
      self.cross_end(edges)
    } else {
      self.cross_start(edges)
    }
  }

  /// Logical trailing edge of the cross axis, honoring reversal
  pub fn cross_trailing(self, edges: EdgeOffsets) -> f32 {
    if self.cross_reversed {
      self.cross_start(edges)
    } else {
      self.cross_end(edges)
    }
  }

  /// Builds a physical point from main/cross offsets
  pub fn point(self, main: f32, cross: f32) -> Point {
    if self.main_horizontal {
      Point::new(main, cross)
    } else {
      Point::new(cross, main)
    }
  }
}
