//! flexlay: an incremental flexbox layout engine
//!
//! Builds a tree of styled [`Node`]s, computes a position and size for
//! every node, and re-computes only what changed on subsequent calls.
//! Incremental results are guaranteed equivalent to a from-scratch
//! computation: dirty flags propagate to the root on every mutation, and
//! per-node fingerprints of the exact layout inputs decide when a stored
//! result can be reused.
//!
//! ```
//! use flexlay::{AvailableSpace, Dimension, Direction, Node};
//!
//! let root = Node::new();
//! root.set_width(Dimension::Points(100.0));
//! root.set_height(Dimension::Points(100.0));
//!
//! let left = Node::new();
//! left.set_flex_grow(1.0);
//! let right = Node::new();
//! right.set_flex_grow(1.0);
//! root.add_child(&left);
//! root.add_child(&right);
//!
//! root
//!   .calculate_layout(
//!     AvailableSpace::Unconstrained,
//!     AvailableSpace::Unconstrained,
//!     Direction::Ltr,
//!   )
//!   .unwrap();
//! assert_eq!(left.layout_width(), 50.0);
//! assert_eq!(right.layout_left(), 50.0);
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod node;
pub mod style;

pub use error::{LayoutError, Result};
pub use geometry::{EdgeOffsets, Point, Size};
pub use layout::rounding::ComputedLayout;
pub use node::{BaselineFunc, MeasureFunc, Node};
pub use style::types::{
  Align, Direction, Display, Edge, FlexDirection, FlexWrap, Gutter, Justify, Overflow,
  PositionType,
};
pub use style::values::{AvailableSpace, Dimension, MeasureMode};
pub use style::{EdgeValues, Style};
