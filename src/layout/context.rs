//! Reusable per-call scratch state
//!
//! Flex layout needs a per-child scratch record and a per-line record for
//! every container it recurses through. Allocating those on every call
//! would dominate the cost of small incremental re-layouts, so they live
//! in one thread-local [`LayoutContext`] arena that grows on demand and is
//! reused across calls.
//!
//! The arena is not reentrant: a top-level layout call borrows it for its
//! whole duration. A nested `calculate_layout` (for example from inside a
//! measurement callback) is rejected with [`LayoutError::ContextInUse`]
//! rather than corrupting the outer call's scratch state.

use std::cell::RefCell;

use crate::error::{LayoutError, Result};
use crate::geometry::EdgeOffsets;
use crate::node::Node;
use crate::style::types::Align;

/// Transient per-child state while a container's children are distributed
///
/// Only meaningful inside an in-progress layout call; rebuilt from styles
/// every time a container lays out its children.
#[derive(Debug, Clone)]
pub(crate) struct FlexItem {
  /// The child this scratch record belongs to
  pub node: Node,
  /// Index of the child within the container's child list
  pub child_index: usize,
  /// Flex base size (border-box, main axis)
  pub base: f32,
  /// Resolved main-axis minimum, if any
  pub min: Option<f32>,
  /// Resolved main-axis maximum, if any
  pub max: Option<f32>,
  /// Resolved cross-axis minimum, if any
  pub cross_min: Option<f32>,
  /// Resolved cross-axis maximum, if any
  pub cross_max: Option<f32>,
  /// Explicit cross-axis size from the style, if definite
  pub cross_styled: Option<f32>,
  /// `flex-grow`
  pub grow: f32,
  /// `flex-shrink`
  pub shrink: f32,
  /// Frozen flag for the distribution loop
  pub frozen: bool,
  /// Clamping violation (clamped − unclamped target) from the last
  /// distribution round
  pub violation: f32,
  /// Final main-axis size (border-box)
  pub target: f32,
  /// Final cross-axis size (border-box)
  pub cross: f32,
  /// Resolved margins
  pub margin: EdgeOffsets,
  /// Auto-margin flags in `[left, top, right, bottom]` order
  pub margin_auto: [bool; 4],
  /// Resolved cross-axis alignment (align-self with align-items fallback)
  pub align: Align,
  /// Line index assigned by the line breaker
  pub line: usize,
  /// Main-axis offset of the margin box within the container content box
  pub main_pos: f32,
  /// Cross-axis offset of the margin box within the container content box
  pub cross_pos: f32,
  /// Baseline distance from the item's margin-box top
  pub baseline: f32,
}

impl FlexItem {
  /// Sum of the item's main-axis margins
  pub fn main_margin(&self, axes: crate::geometry::FlexAxes) -> f32 {
    axes.main_sum(self.margin)
  }

  /// Sum of the item's cross-axis margins
  pub fn cross_margin(&self, axes: crate::geometry::FlexAxes) -> f32 {
    axes.cross_sum(self.margin)
  }

  /// Outer (margin-box) main size using the current target
  pub fn outer_main(&self, axes: crate::geometry::FlexAxes) -> f32 {
    self.target + self.main_margin(axes)
  }

  /// Outer (margin-box) cross size using the current cross size
  pub fn outer_cross(&self, axes: crate::geometry::FlexAxes) -> f32 {
    self.cross + self.cross_margin(axes)
  }

  /// Auto flags for the (leading, trailing) main-axis margin edges
  pub fn main_margin_auto(&self, axes: crate::geometry::FlexAxes) -> (bool, bool) {
    let (start, end) = if axes.main_horizontal() {
      (self.margin_auto[0], self.margin_auto[2])
    } else {
      (self.margin_auto[1], self.margin_auto[3])
    };
    if axes.main_reversed() {
      (end, start)
    } else {
      (start, end)
    }
  }

  /// Auto flags for the (leading, trailing) cross-axis margin edges
  pub fn cross_margin_auto(&self, axes: crate::geometry::FlexAxes) -> (bool, bool) {
    let (start, end) = if axes.main_horizontal() {
      (self.margin_auto[1], self.margin_auto[3])
    } else {
      (self.margin_auto[0], self.margin_auto[2])
    };
    if axes.cross_reversed() {
      (end, start)
    } else {
      (start, end)
    }
  }
}

/// One flex line produced by the line breaker
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Line {
  /// Index of the line's first item in the item arena
  pub first: usize,
  /// Number of items on the line
  pub count: usize,
  /// Sum of base sizes + margins + gaps at break time
  pub main_used: f32,
  /// Cross size of the line
  pub cross_size: f32,
  /// Cross offset of the line within the container content box
  pub cross_offset: f32,
  /// Max baseline among baseline-aligned items (row lines)
  pub max_baseline: f32,
}

/// The scratch arena threaded through one layout call
#[derive(Debug, Default)]
pub(crate) struct LayoutContext {
  /// Flex item scratch records; nested containers use disjoint ranges
  pub items: Vec<FlexItem>,
  /// Flex line records; nested containers use disjoint ranges
  pub lines: Vec<Line>,
  /// Monotonic top-level call counter, used to expire sizing caches
  pub epoch: u64,
}

impl LayoutContext {
  /// Starts a new top-level call and returns its epoch
  pub fn begin_call(&mut self) -> u64 {
    self.epoch += 1;
    self.items.clear();
    self.lines.clear();
    self.epoch
  }

  /// Current high-water mark of the item arena
  pub fn items_mark(&self) -> usize {
    self.items.len()
  }

  /// Releases every item pushed after `mark`
  pub fn release_items(&mut self, mark: usize) {
    self.items.truncate(mark);
  }

  /// Current high-water mark of the line arena
  pub fn lines_mark(&self) -> usize {
    self.lines.len()
  }

  /// Releases every line pushed after `mark`
  pub fn release_lines(&mut self, mark: usize) {
    self.lines.truncate(mark);
  }
}

thread_local! {
  static CONTEXT: RefCell<LayoutContext> = RefCell::new(LayoutContext::default());
}

/// Borrows the thread-local context for the duration of one layout call
///
/// Fails with [`LayoutError::ContextInUse`] when a layout call is already
/// in flight on this thread.
pub(crate) fn with_context<R>(f: impl FnOnce(&mut LayoutContext) -> R) -> Result<R> {
  CONTEXT.with(|cell| match cell.try_borrow_mut() {
    Ok(mut ctx) => Ok(f(&mut ctx)),
    Err(_) => Err(LayoutError::ContextInUse),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_epoch_increments_per_call() {
    let mut ctx = LayoutContext::default();
    let first = ctx.begin_call();
    let second = ctx.begin_call();
    assert_eq!(second, first + 1);
  }

  #[test]
  fn test_arena_mark_release() {
    let mut ctx = LayoutContext::default();
    ctx.begin_call();
    let mark = ctx.items_mark();
    assert_eq!(mark, 0);
    ctx.lines.push(Line::default());
    let line_mark = ctx.lines_mark();
    ctx.lines.push(Line::default());
    ctx.release_lines(line_mark);
    assert_eq!(ctx.lines.len(), 1);
  }

  #[test]
  fn test_nested_borrow_rejected() {
    let outer = with_context(|_ctx| {
      // A nested borrow on the same thread must fail.
      with_context(|_inner| ()).unwrap_err()
    })
    .unwrap();
    assert_eq!(outer, LayoutError::ContextInUse);
  }
}
