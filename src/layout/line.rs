//! Flex line breaking
//!
//! Partitions a container's in-flow children into one or more lines given
//! the wrap mode and the main-axis capacity. Items are measured by their
//! flex base size plus main-axis margins; the gap contributes between
//! consecutive items on the same line.

use std::ops::Range;

use crate::geometry::FlexAxes;
use crate::layout::context::{LayoutContext, Line};
use crate::style::types::FlexWrap;

/// Breaks the items in `item_range` into lines
///
/// Returns the range of lines appended to the context's line arena. Every
/// item in the range gets its `line` index assigned (an absolute index
/// into the line arena).
///
/// With `no-wrap`, an unconstrained capacity, or zero items, everything
/// lands on a single line. Otherwise items accumulate in order and a new
/// line starts whenever adding the next item would exceed capacity; a
/// line always receives at least one item even if that item alone
/// overflows. Lines come out in document order for every wrap mode;
/// `wrap-reverse` flips the cross-axis stacking later, during line
/// placement.
pub(crate) fn break_lines(
  ctx: &mut LayoutContext,
  item_range: Range<usize>,
  capacity: Option<f32>,
  wrap: FlexWrap,
  gap: f32,
  axes: FlexAxes,
) -> Range<usize> {
  let lines_start = ctx.lines_mark();

  let single_line = wrap == FlexWrap::NoWrap || capacity.is_none() || item_range.is_empty();
  if single_line {
    let mut used = 0.0;
    for (position, index) in item_range.clone().enumerate() {
      let item = &mut ctx.items[index];
      item.line = lines_start;
      used += item.base + item.main_margin(axes);
      if position > 0 {
        used += gap;
      }
    }
    ctx.lines.push(Line {
      first: item_range.start,
      count: item_range.len(),
      main_used: used,
      ..Line::default()
    });
    return lines_start..ctx.lines.len();
  }

  let capacity = capacity.unwrap_or(f32::INFINITY);
  let mut line = Line {
    first: item_range.start,
    count: 0,
    ..Line::default()
  };
  for index in item_range.clone() {
    let outer = {
      let item = &ctx.items[index];
      item.base + item.main_margin(axes)
    };
    let addition = if line.count > 0 { gap + outer } else { outer };
    if line.count > 0 && line.main_used + addition > capacity {
      ctx.lines.push(line);
      line = Line {
        first: index,
        count: 0,
        ..Line::default()
      };
    }
    let line_index = ctx.lines.len();
    let item = &mut ctx.items[index];
    item.line = line_index;
    line.main_used += if line.count > 0 { gap + outer } else { outer };
    line.count += 1;
  }
  ctx.lines.push(line);
  lines_start..ctx.lines.len()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::EdgeOffsets;
  use crate::layout::context::FlexItem;
  use crate::node::Node;
  use crate::style::types::{Align, Direction, FlexDirection};

  fn item(base: f32) -> FlexItem {
    FlexItem {
      node: Node::new(),
      child_index: 0,
      base,
      min: None,
      max: None,
      cross_min: None,
      cross_max: None,
      cross_styled: None,
      grow: 0.0,
      shrink: 0.0,
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

  fn axes() -> FlexAxes {
    FlexAxes::new(FlexDirection::Row, Direction::Ltr)
  }

  fn setup(bases: &[f32]) -> (LayoutContext, Range<usize>) {
    let mut ctx = LayoutContext::default();
    ctx.begin_call();
    for &base in bases {
      ctx.items.push(item(base));
    }
    let range = 0..bases.len();
    (ctx, range)
  }

  #[test]
  fn test_no_wrap_single_line() {
    let (mut ctx, range) = setup(&[40.0, 40.0, 40.0]);
    let lines = break_lines(&mut ctx, range, Some(100.0), FlexWrap::NoWrap, 0.0, axes());
    assert_eq!(lines.len(), 1);
    assert_eq!(ctx.lines[0].count, 3);
    assert_eq!(ctx.lines[0].main_used, 120.0);
  }

  #[test]
  fn test_unconstrained_capacity_single_line() {
    let (mut ctx, range) = setup(&[40.0, 40.0, 40.0]);
    let lines = break_lines(&mut ctx, range, None, FlexWrap::Wrap, 0.0, axes());
    assert_eq!(lines.len(), 1);
  }

  #[test]
  fn test_wrap_breaks_at_capacity() {
    // 40 + 40 = 80 fits in 100; the third item starts a new line.
    let (mut ctx, range) = setup(&[40.0, 40.0, 40.0]);
    let lines = break_lines(&mut ctx, range, Some(100.0), FlexWrap::Wrap, 0.0, axes());
    assert_eq!(lines.len(), 2);
    assert_eq!(ctx.lines[0].count, 2);
    assert_eq!(ctx.lines[1].count, 1);
    assert_eq!(ctx.items[0].line, 0);
    assert_eq!(ctx.items[1].line, 0);
    assert_eq!(ctx.items[2].line, 1);
  }

  #[test]
  fn test_gap_counts_toward_capacity() {
    // 40 + 30(gap) + 40 = 110 > 100, so each item gets its own line.
    let (mut ctx, range) = setup(&[40.0, 40.0]);
    let lines = break_lines(&mut ctx, range, Some(100.0), FlexWrap::Wrap, 30.0, axes());
    assert_eq!(lines.len(), 2);
  }

  #[test]
  fn test_margins_count_toward_capacity() {
    let (mut ctx, range) = setup(&[40.0, 40.0]);
    ctx.items[1].margin = EdgeOffsets::new(0.0, 15.0, 0.0, 15.0);
    let lines = break_lines(&mut ctx, range, Some(100.0), FlexWrap::Wrap, 0.0, axes());
    assert_eq!(lines.len(), 2);
  }

  #[test]
  fn test_oversized_item_gets_own_line() {
    let (mut ctx, range) = setup(&[150.0, 10.0]);
    let lines = break_lines(&mut ctx, range, Some(100.0), FlexWrap::Wrap, 0.0, axes());
    assert_eq!(lines.len(), 2);
    assert_eq!(ctx.lines[0].count, 1);
  }

  #[test]
  fn test_wrap_reverse_breaks_in_document_order() {
    // Breaking is identical for wrap and wrap-reverse; the cross-axis
    // flip happens when lines are placed, not here.
    let (mut ctx, range) = setup(&[40.0, 40.0, 40.0]);
    let lines = break_lines(
      &mut ctx,
      range,
      Some(100.0),
      FlexWrap::WrapReverse,
      0.0,
      axes(),
    );
    assert_eq!(lines.len(), 2);
    assert_eq!(ctx.lines[0].count, 2);
    assert_eq!(ctx.lines[0].first, 0);
    assert_eq!(ctx.lines[1].count, 1);
    assert_eq!(ctx.lines[1].first, 2);
    assert_eq!(ctx.items[0].line, 0);
    assert_eq!(ctx.items[1].line, 0);
    assert_eq!(ctx.items[2].line, 1);
  }

  #[test]
  fn test_zero_items_single_empty_line() {
    let (mut ctx, range) = setup(&[]);
    let lines = break_lines(&mut ctx, range, Some(100.0), FlexWrap::Wrap, 0.0, axes());
    assert_eq!(lines.len(), 1);
    assert_eq!(ctx.lines[0].count, 0);
  }
}
