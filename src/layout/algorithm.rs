//! The recursive layout pass
//!
//! One routine, [`layout_node`], runs per node in one of two modes.
//! `ComputeSize` answers "how big would this node be under these
//! constraints" without touching the node's stored layout; parents use it
//! to learn flex base sizes and content-driven cross sizes. `PerformLayout`
//! is the authoritative pass: the parent has fixed the node's border-box
//! size (after flex distribution) and its absolute placement, and the node
//! lays out its own children, stores its result, and refreshes its
//! fingerprint.
//!
//! Keeping the parent's post-distribution override inside the constraint
//! (the final call always carries `Constraint::Exact`) means the
//! fingerprint captures everything that determined the stored layout; a
//! later pass can only reuse the result when the same final size and
//! placement come around again.

use crate::error::Result;
use crate::geometry::{FlexAxes, Point, Size};
use crate::layout::box_model::BoxMetrics;
use crate::layout::cache::Fingerprint;
use crate::layout::context::{with_context, FlexItem, LayoutContext};
use crate::layout::distribute::distribute_line;
use crate::layout::line::break_lines;
use crate::layout::position::{cross_offset_in_line, position_line_main, resolve_align_content};
use crate::layout::resolve::{
  apply_aspect_ratio, apply_min_max, clamp_with_order, resolve_offsets, start_is_left,
};
use crate::layout::rounding::{round_box, ComputedLayout};
use crate::node::{MeasureFunc, Node};
use crate::style::types::{Align, Direction, Display, FlexWrap, Justify, PositionType};
use crate::style::values::{AvailableSpace, Constraint};
use crate::style::Style;

/// What a recursive call is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutMode {
  /// Fix sizes and positions, store results, clear dirtiness
  PerformLayout,
  /// Report a size only; stored layout stays untouched
  ComputeSize,
}

/// Everything a recursive call needs to know about its situation
#[derive(Debug, Clone, Copy)]
struct LayoutInputs {
  /// Border-box width constraint
  width: Constraint,
  /// Border-box height constraint
  height: Constraint,
  /// Parent content-box width, the percent base for horizontal values
  /// (and for margins/padding on all four edges)
  owner_width: Option<f32>,
  /// Parent content-box height, the percent base for vertical values
  owner_height: Option<f32>,
  direction: Direction,
  mode: LayoutMode,
  /// Root-relative unrounded origin of this node's border box
  origin: Point,
}

/// Resolved min/max bounds of one node, border-box
#[derive(Debug, Clone, Copy, Default)]
struct SizeBounds {
  min_w: Option<f32>,
  max_w: Option<f32>,
  min_h: Option<f32>,
  max_h: Option<f32>,
}

impl SizeBounds {
  fn main(&self, axes: FlexAxes) -> (Option<f32>, Option<f32>) {
    if axes.main_horizontal() {
      (self.min_w, self.max_w)
    } else {
      (self.min_h, self.max_h)
    }
  }

  fn cross(&self, axes: FlexAxes) -> (Option<f32>, Option<f32>) {
    if axes.main_horizontal() {
      (self.min_h, self.max_h)
    } else {
      (self.min_w, self.max_w)
    }
  }
}

/// Top-level layout entry point; see [`Node::calculate_layout`]
pub(crate) fn calculate_layout(
  root: &Node,
  width: AvailableSpace,
  height: AvailableSpace,
  direction: Direction,
) -> Result<()> {
  let width = sanitize(width);
  let height = sanitize(height);
  with_context(|ctx| {
    let style = root.inner().style;
    let inputs = LayoutInputs {
      width: root_constraint(&style, Axis::Horizontal, width.value()),
      height: root_constraint(&style, Axis::Vertical, height.value()),
      owner_width: width.value(),
      owner_height: height.value(),
      direction,
      mode: LayoutMode::PerformLayout,
      origin: Point::ZERO,
    };
    // A clean root under identical inputs already holds the right
    // unrounded and rounded results; the whole call is a no-op.
    {
      let inner = root.inner();
      if !inner.state.dirty && inner.state.layout_valid {
        if let Some(fp) = inner.state.fingerprint {
          if fp.sizing_matches(inputs.width, inputs.height, inputs.direction)
            && fp.origin == Point::ZERO
          {
            return;
          }
        }
      }
    }
    ctx.begin_call();
    layout_node(root, &inputs, ctx);
    root.inner_mut().state.origin = Point::ZERO;
    round_subtree(root);
  })
}

/// NaN or negative available space degrades to the nearest valid input
fn sanitize(space: AvailableSpace) -> AvailableSpace {
  match space {
    AvailableSpace::Definite(value) if value.is_finite() => {
      AvailableSpace::Definite(value.max(0.0))
    }
    _ => AvailableSpace::Unconstrained,
  }
}

enum Axis {
  Horizontal,
  Vertical,
}

/// Maps the root's style and the caller's available space to a constraint
///
/// A definite styled size pins the root; otherwise definite available
/// space does (the root fills the viewport it was given); otherwise a max
/// bound caps content-driven sizing.
fn root_constraint(style: &Style, axis: Axis, available: Option<f32>) -> Constraint {
  let (styled, min, max) = match axis {
    Axis::Horizontal => (style.width, style.min_width, style.max_width),
    Axis::Vertical => (style.height, style.min_height, style.max_height),
  };
  let min = min.resolve(available);
  let max = max.resolve(available);
  if let Some(value) = styled.resolve(available) {
    return Constraint::Exact(clamp_with_order(value, min, max).max(0.0));
  }
  match available {
    Some(value) => Constraint::Exact(clamp_with_order(value, min, max).max(0.0)),
    None => match max {
      Some(cap) => Constraint::AtMost(cap.max(0.0)),
      None => Constraint::Unconstrained,
    },
  }
}

fn layout_node(node: &Node, inputs: &LayoutInputs, ctx: &mut LayoutContext) -> Size {
  let (style, dirty, layout_valid, fingerprint, stored_size) = {
    let inner = node.inner();
    (
      inner.style,
      inner.state.dirty,
      inner.state.layout_valid,
      inner.state.fingerprint,
      inner.state.size,
    )
  };

  if style.display == Display::None {
    if inputs.mode == LayoutMode::PerformLayout {
      zero_layout(node, inputs);
    }
    return Size::ZERO;
  }

  match inputs.mode {
    LayoutMode::PerformLayout => {
      if !dirty && layout_valid {
        if let Some(fp) = fingerprint {
          if fp.sizing_matches(inputs.width, inputs.height, inputs.direction) {
            if fp.origin == inputs.origin {
              return stored_size;
            }
            // Same sizing inputs, new placement: shift the stored
            // absolute positions without recomputing any size.
            let delta = Point::new(inputs.origin.x - fp.origin.x, inputs.origin.y - fp.origin.y);
            shift_subtree(node, delta);
            node.inner_mut().state.has_new_layout = true;
            return stored_size;
          }
        }
      }
    }
    LayoutMode::ComputeSize => {
      let cached = node
        .inner()
        .state
        .sizing_cache
        .get(inputs.width, inputs.height, ctx.epoch);
      if let Some(size) = cached {
        return size;
      }
      // A clean authoritative layout under the same sizing inputs also
      // answers the question.
      if !dirty && layout_valid {
        if let Some(fp) = fingerprint {
          if fp.sizing_matches(inputs.width, inputs.height, inputs.direction) {
            return stored_size;
          }
        }
      }
    }
  }

  let size = compute_node(node, &style, inputs, ctx);

  match inputs.mode {
    LayoutMode::PerformLayout => {
      let mut inner = node.inner_mut();
      inner.state.size = size;
      inner.state.absolute = inputs.origin;
      inner.state.fingerprint = Some(Fingerprint {
        width: inputs.width,
        height: inputs.height,
        direction: inputs.direction,
        origin: inputs.origin,
      });
      inner.state.dirty = false;
      inner.state.layout_valid = true;
      inner.state.has_new_layout = true;
    }
    LayoutMode::ComputeSize => {
      node
        .inner_mut()
        .state
        .sizing_cache
        .store(inputs.width, inputs.height, ctx.epoch, size);
    }
  }
  size
}

fn zero_layout(node: &Node, inputs: &LayoutInputs) {
  let mut inner = node.inner_mut();
  inner.state.size = Size::ZERO;
  inner.state.origin = Point::ZERO;
  inner.state.absolute = inputs.origin;
  inner.state.computed = ComputedLayout::ZERO;
  inner.state.fingerprint = Some(Fingerprint {
    width: inputs.width,
    height: inputs.height,
    direction: inputs.direction,
    origin: inputs.origin,
  });
  inner.state.dirty = false;
  inner.state.layout_valid = true;
  inner.state.has_new_layout = true;
}

/// Translates a clean subtree's absolute bookkeeping by `delta`
///
/// Relative origins are parent-relative and unaffected; only the
/// root-relative positions (and the origins recorded in fingerprints)
/// move.
fn shift_subtree(node: &Node, delta: Point) {
  let mut stack = vec![node.clone()];
  while let Some(current) = stack.pop() {
    let mut inner = current.inner_mut();
    inner.state.absolute = inner.state.absolute.translate(delta);
    if let Some(fp) = inner.state.fingerprint.as_mut() {
      fp.origin = fp.origin.translate(delta);
    }
    stack.extend(inner.children.iter().cloned());
  }
}

/// Rebuilds every node's rounded layout from the authoritative unrounded
/// absolute positions (iterative walk)
fn round_subtree(root: &Node) {
  let mut stack: Vec<(Node, Point)> = vec![(root.clone(), Point::ZERO)];
  while let Some((node, parent_abs)) = stack.pop() {
    let mut inner = node.inner_mut();
    if inner.style.display == Display::None {
      inner.state.computed = ComputedLayout::ZERO;
      continue;
    }
    let abs = inner.state.absolute;
    inner.state.computed = round_box(parent_abs, abs, inner.state.size);
    let children = inner.children.clone();
    drop(inner);
    for child in children {
      stack.push((child, abs));
    }
  }
}

/// The start/end edge mapping for a node's own padding and offsets
fn edge_mapping(style: &Style, direction: Direction) -> bool {
  let row_reversed = style.flex_direction.is_row() && style.flex_direction.is_reverse();
  start_is_left(row_reversed, direction == Direction::Rtl)
}

fn valid_ratio(ratio: Option<f32>) -> Option<f32> {
  ratio.filter(|r| r.is_finite() && *r > 0.0)
}

fn compute_node(node: &Node, style: &Style, inputs: &LayoutInputs, ctx: &mut LayoutContext) -> Size {
  let start_maps_left = edge_mapping(style, inputs.direction);
  let metrics = BoxMetrics::compute(style, inputs.owner_width, start_maps_left);

  let bounds = SizeBounds {
    min_w: style.min_width.resolve(inputs.owner_width),
    max_w: style.max_width.resolve(inputs.owner_width),
    min_h: style.min_height.resolve(inputs.owner_height),
    max_h: style.max_height.resolve(inputs.owner_height),
  };

  let styled_w = style.width.resolve(inputs.owner_width);
  let styled_h = style.height.resolve(inputs.owner_height);
  let (styled_w, styled_h) = apply_aspect_ratio(styled_w, styled_h, style.aspect_ratio);

  // An exact constraint pins the border box outright; otherwise the
  // node's own styled size (clamped) does.
  let known_w = match inputs.width {
    Constraint::Exact(value) => Some(value),
    _ => styled_w.map(|v| clamp_with_order(v, bounds.min_w, bounds.max_w)),
  };
  let known_h = match inputs.height {
    Constraint::Exact(value) => Some(value),
    _ => styled_h.map(|v| clamp_with_order(v, bounds.min_h, bounds.max_h)),
  };
  let (known_w, known_h) = apply_aspect_ratio(known_w, known_h, style.aspect_ratio);

  if inputs.mode == LayoutMode::ComputeSize {
    if let (Some(w), Some(h)) = (known_w, known_h) {
      return Size::new(w.max(0.0), h.max(0.0));
    }
  }

  let (has_children, measure) = {
    let inner = node.inner();
    (!inner.children.is_empty(), inner.measure.clone())
  };

  if let Some(measure) = measure {
    return measure_leaf(node, style, &metrics, inputs, known_w, known_h, &bounds, measure);
  }

  if !has_children {
    let width = apply_min_max(known_w, bounds.min_w, bounds.max_w).unwrap_or(0.0);
    let height = apply_min_max(known_h, bounds.min_h, bounds.max_h).unwrap_or(0.0);
    return Size::new(
      metrics.floor_outer_width(width.max(0.0)),
      metrics.floor_outer_height(height.max(0.0)),
    );
  }

  flex_layout(node, style, &metrics, inputs, known_w, known_h, &bounds, ctx)
}

#[allow(clippy::too_many_arguments)]
fn measure_leaf(
  node: &Node,
  style: &Style,
  metrics: &BoxMetrics,
  inputs: &LayoutInputs,
  known_w: Option<f32>,
  known_h: Option<f32>,
  bounds: &SizeBounds,
  measure: MeasureFunc,
) -> Size {
  let inner_w = metrics.inner_horizontal();
  let inner_h = metrics.inner_vertical();

  // The callback works in content-box dimensions.
  let width_c = match known_w {
    Some(w) => Constraint::Exact((w - inner_w).max(0.0)),
    None => inputs.width.shrink(inner_w),
  };
  let height_c = match known_h {
    Some(h) => Constraint::Exact((h - inner_h).max(0.0)),
    None => inputs.height.shrink(inner_h),
  };

  let cached = node.inner().state.measure_cache.get(width_c, height_c);
  let content = match cached {
    Some(size) => size,
    None => {
      let measured = measure(
        width_c.available().unwrap_or(f32::NAN),
        width_c.measure_mode(),
        height_c.available().unwrap_or(f32::NAN),
        height_c.measure_mode(),
      );
      let measured = Size {
        width: if measured.width.is_finite() {
          measured.width.max(0.0)
        } else {
          0.0
        },
        height: if measured.height.is_finite() {
          measured.height.max(0.0)
        } else {
          0.0
        },
      };
      node
        .inner_mut()
        .state
        .measure_cache
        .store(width_c, height_c, measured);
      measured
    }
  };

  let mut width = known_w.unwrap_or(content.width + inner_w);
  let mut height = known_h.unwrap_or(content.height + inner_h);
  if let Some(ratio) = valid_ratio(style.aspect_ratio) {
    if known_w.is_none() && known_h.is_none() {
      height = width / ratio;
    }
  }
  if known_w.is_none() {
    if let Constraint::AtMost(cap) = inputs.width {
      width = width.min(cap);
    }
  }
  if known_h.is_none() {
    if let Constraint::AtMost(cap) = inputs.height {
      height = height.min(cap);
    }
  }
  Size::new(
    metrics.floor_outer_width(clamp_with_order(width, bounds.min_w, bounds.max_w).max(0.0)),
    metrics.floor_outer_height(clamp_with_order(height, bounds.min_h, bounds.max_h).max(0.0)),
  )
}

#[allow(clippy::too_many_arguments)]
fn flex_layout(
  node: &Node,
  style: &Style,
  metrics: &BoxMetrics,
  inputs: &LayoutInputs,
  known_w: Option<f32>,
  known_h: Option<f32>,
  bounds: &SizeBounds,
  ctx: &mut LayoutContext,
) -> Size {
  let axes = FlexAxes::new(style.flex_direction, inputs.direction);
  let rtl = inputs.direction == Direction::Rtl;
  let child_edge_map = start_is_left(
    style.flex_direction.is_row() && style.flex_direction.is_reverse(),
    rtl,
  );
  let horizontal = axes.main_horizontal();

  let content_w = known_w.map(|w| (w - metrics.inner_horizontal()).max(0.0));
  let content_h = known_h.map(|h| (h - metrics.inner_vertical()).max(0.0));
  let cap_w = match known_w {
    Some(_) => None,
    None => inputs
      .width
      .available()
      .map(|v| (v - metrics.inner_horizontal()).max(0.0)),
  };
  let cap_h = match known_h {
    Some(_) => None,
    None => inputs
      .height
      .available()
      .map(|v| (v - metrics.inner_vertical()).max(0.0)),
  };

  let main_known = if horizontal { content_w } else { content_h };
  let cross_known = if horizontal { content_h } else { content_w };
  let main_cap = main_known.or(if horizontal { cap_w } else { cap_h });
  let cross_cap = cross_known.or(if horizontal { cap_h } else { cap_w });

  let main_gap = if horizontal {
    style.column_gap
  } else {
    style.row_gap
  };
  let cross_gap = if horizontal {
    style.row_gap
  } else {
    style.column_gap
  };

  let children: Vec<Node> = node.inner().children.clone();
  let items_mark = ctx.items_mark();

  // Pass 1: flex base sizes.
  for (index, child) in children.iter().enumerate() {
    let cs = child.inner().style;
    if cs.display == Display::None {
      if inputs.mode == LayoutMode::PerformLayout {
        zero_layout(
          child,
          &LayoutInputs {
            width: Constraint::Unconstrained,
            height: Constraint::Unconstrained,
            owner_width: content_w,
            owner_height: content_h,
            direction: inputs.direction,
            mode: LayoutMode::PerformLayout,
            origin: inputs.origin,
          },
        );
      }
      continue;
    }
    if cs.position_type == PositionType::Absolute {
      continue;
    }

    let cm = BoxMetrics::compute(&cs, content_w, child_edge_map);
    let (min_main, max_main, min_cross, max_cross) = if horizontal {
      (
        cs.min_width.resolve(content_w),
        cs.max_width.resolve(content_w),
        cs.min_height.resolve(content_h),
        cs.max_height.resolve(content_h),
      )
    } else {
      (
        cs.min_height.resolve(content_h),
        cs.max_height.resolve(content_h),
        cs.min_width.resolve(content_w),
        cs.max_width.resolve(content_w),
      )
    };

    let styled_w = cs.width.resolve(content_w);
    let styled_h = cs.height.resolve(content_h);
    let (styled_w, styled_h) = apply_aspect_ratio(styled_w, styled_h, cs.aspect_ratio);
    let (styled_main, styled_cross) = if horizontal {
      (styled_w, styled_h)
    } else {
      (styled_h, styled_w)
    };

    let basis = cs.flex_basis.resolve(main_known);
    let base = match basis.or(styled_main) {
      Some(b) => {
        if horizontal {
          cm.floor_outer_width(b)
        } else {
          cm.floor_outer_height(b)
        }
      }
      None => {
        let main_c = match main_cap {
          Some(cap) => Constraint::AtMost((cap - axes.main_sum(cm.margin)).max(0.0)),
          None => Constraint::Unconstrained,
        };
        let cross_c = match styled_cross {
          Some(c) => Constraint::Exact(clamp_with_order(c, min_cross, max_cross).max(0.0)),
          None => match cross_cap {
            Some(cap) => Constraint::AtMost((cap - axes.cross_sum(cm.margin)).max(0.0)),
            None => Constraint::Unconstrained,
          },
        };
        let (wc, hc) = if horizontal {
          (main_c, cross_c)
        } else {
          (cross_c, main_c)
        };
        let measured = layout_node(
          child,
          &LayoutInputs {
            width: wc,
            height: hc,
            owner_width: content_w,
            owner_height: content_h,
            direction: inputs.direction,
            mode: LayoutMode::ComputeSize,
            origin: Point::ZERO,
          },
          ctx,
        );
        axes.main(measured)
      }
    };

    let align = if cs.align_self == Align::Auto {
      style.align_items
    } else {
      cs.align_self
    };

    ctx.items.push(FlexItem {
      node: child.clone(),
      child_index: index,
      base,
      min: min_main,
      max: max_main,
      cross_min: min_cross,
      cross_max: max_cross,
      cross_styled: styled_cross,
      grow: cs.flex_grow,
      shrink: cs.flex_shrink,
      frozen: false,
      violation: 0.0,
      target: base,
      cross: 0.0,
      margin: cm.margin,
      margin_auto: cm.margin_auto,
      align,
      line: 0,
      main_pos: 0.0,
      cross_pos: 0.0,
      baseline: 0.0,
    });
  }
  let item_range = items_mark..ctx.items_mark();

  // Pass 2: line breaking.
  let line_range = break_lines(
    ctx,
    item_range.clone(),
    main_cap,
    style.flex_wrap,
    main_gap,
    axes,
  );

  // Pass 3: the container's main content size. When auto, shrink-wrap
  // around the widest line using *clamped* item sizes, then run the
  // container's own min/max and box-model floor over the result.
  let inner_main = if horizontal {
    metrics.inner_horizontal()
  } else {
    metrics.inner_vertical()
  };
  let inner_cross = if horizontal {
    metrics.inner_vertical()
  } else {
    metrics.inner_horizontal()
  };
  let content_main = match main_known {
    Some(m) => m,
    None => {
      let mut widest = 0.0_f32;
      for li in line_range.clone() {
        let line = ctx.lines[li];
        let mut used = 0.0;
        for (position, ii) in (line.first..line.first + line.count).enumerate() {
          if position > 0 {
            used += main_gap;
          }
          let item = &ctx.items[ii];
          used += clamp_with_order(item.base, item.min, item.max).max(0.0) + item.main_margin(axes);
        }
        widest = widest.max(used);
      }
      let widest = match main_cap {
        Some(cap) => widest.min(cap),
        None => widest,
      };
      let (bmin, bmax) = bounds.main(axes);
      (clamp_with_order(widest + inner_main, bmin, bmax).max(inner_main) - inner_main).max(0.0)
    }
  };

  // Pass 4: resolve flexible lengths per line.
  for li in line_range.clone() {
    let line = ctx.lines[li];
    let slice = &mut ctx.items[line.first..line.first + line.count];
    let mut base_used = 0.0;
    for (position, item) in slice.iter().enumerate() {
      if position > 0 {
        base_used += main_gap;
      }
      base_used += item.base + item.main_margin(axes);
    }
    distribute_line(slice, content_main - base_used);
  }

  // Pass 5: hypothetical cross sizes (styled, ratio-derived, or measured
  // under the now-final main size).
  for ii in item_range.clone() {
    let (child, target, styled_cross, min_cross, max_cross, margin) = {
      let item = &ctx.items[ii];
      (
        item.node.clone(),
        item.target,
        item.cross_styled,
        item.cross_min,
        item.cross_max,
        item.margin,
      )
    };
    let ratio = valid_ratio(child.inner().style.aspect_ratio);
    let cross = if let Some(c) = styled_cross {
      clamp_with_order(c, min_cross, max_cross).max(0.0)
    } else if let Some(r) = ratio {
      let derived = if horizontal { target / r } else { target * r };
      clamp_with_order(derived, min_cross, max_cross).max(0.0)
    } else {
      let cross_c = match cross_cap {
        Some(cap) => Constraint::AtMost((cap - axes.cross_sum(margin)).max(0.0)),
        None => Constraint::Unconstrained,
      };
      let main_c = Constraint::Exact(target);
      let (wc, hc) = if horizontal {
        (main_c, cross_c)
      } else {
        (cross_c, main_c)
      };
      let measured = layout_node(
        &child,
        &LayoutInputs {
          width: wc,
          height: hc,
          owner_width: content_w,
          owner_height: content_h,
          direction: inputs.direction,
          mode: LayoutMode::ComputeSize,
          origin: Point::ZERO,
        },
        ctx,
      );
      clamp_with_order(axes.cross(measured), min_cross, max_cross).max(0.0)
    };
    ctx.items[ii].cross = cross;
  }

  // Baselines, row containers only.
  let baseline_relevant = horizontal;
  if baseline_relevant {
    for ii in item_range.clone() {
      if ctx.items[ii].align != Align::Baseline {
        continue;
      }
      let (child, width, height, margin_top) = {
        let item = &ctx.items[ii];
        let size = axes.pack(item.target, item.cross);
        (item.node.clone(), size.width, size.height, item.margin.top)
      };
      // A container's baseline comes from its laid-out children, so give
      // it an authoritative pass at its hypothetical size now. The final
      // placement pass sees the same size and only shifts the origin.
      let needs_layout = {
        let inner = child.inner();
        inner.baseline.is_none() && !inner.children.is_empty()
      };
      if needs_layout && inputs.mode == LayoutMode::PerformLayout {
        layout_node(
          &child,
          &LayoutInputs {
            width: Constraint::Exact(width),
            height: Constraint::Exact(height),
            owner_width: content_w,
            owner_height: content_h,
            direction: inputs.direction,
            mode: LayoutMode::PerformLayout,
            origin: inputs.origin,
          },
          ctx,
        );
      }
      ctx.items[ii].baseline = margin_top + baseline_of(&child, width, height);
    }
  }

  // Pass 6: line cross sizes. Baseline-aligned items contribute their
  // above- and below-baseline extents separately.
  for li in line_range.clone() {
    let line = ctx.lines[li];
    let mut cross = 0.0_f32;
    let mut max_baseline = 0.0_f32;
    let mut below = 0.0_f32;
    let mut has_baseline = false;
    for ii in line.first..line.first + line.count {
      let item = &ctx.items[ii];
      let outer = item.outer_cross(axes);
      let (start_auto, end_auto) = item.cross_margin_auto(axes);
      if baseline_relevant && item.align == Align::Baseline && !start_auto && !end_auto {
        has_baseline = true;
        max_baseline = max_baseline.max(item.baseline);
        below = below.max(outer - item.baseline);
      } else {
        cross = cross.max(outer);
      }
    }
    if has_baseline {
      cross = cross.max(max_baseline + below);
    }
    ctx.lines[li].cross_size = cross;
    ctx.lines[li].max_baseline = max_baseline;
  }

  // A single line spans the container's whole definite cross size.
  let single_line = line_range.len() == 1;
  if single_line {
    if let Some(c) = cross_known {
      ctx.lines[line_range.start].cross_size = c;
    }
  }

  // Pass 7: cross content size and line placement (align-content).
  let line_count = line_range.len();
  let mut raw_cross = 0.0;
  for (position, li) in line_range.clone().enumerate() {
    if position > 0 {
      raw_cross += cross_gap;
    }
    raw_cross += ctx.lines[li].cross_size;
  }
  let content_cross = match cross_known {
    Some(c) => c,
    None => {
      let capped = match cross_cap {
        Some(cap) => raw_cross.min(cap),
        None => raw_cross,
      };
      let (bmin, bmax) = bounds.cross(axes);
      (clamp_with_order(capped + inner_cross, bmin, bmax).max(inner_cross) - inner_cross).max(0.0)
    }
  };
  let (plan, stretch_extra) =
    resolve_align_content(style.align_content, content_cross - raw_cross, line_count);
  let mut cursor = plan.lead;
  for (position, li) in line_range.clone().enumerate() {
    if position > 0 {
      cursor += cross_gap + plan.between;
    }
    ctx.lines[li].cross_size += stretch_extra;
    ctx.lines[li].cross_offset = cursor;
    cursor += ctx.lines[li].cross_size;
  }
  // wrap-reverse stacks lines from the cross end: mirror each line's
  // offset against the content box. Leftover cross space ends up before
  // the first line instead of after the last.
  if style.flex_wrap == FlexWrap::WrapReverse {
    for li in line_range.clone() {
      let line = &mut ctx.lines[li];
      line.cross_offset = content_cross - line.cross_offset - line.cross_size;
    }
  }

  // Pass 8: per-item cross stretch and cross positions.
  for ii in item_range.clone() {
    let line = ctx.lines[ctx.items[ii].line];
    let (start_auto, end_auto) = ctx.items[ii].cross_margin_auto(axes);
    if ctx.items[ii].align == Align::Stretch
      && ctx.items[ii].cross_styled.is_none()
      && !start_auto
      && !end_auto
    {
      let margin = ctx.items[ii].cross_margin(axes);
      let (min_cross, max_cross) = (ctx.items[ii].cross_min, ctx.items[ii].cross_max);
      ctx.items[ii].cross =
        clamp_with_order((line.cross_size - margin).max(0.0), min_cross, max_cross).max(0.0);
    }
    let within = cross_offset_in_line(
      &ctx.items[ii],
      axes,
      line.cross_size,
      line.max_baseline,
      baseline_relevant,
    );
    ctx.items[ii].cross_pos = line.cross_offset + within;
  }
  if axes.cross_reversed() {
    for ii in item_range.clone() {
      let item = &mut ctx.items[ii];
      item.cross_pos = content_cross - item.cross_pos - item.cross;
    }
  }

  // Pass 9: main positions (justify-content, auto margins, gaps), then
  // mirror for reversed main axes.
  for li in line_range.clone() {
    let line = ctx.lines[li];
    let slice = &mut ctx.items[line.first..line.first + line.count];
    position_line_main(slice, axes, content_main, style.justify_content, main_gap);
  }
  if axes.main_reversed() {
    for ii in item_range.clone() {
      let item = &mut ctx.items[ii];
      item.main_pos = content_main - item.main_pos - item.target;
    }
  }

  let border_main = content_main + inner_main;
  let border_cross = content_cross + inner_cross;
  let size = axes.pack(border_main, border_cross);
  let size = Size::new(
    metrics.floor_outer_width(size.width),
    metrics.floor_outer_height(size.height),
  );

  // Pass 10: authoritative child placement.
  if inputs.mode == LayoutMode::PerformLayout {
    let content_origin = Point::new(metrics.inner().left, metrics.inner().top);
    for ii in item_range.clone() {
      let (child, target, cross, main_pos, cross_pos) = {
        let item = &ctx.items[ii];
        (
          item.node.clone(),
          item.target,
          item.cross,
          item.main_pos,
          item.cross_pos,
        )
      };
      let mut rel = content_origin.translate(axes.point(main_pos, cross_pos));
      let cs = child.inner().style;
      if cs.position_type == PositionType::Relative {
        let offsets = resolve_offsets(&cs.position, content_w, content_h, child_edge_map);
        let dx = match (offsets.left, offsets.right) {
          (Some(left), _) => left,
          (None, Some(right)) => -right,
          _ => 0.0,
        };
        let dy = match (offsets.top, offsets.bottom) {
          (Some(top), _) => top,
          (None, Some(bottom)) => -bottom,
          _ => 0.0,
        };
        rel = rel.translate(Point::new(dx, dy));
      }
      let child_size = axes.pack(target, cross);
      layout_node(
        &child,
        &LayoutInputs {
          width: Constraint::Exact(child_size.width),
          height: Constraint::Exact(child_size.height),
          owner_width: content_w,
          owner_height: content_h,
          direction: inputs.direction,
          mode: LayoutMode::PerformLayout,
          origin: inputs.origin.translate(rel),
        },
        ctx,
      );
      child.inner_mut().state.origin = rel;
    }

    for child in &children {
      let absolute = {
        let inner = child.inner();
        inner.style.display != Display::None
          && inner.style.position_type == PositionType::Absolute
      };
      if absolute {
        place_absolute(child, style, metrics, size, inputs, child_edge_map, axes, ctx);
      }
    }
  }

  ctx.release_items(items_mark);
  ctx.release_lines(line_range.start);
  size
}

/// A node's baseline offset from its border-box top
///
/// Uses the baseline callback when installed; a row container delegates
/// to its first in-flow child's last laid-out position when available;
/// everything else reports its own height.
fn baseline_of(node: &Node, width: f32, height: f32) -> f32 {
  let (func, style) = {
    let inner = node.inner();
    (inner.baseline.clone(), inner.style)
  };
  if let Some(func) = func {
    return func(width, height);
  }
  if style.flex_direction.is_row() {
    let candidate = {
      let inner = node.inner();
      inner
        .children
        .iter()
        .find(|child| {
          let ci = child.inner();
          ci.style.display != Display::None
            && ci.style.position_type != PositionType::Absolute
            && ci.state.layout_valid
        })
        .map(|child| {
          let ci = child.inner();
          (child.clone(), ci.state.origin.y, ci.state.size)
        })
    };
    if let Some((child, top, size)) = candidate {
      return top + baseline_of(&child, size.width, size.height);
    }
  }
  height
}

/// Places one absolutely positioned child against the parent's padding box
#[allow(clippy::too_many_arguments)]
fn place_absolute(
  child: &Node,
  parent_style: &Style,
  metrics: &BoxMetrics,
  parent_size: Size,
  inputs: &LayoutInputs,
  edge_map: bool,
  axes: FlexAxes,
  ctx: &mut LayoutContext,
) {
  let cs = child.inner().style;
  let pad_origin = Point::new(metrics.border.left, metrics.border.top);
  let pad_w = (parent_size.width - metrics.border.horizontal()).max(0.0);
  let pad_h = (parent_size.height - metrics.border.vertical()).max(0.0);

  let cm = BoxMetrics::compute(&cs, Some(pad_w), edge_map);
  let offsets = resolve_offsets(&cs.position, Some(pad_w), Some(pad_h), edge_map);

  let min_w = cs.min_width.resolve(Some(pad_w));
  let max_w = cs.max_width.resolve(Some(pad_w));
  let min_h = cs.min_height.resolve(Some(pad_h));
  let max_h = cs.max_height.resolve(Some(pad_h));

  let styled_w = cs.width.resolve(Some(pad_w));
  let styled_h = cs.height.resolve(Some(pad_h));
  let (styled_w, styled_h) = apply_aspect_ratio(styled_w, styled_h, cs.aspect_ratio);

  // Both opposing offsets set with an auto size: stretch between them.
  let mut width = styled_w;
  if width.is_none() {
    if let (Some(left), Some(right)) = (offsets.left, offsets.right) {
      width = Some((pad_w - left - right - cm.margin.horizontal()).max(0.0));
    }
  }
  let mut height = styled_h;
  if height.is_none() {
    if let (Some(top), Some(bottom)) = (offsets.top, offsets.bottom) {
      height = Some((pad_h - top - bottom - cm.margin.vertical()).max(0.0));
    }
  }
  let (width, height) = apply_aspect_ratio(width, height, cs.aspect_ratio);

  let size = if width.is_none() || height.is_none() {
    let wc = match width {
      Some(w) => Constraint::Exact(w),
      None => Constraint::AtMost((pad_w - cm.margin.horizontal()).max(0.0)),
    };
    let hc = match height {
      Some(h) => Constraint::Exact(h),
      None => Constraint::AtMost((pad_h - cm.margin.vertical()).max(0.0)),
    };
    let measured = layout_node(
      child,
      &LayoutInputs {
        width: wc,
        height: hc,
        owner_width: Some(pad_w),
        owner_height: Some(pad_h),
        direction: inputs.direction,
        mode: LayoutMode::ComputeSize,
        origin: Point::ZERO,
      },
      ctx,
    );
    Size::new(
      width.unwrap_or(measured.width),
      height.unwrap_or(measured.height),
    )
  } else {
    Size::new(width.unwrap_or(0.0), height.unwrap_or(0.0))
  };
  let size = Size::new(
    clamp_with_order(size.width, min_w, max_w).max(0.0),
    clamp_with_order(size.height, min_h, max_h).max(0.0),
  );

  let align = if cs.align_self == Align::Auto {
    parent_style.align_items
  } else {
    cs.align_self
  };
  let free_x = pad_w - size.width - cm.margin.horizontal();
  let free_y = pad_h - size.height - cm.margin.vertical();

  let x = if let Some(left) = offsets.left {
    pad_origin.x + left + cm.margin.left
  } else if let Some(right) = offsets.right {
    pad_origin.x + pad_w - right - size.width - cm.margin.right
  } else {
    let fallback = if axes.main_horizontal() {
      justify_fallback(parent_style.justify_content, free_x, axes.main_reversed())
    } else {
      align_fallback(align, free_x)
    };
    pad_origin.x + cm.margin.left + fallback
  };
  let y = if let Some(top) = offsets.top {
    pad_origin.y + top + cm.margin.top
  } else if let Some(bottom) = offsets.bottom {
    pad_origin.y + pad_h - bottom - size.height - cm.margin.bottom
  } else {
    let fallback = if axes.main_horizontal() {
      align_fallback(align, free_y)
    } else {
      justify_fallback(parent_style.justify_content, free_y, axes.main_reversed())
    };
    pad_origin.y + cm.margin.top + fallback
  };

  let rel = Point::new(x, y);
  layout_node(
    child,
    &LayoutInputs {
      width: Constraint::Exact(size.width),
      height: Constraint::Exact(size.height),
      owner_width: Some(pad_w),
      owner_height: Some(pad_h),
      direction: inputs.direction,
      mode: LayoutMode::PerformLayout,
      origin: inputs.origin.translate(rel),
    },
    ctx,
  );
  child.inner_mut().state.origin = rel;
}

/// Offset an unset-offset absolute child gets from the parent's
/// justify-content on that axis
fn justify_fallback(justify: Justify, free: f32, reversed: bool) -> f32 {
  let forward = match justify {
    Justify::FlexEnd => free,
    Justify::Center => free / 2.0,
    _ => 0.0,
  };
  if reversed {
    free - forward
  } else {
    forward
  }
}

/// Offset an unset-offset absolute child gets from cross alignment
fn align_fallback(align: Align, free: f32) -> f32 {
  match align {
    Align::FlexEnd => free,
    Align::Center => free / 2.0,
    _ => 0.0,
  }
}
