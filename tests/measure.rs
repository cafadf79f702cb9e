//! Measurement callbacks, memoization, and aspect-ratio sizing

use std::cell::Cell;
use std::rc::Rc;

use flexlay::{
  AvailableSpace, Dimension, Direction, LayoutError, MeasureFunc, MeasureMode, Node, Size,
};

fn layout(root: &Node, width: AvailableSpace) {
  root
    .calculate_layout(width, AvailableSpace::Unconstrained, Direction::Ltr)
    .unwrap();
}

/// A text-like leaf with a fixed content area of 1000 square pixels and a
/// preferred width of 100
fn text_measure() -> MeasureFunc {
  Rc::new(|width, width_mode, _height, _height_mode| {
    let width = match width_mode {
      MeasureMode::Exactly => width,
      MeasureMode::AtMost => width.min(100.0),
      MeasureMode::Undefined => 100.0,
    };
    let width = width.max(1.0);
    Size::new(width, 1000.0 / width)
  })
}

#[test]
fn test_leaf_reports_intrinsic_size() {
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_measure_func(Some(text_measure()));
  root.add_child(&leaf);
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(leaf.layout_width(), 100.0);
  assert_eq!(leaf.layout_height(), 10.0);
  assert_eq!(root.layout_width(), 100.0);
}

#[test]
fn test_leaf_rewraps_under_narrow_container() {
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_measure_func(Some(text_measure()));
  root.add_child(&leaf);
  layout(&root, AvailableSpace::Definite(50.0));
  assert_eq!(leaf.layout_width(), 50.0);
  assert_eq!(leaf.layout_height(), 20.0);
}

#[test]
fn test_styled_size_wins_over_measurement() {
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_width(Dimension::Points(40.0));
  leaf.set_height(Dimension::Points(7.0));
  leaf.set_measure_func(Some(text_measure()));
  root.add_child(&leaf);
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(leaf.layout_width(), 40.0);
  assert_eq!(leaf.layout_height(), 7.0);
}

#[test]
fn test_max_width_caps_measured_size() {
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_max_width(Dimension::Points(60.0));
  leaf.set_measure_func(Some(text_measure()));
  root.add_child(&leaf);
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(leaf.layout_width(), 60.0);
}

#[test]
fn test_measurement_memoized_until_dirty() {
  let calls = Rc::new(Cell::new(0_usize));
  let counter = calls.clone();
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_measure_func(Some(Rc::new(move |width, width_mode, _h, _hm| {
    counter.set(counter.get() + 1);
    let width = match width_mode {
      MeasureMode::Exactly => width,
      _ => 40.0,
    };
    Size::new(width, 10.0)
  })));
  root.add_child(&leaf);

  layout(&root, AvailableSpace::Unconstrained);
  let after_first = calls.get();
  assert!(after_first > 0);

  // Clean tree, same inputs: no new callback invocations at all.
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(calls.get(), after_first);

  // Content changed: the memo must not survive.
  leaf.mark_dirty();
  layout(&root, AvailableSpace::Unconstrained);
  assert!(calls.get() > after_first);
}

#[test]
fn test_nested_layout_call_from_measure_is_rejected() {
  let observed = Rc::new(Cell::new(false));
  let flag = observed.clone();
  let other = Node::new();
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_measure_func(Some(Rc::new(move |_w, _wm, _h, _hm| {
    let result = other.calculate_layout(
      AvailableSpace::Unconstrained,
      AvailableSpace::Unconstrained,
      Direction::Ltr,
    );
    flag.set(matches!(result, Err(LayoutError::ContextInUse)));
    Size::new(10.0, 10.0)
  })));
  root.add_child(&leaf);
  layout(&root, AvailableSpace::Unconstrained);
  assert!(observed.get());
}

#[test]
fn test_non_finite_measurement_degrades_to_zero() {
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_measure_func(Some(Rc::new(|_w, _wm, _h, _hm| {
    Size::new(f32::NAN, f32::INFINITY)
  })));
  root.add_child(&leaf);
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(leaf.layout_width(), 0.0);
  assert_eq!(leaf.layout_height(), 0.0);
}

#[test]
fn test_aspect_ratio_fills_missing_height() {
  let root = Node::new();
  let child = Node::new();
  child.set_width(Dimension::Points(50.0));
  child.set_aspect_ratio(Some(2.0));
  root.add_child(&child);
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(child.layout_width(), 50.0);
  assert_eq!(child.layout_height(), 25.0);
}

#[test]
fn test_aspect_ratio_fills_missing_width() {
  let root = Node::new();
  let child = Node::new();
  child.set_height(Dimension::Points(20.0));
  child.set_aspect_ratio(Some(2.0));
  root.add_child(&child);
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(child.layout_width(), 40.0);
  assert_eq!(child.layout_height(), 20.0);
}

#[test]
fn test_aspect_ratio_derives_measured_leaf_height() {
  let root = Node::new();
  let leaf = Node::new();
  leaf.set_aspect_ratio(Some(2.0));
  leaf.set_measure_func(Some(Rc::new(|_w, _wm, _h, _hm| Size::new(30.0, 99.0))));
  root.add_child(&leaf);
  layout(&root, AvailableSpace::Unconstrained);
  // The ratio overrides the measured height.
  assert_eq!(leaf.layout_width(), 30.0);
  assert_eq!(leaf.layout_height(), 15.0);
}

#[test]
fn test_invalid_aspect_ratio_is_ignored() {
  let root = Node::new();
  let child = Node::new();
  child.set_width(Dimension::Points(50.0));
  child.set_height(Dimension::Points(10.0));
  child.set_aspect_ratio(Some(0.0));
  root.add_child(&child);
  layout(&root, AvailableSpace::Unconstrained);
  assert_eq!(child.layout_height(), 10.0);
}
