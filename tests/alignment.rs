//! Justify-content, align-items/self/content, auto margins, baselines

use std::rc::Rc;

use flexlay::{
  Align, AvailableSpace, Dimension, Direction, Edge, FlexWrap, Gutter, Justify, Node,
};

fn layout(root: &Node) {
  root
    .calculate_layout(
      AvailableSpace::Unconstrained,
      AvailableSpace::Unconstrained,
      Direction::Ltr,
    )
    .unwrap();
}

fn container(width: f32, height: f32) -> Node {
  let root = Node::new();
  root.set_width(Dimension::Points(width));
  root.set_height(Dimension::Points(height));
  root
}

fn block(width: f32, height: f32) -> Node {
  let node = Node::new();
  node.set_width(Dimension::Points(width));
  node.set_height(Dimension::Points(height));
  node
}

#[test]
fn test_justify_content_variants() {
  let cases = [
    (Justify::FlexStart, [0.0, 20.0]),
    (Justify::FlexEnd, [60.0, 80.0]),
    (Justify::Center, [30.0, 50.0]),
    (Justify::SpaceAround, [15.0, 65.0]),
    (Justify::SpaceEvenly, [20.0, 60.0]),
  ];
  for (justify, expected) in cases {
    let root = container(100.0, 50.0);
    root.set_justify_content(justify);
    let a = block(20.0, 10.0);
    let b = block(20.0, 10.0);
    root.add_child(&a);
    root.add_child(&b);
    layout(&root);
    assert_eq!(a.layout_left(), expected[0], "{justify:?}");
    assert_eq!(b.layout_left(), expected[1], "{justify:?}");
  }
}

#[test]
fn test_justify_space_between() {
  let root = container(100.0, 50.0);
  root.set_justify_content(Justify::SpaceBetween);
  let children: Vec<Node> = (0..3)
    .map(|_| {
      let child = block(20.0, 10.0);
      root.add_child(&child);
      child
    })
    .collect();
  layout(&root);
  assert_eq!(children[0].layout_left(), 0.0);
  assert_eq!(children[1].layout_left(), 40.0);
  assert_eq!(children[2].layout_left(), 80.0);
}

#[test]
fn test_justify_center_overflows_symmetrically() {
  let root = container(100.0, 50.0);
  root.set_justify_content(Justify::Center);
  let wide = block(140.0, 10.0);
  root.add_child(&wide);
  layout(&root);
  assert_eq!(wide.layout_left(), -20.0);
}

#[test]
fn test_align_items_positions_cross_axis() {
  let cases = [
    (Align::FlexStart, 0.0),
    (Align::Center, 35.0),
    (Align::FlexEnd, 70.0),
  ];
  for (align, expected) in cases {
    let root = container(100.0, 100.0);
    root.set_align_items(align);
    let child = block(20.0, 30.0);
    root.add_child(&child);
    layout(&root);
    assert_eq!(child.layout_top(), expected, "{align:?}");
  }
}

#[test]
fn test_default_stretch_fills_cross_axis() {
  let root = container(100.0, 100.0);
  let child = Node::new();
  child.set_width(Dimension::Points(20.0));
  root.add_child(&child);
  layout(&root);
  assert_eq!(child.layout_height(), 100.0);
}

#[test]
fn test_styled_cross_size_suppresses_stretch() {
  let root = container(100.0, 100.0);
  let child = block(20.0, 30.0);
  root.add_child(&child);
  layout(&root);
  assert_eq!(child.layout_height(), 30.0);
}

#[test]
fn test_align_self_overrides_align_items() {
  let root = container(100.0, 100.0);
  root.set_align_items(Align::FlexStart);
  let child = block(20.0, 30.0);
  child.set_align_self(Align::FlexEnd);
  root.add_child(&child);
  layout(&root);
  assert_eq!(child.layout_top(), 70.0);
}

#[test]
fn test_auto_main_margins_center_item() {
  let root = container(100.0, 50.0);
  let child = block(20.0, 10.0);
  child.set_margin(Edge::Left, Dimension::Auto);
  child.set_margin(Edge::Right, Dimension::Auto);
  root.add_child(&child);
  layout(&root);
  assert_eq!(child.layout_left(), 40.0);
}

#[test]
fn test_single_auto_margin_pushes_to_far_edge() {
  let root = container(100.0, 50.0);
  let child = block(20.0, 10.0);
  child.set_margin(Edge::Left, Dimension::Auto);
  root.add_child(&child);
  layout(&root);
  assert_eq!(child.layout_left(), 80.0);
}

#[test]
fn test_auto_cross_margin_pushes_down() {
  let root = container(100.0, 100.0);
  let child = block(20.0, 30.0);
  child.set_margin(Edge::Top, Dimension::Auto);
  root.add_child(&child);
  layout(&root);
  assert_eq!(child.layout_top(), 70.0);
}

#[test]
fn test_column_gap_spaces_row_items() {
  let root = container(100.0, 50.0);
  root.set_gap(Gutter::Column, 10.0);
  let a = block(20.0, 10.0);
  let b = block(20.0, 10.0);
  root.add_child(&a);
  root.add_child(&b);
  layout(&root);
  assert_eq!(a.layout_left(), 0.0);
  assert_eq!(b.layout_left(), 30.0);
}

#[test]
fn test_row_gap_spaces_wrapped_lines() {
  let root = Node::new();
  root.set_width(Dimension::Points(100.0));
  root.set_flex_wrap(FlexWrap::Wrap);
  root.set_gap(Gutter::Row, 10.0);
  let children: Vec<Node> = (0..3)
    .map(|_| {
      let child = block(40.0, 20.0);
      root.add_child(&child);
      child
    })
    .collect();
  layout(&root);
  assert_eq!(children[2].layout_top(), 30.0);
  assert_eq!(root.layout_height(), 50.0);
}

#[test]
fn test_align_content_variants() {
  let cases = [
    (Align::FlexStart, 0.0, 20.0),
    (Align::Center, 25.0, 45.0),
    (Align::FlexEnd, 50.0, 70.0),
    (Align::SpaceBetween, 0.0, 70.0),
    (Align::Stretch, 0.0, 45.0),
  ];
  for (align, first_top, last_top) in cases {
    let root = container(100.0, 90.0);
    root.set_flex_wrap(FlexWrap::Wrap);
    root.set_align_content(align);
    let children: Vec<Node> = (0..3)
      .map(|_| {
        let child = block(40.0, 20.0);
        root.add_child(&child);
        child
      })
      .collect();
    layout(&root);
    assert_eq!(children[0].layout_top(), first_top, "{align:?}");
    assert_eq!(children[2].layout_top(), last_top, "{align:?}");
  }
}

#[test]
fn test_baseline_alignment_uses_bottom_edge_by_default() {
  let root = container(100.0, 100.0);
  root.set_align_items(Align::Baseline);
  let tall = block(20.0, 30.0);
  let short = block(20.0, 10.0);
  root.add_child(&tall);
  root.add_child(&short);
  layout(&root);
  assert_eq!(tall.layout_top(), 0.0);
  assert_eq!(short.layout_top(), 20.0);
}

#[test]
fn test_baseline_callback_overrides_default() {
  let root = container(100.0, 100.0);
  root.set_align_items(Align::Baseline);
  let tall = block(20.0, 30.0);
  let text = block(20.0, 10.0);
  text.set_baseline_func(Some(Rc::new(|_width, _height| 8.0)));
  root.add_child(&tall);
  root.add_child(&text);
  layout(&root);
  assert_eq!(tall.layout_top(), 0.0);
  assert_eq!(text.layout_top(), 22.0);
}

#[test]
fn test_baseline_of_container_comes_from_first_child() {
  let root = container(100.0, 100.0);
  root.set_align_items(Align::Baseline);
  let group = Node::new();
  group.set_width(Dimension::Points(30.0));
  group.set_height(Dimension::Points(40.0));
  let inner = block(30.0, 15.0);
  group.add_child(&inner);
  let short = block(20.0, 10.0);
  root.add_child(&group);
  root.add_child(&short);
  layout(&root);
  // The group's baseline is its first child's bottom edge (15), so the
  // short item (baseline 10) moves down by 5.
  assert_eq!(group.layout_top(), 0.0);
  assert_eq!(short.layout_top(), 5.0);
}

#[test]
fn test_padding_and_border_offset_content() {
  let root = container(100.0, 100.0);
  root.set_padding(Edge::Left, Dimension::Points(10.0));
  root.set_padding(Edge::Top, Dimension::Points(5.0));
  root.set_border(Edge::Left, 2.0);
  let child = block(20.0, 20.0);
  root.add_child(&child);
  layout(&root);
  assert_eq!(child.layout_left(), 12.0);
  assert_eq!(child.layout_top(), 5.0);
}

#[test]
fn test_percent_padding_resolves_against_width() {
  let root = container(200.0, 100.0);
  root.set_padding(Edge::Top, Dimension::Percent(10.0));
  let child = block(20.0, 20.0);
  root.add_child(&child);
  layout(&root);
  // Vertical percent padding still uses the horizontal base.
  assert_eq!(child.layout_top(), 20.0);
}
