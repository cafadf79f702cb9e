//! The layout node tree
//!
//! [`Node`] is a cheap reference-counted handle to a tree element. A node
//! owns its children; the parent link is a weak back-reference used only
//! to propagate dirtiness, so the tree stays a simple forest without
//! reference cycles. Reparenting goes through [`Node::insert_child`],
//! which always detaches the child from any prior parent first.
//!
//! Every style or tree mutation marks the node and all of its ancestors
//! dirty. [`Node::calculate_layout`] on a clean root under matching
//! constraints is a guaranteed no-op.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::geometry::{EdgeOffsets, Point, Size};
use crate::layout::algorithm;
use crate::layout::cache::{Fingerprint, MeasureCache, SizingCache};
use crate::layout::rounding::ComputedLayout;
use crate::style::types::{
  Align, Direction, Display, Edge, FlexDirection, FlexWrap, Gutter, Justify, Overflow,
  PositionType,
};
use crate::style::values::{AvailableSpace, Dimension, MeasureMode};
use crate::style::Style;

/// Content measurement callback for leaf nodes
///
/// `(width, width_mode, height, height_mode) -> size`, all in content-box
/// CSS pixels. Must be a pure function of its inputs: results are
/// memoized until the node is marked dirty, and it must not mutate the
/// tree it is called from.
pub type MeasureFunc = Rc<dyn Fn(f32, MeasureMode, f32, MeasureMode) -> Size>;

/// Baseline callback: `(width, height) -> baseline offset from the top`
pub type BaselineFunc = Rc<dyn Fn(f32, f32) -> f32>;

/// Per-node layout bookkeeping
pub(crate) struct LayoutState {
  /// Set by any mutation here or in a descendant; cleared by layout
  pub dirty: bool,
  /// True only right after a successful computation for `fingerprint`
  pub layout_valid: bool,
  /// Set when a pass recomputes this node; cleared by `mark_layout_seen`
  pub has_new_layout: bool,
  /// Rounded, parent-relative output read by the public accessors
  pub computed: ComputedLayout,
  /// Unrounded parent-relative origin (authoritative)
  pub origin: Point,
  /// Unrounded border-box size (authoritative)
  pub size: Size,
  /// Unrounded root-relative origin, kept for edge rounding and shifts
  pub absolute: Point,
  /// Inputs that produced the current layout, if any
  pub fingerprint: Option<Fingerprint>,
  /// Within-call memo of sizing sub-passes
  pub sizing_cache: SizingCache,
  /// Cross-call memo of measurement callback results
  pub measure_cache: MeasureCache,
}

impl Default for LayoutState {
  fn default() -> Self {
    Self {
      dirty: true,
      layout_valid: false,
      has_new_layout: false,
      computed: ComputedLayout::ZERO,
      origin: Point::ZERO,
      size: Size::ZERO,
      absolute: Point::ZERO,
      fingerprint: None,
      sizing_cache: SizingCache::default(),
      measure_cache: MeasureCache::default(),
    }
  }
}

pub(crate) struct NodeInner {
  pub style: Style,
  pub children: Vec<Node>,
  pub parent: Weak<RefCell<NodeInner>>,
  pub measure: Option<MeasureFunc>,
  pub baseline: Option<BaselineFunc>,
  pub state: LayoutState,
}

/// A handle to one element of the layout tree
///
/// Clones share the same underlying node. Equality is identity.
///
/// # Examples
///
/// ```
/// use flexlay::node::Node;
/// use flexlay::style::types::Direction;
/// use flexlay::style::values::{AvailableSpace, Dimension};
///
/// let root = Node::new();
/// root.set_width(Dimension::Points(100.0));
/// root.set_height(Dimension::Points(50.0));
/// root
///   .calculate_layout(
///     AvailableSpace::Unconstrained,
///     AvailableSpace::Unconstrained,
///     Direction::Ltr,
///   )
///   .unwrap();
/// assert_eq!(root.layout_width(), 100.0);
/// assert_eq!(root.layout_height(), 50.0);
/// ```
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeInner>>);

impl PartialEq for Node {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl fmt::Debug for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Node").field(&Rc::as_ptr(&self.0)).finish()
  }
}

impl Default for Node {
  fn default() -> Self {
    Self::new()
  }
}

impl Node {
  /// Creates a new detached node with the default style, marked dirty
  pub fn new() -> Self {
    Self::with_style(Style::default())
  }

  /// Creates a new detached node with the given style
  pub fn with_style(style: Style) -> Self {
    Self(Rc::new(RefCell::new(NodeInner {
      style,
      children: Vec::new(),
      parent: Weak::new(),
      measure: None,
      baseline: None,
      state: LayoutState::default(),
    })))
  }

  pub(crate) fn inner(&self) -> Ref<'_, NodeInner> {
    self.0.borrow()
  }

  pub(crate) fn inner_mut(&self) -> RefMut<'_, NodeInner> {
    self.0.borrow_mut()
  }

  // -- tree mutation --

  /// Inserts `child` at `index`, detaching it from any prior parent
  ///
  /// Inserting a node's own ancestor (or the node into itself) would
  /// create a cycle; that is a precondition violation, asserted in debug
  /// builds only.
  pub fn insert_child(&self, child: &Node, index: usize) {
    debug_assert!(
      child != self && !self.has_ancestor(child),
      "inserting an ancestor creates a cycle"
    );
    child.detach();
    {
      let mut inner = self.0.borrow_mut();
      let index = index.min(inner.children.len());
      inner.children.insert(index, child.clone());
    }
    child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    // Propagates up through this node to the root.
    child.mark_dirty();
  }

  /// Appends `child` as the last child
  pub fn add_child(&self, child: &Node) {
    let index = self.child_count();
    self.insert_child(child, index);
  }

  /// Removes `child` from this node's child list
  ///
  /// Returns false when `child` was not a child of this node.
  pub fn remove_child(&self, child: &Node) -> bool {
    let removed = {
      let mut inner = self.0.borrow_mut();
      match inner.children.iter().position(|c| c == child) {
        Some(position) => {
          inner.children.remove(position);
          true
        }
        None => false,
      }
    };
    if removed {
      child.0.borrow_mut().parent = Weak::new();
      self.mark_dirty();
    }
    removed
  }

  /// Detaches this node and drops its own caches
  ///
  /// Children are not freed recursively; other handles to them (and to
  /// this node) stay valid.
  pub fn free(self) {
    self.detach();
    let mut inner = self.0.borrow_mut();
    inner.state.sizing_cache.clear();
    inner.state.measure_cache.clear();
    inner.state.fingerprint = None;
    inner.state.layout_valid = false;
  }

  fn detach(&self) {
    if let Some(parent) = self.parent() {
      parent.remove_child(self);
    }
  }

  /// The parent node, if attached
  pub fn parent(&self) -> Option<Node> {
    self.0.borrow().parent.upgrade().map(Node)
  }

  /// Number of children
  pub fn child_count(&self) -> usize {
    self.0.borrow().children.len()
  }

  /// The child at `index`, if any
  pub fn child_at(&self, index: usize) -> Option<Node> {
    self.0.borrow().children.get(index).cloned()
  }

  fn has_ancestor(&self, candidate: &Node) -> bool {
    let mut cursor = self.parent();
    while let Some(node) = cursor {
      if &node == candidate {
        return true;
      }
      cursor = node.parent();
    }
    false
  }

  // -- dirtiness --

  /// Marks this node and every ancestor as needing recomputation
  ///
  /// The node's own measurement memo is dropped (its content may have
  /// changed); ancestor memos survive, their results are gated by the
  /// dirty flag anyway.
  pub fn mark_dirty(&self) {
    {
      let mut inner = self.0.borrow_mut();
      inner.state.dirty = true;
      inner.state.layout_valid = false;
      inner.state.measure_cache.clear();
    }
    let mut cursor = self.parent();
    while let Some(node) = cursor {
      let mut inner = node.0.borrow_mut();
      if inner.state.dirty && !inner.state.layout_valid {
        // Ancestors of a dirty node are dirty by the propagation
        // invariant; stop early.
        break;
      }
      inner.state.dirty = true;
      inner.state.layout_valid = false;
      drop(inner);
      cursor = node.parent();
    }
  }

  /// Marks this node and every descendant dirty (iterative walk)
  pub fn mark_subtree_dirty(&self) {
    self.mark_dirty();
    let mut stack: Vec<Node> = {
      let inner = self.0.borrow();
      inner.children.clone()
    };
    while let Some(node) = stack.pop() {
      let mut inner = node.0.borrow_mut();
      inner.state.dirty = true;
      inner.state.layout_valid = false;
      inner.state.measure_cache.clear();
      stack.extend(inner.children.iter().cloned());
    }
  }

  /// True when this node needs (re)layout
  pub fn is_dirty(&self) -> bool {
    self.0.borrow().state.dirty
  }

  /// True when the last layout pass recomputed this node's result
  pub fn has_new_layout(&self) -> bool {
    self.0.borrow().state.has_new_layout
  }

  /// Acknowledges the current layout; `has_new_layout` reads false until
  /// the next recompute
  pub fn mark_layout_seen(&self) {
    self.0.borrow_mut().state.has_new_layout = false;
  }

  /// Nodes in this subtree, including self (iterative walk)
  pub fn count_nodes(&self) -> usize {
    let mut count = 0;
    let mut stack = vec![self.clone()];
    while let Some(node) = stack.pop() {
      count += 1;
      stack.extend(node.0.borrow().children.iter().cloned());
    }
    count
  }

  // -- style --

  /// A copy of the node's current style
  pub fn style(&self) -> Style {
    self.0.borrow().style
  }

  /// Replaces the whole style
  pub fn set_style(&self, style: Style) {
    self.update_style(|s| *s = style);
  }

  fn update_style(&self, f: impl FnOnce(&mut Style)) {
    let changed = {
      let mut inner = self.0.borrow_mut();
      let before = inner.style;
      f(&mut inner.style);
      inner.style != before
    };
    // Writing back an identical value is not a mutation.
    if changed {
      self.mark_dirty();
    }
  }

  pub fn set_display(&self, display: Display) {
    self.update_style(|s| s.display = display);
  }

  pub fn set_position_type(&self, position_type: PositionType) {
    self.update_style(|s| s.position_type = position_type);
  }

  pub fn set_position(&self, edge: Edge, value: Dimension) {
    self.update_style(|s| s.position.set(edge, value));
  }

  pub fn set_flex_direction(&self, direction: FlexDirection) {
    self.update_style(|s| s.flex_direction = direction);
  }

  pub fn set_flex_wrap(&self, wrap: FlexWrap) {
    self.update_style(|s| s.flex_wrap = wrap);
  }

  pub fn set_flex_grow(&self, grow: f32) {
    self.update_style(|s| s.flex_grow = grow.max(0.0));
  }

  pub fn set_flex_shrink(&self, shrink: f32) {
    self.update_style(|s| s.flex_shrink = shrink.max(0.0));
  }

  pub fn set_flex_basis(&self, basis: Dimension) {
    self.update_style(|s| s.flex_basis = basis);
  }

  pub fn set_align_items(&self, align: Align) {
    self.update_style(|s| s.align_items = align);
  }

  pub fn set_align_self(&self, align: Align) {
    self.update_style(|s| s.align_self = align);
  }

  pub fn set_align_content(&self, align: Align) {
    self.update_style(|s| s.align_content = align);
  }

  pub fn set_justify_content(&self, justify: Justify) {
    self.update_style(|s| s.justify_content = justify);
  }

  pub fn set_width(&self, width: Dimension) {
    self.update_style(|s| s.width = width);
  }

  pub fn set_height(&self, height: Dimension) {
    self.update_style(|s| s.height = height);
  }

  pub fn set_min_width(&self, min_width: Dimension) {
    self.update_style(|s| s.min_width = min_width);
  }

  pub fn set_min_height(&self, min_height: Dimension) {
    self.update_style(|s| s.min_height = min_height);
  }

  pub fn set_max_width(&self, max_width: Dimension) {
    self.update_style(|s| s.max_width = max_width);
  }

  pub fn set_max_height(&self, max_height: Dimension) {
    self.update_style(|s| s.max_height = max_height);
  }

  pub fn set_aspect_ratio(&self, ratio: Option<f32>) {
    self.update_style(|s| s.aspect_ratio = ratio);
  }

  pub fn set_margin(&self, edge: Edge, value: Dimension) {
    self.update_style(|s| s.margin.set(edge, value));
  }

  pub fn set_padding(&self, edge: Edge, value: Dimension) {
    self.update_style(|s| s.padding.set(edge, value));
  }

  /// Sets a border width; borders carry no logical slots, so `Start` and
  /// `End` write the left and right edges
  pub fn set_border(&self, edge: Edge, width: f32) {
    self.update_style(|s| {
      let target = match edge {
        Edge::Left | Edge::Start => &mut s.border.left,
        Edge::Top => &mut s.border.top,
        Edge::Right | Edge::End => &mut s.border.right,
        Edge::Bottom => &mut s.border.bottom,
      };
      *target = width;
    });
  }

  pub fn set_gap(&self, gutter: Gutter, gap: f32) {
    self.update_style(|s| match gutter {
      Gutter::Row => s.row_gap = gap.max(0.0),
      Gutter::Column => s.column_gap = gap.max(0.0),
    });
  }

  pub fn set_overflow(&self, overflow: Overflow) {
    self.update_style(|s| s.overflow = overflow);
  }

  /// Full border set at once
  pub fn set_border_all(&self, border: EdgeOffsets) {
    self.update_style(|s| s.border = border);
  }

  // -- callbacks --

  /// Installs or removes the content measurement callback
  pub fn set_measure_func(&self, func: Option<MeasureFunc>) {
    {
      let mut inner = self.0.borrow_mut();
      inner.measure = func;
      inner.state.measure_cache.clear();
    }
    self.mark_dirty();
  }

  /// Installs or removes the baseline callback
  pub fn set_baseline_func(&self, func: Option<BaselineFunc>) {
    self.0.borrow_mut().baseline = func;
    self.mark_dirty();
  }

  // -- layout --

  /// Computes (or incrementally refreshes) layout for this subtree
  ///
  /// An unconstrained axis sizes to content. A clean tree under the same
  /// constraints and direction returns without touching any node.
  pub fn calculate_layout(
    &self,
    width: AvailableSpace,
    height: AvailableSpace,
    direction: Direction,
  ) -> Result<()> {
    algorithm::calculate_layout(self, width, height, direction)
  }

  /// The node's rounded layout, relative to the parent's border box
  pub fn layout(&self) -> ComputedLayout {
    self.0.borrow().state.computed
  }

  pub fn layout_left(&self) -> f32 {
    self.layout().left
  }

  pub fn layout_top(&self) -> f32 {
    self.layout().top
  }

  pub fn layout_width(&self) -> f32 {
    self.layout().width
  }

  pub fn layout_height(&self) -> f32 {
    self.layout().height
  }
}
