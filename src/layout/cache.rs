//! Per-node layout result caching
//!
//! Three pieces of memoization keep repeated layout cheap:
//!
//! - [`Fingerprint`]: the exact inputs that produced the node's current
//!   layout. A clean node whose fingerprint matches the incoming inputs
//!   is reused without recursion.
//! - [`SizingCache`]: a small fixed-size cache of measure-pass results,
//!   valid only within one top-level layout call. Entries are tagged with
//!   the call epoch instead of being cleared tree-wide at call start.
//! - [`MeasureCache`]: memoizes the content-measurement callback; it
//!   persists across calls and is invalidated when the node is marked
//!   dirty (content may have changed).
//!
//! All keys are sum types ([`Constraint`]), so an empty slot is `None` and
//! can never collide with a legitimate result, and "unconstrained" compares
//! equal to itself.

use crate::geometry::{Point, Size};
use crate::style::types::Direction;
use crate::style::values::Constraint;

/// The inputs that produced a node's current layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Fingerprint {
  /// Width constraint the node was laid out under
  pub width: Constraint,
  /// Height constraint the node was laid out under
  pub height: Constraint,
  /// Text direction
  pub direction: Direction,
  /// Absolute (root-relative) offset at which the parent placed the node
  pub origin: Point,
}

impl Fingerprint {
  /// True when the sizing inputs (everything except the placement offset)
  /// match
  pub fn sizing_matches(
    &self,
    width: Constraint,
    height: Constraint,
    direction: Direction,
  ) -> bool {
    self.width == width && self.height == height && self.direction == direction
  }
}

const SIZING_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy)]
struct SizingEntry {
  width: Constraint,
  height: Constraint,
  epoch: u64,
  size: Size,
}

/// Fixed-size cache of `(constraints) -> computed size` for one node
///
/// Avoids repeated recursive intrinsic-sizing sub-calls within a single
/// top-level layout call (a parent typically asks for a child's size once
/// while sizing and once while placing). Entries from earlier top-level
/// calls are ignored via the epoch tag, which makes "reset at the start
/// of every top-level call" free.
#[derive(Debug, Clone, Default)]
pub(crate) struct SizingCache {
  entries: [Option<SizingEntry>; SIZING_SLOTS],
  next: usize,
}

impl SizingCache {
  /// Looks up a size computed earlier in the same top-level call
  pub fn get(&self, width: Constraint, height: Constraint, epoch: u64) -> Option<Size> {
    self
      .entries
      .iter()
      .flatten()
      .find(|entry| entry.epoch == epoch && entry.width == width && entry.height == height)
      .map(|entry| entry.size)
  }

  /// Stores a measured size, preferring to evict stale-epoch slots
  pub fn store(&mut self, width: Constraint, height: Constraint, epoch: u64, size: Size) {
    let entry = SizingEntry {
      width,
      height,
      epoch,
      size,
    };
    // Same key: refresh in place.
    for slot in self.entries.iter_mut() {
      if let Some(existing) = slot {
        if existing.epoch == epoch && existing.width == width && existing.height == height {
          *slot = Some(entry);
          return;
        }
      }
    }
    // Empty or stale slot.
    for slot in self.entries.iter_mut() {
      let usable = match slot {
        None => true,
        Some(existing) => existing.epoch != epoch,
      };
      if usable {
        *slot = Some(entry);
        return;
      }
    }
    // Cache full for this epoch: round-robin eviction.
    self.entries[self.next % SIZING_SLOTS] = Some(entry);
    self.next = (self.next + 1) % SIZING_SLOTS;
  }

  /// Drops every entry
  pub fn clear(&mut self) {
    self.entries = [None; SIZING_SLOTS];
    self.next = 0;
  }
}

const MEASURE_SLOTS: usize = 8;

#[derive(Debug, Clone, Copy)]
struct MeasureEntry {
  width: Constraint,
  height: Constraint,
  size: Size,
}

/// Memo of content-measurement callback results for one node
///
/// Keyed on the constraints the callback inputs are derived from. Valid
/// across top-level calls because the callback is contractually a pure
/// function of its inputs; invalidated when the node is marked dirty.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeasureCache {
  entries: [Option<MeasureEntry>; MEASURE_SLOTS],
  next: usize,
}

impl MeasureCache {
  /// Looks up a memoized measurement
  pub fn get(&self, width: Constraint, height: Constraint) -> Option<Size> {
    self
      .entries
      .iter()
      .flatten()
      .find(|entry| entry.width == width && entry.height == height)
      .map(|entry| entry.size)
  }

  /// Stores a measurement result
  pub fn store(&mut self, width: Constraint, height: Constraint, size: Size) {
    let entry = MeasureEntry {
      width,
      height,
      size,
    };
    for slot in self.entries.iter_mut() {
      match slot {
        Some(existing) if existing.width == width && existing.height == height => {
          *slot = Some(entry);
          return;
        }
        None => {
          *slot = Some(entry);
          return;
        }
        _ => {}
      }
    }
    self.entries[self.next % MEASURE_SLOTS] = Some(entry);
    self.next = (self.next + 1) % MEASURE_SLOTS;
  }

  /// Drops every entry (called when the node is marked dirty)
  pub fn clear(&mut self) {
    self.entries = [None; MEASURE_SLOTS];
    self.next = 0;
  }
}
