//! Style value types
//!
//! Sum types for styled dimensions and available space. Representing "no
//! constraint" as an enum variant instead of a NaN sentinel means cache
//! keys and fingerprints compare with ordinary equality, and an empty
//! cache slot can never collide with a real value.

/// A styled dimension: fixed, percentage, or auto
///
/// Used for width/height, min/max sizes, flex basis, margins, padding and
/// position offsets. `Auto` means "derive from context" (shrink-wrap for
/// sizes, free-space absorption for margins).
///
/// # Examples
///
/// ```
/// use flexlay::style::values::Dimension;
///
/// assert_eq!(Dimension::Points(30.0).resolve(Some(100.0)), Some(30.0));
/// assert_eq!(Dimension::Percent(40.0).resolve(Some(200.0)), Some(80.0));
/// // Percent of an unconstrained base resolves to zero, not "indeterminate".
/// assert_eq!(Dimension::Percent(40.0).resolve(None), Some(0.0));
/// assert_eq!(Dimension::Auto.resolve(Some(100.0)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
  /// A fixed length in CSS pixels
  Points(f32),
  /// A percentage of the relevant base size (0..100 scale)
  Percent(f32),
  /// No explicit value
  Auto,
}

impl Dimension {
  /// Returns true for `Auto`
  pub fn is_auto(self) -> bool {
    matches!(self, Self::Auto)
  }

  /// Resolves against a base size
  ///
  /// `Points` ignores the base. `Percent` of a `None` base resolves to 0
  /// rather than staying indeterminate; downstream consumers depend on
  /// this exact behavior. `Auto` never resolves.
  pub fn resolve(self, base: Option<f32>) -> Option<f32> {
    match self {
      Self::Points(points) => Some(points),
      Self::Percent(percent) => Some(base.unwrap_or(0.0) * percent / 100.0),
      Self::Auto => None,
    }
  }
}

/// Available space handed to the public layout entry point
///
/// # Examples
///
/// ```
/// use flexlay::style::values::AvailableSpace;
///
/// assert_eq!(AvailableSpace::Definite(800.0).value(), Some(800.0));
/// assert_eq!(AvailableSpace::Unconstrained.value(), None);
/// assert_eq!(AvailableSpace::Unconstrained, AvailableSpace::Unconstrained);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AvailableSpace {
  /// A definite amount of space
  Definite(f32),
  /// Content-driven sizing; no cap
  Unconstrained,
}

impl AvailableSpace {
  /// Returns the definite value, if any
  pub fn value(self) -> Option<f32> {
    match self {
      Self::Definite(value) => Some(value),
      Self::Unconstrained => None,
    }
  }

  /// Returns true for `Definite`
  pub fn is_definite(self) -> bool {
    matches!(self, Self::Definite(_))
  }
}

/// Sizing mode passed to measurement callbacks
///
/// Mirrors the constraint under which a leaf is being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureMode {
  /// No constraint; report the natural content size
  Undefined,
  /// The node will be exactly this large
  Exactly,
  /// The node may be at most this large
  AtMost,
}

/// Internal sizing constraint threaded through the recursive algorithm
///
/// `Exact` pins a border-box dimension, `AtMost` caps it (wrap capacity,
/// shrink-to-fit probes), `Unconstrained` leaves it content-driven. This
/// is the type the per-node fingerprint stores, so "unconstrained equals
/// unconstrained" holds by ordinary enum equality.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
  /// The dimension must be exactly this value
  Exact(f32),
  /// The dimension may be at most this value
  AtMost(f32),
  /// No constraint
  Unconstrained,
}

impl Constraint {
  /// The numeric bound, if any
  pub fn available(self) -> Option<f32> {
    match self {
      Self::Exact(value) | Self::AtMost(value) => Some(value),
      Self::Unconstrained => None,
    }
  }

  /// The pinned value, only for `Exact`
  pub fn exact(self) -> Option<f32> {
    match self {
      Self::Exact(value) => Some(value),
      _ => None,
    }
  }

  /// Shrinks the bound by `amount` (e.g. padding + border), flooring at 0
  pub fn shrink(self, amount: f32) -> Constraint {
    match self {
      Self::Exact(value) => Self::Exact((value - amount).max(0.0)),
      Self::AtMost(value) => Self::AtMost((value - amount).max(0.0)),
      Self::Unconstrained => Self::Unconstrained,
    }
  }

  /// The measurement mode equivalent of this constraint
  pub fn measure_mode(self) -> MeasureMode {
    match self {
      Self::Exact(_) => MeasureMode::Exactly,
      Self::AtMost(_) => MeasureMode::AtMost,
      Self::Unconstrained => MeasureMode::Undefined,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_dimension_resolve() {
    assert_eq!(Dimension::Points(12.5).resolve(None), Some(12.5));
    assert_eq!(Dimension::Percent(50.0).resolve(Some(80.0)), Some(40.0));
    assert_eq!(Dimension::Percent(50.0).resolve(None), Some(0.0));
    assert_eq!(Dimension::Auto.resolve(Some(80.0)), None);
    assert!(Dimension::Auto.is_auto());
  }

  #[test]
  fn test_available_space() {
    assert!(AvailableSpace::Definite(1.0).is_definite());
    assert!(!AvailableSpace::Unconstrained.is_definite());
    assert_eq!(AvailableSpace::Definite(1.0).value(), Some(1.0));
  }

  #[test]
  fn test_constraint_shrink() {
    assert_eq!(Constraint::Exact(100.0).shrink(30.0), Constraint::Exact(70.0));
    assert_eq!(Constraint::AtMost(10.0).shrink(30.0), Constraint::AtMost(0.0));
    assert_eq!(
      Constraint::Unconstrained.shrink(30.0),
      Constraint::Unconstrained
    );
  }

  #[test]
  fn test_constraint_measure_mode() {
    assert_eq!(Constraint::Exact(1.0).measure_mode(), MeasureMode::Exactly);
    assert_eq!(Constraint::AtMost(1.0).measure_mode(), MeasureMode::AtMost);
    assert_eq!(
      Constraint::Unconstrained.measure_mode(),
      MeasureMode::Undefined
    );
  }

  #[test]
  fn test_constraint_equality_without_sentinels() {
    // The whole point of the sum type: empty/unconstrained compares equal
    // to itself, unlike a NaN sentinel.
    assert_eq!(Constraint::Unconstrained, Constraint::Unconstrained);
    assert_ne!(Constraint::Exact(5.0), Constraint::AtMost(5.0));
  }
}
