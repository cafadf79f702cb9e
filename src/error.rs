//! Error types for flexlay
//!
//! Layout itself is infallible: degenerate numeric inputs are clamped and
//! malformed trees are a documented precondition violation rather than a
//! guarded error. The only failure the API reports is detectable misuse of
//! the layout entry point, surfaced through [`LayoutError`].
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for flexlay operations
///
/// # Examples
///
/// ```
/// use flexlay::Result;
///
/// fn relayout() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors reported by the layout entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
  /// `calculate_layout` was called while another layout call on the same
  /// thread was still in flight (for example from inside a measurement
  /// callback). The scratch arena is not reentrant, so the nested call is
  /// rejected instead of corrupting the outer call's state.
  #[error("layout context already in use: calculate_layout called re-entrantly")]
  ContextInUse,
}
