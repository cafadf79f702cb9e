//! The layout engine
//!
//! Submodules follow the shape of one layout pass: values resolve
//! ([`resolve`]), boxes get their edges ([`box_model`]), children break
//! into lines ([`line`]), lines distribute free space ([`distribute`]),
//! items get positioned ([`position`]), results land on the pixel grid
//! ([`rounding`]). [`algorithm`] drives the recursion, [`cache`] and
//! [`context`] make repeated calls cheap.

pub(crate) mod algorithm;
pub mod box_model;
pub(crate) mod cache;
pub(crate) mod context;
pub(crate) mod distribute;
pub(crate) mod line;
pub(crate) mod position;
pub mod resolve;
pub mod rounding;
