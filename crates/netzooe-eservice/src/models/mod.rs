//! Request parameter types for the eService endpoints.
//!
//! - `ConsentStatus`: filter for data sharing consents
//! - `ConsumptionBranch`: filter for consumption profiles
//! - `Pod`, `TimeRange`, `ProfileRequest`: consumption profile batch queries

pub mod consent;
pub mod consumption;

pub use consent::ConsentStatus;
pub use consumption::{ConsumptionBranch, Dimension, Pod, ProfileRequest, TimeRange};
