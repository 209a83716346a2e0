//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are separate
//! from the internal domain models in `src/models/` and handle serialization,
//! deserialization, and domain-model conversion. Field names serialize as
//! camelCase on the wire.

use serde::Serialize;

pub mod favorites;
pub mod recipes;
pub mod search;
pub mod users;
pub mod vision;

pub use favorites::*;
pub use recipes::*;
pub use search::*;
pub use users::*;
pub use vision::*;

/// Error body produced by [`crate::error::LadleError`] on every failure.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message safe to display to end users.
    pub error: String,
    /// HTTP status code, duplicated in the body.
    pub code: u16,
}
