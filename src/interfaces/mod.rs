//! Boundary mapping between external request/response shapes and the domain.

pub mod csv;
pub mod json;
