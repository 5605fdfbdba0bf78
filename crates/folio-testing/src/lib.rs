//! Test utilities for Folio services.
//!
//! Provides `MockAuth` for signed tokens and `MultipartBody` for upload requests.
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod auth;
pub mod multipart;
