//! Domain types shared across Folio services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod field_errors;
pub mod search;
pub mod visibility;
