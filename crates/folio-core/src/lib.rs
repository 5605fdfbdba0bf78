//! Service plumbing shared across Folio services: configuration loading,
//! health probes, request ids and tracing setup.

pub mod config;
pub mod health;
pub mod middleware;
pub mod tracing;
