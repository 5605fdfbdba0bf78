//! Auth types shared across Folio services.
//!
//! Provides JWT issuing and validation plus bearer-token header parsing.

pub mod bearer;
pub mod token;
