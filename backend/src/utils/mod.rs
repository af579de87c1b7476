//! Collection of general utilities.
//!
//! Field validation policies, token issuance, and log setup that the
//! domain modules build on.

pub mod jwt;
pub mod logging;
pub mod validation;
