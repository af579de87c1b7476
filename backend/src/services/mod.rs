//! Module for core business logic services.
//!
//! This module encapsulates services that orchestrate validation, the
//! account store, and token issuance for signup and login.

pub mod account_service;
