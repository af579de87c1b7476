//! Data access layer over the backing relational store.

pub mod account_repository;
