//! Member Sync - Access-control directory synchronization
//!
//! This crate keeps a physical access-control directory aligned with a
//! membership source, both by periodic reconciliation and by reacting to
//! signed billing webhooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
