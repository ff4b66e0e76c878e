//! Shared types and configuration for Contable.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Typed IDs for type-safe entity references
//! - Date ranges for ledger queries
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
