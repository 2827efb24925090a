//! # CyberGuardian Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the rest of the crate:
//! - `config`: Configuration loading, layering, and validation
//! - `error`: The `GuardianError` enum and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{GuardianError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
