//! # Bindery Support
//!
//! Shared utilities for the bindery crates.
//!
//! This crate provides:
//! - Name rendering and "did you mean?" suggestions for error messages
//! - Tracing subscriber setup for demos and tests

pub mod logging;
pub mod rendering;
