//! vidgen library crate.
//!
//! This module exposes the internal components for integration testing.

pub mod assembler;
pub mod cli;
pub mod collector;
pub mod config;
pub mod executor;
pub mod gemini;
pub mod keys;
pub mod planner;
