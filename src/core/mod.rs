//! Core domain models and error taxonomy for the tandem-parking core.
//!
//! This module defines the fundamental data structures used throughout the
//! crate: rotation days, course records, per-day presence timelines, and the
//! errors the parsing and scoring layers can produce.

pub mod domain;
pub mod error;
