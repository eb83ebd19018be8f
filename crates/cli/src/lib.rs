//! Terminal presentation for Filedeck
//!
//! Provides shared CLI functionality:
//! - Entry tables, details and record listings
//! - Progress spinners
//! - Status messages

pub mod output;
pub mod progress;
