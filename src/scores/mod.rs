//! Score extraction and aggregation.
//!
//! This module provides:
//! - Pairing OCR tokens into name/score pairs and fixing common misreads
//! - The name correction table
//! - The leaderboard collected across screenshots
//! - CSV output

pub mod aggregate;
pub mod csv_writer;
pub mod names;
pub mod parse;

pub use aggregate::Leaderboard;
pub use names::NameCorrection;
pub use parse::{parse_regions, ScoreEntry};
