//! bandscore-core — Answer matching, scoring, and band conversion.
//!
//! This crate defines the answer-key data model and the pure grading engine
//! that turns a respondent's answer sheet into a raw score, a percentage and
//! a band. It performs no I/O in the scoring path.

pub mod band;
pub mod error;
pub mod group;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod scorer;
pub mod sheet;
pub mod sink;
