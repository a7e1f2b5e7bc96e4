//! Radiograph triage for chairside notes.
//!
//! This crate turns free-text radiograph reports and chairside notes into
//! structured findings (tooth, condition, severity) that the front desk can
//! queue for dentist review. Every finding is review-gated; nothing feeds
//! the patient record automatically.

pub mod extraction;
pub mod prompts;

pub use extraction::*;
pub use prompts::*;
