//! Terminal dashboard for digital-media marketing analytics reports.
//!
//! The binary loads a precomputed report bundle (conversion-model labels,
//! spend-optimization summary, segmented user data, messaging metrics),
//! derives the display artifacts once, and renders a five-section dashboard.

pub mod bundle;
pub mod config;
pub mod narrative;
pub mod report;
pub mod types;
pub mod ui;
