//! rowgrade: an interactive labeling panel for tabular records.
//!
//! The library holds everything that is independent of the UI toolkit:
//! the record table, the annotation session state machine, the
//! presentation-surface seam the panel drives, and the export/config
//! plumbing. The Slint window binding lives in the binary.

pub mod config;
pub mod dataset;
pub mod export;
pub mod logging;
pub mod measures;
pub mod panel;
pub mod session;
pub mod surface;
