//! Reporting: terminal run summary and the markdown narrative.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;
pub mod narrative;

pub use format::*;
pub use narrative::*;
