//! Dataset access.
//!
//! The dataset is bundled into the binary; there is no fetching, caching, or
//! cleaning layer. `bundled` owns parsing + row validation + summary stats.

pub mod bundled;

pub use bundled::*;
