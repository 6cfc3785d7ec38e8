//! State Management Module
//!
//! This module keeps the live version of every record lineage in memory.
//! Used by the audit replay to check consumed versions against what is current.

mod index;
pub use index::LineageIndex;
