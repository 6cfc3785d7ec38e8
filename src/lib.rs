//! This crate validates transitions of resident address records on a shared ledger.
//! It includes modules for the record model, the transition validator, signer key
//! recovery, an in-memory lineage index, offline audit replay, and configuration.

pub mod types; // Defines the record, transition and verdict types used throughout the crate.
pub mod record; // Builds record versions and derives successors.
pub mod validation; // Decides whether a Register, Change or Delete transition is admissible.
pub mod signature; // Computes transition digests and recovers signer keys.
pub mod state; // Tracks the live version of each record lineage.
pub mod audit; // Replays exported transition histories.
pub mod config; // Defines and loads the audit configuration.

// Re-export commonly used types for easier access.
pub use types::*;
pub use validation::Validator;
