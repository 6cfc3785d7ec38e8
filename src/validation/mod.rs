//! Transition Validation Module
//!
//! This module decides whether a proposed transition may be committed.
//! Performs cardinality, field immutability, lineage and signer-set checks.

mod signers;
mod validator;

#[cfg(test)]
mod properties;

pub use signers::required_signers;
pub use validator::Validator;
