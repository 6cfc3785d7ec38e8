//! Signature Module
//!
//! This module turns signed transitions into the signer key set the validator consumes.
//! Computes the canonical transition digest and recovers signer addresses from signatures.

mod digest;
mod recovery;

pub use recovery::{SignatureError, SignedTransition};
