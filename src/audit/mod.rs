//! Lineage Audit Module
//!
//! This module replays an exported transition history against a fresh lineage index:
//! - Every transition is checked against the live version of the records it consumes
//! - Every transition is run through the validator
//! - Only transitions passing both are applied

mod replay;


pub use replay::{AuditEntry, AuditOutcome, AuditReport, Conflict, LineageAudit};
