//! Record Model Module
//!
//! Construction of resident record versions and derivation of successors.
//! Nothing here validates; admissibility is decided by [`crate::validation`].

mod version;
