//! # Workflows Module
//!
//! High-level entry points that run a complete task on PDB text.
//!
//! - **Repack** ([`repack`]) - Decode a file, summarise it and write it back out
//!   as normalised 80-column records
//! - **Inspect** ([`inspect`]) - Decode a file and report what it contains
//!
//! Both build a [`summary::StructureSummary`] through the object graph, so
//! connectivity is checked against the atoms that are actually present.

pub mod error;
pub mod inspect;
pub mod repack;
pub mod summary;
