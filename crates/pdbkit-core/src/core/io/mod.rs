//! Encoding and decoding of fixed-column PDB text.
//!
//! The [`packer`] turns a [`PdbDict`](crate::core::models::dict::PdbDict)
//! into 80-column lines using the field encoders in [`format`], and the
//! [`aggregator`] joins those lines into file text. The [`reader`] goes the
//! other way. [`pdb::PdbFile`] wraps both directions behind the
//! [`traits::StructureFile`] interface for stream and path based I/O.

pub mod aggregator;
pub mod config;
pub mod format;
pub mod packer;
pub mod pdb;
pub mod reader;
pub mod traits;
