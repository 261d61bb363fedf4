//! # Core Module
//!
//! The foundation of the library: the 80-column [`record`] type and its typed
//! [`field`] values, the PDB [`models`], the text codec in [`io`] and small
//! shared [`utils`].
//!
//! ## Layers
//!
//! - **Records** ([`record`], [`field`]) - One validated line of at most 80
//!   columns with name/body views and column slicing
//! - **Models** ([`models`]) - The PDB dictionary and the object graph built from it
//! - **I/O** ([`io`]) - Packing dictionaries into lines, joining lines into
//!   text and decoding text back into dictionaries

pub mod field;
pub mod io;
pub mod models;
pub mod record;
pub mod utils;
