//! # Core Models Module
//!
//! Data structures for PDB content at two levels of abstraction.
//!
//! - [`dict`] - The PDB dictionary, a plain nested description of a file that
//!   the packer encodes and the reader produces
//! - [`structure`] - An object graph of models, chains, residues and molecules
//!   built from a dictionary and convertible back into one
//! - [`atom`] - Individual atoms with positions and per-atom columns
//! - [`ids`] - Slot-map keys for atoms
//!
//! ```ignore
//! use pdbkit::core::models::structure::Structure;
//!
//! let structure = Structure::from_pdb_dict(&pdb);
//! let ca = structure.model()?.atom_by_serial(2)?;
//! ```

pub mod atom;
pub mod dict;
pub mod ids;
pub mod structure;
