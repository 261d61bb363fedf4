//! # pdbkit Core Library
//!
//! Reading and writing of Protein Data Bank files in the fixed-column,
//! 80-character record format.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The validated [`Record`](core::record::Record)
//!   line type, the PDB dictionary and object graph in `models`, and the text
//!   codec in `io`: field encoders, the line packer, the aggregator that joins
//!   lines into file text, and the reader that decodes it again.
//!
//! - **[`workflows`]: The Public API.** Complete tasks on file text, such as
//!   re-packing a file into normalised records or summarising its contents.
//!
//! ## Example
//!
//! ```
//! use pdbkit::core::io::aggregator::pdb_dict_to_pdb_string;
//! use pdbkit::core::models::dict::PdbDict;
//!
//! let pdb = PdbDict {
//!     code: Some("1ABC".into()),
//!     ..Default::default()
//! };
//! let text = pdb_dict_to_pdb_string(&pdb).unwrap();
//! assert_eq!(text.len(), 80);
//! assert!(text.starts_with("HEADER"));
//! ```

pub mod core;
pub mod workflows;
