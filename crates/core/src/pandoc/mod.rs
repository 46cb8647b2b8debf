//! Pandoc JSON filter plumbing.
//!
//! Pandoc hands filters its AST as JSON on stdin and reads the altered AST
//! back from stdout. Elements are objects of the form `{"t": kind, "c":
//! content}`; [`walk`] visits each of them with a [`NodeAction`].

pub mod filter;
pub mod walk;

pub use filter::{FilterError, document_meta, run_filter};
pub use walk::{NodeAction, Rewrite, walk};
