//! Filesystem plumbing for the bootstrap renderer
//!
//! Gathers input asset trees into memory and writes rendered trees back out.

pub mod assets;
pub mod error;

pub use assets::{load_files_recursively, write_file, write_files};
pub use error::{Error, Result};
