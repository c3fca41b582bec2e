//! Read circuit graphs from files

mod bench;

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use bench::{read_bench, read_bench_into, ParseError};

use crate::CircuitGraph;

/// Errors encountered while reading a netlist file
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened
    #[error("can't open file {}: {source}", .path.display())]
    FileOpen {
        /// Path of the file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file content is not a valid netlist
    #[error("can't parse file {}: {source}", .path.display())]
    Parse {
        /// Path of the file
        path: PathBuf,
        /// Underlying error
        source: ParseError,
    },
}

/// Read a circuit graph from a netlist file
///
/// The file is read as an ISCAS89 .bench netlist, whatever its extension.
pub fn read_network_file(path: &Path) -> Result<CircuitGraph, Error> {
    let f = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    read_bench(f).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
