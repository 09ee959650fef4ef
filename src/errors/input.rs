//! Errors produced while parsing graph files and configuration.

use std::path::PathBuf;

/// Errors surfaced by graph-file parsers (§6/§4.8) and by configuration
/// loading (§4.12).
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The requested format is not one of the supported parsers.
    #[error("unknown graph format: {0}")]
    UnknownFormat(String),

    /// The file could not be read from disk.
    #[error("could not read {path}: {source}")]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line or token did not match the expected grammar for the format.
    #[error("malformed {format} input at line {line}: {message}")]
    Malformed {
        /// Format being parsed (`tsv`, `gml`, `dot`, `net`).
        format: &'static str,
        /// One-indexed line number.
        line: usize,
        /// Human-readable description of the mismatch.
        message: String,
    },

    /// The same node name was declared twice with inconsistent attributes.
    #[error("node {0:?} was declared twice with inconsistent attributes")]
    InconsistentNode(String),

    /// An edge referenced a node id or name that was never declared.
    #[error("edge references undeclared node {0:?}")]
    UndeclaredNode(String),

    /// The same edge was declared twice with different weights.
    #[error("edge ({source}, {destination}) was declared twice with conflicting weights")]
    ConflictingWeight {
        /// Source node name.
        source: String,
        /// Destination node name.
        destination: String,
    },

    /// A directed edge or `digraph` was found where only undirected input
    /// is accepted.
    #[error("{format} input must be undirected, found a directed edge")]
    UnexpectedlyDirected {
        /// Format being parsed.
        format: &'static str,
    },

    /// A configuration file could not be parsed as TOML, including an
    /// unknown key rejected by `deny_unknown_fields`.
    #[error("could not parse configuration: {0}")]
    ConfigSyntax(String),
}
