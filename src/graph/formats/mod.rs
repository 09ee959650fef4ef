//! Graph file format parsers (§6).
//!
//! Each submodule exposes a `parse(&str) -> Result<Graph, InputError>`
//! function over the in-memory file contents; [`load_file`] additionally
//! handles the file I/O and format dispatch.

pub mod dot;
pub mod gml;
pub mod pajek;
pub mod tsv;

use std::fmt;
use std::path::Path;

use crate::errors::InputError;
use crate::graph::Graph;

/// A recognized graph file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Tab-separated edge list.
    Tsv,
    /// Graph Modeling Language.
    Gml,
    /// GraphViz DOT (undirected subset).
    Dot,
    /// Pajek/NET.
    Net,
}

impl Format {
    /// Infers a format from a file extension (case-insensitive), if
    /// recognized.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "tsv" | "txt" => Some(Self::Tsv),
            "gml" => Some(Self::Gml),
            "dot" | "gv" => Some(Self::Dot),
            "net" | "pajek" => Some(Self::Net),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tsv => "tsv",
            Self::Gml => "gml",
            Self::Dot => "dot",
            Self::Net => "net",
        };
        f.write_str(name)
    }
}

/// Parses `content` according to `format`.
///
/// # Errors
///
/// Propagates whatever [`InputError`] the matching format parser
/// returns.
pub fn parse(content: &str, format: Format) -> Result<Graph, InputError> {
    match format {
        Format::Tsv => tsv::parse(content),
        Format::Gml => gml::parse(content),
        Format::Dot => dot::parse(content),
        Format::Net => pajek::parse(content),
    }
}

/// Reads `path` and parses it according to `format`, wrapping any I/O
/// failure in [`InputError::Io`].
///
/// # Errors
///
/// Returns [`InputError::Io`] if `path` cannot be read, or propagates a
/// parse error from [`parse`].
pub fn load_file(path: &Path, format: Format) -> Result<Graph, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, format)
}

/// Reads `path` and parses it, inferring the format from its extension.
///
/// # Errors
///
/// Returns [`InputError::UnknownFormat`] if the extension is missing or
/// not recognized.
pub fn load_file_inferred(path: &Path) -> Result<Graph, InputError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| InputError::UnknownFormat(path.display().to_string()))?;
    let format = Format::from_extension(extension)
        .ok_or_else(|| InputError::UnknownFormat(extension.to_string()))?;
    load_file(path, format)
}
