use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Everything that can abort a dump parse.
///
/// All variants are fatal: once one is yielded the page sequence ends.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("failed to open dump {}", path.display())]
    StreamOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read dump stream at byte {position}")]
    StreamRead {
        position: u64,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("malformed XML at byte {position}")]
    MalformedXml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("dump ended at byte {position} with {depth} element(s) still open")]
    TruncatedXml { position: u64, depth: usize },

    #[error("page ending at byte {position} has no title")]
    MissingTitle { position: u64 },

    #[error("page {title:?} references undeclared namespace key {key:?}")]
    UnknownNamespaceKey { key: String, title: String },

    #[error("unexpected dump structure at byte {position}: {detail}")]
    UnexpectedStructure { position: u64, detail: String },
}

impl DumpError {
    /// Splits reader failures from markup failures; quick-xml reports both as one type.
    pub(crate) fn from_xml(source: quick_xml::Error, position: u64) -> Self {
        match source {
            quick_xml::Error::Io(source) => DumpError::StreamRead { position, source },
            source => DumpError::MalformedXml { position, source },
        }
    }
}

pub type Result<T, E = DumpError> = std::result::Result<T, E>;
