//! Opening dump files, with transparent bzip2/gzip decompression.

use crate::config::READ_BUFFER_SIZE;
use crate::error::{DumpError, Result};
use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::info;

/// Container format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Plain,
    Bzip2,
    Gzip,
}

impl DumpFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bz2") => DumpFormat::Bzip2,
            Some(ext) if ext.eq_ignore_ascii_case("gz") => DumpFormat::Gzip,
            _ => DumpFormat::Plain,
        }
    }
}

/// A buffered byte stream over a dump file. Dropping it closes the file.
pub enum DumpStream {
    Plain(BufReader<File>),
    // Wikimedia dumps are multistream bz2
    Bzip2(BufReader<MultiBzDecoder<File>>),
    Gzip(BufReader<MultiGzDecoder<File>>),
}

impl DumpStream {
    pub fn format(&self) -> DumpFormat {
        match self {
            DumpStream::Plain(_) => DumpFormat::Plain,
            DumpStream::Bzip2(_) => DumpFormat::Bzip2,
            DumpStream::Gzip(_) => DumpFormat::Gzip,
        }
    }
}

impl Read for DumpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DumpStream::Plain(r) => r.read(buf),
            DumpStream::Bzip2(r) => r.read(buf),
            DumpStream::Gzip(r) => r.read(buf),
        }
    }
}

impl BufRead for DumpStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            DumpStream::Plain(r) => r.fill_buf(),
            DumpStream::Bzip2(r) => r.fill_buf(),
            DumpStream::Gzip(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            DumpStream::Plain(r) => r.consume(amt),
            DumpStream::Bzip2(r) => r.consume(amt),
            DumpStream::Gzip(r) => r.consume(amt),
        }
    }
}

/// Opens `path`, decompressing `.bz2` and `.gz` files on the fly.
///
/// Compressed streams decode their first block here, so a corrupt container
/// is reported as [`DumpError::StreamOpen`] instead of surfacing mid-parse.
pub fn open_dump(path: impl AsRef<Path>) -> Result<DumpStream> {
    let path = path.as_ref();
    let open_err = |source| DumpError::StreamOpen {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let format = DumpFormat::from_path(path);
    let mut stream = match format {
        DumpFormat::Plain => DumpStream::Plain(BufReader::with_capacity(READ_BUFFER_SIZE, file)),
        DumpFormat::Bzip2 => DumpStream::Bzip2(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiBzDecoder::new(file),
        )),
        DumpFormat::Gzip => DumpStream::Gzip(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        )),
    };

    if format != DumpFormat::Plain {
        stream.fill_buf().map_err(open_err)?;
    }

    info!(path = %path.display(), ?format, "Opened dump");
    Ok(stream)
}
