//! mwdump: streaming parser for MediaWiki XML export dumps
//!
//! Turns a (possibly multi-gigabyte, usually compressed) `pages-articles` dump
//! from Wikipedia, Wiktionary or any other MediaWiki project into a lazy
//! sequence of [`Page`] records, without ever holding more than the page
//! currently being read in memory.
//!
//! # Architecture
//!
//! - **Stream opening** -- `.bz2` (multistream) and `.gz` files are decompressed
//!   on the fly; everything goes through a 256KB read buffer
//! - **Event walking** -- quick-xml events are reduced to open/close events over a
//!   frame stack; metadata subtrees (contributors, timestamps, checksums) are
//!   dropped without decoding
//! - **Namespace resolution** -- the `<siteinfo>` namespace table is collected as it
//!   streams past and every page's `<ns>` key is resolved against it
//! - **Page assembly** -- one builder per `<page>`; a `<redirect title="...">` turns
//!   the page into a redirect record regardless of its revision text
//!
//! Errors are fatal: the first [`DumpError`] ends the sequence. A dump is treated
//! as a trusted artifact, so corruption is reported rather than skipped.
//!
//! # Key Modules
//!
//! - [`parser`] -- [`DumpParser`] and its [`Pages`] iterator
//! - [`stream`] -- Compressed stream opener
//! - [`walker`] -- Streaming XML walker
//! - [`namespace`] -- Namespace key/name registry
//! - [`assembler`] -- Per-page field accumulation
//! - [`models`] -- [`Page`] and [`Namespace`]
//! - [`stats`] -- Counters for the `stats` command
//! - [`config`] -- Constants
//!
//! # Example Usage
//!
//! ```no_run
//! use mwdump::DumpParser;
//!
//! let mut parser = DumpParser::new("enwiktionary-latest-pages-articles.xml.bz2");
//! for page in parser.pages()? {
//!     let page = page?;
//!     if let Some(target) = &page.redirect {
//!         println!("{} -> {}", page.title, target);
//!     }
//! }
//! println!("{} namespaces", parser.namespaces().len());
//! # Ok::<(), mwdump::DumpError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod models;
pub mod namespace;
pub mod parser;
pub mod stats;
pub mod stream;
pub mod walker;

pub use error::{DumpError, Result};
pub use models::{Namespace, Page};
pub use namespace::NamespaceRegistry;
pub use parser::{DumpParser, Pages};
