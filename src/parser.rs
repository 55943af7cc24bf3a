//! Lazy iteration over the pages of a dump.

use crate::assembler::PageBuilder;
use crate::error::{DumpError, Result};
use crate::models::Page;
use crate::namespace::NamespaceRegistry;
use crate::stream::{open_dump, DumpStream};
use crate::walker::{Element, Tag, WalkEvent, XmlWalker};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Parses one dump file. The namespace registry lives as long as the parser,
/// so it stays readable after the page iterator is gone.
pub struct DumpParser {
    path: PathBuf,
    namespaces: NamespaceRegistry,
}

impl DumpParser {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            namespaces: NamespaceRegistry::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the dump and starts a fresh iteration from the first byte.
    pub fn pages(&mut self) -> Result<Pages<'_, DumpStream>> {
        let stream = open_dump(&self.path)?;
        Ok(self.pages_from_reader(stream))
    }

    /// Same as [`pages`](Self::pages), over an already-open source.
    pub fn pages_from_reader<R: BufRead>(&mut self, source: R) -> Pages<'_, R> {
        self.namespaces.clear();
        Pages {
            walker: XmlWalker::new(source),
            namespaces: &mut self.namespaces,
            builder: None,
            yielded: 0,
            finished: false,
        }
    }

    /// Namespaces declared by the part of the dump read so far.
    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }
}

/// Pull-driven page sequence. Each `next` reads just enough of the stream to
/// complete one `<page>`.
///
/// The first error ends the sequence. Dropping the iterator closes the
/// underlying stream whether or not it was exhausted.
pub struct Pages<'a, R: BufRead> {
    walker: XmlWalker<R>,
    namespaces: &'a mut NamespaceRegistry,
    builder: Option<PageBuilder>,
    yielded: u64,
    finished: bool,
}

impl<R: BufRead> Pages<'_, R> {
    pub fn namespaces(&self) -> &NamespaceRegistry {
        self.namespaces
    }

    /// Pages yielded so far.
    pub fn count_yielded(&self) -> u64 {
        self.yielded
    }

    fn advance(&mut self) -> Result<Option<Page>> {
        while let Some(event) = self.walker.next_event()? {
            match event {
                WalkEvent::Open(Tag::Page) => self.builder = Some(PageBuilder::new()),
                WalkEvent::Open(tag) => {
                    if let Some(builder) = self.builder.as_mut() {
                        builder.open(tag);
                    }
                }
                WalkEvent::Close(element) => {
                    if let Some(page) = self.close(element)? {
                        return Ok(Some(page));
                    }
                }
            }
        }
        Ok(None)
    }

    fn close(&mut self, element: Element) -> Result<Option<Page>> {
        let position = self.walker.position();
        match element.tag {
            Tag::Page => match self.builder.take() {
                Some(builder) => builder.finish(self.namespaces, position).map(Some),
                None => Ok(None),
            },
            Tag::Namespace if element.parent == Some(Tag::Namespaces) => {
                let Some(key) = element.attr else {
                    return Err(DumpError::UnexpectedStructure {
                        position,
                        detail: format!("namespace {:?} declared without a key", element.text),
                    });
                };
                self.namespaces.insert(key, element.text);
                Ok(None)
            }
            _ => {
                if let Some(builder) = self.builder.as_mut() {
                    builder.close(element);
                }
                Ok(None)
            }
        }
    }
}

impl<R: BufRead> Iterator for Pages<'_, R> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(page)) => {
                self.yielded += 1;
                trace!(title = %page.title, ns = %page.namespace.key, "Parsed page");
                Some(Ok(page))
            }
            Ok(None) => {
                self.finished = true;
                info!(
                    pages = self.yielded,
                    namespaces = self.namespaces.len(),
                    "Dump fully parsed"
                );
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Pages<'_, R> {}

impl<R: BufRead> Drop for Pages<'_, R> {
    fn drop(&mut self) {
        if !self.finished {
            debug!(
                pages = self.yielded,
                depth = self.walker.depth(),
                "Page iteration abandoned before end of dump"
            );
        }
    }
}
