//! Event-based walk over the dump's XML.
//!
//! The walker keeps one [`Frame`] per open element. Only elements that carry a
//! page or namespace field accumulate text, and everything beneath an ignored
//! element is suppressed, so memory stays bounded by the open subtree no
//! matter how large the dump is.

use crate::error::{DumpError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::BufRead;

/// Elements the walker knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Mediawiki,
    Siteinfo,
    Namespaces,
    Namespace,
    Page,
    Title,
    Ns,
    Redirect,
    Revision,
    Text,
    Model,
    /// Metadata that is never surfaced; the whole subtree is dropped.
    Ignored,
    /// Unrecognized element. Walked structurally, its text is not kept.
    Other,
}

impl Tag {
    pub fn from_name(local_name: &[u8]) -> Self {
        match local_name {
            b"mediawiki" => Tag::Mediawiki,
            b"siteinfo" => Tag::Siteinfo,
            b"namespaces" => Tag::Namespaces,
            b"namespace" => Tag::Namespace,
            b"page" => Tag::Page,
            b"title" => Tag::Title,
            b"ns" => Tag::Ns,
            b"redirect" => Tag::Redirect,
            b"revision" => Tag::Revision,
            b"text" => Tag::Text,
            b"model" => Tag::Model,
            b"sha1" | b"comment" | b"contributor" | b"username" | b"ip" | b"timestamp"
            | b"sitename" | b"dbname" | b"base" | b"generator" | b"case" | b"restrictions"
            | b"minor" | b"parentid" | b"format" | b"origin" | b"id" => Tag::Ignored,
            _ => Tag::Other,
        }
    }

    fn captures_text(self) -> bool {
        match self {
            Tag::Namespace | Tag::Title | Tag::Ns | Tag::Text | Tag::Model => true,
            Tag::Mediawiki
            | Tag::Siteinfo
            | Tag::Namespaces
            | Tag::Page
            | Tag::Redirect
            | Tag::Revision
            | Tag::Ignored
            | Tag::Other => false,
        }
    }

    /// The one attribute worth reading on this element, if any.
    fn attribute(self) -> Option<&'static [u8]> {
        match self {
            Tag::Namespace => Some(b"key"),
            Tag::Redirect => Some(b"title"),
            Tag::Mediawiki
            | Tag::Siteinfo
            | Tag::Namespaces
            | Tag::Page
            | Tag::Title
            | Tag::Ns
            | Tag::Revision
            | Tag::Text
            | Tag::Model
            | Tag::Ignored
            | Tag::Other => None,
        }
    }
}

/// A closed element, with the state gathered while it was open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    /// Enclosing element; `None` for the document root
    pub parent: Option<Tag>,
    pub text: String,
    /// Value of [`Tag::attribute`] when the element carried it
    pub attr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    Open(Tag),
    Close(Element),
}

struct Frame {
    tag: Tag,
    text: String,
    attr: Option<String>,
    suppressed: bool,
}

impl Frame {
    fn accumulates(&self) -> bool {
        !self.suppressed && self.tag.captures_text()
    }
}

pub struct XmlWalker<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    stack: Vec<Frame>,
}

impl<R: BufRead> XmlWalker<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(false);
        reader.expand_empty_elements(true);
        reader.check_end_names(true);

        Self {
            reader,
            buf: Vec::with_capacity(8 * 1024),
            stack: Vec::with_capacity(16),
        }
    }

    /// Byte offset into the (decompressed) stream.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Advances to the next unsuppressed open or close. `Ok(None)` at end of document.
    pub fn next_event(&mut self) -> Result<Option<WalkEvent>> {
        loop {
            self.buf.clear();
            let position = self.reader.buffer_position() as u64;
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| DumpError::from_xml(e, position))?;

            let inherited = self.stack.last().is_some_and(|f| f.suppressed);

            match event {
                Event::Start(start) => {
                    let tag = Tag::from_name(start.local_name().as_ref());
                    let suppressed = inherited || tag == Tag::Ignored;
                    let attr = match tag.attribute() {
                        Some(name) if !suppressed => read_attribute(&start, name)
                            .map_err(|e| DumpError::from_xml(e, position))?,
                        _ => None,
                    };
                    self.stack.push(Frame {
                        tag,
                        text: String::new(),
                        attr,
                        suppressed,
                    });
                    if !suppressed {
                        return Ok(Some(WalkEvent::Open(tag)));
                    }
                }
                Event::End(_) => {
                    let Some(frame) = self.stack.pop() else {
                        continue;
                    };
                    if frame.suppressed {
                        continue;
                    }
                    let parent = self.stack.last().map(|f| f.tag);
                    return Ok(Some(WalkEvent::Close(Element {
                        tag: frame.tag,
                        parent,
                        text: frame.text,
                        attr: frame.attr,
                    })));
                }
                Event::Text(text) => {
                    if let Some(frame) = self.stack.last_mut().filter(|f| f.accumulates()) {
                        let decoded = text
                            .unescape()
                            .map_err(|e| DumpError::from_xml(e, position))?;
                        frame.text.push_str(&decoded);
                    }
                }
                Event::CData(data) => {
                    if let Some(frame) = self.stack.last_mut().filter(|f| f.accumulates()) {
                        let decoded = self
                            .reader
                            .decoder()
                            .decode(&data)
                            .map_err(|e| DumpError::from_xml(e, position))?;
                        frame.text.push_str(&decoded);
                    }
                }
                Event::Eof => {
                    if !self.stack.is_empty() {
                        return Err(DumpError::TruncatedXml {
                            position: self.reader.buffer_position() as u64,
                            depth: self.stack.len(),
                        });
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

fn read_attribute(start: &BytesStart<'_>, name: &[u8]) -> quick_xml::Result<Option<String>> {
    match start.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}
