//! Collects the fields of one `<page>` subtree and turns them into a [`Page`].

use crate::error::{DumpError, Result};
use crate::models::Page;
use crate::namespace::NamespaceRegistry;
use crate::walker::{Element, Tag};

/// Field state for the page currently being walked.
///
/// A fresh builder replaces the previous one on every `<page>` open, so no
/// state leaks from one page into the next.
#[derive(Debug, Default)]
pub struct PageBuilder {
    title: Option<String>,
    ns_key: Option<String>,
    redirect: Option<Option<String>>,
    text: Option<String>,
    model: Option<String>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every element opened inside the page.
    pub fn open(&mut self, tag: Tag) {
        // Only the last revision in the subtree counts.
        if tag == Tag::Revision {
            self.text = None;
            self.model = None;
        }
    }

    /// Called for every element closed inside the page. Elements outside the
    /// `page > field` and `page > revision > field` paths are ignored.
    pub fn close(&mut self, element: Element) {
        match (element.tag, element.parent) {
            (Tag::Title, Some(Tag::Page)) => self.title = Some(element.text),
            (Tag::Ns, Some(Tag::Page)) => self.ns_key = Some(element.text.trim().to_string()),
            (Tag::Redirect, Some(Tag::Page)) => self.redirect = Some(element.attr),
            (Tag::Text, Some(Tag::Revision)) => self.text = Some(element.text),
            (Tag::Model, Some(Tag::Revision)) => self.model = Some(element.text),
            _ => {}
        }
    }

    /// Resolves the namespace and builds the record. `position` is where the
    /// page closed, for error reporting.
    pub fn finish(self, registry: &NamespaceRegistry, position: u64) -> Result<Page> {
        let title = self.title.unwrap_or_default();

        let Some(ns_key) = self.ns_key else {
            return Err(DumpError::UnexpectedStructure {
                position,
                detail: format!("page {title:?} has no <ns> element"),
            });
        };
        let namespace = registry.namespace(&ns_key, &title)?;

        if title.is_empty() {
            return Err(DumpError::MissingTitle { position });
        }

        match self.redirect {
            Some(Some(target)) => Ok(Page::new_redirect(title, namespace, target)),
            Some(None) => Err(DumpError::UnexpectedStructure {
                position,
                detail: format!("redirect on page {title:?} has no title attribute"),
            }),
            None => Ok(Page {
                title,
                text: self.text,
                model: self.model,
                namespace,
                redirect: None,
            }),
        }
    }
}
