use crate::config::REDIRECT_MODEL;
use serde::Serialize;

/// A namespace declared in the dump's `<siteinfo>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Namespace {
    pub key: String,
    /// Empty for the main namespace
    pub name: String,
}

impl Namespace {
    pub fn is_main(&self) -> bool {
        self.name.is_empty()
    }
}

/// One completed `<page>` subtree.
///
/// Redirects carry `redirect = Some(target)`, no text, and the
/// [`REDIRECT_MODEL`] content model. Other pages carry whatever their
/// current revision declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub text: Option<String>,
    pub model: Option<String>,
    pub namespace: Namespace,
    pub redirect: Option<String>,
}

impl Page {
    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    pub(crate) fn new_redirect(title: String, namespace: Namespace, target: String) -> Self {
        Self {
            title,
            text: None,
            model: Some(REDIRECT_MODEL.to_string()),
            namespace,
            redirect: Some(target),
        }
    }
}
