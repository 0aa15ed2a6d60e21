// raw document access: load the backing text and walk to a section node
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::core::error::ExtractError;

//every section path is anchored under this root element
pub const ROOT_ELEMENT: &str = "configuration";

/// Where the raw configuration document comes from.
///
/// Loaded fresh on every extraction call; nothing is cached, so the source
/// is a pure read and concurrent callers never share parser state.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    File(PathBuf),
    Inline(String),
}

impl DocumentSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DocumentSource::File(path.into())
    }

    pub fn inline(text: impl Into<String>) -> Self {
        DocumentSource::Inline(text.into())
    }

    pub fn load(&self) -> Result<String, ExtractError> {
        match self {
            DocumentSource::File(path) => {
                debug!("loading configuration document from {}", path.display());
                fs::read_to_string(path).map_err(|e| ExtractError::DocumentRead {
                    location: path.display().to_string(),
                    detail: e.to_string(),
                })
            }
            DocumentSource::Inline(text) => Ok(text.clone()),
        }
    }
}

pub fn parse_document(text: &str) -> Result<roxmltree::Document<'_>, ExtractError> {
    roxmltree::Document::parse(text).map_err(|e| ExtractError::DocumentSyntax {
        detail: e.to_string(),
    })
}

/// Select the node at `/configuration/<section_path>`.
///
/// Absence anywhere along the path is normal and yields `None`; the caller
/// falls back to a defaults-only object. A root element that is not
/// `configuration` selects nothing for the same reason.
pub fn select_section<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    section_path: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    let root = doc.root_element();
    if root.tag_name().name() != ROOT_ELEMENT {
        return None;
    }

    //descend one '/'-separated segment at a time; an empty segment (from a
    //trailing slash, or an empty path) matches no child
    let mut current = root;
    for segment in section_path.split('/') {
        current = child_element(current, segment)?;
    }
    Some(current)
}

//first child element with a matching tag name
pub(crate) fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}
