// node-to-object mapping and the extraction entry point
use tracing::{debug, warn};

use crate::core::document::{self, DocumentSource};
use crate::core::error::ExtractError;
use crate::core::registry::SectionRegistry;
use crate::core::resolve::resolve_section_path;
use crate::core::schema::{ConfigElement, ElementSchema, MemberBinding};

/// Populate `target`'s members from `node`, depth-first in declared order.
///
/// Per member, exactly one of three things happens:
/// 1) a matching attribute is converted and assigned (and wins over any
///    same-named child node)
/// 2) a matching child node is mapped recursively into a fresh instance of
///    a nested member
/// 3) nothing matches and the member keeps its default value
///
/// A member is never revisited, and a conversion failure aborts the whole
/// extraction.
pub(crate) fn populate<T>(
    node: roxmltree::Node<'_, '_>,
    target: &mut T,
    schema: &ElementSchema<T>,
) -> Result<(), ExtractError> {
    for member in &schema.members {
        let key = member.key();

        if let Some(raw) = node.attribute(key) {
            match &member.binding {
                MemberBinding::Leaf(apply) => apply(target, raw)?,
                //an attribute can never carry a composite value; this is a
                //conversion failure, not a fall-through to the child branch
                MemberBinding::Nested(nested) => {
                    return Err(ExtractError::Conversion {
                        key: key.to_string(),
                        value: raw.to_string(),
                        target: nested.element_type(),
                    });
                }
            }
            continue;
        }

        if let MemberBinding::Nested(nested) = &member.binding
            && let Some(child) = document::child_element(node, key)
        {
            nested.populate_into(child, target)?;
        }
        //no attribute and no child node: absent configuration is expected,
        //the member stays at its default
    }
    Ok(())
}

/// Extracts typed sections from one registry + document source pairing.
///
/// Holds no mutable state; every `extract` call resolves its own path,
/// loads its own document view and builds its own schema, so repeated and
/// concurrent calls are independent.
pub struct SectionExtractor {
    registry: SectionRegistry,
    source: DocumentSource,
    //when set, pins the section path for every call on this extractor
    section_name: Option<String>,
}

impl SectionExtractor {
    pub fn new(registry: SectionRegistry, source: DocumentSource) -> Self {
        Self {
            registry,
            source,
            section_name: None,
        }
    }

    /// An extractor with a fixed section path, ignoring type naming
    /// metadata for the rest of its lifetime.
    pub fn with_section_name(
        registry: SectionRegistry,
        source: DocumentSource,
        section_name: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            source,
            section_name: Some(section_name.into()),
        }
    }

    pub fn extract<T: ConfigElement>(&self) -> Result<T, ExtractError> {
        //1) resolve the section path once for this call
        let path = resolve_section_path::<T>(self.section_name.as_deref());

        //2) the registry must agree before the document is consulted
        self.registry.expect_mapped::<T>(&path)?;

        //3) fresh document view for this call
        let text = self.source.load()?;
        let doc = document::parse_document(&text)?;

        //4) allocate fully, then walk; a registered section with no literal
        //node is a valid defaults-only object
        let mut value = T::default();
        match document::select_section(&doc, &path) {
            Some(node) => {
                populate(node, &mut value, &T::schema())?;
                debug!("extracted section '{}'", path);
            }
            None => {
                warn!(
                    "no node at /{}/{}; section keeps default values",
                    document::ROOT_ELEMENT,
                    path
                );
            }
        }
        Ok(value)
    }
}
