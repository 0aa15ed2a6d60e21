//maps named sections of an XML configuration document onto typed structs
//via declaratively registered member schemas
pub mod core;

pub use crate::core::document::DocumentSource;
pub use crate::core::error::ExtractError;
pub use crate::core::extract::SectionExtractor;
pub use crate::core::registry::{SectionKind, SectionRegistry};
pub use crate::core::resolve::resolve_section_path;
pub use crate::core::schema::{ConfigElement, ElementSchema, SchemaBuilder};
