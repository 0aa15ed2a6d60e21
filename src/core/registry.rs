// section registry: which paths are declared, and as what type
use std::any::TypeId;
use std::collections::HashMap;

use crate::core::convert::short_type_name;
use crate::core::error::ExtractError;
use crate::core::resolve::resolve_section_path;
use crate::core::schema::ConfigElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    //declared as a mappable section, eligible for extraction
    Mapped,
    //declared in the configuration subsystem but handled outside the
    //mapper; requesting extraction for such a path is a caller mistake
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSection {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub kind: SectionKind,
}

/// The configuration subsystem's view of declared sections.
///
/// Extraction validates against this registry before it ever touches the
/// raw document; a missing or mismatched entry fails the call, while a
/// missing document node does not.
#[derive(Debug, Default)]
pub struct SectionRegistry {
    entries: HashMap<String, RegisteredSection>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `T` at its resolved section path.
    pub fn register<T: ConfigElement>(&mut self) {
        let path = resolve_section_path::<T>(None);
        self.register_at::<T>(path);
    }

    /// Register `T` at an explicit path instead of its resolved one.
    pub fn register_at<T: ConfigElement>(&mut self, path: impl Into<String>) {
        self.entries.insert(
            path.into(),
            RegisteredSection {
                type_id: TypeId::of::<T>(),
                type_name: short_type_name::<T>(),
                kind: SectionKind::Mapped,
            },
        );
    }

    /// Register a path whose content is owned by some other subsystem. The
    /// mapper will refuse to walk it.
    pub fn register_external<U: 'static>(&mut self, path: impl Into<String>) {
        self.entries.insert(
            path.into(),
            RegisteredSection {
                type_id: TypeId::of::<U>(),
                type_name: short_type_name::<U>(),
                kind: SectionKind::External,
            },
        );
    }

    pub fn get(&self, path: &str) -> Option<&RegisteredSection> {
        self.entries.get(path)
    }

    //validation used by extraction:
    //1) an entry must exist at the path
    //2) it must be declared for the requested type
    //3) it must be mapper-eligible
    //type compatibility is checked before kind, so a wrong-type lookup never
    //reports the kind problem of somebody else's entry
    pub fn expect_mapped<T: 'static>(&self, path: &str) -> Result<&RegisteredSection, ExtractError> {
        let entry = self
            .entries
            .get(path)
            .ok_or_else(|| ExtractError::SectionMismatch {
                path: path.to_string(),
                requested: short_type_name::<T>(),
            })?;

        if entry.type_id != TypeId::of::<T>() {
            return Err(ExtractError::SectionMismatch {
                path: path.to_string(),
                requested: short_type_name::<T>(),
            });
        }

        if entry.kind != SectionKind::Mapped {
            return Err(ExtractError::NotASection {
                path: path.to_string(),
                type_name: entry.type_name,
            });
        }

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ElementSchema;

    #[derive(Debug, Default)]
    struct ServerSettings;

    impl ConfigElement for ServerSettings {
        fn schema() -> ElementSchema<Self> {
            ElementSchema::builder()
                .section_group("services")
                .section_name("server")
                .build()
        }
    }

    #[derive(Debug, Default)]
    struct MailSettings;

    impl ConfigElement for MailSettings {
        fn schema() -> ElementSchema<Self> {
            ElementSchema::builder().section_name("mail").build()
        }
    }

    #[test]
    fn register_uses_the_resolved_path() {
        let mut registry = SectionRegistry::new();
        registry.register::<ServerSettings>();

        let entry = registry.get("services/server").expect("entry should exist");
        assert_eq!(entry.type_name, "ServerSettings");
        assert_eq!(entry.kind, SectionKind::Mapped);
    }

    #[test]
    fn expect_mapped_accepts_a_matching_entry() {
        let mut registry = SectionRegistry::new();
        registry.register::<MailSettings>();

        let entry = registry.expect_mapped::<MailSettings>("mail").unwrap();
        assert_eq!(entry.type_id, TypeId::of::<MailSettings>());
    }

    #[test]
    fn missing_entry_is_a_section_mismatch() {
        let registry = SectionRegistry::new();

        let err = registry.expect_mapped::<MailSettings>("mail").unwrap_err();
        match err {
            ExtractError::SectionMismatch { path, requested } => {
                assert_eq!(path, "mail");
                assert_eq!(requested, "MailSettings");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn wrong_type_is_a_section_mismatch() {
        let mut registry = SectionRegistry::new();
        registry.register_at::<ServerSettings>("mail");

        let err = registry.expect_mapped::<MailSettings>("mail").unwrap_err();
        assert!(matches!(err, ExtractError::SectionMismatch { .. }));
    }

    #[test]
    fn external_entry_is_not_a_section() {
        let mut registry = SectionRegistry::new();
        registry.register_external::<MailSettings>("mail");

        let err = registry.expect_mapped::<MailSettings>("mail").unwrap_err();
        match err {
            ExtractError::NotASection { path, type_name } => {
                assert_eq!(path, "mail");
                assert_eq!(type_name, "MailSettings");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn later_registration_overwrites_the_path() {
        let mut registry = SectionRegistry::new();
        registry.register_at::<ServerSettings>("shared");
        registry.register_at::<MailSettings>("shared");

        assert!(registry.expect_mapped::<MailSettings>("shared").is_ok());
        assert!(registry.expect_mapped::<ServerSettings>("shared").is_err());
    }
}
