// extraction error taxonomy
use std::fmt;

//every failure is a static mismatch between document and model, so no variant
//carries anything transient; all operations are local deterministic reads and
//nothing is ever retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    //no entry registered at the resolved path, or the entry was declared for
    //a different type than the one requested
    SectionMismatch {
        path: String,
        requested: &'static str,
    },
    //the entry exists and the type matches, but the path was registered as
    //externally handled rather than as a mappable section
    NotASection {
        path: String,
        type_name: &'static str,
    },
    //an attribute's string value could not be converted to the member's
    //declared type; fatal to the whole extraction, not just the one member
    Conversion {
        key: String,
        value: String,
        target: &'static str,
    },
    DocumentRead {
        location: String,
        detail: String,
    },
    DocumentSyntax {
        detail: String,
    },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::SectionMismatch { path, requested } => {
                write!(f, "could not resolve the named section '{}' as type {}", path, requested)
            }
            ExtractError::NotASection { path, type_name } => {
                write!(
                    f,
                    "section '{}' ({}) is not registered as a mappable configuration section",
                    path, type_name
                )
            }
            ExtractError::Conversion { key, value, target } => {
                write!(f, "cannot convert '{}' to {} for key '{}'", value, target, key)
            }
            ExtractError::DocumentRead { location, detail } => {
                write!(f, "failed to read configuration document {}: {}", location, detail)
            }
            ExtractError::DocumentSyntax { detail } => {
                write!(f, "configuration document is not well-formed: {}", detail)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_section_and_requested_type() {
        let err = ExtractError::SectionMismatch {
            path: "services/server".to_string(),
            requested: "ServerSettings",
        };
        assert_eq!(
            err.to_string(),
            "could not resolve the named section 'services/server' as type ServerSettings"
        );
    }

    #[test]
    fn display_names_the_offending_key_and_value() {
        let err = ExtractError::Conversion {
            key: "port".to_string(),
            value: "abc".to_string(),
            target: "u16",
        };
        assert_eq!(err.to_string(), "cannot convert 'abc' to u16 for key 'port'");
    }
}
