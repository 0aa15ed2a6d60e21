// string -> typed value conversion for leaf members
use std::any::type_name;
use std::str::FromStr;

use crate::core::error::ExtractError;

//a failed conversion before it is tied to a member key; `for_key` turns it
//into the extraction error the caller surfaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertFailure {
    pub value: String,
    pub target: &'static str,
}

impl ConvertFailure {
    pub fn for_key(self, key: &str) -> ExtractError {
        ExtractError::Conversion {
            key: key.to_string(),
            value: self.value,
            target: self.target,
        }
    }
}

/// Convert a raw attribute string into `V`.
///
/// The raw value is taken literally (no trimming, no quoting rules); anything
/// `V` cannot parse is a conversion failure carrying the value and the target
/// type name.
pub fn convert<V>(raw: &str) -> Result<V, ConvertFailure>
where
    V: FromStr,
{
    raw.parse::<V>().map_err(|_| ConvertFailure {
        value: raw.to_string(),
        target: short_type_name::<V>(),
    })
}

//last path segment of a type name: core::schema::Inner -> Inner
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    match full.rsplit("::").next() {
        Some(last) => last,
        None => full,
    }
}
