// section-path resolution from type naming metadata
use crate::core::convert::short_type_name;
use crate::core::schema::ConfigElement;

/// Resolve the section path used to locate both the registry entry and the
/// document node for `T`.
///
/// Precedence:
/// 1) an explicit, non-empty name is used verbatim (an empty one counts as
///    not supplied)
/// 2) naming metadata on the type: "group/name" when a non-empty group is
///    present, else the name alone
/// 3) the type's own short name
///
/// Always yields a string; resolution has no failure path and is idempotent
/// for a given type.
pub fn resolve_section_path<T: ConfigElement>(explicit: Option<&str>) -> String {
    if let Some(name) = explicit
        && !name.is_empty()
    {
        return name.to_string();
    }

    let schema = T::schema();
    match &schema.naming {
        None => short_type_name::<T>().to_string(),
        Some(naming) => match naming.group {
            Some(group) if !group.is_empty() => format!("{}/{}", group, naming.name),
            _ => naming.name.to_string(),
        },
    }
}
