// declared member schema: the side table that replaces per-type parsing code
use std::marker::PhantomData;
use std::str::FromStr;

use crate::core::convert::{convert, short_type_name};
use crate::core::error::ExtractError;
use crate::core::extract::populate;

/// Implemented by every type that can be mapped from a section node.
///
/// `schema()` describes the type's declared members in order: the member
/// name, an optional lookup-key override, and whether the member is a leaf
/// value or a nested element. The schema is rebuilt on every extraction
/// call; nothing is cached between calls.
pub trait ConfigElement: Default + 'static {
    fn schema() -> ElementSchema<Self>;
}

//section naming metadata attached to a type. an empty name is legal and kept
//literally (a group with an empty name resolves to "group/")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionNaming {
    pub name: &'static str,
    pub group: Option<&'static str>,
}

/// Ordered member schema for one mappable type.
pub struct ElementSchema<T> {
    pub(crate) naming: Option<SectionNaming>,
    pub(crate) members: Vec<MemberSchema<T>>,
}

pub struct MemberSchema<T> {
    //declared member name
    pub(crate) name: &'static str,
    //naming override; wins over `name` when present
    pub(crate) rename: Option<&'static str>,
    pub(crate) binding: MemberBinding<T>,
}

impl<T> MemberSchema<T> {
    //the key matched against the document: override if present, else the
    //member's own name
    pub(crate) fn key(&self) -> &'static str {
        match self.rename {
            Some(key) => key,
            None => self.name,
        }
    }
}

pub(crate) enum MemberBinding<T> {
    //convert a matching attribute string and assign it
    Leaf(Box<dyn Fn(&mut T, &str) -> Result<(), ExtractError>>),
    //descend into a matching child node with a fresh instance
    Nested(Box<dyn NestedMember<T>>),
}

//object-safe seam for nested members: erases the child's concrete type while
//keeping the recursion fully typed on both sides of the boundary
pub(crate) trait NestedMember<T> {
    fn populate_into(
        &self,
        node: roxmltree::Node<'_, '_>,
        target: &mut T,
    ) -> Result<(), ExtractError>;

    fn element_type(&self) -> &'static str;
}

struct NestedField<T, C: ConfigElement> {
    assign: fn(&mut T, C),
    _marker: PhantomData<fn() -> C>,
}

impl<T, C: ConfigElement> NestedMember<T> for NestedField<T, C> {
    fn populate_into(
        &self,
        node: roxmltree::Node<'_, '_>,
        target: &mut T,
    ) -> Result<(), ExtractError> {
        //fully allocate before populating, so a sibling member never
        //observes a half-built child; assignment happens last
        let mut child = C::default();
        populate(node, &mut child, &C::schema())?;
        (self.assign)(target, child);
        Ok(())
    }

    fn element_type(&self) -> &'static str {
        short_type_name::<C>()
    }
}

impl<T: ConfigElement> ElementSchema<T> {
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }
}

/// Builds an `ElementSchema` member by member, in declaration order.
pub struct SchemaBuilder<T> {
    naming: Option<SectionNaming>,
    members: Vec<MemberSchema<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    pub fn new() -> Self {
        Self {
            naming: None,
            members: Vec::new(),
        }
    }

    /// Attach a section name to the type. Presence of either naming call
    /// counts as naming metadata for section resolution.
    pub fn section_name(mut self, name: &'static str) -> Self {
        self.naming
            .get_or_insert(SectionNaming { name: "", group: None })
            .name = name;
        self
    }

    pub fn section_group(mut self, group: &'static str) -> Self {
        self.naming
            .get_or_insert(SectionNaming { name: "", group: None })
            .group = Some(group);
        self
    }

    /// A leaf member converted from an attribute string.
    pub fn leaf<V>(self, name: &'static str, assign: fn(&mut T, V)) -> Self
    where
        V: FromStr + 'static,
    {
        self.leaf_member(name, None, assign)
    }

    /// A leaf member looked up under `key` instead of its declared name.
    pub fn leaf_keyed<V>(self, name: &'static str, key: &'static str, assign: fn(&mut T, V)) -> Self
    where
        V: FromStr + 'static,
    {
        self.leaf_member(name, Some(key), assign)
    }

    /// A nested element member, mapped recursively from a child node.
    pub fn nested<C>(self, name: &'static str, assign: fn(&mut T, C)) -> Self
    where
        C: ConfigElement,
    {
        self.nested_member(name, None, assign)
    }

    pub fn nested_keyed<C>(
        self,
        name: &'static str,
        key: &'static str,
        assign: fn(&mut T, C),
    ) -> Self
    where
        C: ConfigElement,
    {
        self.nested_member(name, Some(key), assign)
    }

    fn leaf_member<V>(
        mut self,
        name: &'static str,
        rename: Option<&'static str>,
        assign: fn(&mut T, V),
    ) -> Self
    where
        V: FromStr + 'static,
    {
        //conversion is bound to the member here, at schema-build time; the
        //mapper only ever sees the erased apply function
        let key = match rename {
            Some(key) => key,
            None => name,
        };
        let apply = move |target: &mut T, raw: &str| -> Result<(), ExtractError> {
            let value = convert::<V>(raw).map_err(|failure| failure.for_key(key))?;
            assign(target, value);
            Ok(())
        };
        self.members.push(MemberSchema {
            name,
            rename,
            binding: MemberBinding::Leaf(Box::new(apply)),
        });
        self
    }

    fn nested_member<C>(
        mut self,
        name: &'static str,
        rename: Option<&'static str>,
        assign: fn(&mut T, C),
    ) -> Self
    where
        C: ConfigElement,
    {
        self.members.push(MemberSchema {
            name,
            rename,
            binding: MemberBinding::Nested(Box::new(NestedField {
                assign,
                _marker: PhantomData,
            })),
        });
        self
    }

    pub fn build(self) -> ElementSchema<T> {
        ElementSchema {
            naming: self.naming,
            members: self.members,
        }
    }
}
