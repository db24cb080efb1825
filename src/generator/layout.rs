// Tue Jan 13 2026 - Alex

use crate::generator::Member;
use crate::naming::NameResolver;
use crate::reflection::{property_info, stringify_flags, ObjectId, PropertyData, ReflectedObject, TypeGraph};
use ahash::AHashMap;
use std::cmp::Ordering;

pub const MISSED_OFFSET: &str = "MISSED OFFSET";
pub const WRONG_TYPE_SIZE: &str = "FIX WRONG TYPE SIZE OF PREVIOUS PROPERTY";
pub const UNKNOWN_PROPERTY: &str = "UNKNOWN PROPERTY: ";

pub type PropertyRef<'g> = (&'g ReflectedObject, &'g PropertyData);

/// Offset order; bit-fields sharing a byte are ordered by their mask.
pub fn compare_properties(lhs: &PropertyData, rhs: &PropertyData) -> Ordering {
    if lhs.offset == rhs.offset {
        if let (Some(a), Some(b)) = (lhs.bit_mask(), rhs.bit_mask()) {
            return a.cmp(&b);
        }
    }
    lhs.offset.cmp(&rhs.offset)
}

/// Appends `01`, `02`, ... to repeated names, in first-seen order.
#[derive(Debug, Default)]
pub struct NameCounter {
    seen: AHashMap<String, usize>,
}

impl NameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_unique(&mut self, name: String) -> String {
        let count = self.seen.entry(name.clone()).or_insert(0);
        let unique = if *count == 0 {
            name
        } else {
            format!("{}{:02}", name, count)
        };
        *count += 1;
        unique
    }
}

/// Rebuilds the member list of a struct or class from its properties,
/// inserting filler members wherever the known properties leave bytes
/// unexplained.
pub struct LayoutReconstructor<'a> {
    graph: &'a dyn TypeGraph,
    names: &'a dyn NameResolver,
    alignment: usize,
}

impl<'a> LayoutReconstructor<'a> {
    pub fn new(graph: &'a dyn TypeGraph, names: &'a dyn NameResolver, alignment: usize) -> Self {
        Self { graph, names, alignment }
    }

    /// Non-empty properties of `owner` at or above `min_offset`, sorted.
    pub fn collect_properties(&self, owner: ObjectId, min_offset: usize) -> Vec<PropertyRef<'a>> {
        let graph = self.graph;
        let Some(object) = graph.get(owner) else {
            return Vec::new();
        };
        let mut properties: Vec<PropertyRef<'a>> = object
            .children()
            .iter()
            .filter_map(|&id| graph.property(id))
            .filter(|(_, data)| data.element_size > 0 && data.offset >= min_offset)
            .collect();
        properties.sort_by(|a, b| compare_properties(a.1, b.1));
        properties
    }

    /// `start` is the inherited size, `declared_size` the total size of the type.
    pub fn reconstruct(&self, properties: &[PropertyRef<'_>], start: usize, declared_size: usize) -> Vec<Member> {
        let mut members = Vec::with_capacity(properties.len());
        let mut names = NameCounter::new();
        let mut unknown = 0usize;
        let mut cursor = start;

        for (object, prop) in properties {
            let dim = prop.array_dim.max(1);

            if prop.offset > cursor {
                members.push(Member::unknown(unknown, cursor, prop.offset - cursor, MISSED_OFFSET));
                unknown += 1;
            }

            let info = property_info(self.graph, self.names, prop);
            if info.is_known() {
                let mut name = names.make_unique(self.names.sanitize(&object.name));
                if dim > 1 {
                    name.push_str(&format!("[0x{:X}]", dim));
                }
                if prop.is_bit_field() {
                    name.push_str(" : 1");
                }

                let size = info.size * dim;
                let mut member = Member::new(name, info.cpp_type, prop.offset, size);
                member.flags = stringify_flags(&prop.property_flags());
                members.push(member);

                if info.size < prop.element_size {
                    let missing = (prop.element_size - info.size) * dim;
                    members.push(Member::unknown(unknown, prop.offset + size, missing, WRONG_TYPE_SIZE));
                    unknown += 1;
                }
            } else {
                members.push(Member::unknown(
                    unknown,
                    prop.offset,
                    prop.element_size * dim,
                    format!("{}{}", UNKNOWN_PROPERTY, object.full_name),
                ));
                unknown += 1;
            }

            cursor = prop.offset + prop.element_size * dim;
        }

        if cursor < declared_size {
            let remaining = declared_size - cursor;
            if remaining >= self.alignment {
                members.push(Member::unknown(unknown, cursor, remaining, MISSED_OFFSET));
            }
        }

        members
    }
}
