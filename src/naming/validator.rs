// Tue Jan 13 2026 - Alex

use crate::naming::NameResolver;
use crate::reflection::{KindTag, ReflectedObject, TypeGraph};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex"));

/// Default [`NameResolver`]: replaces every character that cannot appear in a
/// C identifier with `_` and prefixes names shared by several objects of the
/// same kind with their outer's name.
pub struct NameValidator<'g> {
    graph: &'g dyn TypeGraph,
    counts: AHashMap<(KindTag, String), usize>,
}

impl<'g> NameValidator<'g> {
    pub fn new(graph: &'g dyn TypeGraph) -> Self {
        let mut counts = AHashMap::new();
        for object in graph.objects() {
            *counts.entry((object.kind.tag(), object.name.clone())).or_insert(0) += 1;
        }
        Self { graph, counts }
    }

    fn is_ambiguous(&self, object: &ReflectedObject) -> bool {
        self.counts
            .get(&(object.kind.tag(), object.name.clone()))
            .is_some_and(|&count| count > 1)
    }
}

impl NameResolver for NameValidator<'_> {
    fn sanitize(&self, raw: &str) -> String {
        let valid = INVALID_CHARS.replace_all(raw, "_");
        match valid.chars().next() {
            Some(first) if first.is_ascii_digit() => format!("_{}", valid),
            _ => valid.into_owned(),
        }
    }

    fn unique_name(&self, object: &ReflectedObject) -> String {
        let mut name = String::new();
        if self.is_ambiguous(object) {
            if let Some(outer) = object.outer.and_then(|id| self.graph.get(id)) {
                name.push_str(&self.sanitize(&outer.name));
                name.push('_');
            }
        }
        name.push_str(&self.sanitize(&self.graph.cpp_name(object)));
        name
    }
}
