// Tue Jan 13 2026 - Alex

use crate::memory::MemoryReader;
use crate::naming::NameResolver;
use crate::policy::GenerationPolicy;
use crate::reflection::TypeGraph;

/// Read-only collaborators of a generation run.
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
    pub graph: &'a dyn TypeGraph,
    pub names: &'a dyn NameResolver,
    pub policy: &'a dyn GenerationPolicy,
    /// Target memory for virtual table probing; classes with virtual
    /// function patterns get no virtual methods without it.
    pub memory: Option<&'a dyn MemoryReader>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(graph: &'a dyn TypeGraph, names: &'a dyn NameResolver, policy: &'a dyn GenerationPolicy) -> Self {
        Self {
            graph,
            names,
            policy,
            memory: None,
        }
    }

    pub fn with_memory(mut self, memory: &'a dyn MemoryReader) -> Self {
        self.memory = Some(memory);
        self
    }
}
