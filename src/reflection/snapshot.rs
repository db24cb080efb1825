// Tue Jan 13 2026 - Alex

use crate::memory::{MemoryBlock, SnapshotMemory};
use crate::reflection::{ObjectId, ReflectedObject, ReflectionError, TypeGraph};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk dump of a runtime's reflection data.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub objects: Vec<ReflectedObject>,
    #[serde(default)]
    pub memory: Vec<MemoryBlock>,
}

impl Snapshot {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReflectionError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ReflectionError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn into_parts(self) -> Result<(SnapshotGraph, SnapshotMemory), ReflectionError> {
        let graph = SnapshotGraph::new(self.objects)?;
        let memory = SnapshotMemory::from_blocks(self.memory)?;
        Ok((graph, memory))
    }
}

/// [`TypeGraph`] over an in-memory object list, enumerated in list order.
#[derive(Debug, Default)]
pub struct SnapshotGraph {
    objects: Vec<ReflectedObject>,
    by_id: AHashMap<ObjectId, usize>,
}

impl SnapshotGraph {
    pub fn new(objects: Vec<ReflectedObject>) -> Result<Self, ReflectionError> {
        let mut by_id = AHashMap::with_capacity(objects.len());
        for (slot, object) in objects.iter().enumerate() {
            if by_id.insert(object.id, slot).is_some() {
                return Err(ReflectionError::DuplicateId(object.id));
            }
        }
        Ok(Self { objects, by_id })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl TypeGraph for SnapshotGraph {
    fn objects<'a>(&'a self) -> Box<dyn Iterator<Item = &'a ReflectedObject> + 'a> {
        Box::new(self.objects.iter())
    }

    fn get(&self, id: ObjectId) -> Option<&ReflectedObject> {
        self.by_id.get(&id).map(|&slot| &self.objects[slot])
    }
}
