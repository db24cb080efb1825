// Tue Jan 13 2026 - Alex

use crate::reflection::{ObjectId, ObjectKind, PropertyData, ReflectedObject, StructData};
use ahash::AHashSet;

/// Read-only view of a runtime's reflected type system.
///
/// Handles that do not resolve are "invalid": every lookup returns `None`
/// for them rather than failing.
pub trait TypeGraph {
    fn objects<'a>(&'a self) -> Box<dyn Iterator<Item = &'a ReflectedObject> + 'a>;

    fn get(&self, id: ObjectId) -> Option<&ReflectedObject>;

    fn is_valid(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Owning package, if it resolves to a package object.
    fn package_of(&self, id: ObjectId) -> Option<ObjectId> {
        let package = self.get(id)?.package?;
        match self.get(package)?.kind {
            ObjectKind::Package => Some(package),
            _ => None,
        }
    }

    fn struct_data(&self, id: ObjectId) -> Option<&StructData> {
        self.get(id)?.struct_data()
    }

    fn property(&self, id: ObjectId) -> Option<(&ReflectedObject, &PropertyData)> {
        let object = self.get(id)?;
        object.property_data().map(|data| (object, data))
    }

    /// Valid super-type of a struct or class.
    fn super_of(&self, id: ObjectId) -> Option<ObjectId> {
        let super_id = self.struct_data(id)?.super_struct?;
        self.struct_data(super_id).map(|_| super_id)
    }

    /// Declared size of a struct or class, 0 when unknown.
    fn property_size(&self, id: ObjectId) -> usize {
        self.struct_data(id).map(|data| data.property_size).unwrap_or(0)
    }

    /// Whether `id` or any of its super-types is named `name`. Cycles in the
    /// super chain terminate the walk.
    fn derives_from(&self, id: ObjectId, name: &str) -> bool {
        let mut seen = AHashSet::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if !seen.insert(cur) {
                return false;
            }
            match self.get(cur) {
                Some(object) if object.name == name => return true,
                Some(_) => current = self.super_of(cur),
                None => return false,
            }
        }
        false
    }

    /// Native (prefixed) name of an object.
    fn cpp_name(&self, object: &ReflectedObject) -> String {
        if let Some(name) = &object.cpp_name {
            return name.clone();
        }
        match &object.kind {
            ObjectKind::Class(_) => {
                let prefix = if self.derives_from(object.id, "Actor") { "A" } else { "U" };
                format!("{}{}", prefix, object.name)
            }
            ObjectKind::ScriptStruct(_) => format!("F{}", object.name),
            _ => object.name.clone(),
        }
    }
}
