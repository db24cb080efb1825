// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use crate::reflection::{
    FunctionData, FunctionFlags, ObjectId, ObjectKind, PropertyData, PropertyKind, ReflectedObject,
    SnapshotGraph, StructData,
};

/// Assembles a [`SnapshotGraph`] in code. Children are appended to their
/// owner's child list in call order.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    objects: Vec<ReflectedObject>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> ObjectId {
        ObjectId(self.objects.len() as u32 + 1)
    }

    fn slot_mut(&mut self, id: ObjectId) -> Option<&mut ReflectedObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    fn name_of(&self, id: ObjectId) -> String {
        self.objects
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.name.clone())
            .unwrap_or_default()
    }

    fn push(&mut self, name: &str, kind_name: &str, outer: Option<ObjectId>, package: Option<ObjectId>, kind: ObjectKind) -> ObjectId {
        let id = self.next_id();
        let mut path = Vec::new();
        let mut cursor = outer;
        while let Some(parent) = cursor {
            path.push(self.name_of(parent));
            cursor = self.objects.iter().find(|o| o.id == parent).and_then(|o| o.outer);
        }
        path.reverse();
        path.push(name.to_string());

        self.objects.push(ReflectedObject {
            id,
            index: id.0,
            name: name.to_string(),
            cpp_name: None,
            full_name: format!("{} {}", kind_name, path.join(".")),
            outer,
            package,
            address: Address::zero(),
            kind,
        });
        id
    }

    fn owner_package(&self, owner: ObjectId) -> Option<ObjectId> {
        self.objects.iter().find(|o| o.id == owner).and_then(|o| match o.kind {
            ObjectKind::Package => Some(o.id),
            _ => o.package,
        })
    }

    fn attach(&mut self, owner: ObjectId, child: ObjectId) {
        if let Some(object) = self.slot_mut(owner) {
            match &mut object.kind {
                ObjectKind::ScriptStruct(data) | ObjectKind::Class(data) => data.children.push(child),
                ObjectKind::Function(data) => data.children.push(child),
                _ => {}
            }
        }
    }

    pub fn package(&mut self, name: &str) -> ObjectId {
        self.push(name, "Package", None, None, ObjectKind::Package)
    }

    pub fn enumeration(&mut self, package: ObjectId, name: &str, values: &[&str]) -> ObjectId {
        let names = values.iter().map(|v| v.to_string()).collect();
        self.push(name, "Enum", Some(package), Some(package), ObjectKind::Enum { names })
    }

    pub fn constant(&mut self, package: ObjectId, name: &str, value: &str) -> ObjectId {
        let kind = ObjectKind::Const { value: value.to_string() };
        self.push(name, "Const", Some(package), Some(package), kind)
    }

    pub fn script_struct(&mut self, package: ObjectId, name: &str, size: usize, super_struct: Option<ObjectId>) -> ObjectId {
        let data = StructData { super_struct, property_size: size, children: Vec::new() };
        self.push(name, "ScriptStruct", Some(package), Some(package), ObjectKind::ScriptStruct(data))
    }

    pub fn class(&mut self, package: ObjectId, name: &str, size: usize, super_class: Option<ObjectId>) -> ObjectId {
        let data = StructData { super_struct: super_class, property_size: size, children: Vec::new() };
        self.push(name, "Class", Some(package), Some(package), ObjectKind::Class(data))
    }

    pub fn function(&mut self, owner: ObjectId, name: &str, flags: FunctionFlags) -> ObjectId {
        let package = self.owner_package(owner);
        let data = FunctionData { flags: flags.bits(), children: Vec::new() };
        let id = self.push(name, "Function", Some(owner), package, ObjectKind::Function(data));
        self.attach(owner, id);
        id
    }

    pub fn property(&mut self, owner: ObjectId, name: &str, offset: usize, element_size: usize, kind: PropertyKind) -> ObjectId {
        self.property_with(owner, name, PropertyData { offset, element_size, array_dim: 1, flags: 0, kind })
    }

    pub fn property_with(&mut self, owner: ObjectId, name: &str, data: PropertyData) -> ObjectId {
        let id = self.detached_property(owner, name, data);
        self.attach(owner, id);
        id
    }

    /// A property that is not part of the owner's child list, such as the
    /// inner element of a container.
    pub fn detached_property(&mut self, owner: ObjectId, name: &str, data: PropertyData) -> ObjectId {
        let package = self.owner_package(owner);
        self.push(name, "Property", Some(owner), package, ObjectKind::Property(data))
    }

    pub fn set_super(&mut self, id: ObjectId, super_struct: Option<ObjectId>) {
        if let Some(data) = self.slot_mut(id).and_then(|o| match &mut o.kind {
            ObjectKind::ScriptStruct(data) | ObjectKind::Class(data) => Some(data),
            _ => None,
        }) {
            data.super_struct = super_struct;
        }
    }

    pub fn set_package(&mut self, id: ObjectId, package: Option<ObjectId>) {
        if let Some(object) = self.slot_mut(id) {
            object.package = package;
        }
    }

    pub fn set_address(&mut self, id: ObjectId, address: Address) {
        if let Some(object) = self.slot_mut(id) {
            object.address = address;
        }
    }

    pub fn set_cpp_name(&mut self, id: ObjectId, cpp_name: &str) {
        if let Some(object) = self.slot_mut(id) {
            object.cpp_name = Some(cpp_name.to_string());
        }
    }

    pub fn build(self) -> SnapshotGraph {
        // Ids are allocated sequentially, so they are unique.
        SnapshotGraph::new(self.objects).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::TypeGraph;

    #[test]
    fn test_builds_nested_full_names() {
        let mut builder = GraphBuilder::new();
        let engine = builder.package("Engine");
        let actor = builder.class(engine, "Actor", 0x10, None);
        let func = builder.function(actor, "Tick", FunctionFlags::NATIVE);
        let param = builder.property(func, "DeltaSeconds", 0, 4, PropertyKind::Float);
        let graph = builder.build();

        assert_eq!(graph.get(actor).unwrap().full_name, "Class Engine.Actor");
        assert_eq!(graph.get(param).unwrap().full_name, "Property Engine.Actor.Tick.DeltaSeconds");
        assert_eq!(graph.get(actor).unwrap().children(), &[func]);
        assert_eq!(graph.package_of(param), Some(engine));
    }

    #[test]
    fn test_cpp_name_prefixes() {
        let mut builder = GraphBuilder::new();
        let engine = builder.package("Engine");
        let object = builder.class(engine, "Object", 0x28, None);
        let actor = builder.class(engine, "Actor", 0x220, Some(object));
        let pawn = builder.class(engine, "Pawn", 0x300, Some(actor));
        let vector = builder.script_struct(engine, "Vector", 12, None);
        builder.set_cpp_name(object, "UObject");
        let graph = builder.build();

        assert_eq!(graph.cpp_name(graph.get(object).unwrap()), "UObject");
        assert_eq!(graph.cpp_name(graph.get(pawn).unwrap()), "APawn");
        assert_eq!(graph.cpp_name(graph.get(vector).unwrap()), "FVector");
    }
}
