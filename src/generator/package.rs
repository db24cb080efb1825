// Tue Jan 13 2026 - Alex

use crate::generator::layout::{LayoutReconstructor, NameCounter};
use crate::generator::ordering::{Placement, ResolutionState};
use crate::generator::vtable::VirtualSlotMatcher;
use crate::generator::{Class, Enum, GenerationContext, Member, MethodSynthesizer, PackageOutput, ScriptStruct};
use crate::policy::PredefinedMethod;
use crate::reflection::{is_placeholder_name, ObjectId, ObjectKind, PropertyKind, ReflectedObject};

pub const NOT_AUTO_GENERATED: &str = "NOT AUTO-GENERATED PROPERTY";

/// Accumulates the generated records of one package.
///
/// Structs and classes go through prerequisite resolution, which may pull
/// types of the same package forward and reorders packages in the shared
/// [`ResolutionState`].
pub struct PackageBuilder<'a, 's> {
    ctx: GenerationContext<'a>,
    state: &'s mut ResolutionState,
    package: ObjectId,
    output: PackageOutput,
}

impl<'a, 's> PackageBuilder<'a, 's> {
    pub fn new(ctx: GenerationContext<'a>, state: &'s mut ResolutionState, package: &ReflectedObject) -> Self {
        Self {
            ctx,
            state,
            package: package.id,
            output: PackageOutput::new(package.id, &package.name),
        }
    }

    pub fn package(&self) -> ObjectId {
        self.package
    }

    pub fn output(&self) -> &PackageOutput {
        &self.output
    }

    pub fn into_output(self) -> PackageOutput {
        self.output
    }

    /// Processes every object of the graph that belongs to this package.
    pub fn process(&mut self) {
        let graph = self.ctx.graph;
        let package = self.package;
        let members: Vec<ObjectId> = graph
            .objects()
            .filter(|object| graph.package_of(object.id) == Some(package))
            .map(|object| object.id)
            .collect();
        self.process_objects(&members);
    }

    /// Processes the given objects, which must belong to this package.
    pub fn process_objects(&mut self, objects: &[ObjectId]) {
        let graph = self.ctx.graph;
        for object in objects.iter().filter_map(|&id| graph.get(id)) {
            match &object.kind {
                ObjectKind::Enum { names } => self.generate_enum(object, names),
                ObjectKind::Const { value } => self.generate_const(object, value),
                ObjectKind::Class(_) | ObjectKind::ScriptStruct(_) => self.resolve(object.id),
                _ => {}
            }
        }
    }

    /// Whether the package produces output at all.
    pub fn should_save(&self) -> bool {
        self.ctx.policy.should_generate_empty_files() || self.output.has_content()
    }

    fn generate_enum(&mut self, object: &ReflectedObject, raw_values: &[String]) {
        let names = self.ctx.names;
        let name = names.unique_name(object);
        if object.is_placeholder() || is_placeholder_name(&name) {
            return;
        }

        let mut counter = NameCounter::new();
        let values = raw_values
            .iter()
            .map(|raw| {
                let short = raw.rsplit("::").next().unwrap_or(raw.as_str());
                counter.make_unique(names.sanitize(short))
            })
            .collect();

        self.output.enums.push(Enum {
            name,
            full_name: object.full_name.clone(),
            values,
        });
    }

    fn generate_const(&mut self, object: &ReflectedObject, value: &str) {
        let name = self.ctx.names.sanitize(&object.name);
        if object.is_placeholder() || is_placeholder_name(&name) {
            return;
        }
        self.output.constants.insert(name, value.to_string());
    }

    /// Prerequisite resolution of a struct or class.
    pub fn resolve(&mut self, id: ObjectId) {
        let graph = self.ctx.graph;
        let Some(object) = graph.get(id) else {
            return;
        };
        if object.struct_data().is_none() || object.is_placeholder() {
            return;
        }

        self.state.defined.mark_seen(id);

        let Some(owner) = graph.package_of(id) else {
            return;
        };
        self.state.order.ensure(self.package);

        if owner != self.package {
            if self.state.order.require(owner, self.package) == Placement::Cycle {
                let name_of = |package: ObjectId| graph.get(package).map(|p| p.name.as_str()).unwrap_or("?");
                log::warn!(
                    "package cycle: {} and {} depend on each other, order is best effort",
                    name_of(self.package),
                    name_of(owner)
                );
            }
            return;
        }

        if !self.state.defined.begin(id) {
            return;
        }

        if let Some(super_id) = graph.super_of(id).filter(|&s| s != id) {
            self.resolve(super_id);
        }

        for nested in self.nested_structs(object) {
            self.resolve(nested);
        }

        match &object.kind {
            ObjectKind::ScriptStruct(_) => self.generate_script_struct(object),
            ObjectKind::Class(_) => self.generate_class(object),
            _ => {}
        }
        self.state.defined.finish(id);
    }

    /// Struct types held by value in direct properties or container elements.
    fn nested_structs(&self, object: &ReflectedObject) -> Vec<ObjectId> {
        let graph = self.ctx.graph;
        let struct_of = |kind: &PropertyKind| match kind {
            PropertyKind::Struct { script_struct } => Some(*script_struct),
            _ => None,
        };

        let mut nested = Vec::new();
        for (_, prop) in object.children().iter().filter_map(|&id| graph.property(id)) {
            if let Some(script_struct) = struct_of(&prop.kind) {
                nested.push(script_struct);
                continue;
            }
            for element in prop.kind.container_elements() {
                if let Some(script_struct) = graph.property(element).and_then(|(_, inner)| struct_of(&inner.kind)) {
                    nested.push(script_struct);
                }
            }
        }
        nested
    }

    fn record_for(&self, object: &ReflectedObject, name_cpp: String, name_cpp_full: String) -> ScriptStruct {
        let graph = self.ctx.graph;
        let super_id = graph.super_of(object.id).filter(|&s| s != object.id);
        ScriptStruct {
            id: object.id,
            name: object.name.clone(),
            full_name: object.full_name.clone(),
            name_cpp,
            name_cpp_full,
            size: graph.property_size(object.id),
            inherited_size: super_id.map(|s| graph.property_size(s)).unwrap_or(0),
            members: Vec::new(),
            predefined_methods: self.ctx.policy.predefined_methods(&object.full_name).to_vec(),
        }
    }

    fn generate_script_struct(&mut self, object: &ReflectedObject) {
        let GenerationContext { graph, names, policy, .. } = self.ctx;
        log::debug!("ScriptStruct: {:<100} - instance: {}", object.name, object.address);

        let name_cpp = names.unique_name(object);
        let mut name_cpp_full = String::from("struct ");
        if let Some(alignment) = policy.class_alignas(&object.full_name) {
            name_cpp_full.push_str(&format!("alignas({}) ", alignment));
        }
        name_cpp_full.push_str(&name_cpp);
        if let Some(super_object) = graph.super_of(object.id).filter(|&s| s != object.id).and_then(|s| graph.get(s)) {
            name_cpp_full.push_str(" : public ");
            name_cpp_full.push_str(&names.unique_name(super_object));
        }

        let mut record = self.record_for(object, name_cpp, name_cpp_full);
        let layout = LayoutReconstructor::new(graph, names, policy.global_member_alignment());
        let properties = layout.collect_properties(object.id, 0);
        record.members = layout.reconstruct(&properties, record.inherited_size, record.size);

        self.output.script_structs.push(record);
    }

    fn generate_class(&mut self, object: &ReflectedObject) {
        let GenerationContext { graph, names, policy, .. } = self.ctx;
        log::debug!("Class: {:<100} - instance: {}", object.name, object.address);

        let name_cpp = names.sanitize(&graph.cpp_name(object));
        let mut name_cpp_full = format!("class {}", name_cpp);
        if let Some(super_object) = graph.super_of(object.id).filter(|&s| s != object.id).and_then(|s| graph.get(s)) {
            name_cpp_full.push_str(" : public ");
            name_cpp_full.push_str(&names.sanitize(&graph.cpp_name(super_object)));
        }

        let mut record = self.record_for(object, name_cpp, name_cpp_full);
        let full_name = object.full_name.as_str();

        for member in policy.predefined_static_members(full_name).unwrap_or(&[]) {
            record
                .members
                .push(Member::new(member.name.clone(), format!("static {}", member.ty), 0, 0));
        }

        match policy.predefined_members(full_name) {
            Some(predefined) => {
                for member in predefined {
                    let mut m = Member::new(member.name.clone(), member.ty.clone(), 0, 0);
                    m.comment = NOT_AUTO_GENERATED.to_string();
                    record.members.push(m);
                }
            }
            None => {
                let layout = LayoutReconstructor::new(graph, names, policy.global_member_alignment());
                let properties = layout.collect_properties(object.id, record.inherited_size);
                let members = layout.reconstruct(&properties, record.inherited_size, record.size);
                record.members.extend(members);
            }
        }

        record.predefined_methods.push(self.static_class_method(object));
        record.predefined_methods.extend(self.virtual_methods(object));

        let methods = MethodSynthesizer::new(graph, names, policy).synthesize(object.id);
        self.output.classes.push(Class { record, methods });
    }

    fn static_class_method(&self, object: &ReflectedObject) -> PredefinedMethod {
        let policy = self.ctx.policy;
        let lookup = if policy.should_use_strings() {
            let name = if policy.should_xor_strings() {
                format!("_xor_(\"{}\")", object.full_name)
            } else {
                format!("\"{}\"", object.full_name)
            };
            format!("UObject::FindClass({})", name)
        } else {
            format!("static_cast<UClass*>(UObject::GetGlobalObjects().GetByIndex({}))", object.index)
        };
        PredefinedMethod::inline(format!(
            "\tstatic UClass* StaticClass()\n\t{{\n\t\tstatic auto ptr = {};\n\t\treturn ptr;\n\t}}",
            lookup
        ))
    }

    /// Methods bound by virtual function patterns. A failed probe drops the
    /// virtual methods of this class only.
    fn virtual_methods(&self, object: &ReflectedObject) -> Vec<PredefinedMethod> {
        let Some(patterns) = self.ctx.policy.virtual_function_patterns(&object.full_name) else {
            return Vec::new();
        };
        let Some(memory) = self.ctx.memory else {
            log::debug!("{}: no target memory, virtual functions skipped", object.full_name);
            return Vec::new();
        };
        if object.address.is_null() {
            log::debug!("{}: no live instance, virtual functions skipped", object.full_name);
            return Vec::new();
        }

        match VirtualSlotMatcher::new(memory).match_patterns(&object.full_name, object.address, patterns) {
            Ok(methods) => methods,
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NameValidator;
    use crate::policy::{PredefinedMember, TargetPolicy};
    use crate::reflection::{GraphBuilder, PropertyData, SnapshotGraph, TypeGraph};

    fn build(graph: &SnapshotGraph, package: ObjectId, policy: &TargetPolicy) -> (PackageOutput, bool, ResolutionState) {
        let names = NameValidator::new(graph);
        let ctx = GenerationContext::new(graph, &names, policy);
        let mut state = ResolutionState::new();
        let mut builder = PackageBuilder::new(ctx, &mut state, graph.get(package).unwrap());
        builder.process();
        let save = builder.should_save();
        let output = builder.into_output();
        (output, save, state)
    }

    #[test]
    fn test_enums_and_constants() {
        let mut builder = GraphBuilder::new();
        let engine = builder.package("Engine");
        builder.enumeration(engine, "EMode", &["EMode::Walk", "EMode::Walk", "EMode::Fly", "EMode::Walk"]);
        builder.enumeration(engine, "Default__EMode", &["A"]);
        builder.constant(engine, "MaxPlayers", "16");
        builder.constant(engine, "MaxPlayers", "32");
        builder.constant(engine, "Default__Const", "0");
        let graph = builder.build();

        let (output, save, _) = build(&graph, engine, &TargetPolicy::default());
        assert!(save);
        assert_eq!(output.enums.len(), 1);
        assert_eq!(output.enums[0].name, "EMode");
        assert_eq!(output.enums[0].values, vec!["Walk", "Walk01", "Fly", "Walk02"]);
        assert_eq!(output.constants.len(), 1);
        assert_eq!(output.constants["MaxPlayers"], "32");
    }

    #[test]
    fn test_empty_package_not_saved() {
        let mut builder = GraphBuilder::new();
        let empty = builder.package("Empty");
        builder.enumeration(empty, "ENothing", &[]);
        builder.constant(empty, "Only", "1");
        let graph = builder.build();

        let (_, save, _) = build(&graph, empty, &TargetPolicy::default());
        assert!(!save);
        let (_, save, _) = build(&graph, empty, &TargetPolicy::default().with_empty_files(true));
        assert!(save);
    }

    #[test]
    fn test_nested_struct_emitted_first() {
        let mut builder = GraphBuilder::new();
        let game = builder.package("Game");
        let outer = builder.script_struct(game, "Outer", 0x20, None);
        let inner = builder.script_struct(game, "Inner", 0x10, None);
        let keyed = builder.script_struct(game, "Keyed", 4, None);
        builder.property(outer, "Value", 0, 0x10, PropertyKind::Struct { script_struct: inner });
        let key = builder.detached_property(outer, "Lookup_Key", PropertyData {
            offset: 0, element_size: 4, array_dim: 1, flags: 0, kind: PropertyKind::Struct { script_struct: keyed },
        });
        let value = builder.detached_property(outer, "Lookup_Value", PropertyData {
            offset: 0, element_size: 4, array_dim: 1, flags: 0, kind: PropertyKind::Int,
        });
        builder.property(outer, "Lookup", 0x10, 0x50, PropertyKind::Map { key, value });
        let graph = builder.build();

        let (output, _, state) = build(&graph, game, &TargetPolicy::default());
        let order: Vec<&str> = output.script_structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["Inner", "Keyed", "Outer"]);
        assert!(state.defined.is_done(outer));
    }

    #[test]
    fn test_self_super_emitted_once() {
        let mut builder = GraphBuilder::new();
        let game = builder.package("Game");
        let looped = builder.script_struct(game, "Looped", 8, None);
        builder.set_super(looped, Some(looped));
        builder.property(looped, "Value", 0, 8, PropertyKind::Int64);
        let graph = builder.build();

        let names = NameValidator::new(&graph);
        let policy = TargetPolicy::default();
        let ctx = GenerationContext::new(&graph, &names, &policy);
        let mut state = ResolutionState::new();
        let mut package = PackageBuilder::new(ctx, &mut state, graph.get(game).unwrap());
        package.process();
        package.resolve(looped);
        package.resolve(looped);
        let output = package.into_output();

        assert_eq!(output.script_structs.len(), 1);
        let record = &output.script_structs[0];
        assert_eq!(record.inherited_size, 0);
        assert_eq!(record.name_cpp_full, "struct FLooped");
        assert_eq!(record.members.len(), 1);
    }

    #[test]
    fn test_class_extras() {
        let mut builder = GraphBuilder::new();
        let core = builder.package("CoreUObject");
        let object = builder.class(core, "Object", 0x28, None);
        let field = builder.class(core, "Field", 0x30, Some(object));
        builder.property(object, "Index", 0x0C, 4, PropertyKind::Int);
        builder.property(field, "Hidden", 0x20, 8, PropertyKind::Int64);
        builder.property(field, "Next", 0x28, 8, PropertyKind::Object { class: Some(field) });
        let plane = builder.script_struct(core, "Plane", 0x10, None);
        builder.set_cpp_name(object, "UObject");
        let graph = builder.build();

        let mut policy = TargetPolicy::default().with_use_strings(true, false);
        policy.predefined_static_members.insert(
            "Class CoreUObject.Object".into(),
            vec![PredefinedMember::new("TUObjectArray*", "GObjects")],
        );
        policy.predefined_members.insert(
            "Class CoreUObject.Object".into(),
            vec![PredefinedMember::new("void*", "Vtable"), PredefinedMember::new("int32_t", "ObjectFlags")],
        );
        policy.alignas.insert("ScriptStruct CoreUObject.Plane".into(), 16);
        policy.predefined_methods.insert(
            "ScriptStruct CoreUObject.Plane".into(),
            vec![PredefinedMethod::inline("\tinline FPlane() {}")],
        );

        let (output, _, _) = build(&graph, core, &policy);
        assert_eq!(output.classes.len(), 2);

        let uobject = &output.classes[0].record;
        assert_eq!(uobject.name_cpp_full, "class UObject");
        let members: Vec<(&str, &str, &str)> = uobject
            .members
            .iter()
            .map(|m| (m.ty.as_str(), m.name.as_str(), m.comment.as_str()))
            .collect();
        assert_eq!(
            members,
            vec![
                ("static TUObjectArray*", "GObjects", ""),
                ("void*", "Vtable", NOT_AUTO_GENERATED),
                ("int32_t", "ObjectFlags", NOT_AUTO_GENERATED),
            ]
        );
        assert!(uobject.predefined_methods[0]
            .body
            .contains("static auto ptr = UObject::FindClass(\"Class CoreUObject.Object\");"));

        let ufield = &output.classes[1].record;
        assert_eq!(ufield.name_cpp_full, "class UField : public UObject");
        assert_eq!(ufield.inherited_size, 0x28);
        assert_eq!(ufield.members.len(), 1);
        assert_eq!(ufield.members[0].name, "Next");
        assert_eq!(ufield.members[0].ty, "class UField*");

        let fplane = &output.script_structs[0];
        assert_eq!(fplane.name_cpp_full, "struct alignas(16) FPlane");
        assert_eq!(fplane.predefined_methods.len(), 1);
        assert_eq!(graph.get(plane).unwrap().name, fplane.name);
    }

    #[test]
    fn test_static_class_by_index() {
        let mut builder = GraphBuilder::new();
        let engine = builder.package("Engine");
        let actor = builder.class(engine, "Actor", 0x220, None);
        let graph = builder.build();

        let (output, _, _) = build(&graph, engine, &TargetPolicy::default());
        let body = &output.classes[0].record.predefined_methods[0].body;
        assert_eq!(
            body,
            &format!(
                "\tstatic UClass* StaticClass()\n\t{{\n\t\tstatic auto ptr = static_cast<UClass*>(UObject::GetGlobalObjects().GetByIndex({}));\n\t\treturn ptr;\n\t}}",
                graph.get(actor).unwrap().index
            )
        );
    }
}
