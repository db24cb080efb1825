// Tue Jan 13 2026 - Alex

use crate::naming::NameResolver;
use crate::reflection::{ObjectId, PropertyData, PropertyKind, TypeGraph};

/// Semantic classification of a property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Primitive,
    CustomStruct,
    Container,
    Unknown,
}

/// Canonical size, C-compatible type string and reference eligibility of a
/// property's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub ty: PropertyType,
    pub size: usize,
    pub cpp_type: String,
    pub can_be_reference: bool,
}

impl PropertyInfo {
    fn new(ty: PropertyType, size: usize, can_be_reference: bool, cpp_type: impl Into<String>) -> Self {
        Self {
            ty,
            size,
            cpp_type: cpp_type.into(),
            can_be_reference,
        }
    }

    fn primitive(size: usize, cpp_type: impl Into<String>) -> Self {
        Self::new(PropertyType::Primitive, size, false, cpp_type)
    }

    pub fn unknown() -> Self {
        Self::new(PropertyType::Unknown, 0, false, String::new())
    }

    pub fn is_known(&self) -> bool {
        self.ty != PropertyType::Unknown
    }
}

const POINTER_SIZE: usize = 8;
const ARRAY_SIZE: usize = 0x10;
const SET_SIZE: usize = 0x50;
const MAP_SIZE: usize = 0x50;

/// Resolves the type info of `prop` against the graph. Properties whose
/// referenced types cannot be resolved come back as [`PropertyType::Unknown`].
pub fn property_info(graph: &dyn TypeGraph, names: &dyn NameResolver, prop: &PropertyData) -> PropertyInfo {
    let class_name = |id: &Option<ObjectId>, fallback: &str| -> String {
        id.and_then(|id| graph.get(id))
            .map(|object| names.sanitize(&graph.cpp_name(object)))
            .unwrap_or_else(|| fallback.to_string())
    };
    let element = |id: ObjectId| -> PropertyInfo {
        graph
            .property(id)
            .map(|(_, inner)| property_info(graph, names, inner))
            .unwrap_or_else(PropertyInfo::unknown)
    };

    match &prop.kind {
        PropertyKind::Int8 => PropertyInfo::primitive(1, "int8_t"),
        PropertyKind::Int16 => PropertyInfo::primitive(2, "int16_t"),
        PropertyKind::Int => PropertyInfo::primitive(4, "int"),
        PropertyKind::Int64 => PropertyInfo::primitive(8, "int64_t"),
        PropertyKind::UInt16 => PropertyInfo::primitive(2, "uint16_t"),
        PropertyKind::UInt32 => PropertyInfo::primitive(4, "uint32_t"),
        PropertyKind::UInt64 => PropertyInfo::primitive(8, "uint64_t"),
        PropertyKind::Float => PropertyInfo::primitive(4, "float"),
        PropertyKind::Double => PropertyInfo::primitive(8, "double"),
        PropertyKind::Byte { enum_type } => match enum_type.and_then(|id| graph.get(id)) {
            Some(enumeration) => PropertyInfo::primitive(1, format!("TEnumAsByte<{}>", names.unique_name(enumeration))),
            None => PropertyInfo::primitive(1, "unsigned char"),
        },
        PropertyKind::Bool { field_mask } => {
            if *field_mask == 0xFF {
                PropertyInfo::primitive(1, "bool")
            } else {
                PropertyInfo::primitive(1, "unsigned char")
            }
        }
        PropertyKind::Name => PropertyInfo::primitive(8, "struct FName"),
        PropertyKind::Str => PropertyInfo::new(PropertyType::Primitive, 0x10, true, "struct FString"),
        PropertyKind::Text => PropertyInfo::new(PropertyType::Primitive, 0x18, true, "struct FText"),
        PropertyKind::Object { class } => {
            PropertyInfo::primitive(POINTER_SIZE, format!("class {}*", class_name(class, "UObject")))
        }
        PropertyKind::Class { meta_class } => {
            PropertyInfo::primitive(POINTER_SIZE, format!("class {}*", class_name(meta_class, "UClass")))
        }
        PropertyKind::Interface { interface_class } => PropertyInfo::primitive(
            0x10,
            format!("TScriptInterface<class {}>", class_name(interface_class, "UInterface")),
        ),
        PropertyKind::WeakObject { class } => {
            PropertyInfo::primitive(8, format!("TWeakObjectPtr<class {}>", class_name(class, "UObject")))
        }
        PropertyKind::LazyObject { class } => {
            PropertyInfo::primitive(0x1C, format!("TLazyObjectPtr<class {}>", class_name(class, "UObject")))
        }
        PropertyKind::AssetObject { class } => {
            PropertyInfo::primitive(0x20, format!("TAssetPtr<class {}>", class_name(class, "UObject")))
        }
        PropertyKind::Delegate => PropertyInfo::primitive(0x14, "struct FScriptDelegate"),
        PropertyKind::MulticastDelegate => PropertyInfo::primitive(0x10, "struct FScriptMulticastDelegate"),
        PropertyKind::Struct { script_struct } => match graph.get(*script_struct) {
            Some(object) if object.struct_data().is_some() => PropertyInfo::new(
                PropertyType::CustomStruct,
                graph.property_size(*script_struct),
                true,
                format!("struct {}", names.unique_name(object)),
            ),
            _ => PropertyInfo::unknown(),
        },
        PropertyKind::Array { inner } => {
            let inner = element(*inner);
            if !inner.is_known() {
                return PropertyInfo::unknown();
            }
            PropertyInfo::new(PropertyType::Container, ARRAY_SIZE, false, format!("TArray<{}>", inner.cpp_type))
        }
        PropertyKind::Set { element: elem } => {
            let elem = element(*elem);
            if !elem.is_known() {
                return PropertyInfo::unknown();
            }
            PropertyInfo::new(PropertyType::Container, SET_SIZE, false, format!("TSet<{}>", elem.cpp_type))
        }
        PropertyKind::Map { key, value } => {
            let (key, value) = (element(*key), element(*value));
            if !key.is_known() || !value.is_known() {
                return PropertyInfo::unknown();
            }
            PropertyInfo::new(
                PropertyType::Container,
                MAP_SIZE,
                false,
                format!("TMap<{}, {}>", key.cpp_type, value.cpp_type),
            )
        }
        PropertyKind::Unknown { .. } => PropertyInfo::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NameValidator;
    use crate::reflection::GraphBuilder;

    fn data(kind: PropertyKind) -> PropertyData {
        PropertyData { offset: 0, element_size: 8, array_dim: 1, flags: 0, kind }
    }

    #[test]
    fn test_primitive_and_bool_infos() {
        let graph = GraphBuilder::new().build();
        let names = NameValidator::new(&graph);

        let int = property_info(&graph, &names, &data(PropertyKind::Int));
        assert_eq!((int.ty, int.size, int.cpp_type.as_str()), (PropertyType::Primitive, 4, "int"));

        let native = property_info(&graph, &names, &data(PropertyKind::Bool { field_mask: 0xFF }));
        assert_eq!(native.cpp_type, "bool");
        let bit = property_info(&graph, &names, &data(PropertyKind::Bool { field_mask: 0x04 }));
        assert_eq!(bit.cpp_type, "unsigned char");

        let text = property_info(&graph, &names, &data(PropertyKind::Text));
        assert!(text.can_be_reference);
    }

    #[test]
    fn test_struct_and_container_infos() {
        let mut builder = GraphBuilder::new();
        let core = builder.package("CoreUObject");
        let vector = builder.script_struct(core, "Vector", 12, None);
        let holder = builder.class(core, "Holder", 0x40, None);
        let inner = builder.detached_property(holder, "Points_Inner", data(PropertyKind::Struct { script_struct: vector }));
        let missing = builder.detached_property(holder, "Bad_Inner", data(PropertyKind::Unknown { class_name: "FooProperty".into() }));
        let graph = builder.build();
        let names = NameValidator::new(&graph);

        let st = property_info(&graph, &names, &data(PropertyKind::Struct { script_struct: vector }));
        assert_eq!(st.ty, PropertyType::CustomStruct);
        assert_eq!(st.size, 12);
        assert_eq!(st.cpp_type, "struct FVector");
        assert!(st.can_be_reference);

        let array = property_info(&graph, &names, &data(PropertyKind::Array { inner }));
        assert_eq!(array.ty, PropertyType::Container);
        assert_eq!(array.cpp_type, "TArray<struct FVector>");

        let map = property_info(&graph, &names, &data(PropertyKind::Map { key: inner, value: missing }));
        assert_eq!(map.ty, PropertyType::Unknown);

        let dangling = property_info(&graph, &names, &data(PropertyKind::Struct { script_struct: ObjectId(999) }));
        assert!(!dangling.is_known());
    }
}
