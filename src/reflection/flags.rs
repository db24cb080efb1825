// Tue Jan 13 2026 - Alex

use bitflags::{bitflags, Flags};

bitflags! {
    /// Property flag bits as reported by the reflection source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u64 {
        const EDIT = 0x0000_0000_0000_0001;
        const CONST_PARM = 0x0000_0000_0000_0002;
        const BLUEPRINT_VISIBLE = 0x0000_0000_0000_0004;
        const EXPORT_OBJECT = 0x0000_0000_0000_0008;
        const BLUEPRINT_READ_ONLY = 0x0000_0000_0000_0010;
        const NET = 0x0000_0000_0000_0020;
        const EDIT_FIXED_SIZE = 0x0000_0000_0000_0040;
        const PARM = 0x0000_0000_0000_0080;
        const OUT_PARM = 0x0000_0000_0000_0100;
        const ZERO_CONSTRUCTOR = 0x0000_0000_0000_0200;
        const RETURN_PARM = 0x0000_0000_0000_0400;
        const DISABLE_EDIT_ON_TEMPLATE = 0x0000_0000_0000_0800;
        const TRANSIENT = 0x0000_0000_0000_2000;
        const CONFIG = 0x0000_0000_0000_4000;
        const DISABLE_EDIT_ON_INSTANCE = 0x0000_0000_0001_0000;
        const EDIT_CONST = 0x0000_0000_0002_0000;
        const GLOBAL_CONFIG = 0x0000_0000_0004_0000;
        const INSTANCED_REFERENCE = 0x0000_0000_0008_0000;
        const DUPLICATE_TRANSIENT = 0x0000_0000_0020_0000;
        const SUBOBJECT_REFERENCE = 0x0000_0000_0040_0000;
        const SAVE_GAME = 0x0000_0000_0100_0000;
        const NO_CLEAR = 0x0000_0000_0200_0000;
        const REFERENCE_PARM = 0x0000_0000_0800_0000;
        const BLUEPRINT_ASSIGNABLE = 0x0000_0000_1000_0000;
        const DEPRECATED = 0x0000_0000_2000_0000;
        const IS_PLAIN_OLD_DATA = 0x0000_0000_4000_0000;
        const REP_SKIP = 0x0000_0000_8000_0000;
        const REP_NOTIFY = 0x0000_0001_0000_0000;
        const INTERP = 0x0000_0002_0000_0000;
        const NON_TRANSACTIONAL = 0x0000_0004_0000_0000;
        const EDITOR_ONLY = 0x0000_0008_0000_0000;
        const NO_DESTRUCTOR = 0x0000_0010_0000_0000;
        const AUTO_WEAK = 0x0000_0040_0000_0000;
        const CONTAINS_INSTANCED_REFERENCE = 0x0000_0080_0000_0000;
        const ASSET_REGISTRY_SEARCHABLE = 0x0000_0100_0000_0000;
        const SIMPLE_DISPLAY = 0x0000_0200_0000_0000;
        const ADVANCED_DISPLAY = 0x0000_0400_0000_0000;
        const PROTECTED = 0x0000_0800_0000_0000;
        const BLUEPRINT_CALLABLE = 0x0000_1000_0000_0000;
        const BLUEPRINT_AUTHORITY_ONLY = 0x0000_2000_0000_0000;
        const TEXT_EXPORT_TRANSIENT = 0x0000_4000_0000_0000;
        const NON_PIE_DUPLICATE_TRANSIENT = 0x0000_8000_0000_0000;
        const EXPOSE_ON_SPAWN = 0x0001_0000_0000_0000;
        const PERSISTENT_INSTANCE = 0x0002_0000_0000_0000;
        const UOBJECT_WRAPPER = 0x0004_0000_0000_0000;
        const HAS_GET_VALUE_TYPE_HASH = 0x0008_0000_0000_0000;
        const NATIVE_ACCESS_SPECIFIER_PUBLIC = 0x0010_0000_0000_0000;
        const NATIVE_ACCESS_SPECIFIER_PROTECTED = 0x0020_0000_0000_0000;
        const NATIVE_ACCESS_SPECIFIER_PRIVATE = 0x0040_0000_0000_0000;
    }
}

bitflags! {
    /// Function flag bits as reported by the reflection source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FunctionFlags: u32 {
        const FINAL = 0x0000_0001;
        const REQUIRED_API = 0x0000_0002;
        const BLUEPRINT_AUTHORITY_ONLY = 0x0000_0004;
        const BLUEPRINT_COSMETIC = 0x0000_0008;
        const NET = 0x0000_0040;
        const NET_RELIABLE = 0x0000_0080;
        const NET_REQUEST = 0x0000_0100;
        const EXEC = 0x0000_0200;
        const NATIVE = 0x0000_0400;
        const EVENT = 0x0000_0800;
        const NET_RESPONSE = 0x0000_1000;
        const STATIC = 0x0000_2000;
        const NET_MULTICAST = 0x0000_4000;
        const MULTICAST_DELEGATE = 0x0001_0000;
        const PUBLIC = 0x0002_0000;
        const PRIVATE = 0x0004_0000;
        const PROTECTED = 0x0008_0000;
        const DELEGATE = 0x0010_0000;
        const NET_SERVER = 0x0020_0000;
        const HAS_OUT_PARMS = 0x0040_0000;
        const HAS_DEFAULTS = 0x0080_0000;
        const NET_CLIENT = 0x0100_0000;
        const DLL_IMPORT = 0x0200_0000;
        const BLUEPRINT_CALLABLE = 0x0400_0000;
        const BLUEPRINT_EVENT = 0x0800_0000;
        const BLUEPRINT_PURE = 0x1000_0000;
        const CONST = 0x4000_0000;
        const NET_VALIDATE = 0x8000_0000;
    }
}

/// `BLUEPRINT_VISIBLE | PARM` -> `"BlueprintVisible, Parm"`. Unnamed bits are dropped.
pub fn stringify_flags<F: Flags>(flags: &F) -> String {
    flags
        .iter_names()
        .map(|(name, _)| camel_case(name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_property_flags() {
        let flags = PropertyFlags::from_bits_retain(0x84 | 0x8000_0000_0000_0000);
        assert_eq!(stringify_flags(&flags), "BlueprintVisible, Parm");
        assert_eq!(stringify_flags(&PropertyFlags::empty()), "");
    }

    #[test]
    fn test_stringify_function_flags() {
        let flags = FunctionFlags::NATIVE | FunctionFlags::STATIC | FunctionFlags::BLUEPRINT_CALLABLE;
        assert_eq!(stringify_flags(&flags), "Native, Static, BlueprintCallable");
    }
}
