// Tue Jan 13 2026 - Alex

use crate::generator::layout::{compare_properties, NameCounter};
use crate::naming::NameResolver;
use crate::policy::GenerationPolicy;
use crate::reflection::{
    property_info, stringify_flags, FunctionFlags, ObjectId, PropertyData, PropertyFlags, PropertyKind,
    ReflectedObject, TypeGraph,
};
use ahash::AHashSet;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Default,
    Out,
    Return,
}

impl ParamType {
    /// `None` for children that are not parameters at all.
    pub fn from_flags(flags: PropertyFlags) -> Option<Self> {
        if flags.contains(PropertyFlags::RETURN_PARM) {
            Some(Self::Return)
        } else if flags.contains(PropertyFlags::OUT_PARM) {
            // const out parameters are references passed in
            if flags.contains(PropertyFlags::CONST_PARM) {
                Some(Self::Default)
            } else {
                Some(Self::Out)
            }
        } else if flags.contains(PropertyFlags::PARM) {
            Some(Self::Default)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub param_type: ParamType,
    pub pass_by_reference: bool,
    pub name: String,
    pub cpp_type: String,
    pub flags: String,
}

impl Parameter {
    /// Declaration as it appears in a signature.
    pub fn declaration(&self) -> String {
        let (prefix, suffix) = if self.pass_by_reference {
            ("const ", "& ")
        } else if self.param_type == ParamType::Out {
            ("", "* ")
        } else {
            ("", " ")
        };
        format!("{}{}{}{}", prefix, self.cpp_type, suffix, self.name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Method {
    #[serde(skip)]
    pub id: ObjectId,
    pub index: u32,
    pub full_name: String,
    pub name: String,
    pub is_native: bool,
    pub is_static: bool,
    pub flags: String,
    /// In frame order.
    pub parameters: Vec<Parameter>,
}

impl Method {
    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.param_type == ParamType::Return)
    }

    fn parameters_of(&self, param_type: ParamType) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.param_type == param_type)
    }

    /// Declaration in the class body when `owner` is `None`, out-of-line
    /// definition head (`void UFoo::Bar(..)`) otherwise.
    pub fn build_signature(&self, owner: Option<&str>) -> String {
        let mut signature = String::new();
        if self.is_static && owner.is_none() {
            signature.push_str("static ");
        }
        match self.return_parameter() {
            Some(ret) => signature.push_str(&ret.cpp_type),
            None => signature.push_str("void"),
        }
        signature.push(' ');
        if let Some(owner) = owner {
            signature.push_str(owner);
            signature.push_str("::");
        }
        signature.push_str(&self.name);

        let mut params: Vec<&Parameter> = self
            .parameters
            .iter()
            .filter(|p| p.param_type != ParamType::Return)
            .collect();
        params.sort_by_key(|p| p.param_type);
        let params: Vec<String> = params.iter().map(|p| p.declaration()).collect();

        signature.push('(');
        signature.push_str(&params.join(", "));
        signature.push(')');
        signature
    }

    /// Call stub dispatching through the runtime's `ProcessEvent`.
    pub fn build_body(&self, policy: &dyn GenerationPolicy) -> String {
        let mut body = String::from("{\n\tstatic auto fn");
        if policy.should_use_strings() {
            if policy.should_xor_strings() {
                let _ = write!(body, " = UObject::FindObject<UFunction>(_xor_(\"{}\"));\n\n", self.full_name);
            } else {
                let _ = write!(body, " = UObject::FindObject<UFunction>(\"{}\");\n\n", self.full_name);
            }
        } else {
            let _ = write!(
                body,
                " = static_cast<UFunction*>(UObject::GetGlobalObjects().GetByIndex({}));\n\n",
                self.index
            );
        }

        body.push_str("\tstruct\n\t{\n");
        for param in &self.parameters {
            let _ = writeln!(body, "\t\t{:<30} {};", param.cpp_type, param.name);
        }
        body.push_str("\t} params;\n");
        for param in self.parameters_of(ParamType::Default) {
            let _ = writeln!(body, "\tparams.{0} = {0};", param.name);
        }
        body.push('\n');

        body.push_str("\tauto flags = fn->FunctionFlags;\n");
        if self.is_native {
            let _ = writeln!(body, "\tfn->FunctionFlags |= 0x{:X};", FunctionFlags::NATIVE.bits());
        }
        body.push('\n');

        if self.is_static {
            body.push_str("\tstatic auto defaultObj = StaticClass()->CreateDefaultObject();\n");
            body.push_str("\tdefaultObj->ProcessEvent(fn, &params);\n\n");
        } else {
            body.push_str("\tUObject::ProcessEvent(fn, &params);\n\n");
        }
        body.push_str("\tfn->FunctionFlags = flags;\n");

        let mut outs = self.parameters_of(ParamType::Out).peekable();
        if outs.peek().is_some() {
            body.push('\n');
            for param in outs {
                let _ = writeln!(body, "\tif ({} != nullptr)", param.name);
                let _ = writeln!(body, "\t\t*{0} = params.{0};", param.name);
            }
        }

        if let Some(ret) = self.return_parameter() {
            let _ = write!(body, "\n\treturn params.{};\n", ret.name);
        }

        body.push_str("}\n");
        body
    }
}

/// Builds [`Method`] records for the functions declared on a class.
pub struct MethodSynthesizer<'a> {
    graph: &'a dyn TypeGraph,
    names: &'a dyn NameResolver,
    policy: &'a dyn GenerationPolicy,
}

impl<'a> MethodSynthesizer<'a> {
    pub fn new(graph: &'a dyn TypeGraph, names: &'a dyn NameResolver, policy: &'a dyn GenerationPolicy) -> Self {
        Self { graph, names, policy }
    }

    /// One method per distinct function full name, first occurrence wins.
    pub fn synthesize(&self, class: ObjectId) -> Vec<Method> {
        let Some(object) = self.graph.get(class) else {
            return Vec::new();
        };
        let mut unique = AHashSet::new();
        object
            .children()
            .iter()
            .filter_map(|&id| self.graph.get(id))
            .filter(|child| child.function_data().is_some())
            .filter(|function| unique.insert(function.full_name.clone()))
            .filter_map(|function| self.build_method(function))
            .collect()
    }

    pub fn build_method(&self, function: &ReflectedObject) -> Option<Method> {
        let data = function.function_data()?;
        let flags = data.function_flags();

        let mut counter = NameCounter::new();
        let mut parameters: Vec<(&PropertyData, Parameter)> = Vec::new();
        for (object, prop) in data.children.iter().filter_map(|&id| self.graph.property(id)) {
            if prop.element_size == 0 {
                continue;
            }
            let info = property_info(self.graph, self.names, prop);
            if !info.is_known() {
                continue;
            }
            let Some(param_type) = ParamType::from_flags(prop.property_flags()) else {
                continue;
            };

            let mut param = Parameter {
                param_type,
                pass_by_reference: false,
                name: counter.make_unique(self.names.sanitize(&object.name)),
                cpp_type: info.cpp_type,
                flags: stringify_flags(&prop.property_flags()),
            };
            if matches!(prop.kind, PropertyKind::Bool { .. }) {
                param.cpp_type = self.policy.override_type("bool");
            }
            if param_type == ParamType::Default {
                if prop.array_dim > 1 {
                    param.cpp_type.push('*');
                } else if info.can_be_reference {
                    param.pass_by_reference = true;
                }
            }
            parameters.push((prop, param));
        }
        parameters.sort_by(|a, b| compare_properties(a.0, b.0));

        let mut parameters: Vec<Parameter> = parameters.into_iter().map(|(_, param)| param).collect();
        let mut has_return = false;
        for param in parameters.iter_mut().filter(|p| p.param_type == ParamType::Return) {
            if has_return {
                log::warn!(
                    "{}: extra return parameter {} is treated as out parameter",
                    function.full_name,
                    param.name
                );
                param.param_type = ParamType::Out;
            }
            has_return = true;
        }

        Some(Method {
            id: function.id,
            index: function.index,
            full_name: function.full_name.clone(),
            name: self.names.sanitize(&function.name),
            is_native: flags.contains(FunctionFlags::NATIVE),
            is_static: flags.contains(FunctionFlags::STATIC),
            flags: stringify_flags(&flags),
            parameters,
        })
    }
}
