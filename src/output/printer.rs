// Tue Jan 13 2026 - Alex

use crate::generator::{Class, Enum, Member, Method, PackageOutput, ScriptStruct};
use crate::policy::{GenerationPolicy, PredefinedMethod};
use itertools::Itertools;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Structs,
    Classes,
    Functions,
}

impl FileKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            FileKind::Structs => "structs.hpp",
            FileKind::Classes => "classes.hpp",
            FileKind::Functions => "functions.cpp",
        }
    }
}

/// Renders generated packages as C++ source text.
pub struct SdkPrinter<'p> {
    policy: &'p dyn GenerationPolicy,
}

impl<'p> SdkPrinter<'p> {
    pub fn new(policy: &'p dyn GenerationPolicy) -> Self {
        Self { policy }
    }

    pub fn file_name(&self, package: &str, kind: FileKind) -> String {
        format!("{}_{}_{}", self.policy.game_name_short(), package, kind.suffix())
    }

    fn file_header(&self, out: &mut String, includes: &[&str]) {
        if includes.is_empty() {
            out.push_str("#pragma once\n\n");
        } else {
            for include in includes {
                let _ = writeln!(out, "#include {}", include);
            }
            out.push('\n');
        }
        let _ = writeln!(out, "// Name: {}\n", self.policy.game_name_short());
        out.push_str("#ifdef _MSC_VER\n\t#pragma pack(push, 0x8)\n#endif\n\n");
        out.push_str("namespace SDK\n{\n");
    }

    fn file_footer(&self, out: &mut String) {
        out.push_str("}\n\n#ifdef _MSC_VER\n\t#pragma pack(pop)\n#endif\n");
    }

    fn section_header(&self, out: &mut String, name: &str) {
        let rule = "//---------------------------------------------------------------------------";
        let _ = write!(out, "{}\n// {}\n{}\n\n", rule, name, rule);
    }

    pub fn print_constant(&self, out: &mut String, name: &str, value: &str) {
        let _ = writeln!(out, "#define CONST_{:<50} {}", name, value);
    }

    pub fn print_enum(&self, out: &mut String, e: &Enum) {
        let _ = write!(out, "// {}\nenum class {}\n{{\n", e.full_name, e.name);
        let values = e
            .values
            .iter()
            .enumerate()
            .map(|(i, name)| format!("\t{:<30} = {}", name, i))
            .join(",\n");
        out.push_str(&values);
        out.push_str("\n};\n\n");
    }

    fn print_member(&self, out: &mut String, member: &Member) {
        let _ = write!(
            out,
            "\t{:<50} {:<50}\t\t// 0x{:04X}(0x{:04X})",
            member.ty,
            format!("{};", member.name),
            member.offset,
            member.size
        );
        if !member.comment.is_empty() {
            out.push(' ');
            out.push_str(&member.comment);
        }
        if !member.flags.is_empty() {
            let _ = write!(out, " ({})", member.flags);
        }
        out.push('\n');
    }

    fn print_record_head(&self, out: &mut String, record: &ScriptStruct) {
        let _ = write!(out, "// {}\n// ", record.full_name);
        if record.inherited_size > 0 {
            let _ = writeln!(
                out,
                "0x{:04X} (0x{:04X} - 0x{:04X})",
                record.own_size(),
                record.size,
                record.inherited_size
            );
        } else {
            let _ = writeln!(out, "0x{:04X}", record.size);
        }
        out.push_str(&record.name_cpp_full);
    }

    fn print_predefined_methods(&self, out: &mut String, methods: &[PredefinedMethod]) {
        if methods.is_empty() {
            return;
        }
        out.push('\n');
        for method in methods {
            if method.is_inline() {
                out.push_str(&method.body);
            } else {
                let _ = write!(out, "\t{};", method.signature);
            }
            out.push_str("\n\n");
        }
    }

    pub fn print_struct(&self, out: &mut String, record: &ScriptStruct) {
        self.print_record_head(out, record);
        out.push_str("\n{\n");
        for member in &record.members {
            self.print_member(out, member);
        }
        self.print_predefined_methods(out, &record.predefined_methods);
        out.push_str("};\n");
    }

    pub fn print_class(&self, out: &mut String, class: &Class) {
        self.print_record_head(out, &class.record);
        out.push_str("\n{\npublic:\n");
        for member in &class.record.members {
            self.print_member(out, member);
        }
        self.print_predefined_methods(out, &class.record.predefined_methods);
        if !class.methods.is_empty() {
            out.push('\n');
            for method in &class.methods {
                let _ = writeln!(out, "\t{};", method.build_signature(None));
            }
        }
        out.push_str("};\n\n");
    }

    /// Comment table, definition head and call stub of one method.
    pub fn print_method(&self, out: &mut String, owner: &str, method: &Method) {
        let _ = write!(out, "// {}\n// ({})\n", method.full_name, method.flags);
        if !method.parameters.is_empty() {
            out.push_str("// Parameters:\n");
            for param in &method.parameters {
                let _ = writeln!(out, "// {:<30} {:<30} ({})", param.cpp_type, param.name, param.flags);
            }
        }
        out.push('\n');
        let _ = writeln!(out, "{}", method.build_signature(Some(owner)));
        let _ = write!(out, "{}\n\n", method.build_body(self.policy));
    }

    pub fn structs_header(&self, package: &PackageOutput) -> String {
        let mut out = String::new();
        self.file_header(&mut out, &[]);
        if !package.script_structs.is_empty() {
            self.section_header(&mut out, "Script Structs");
            for record in &package.script_structs {
                self.print_struct(&mut out, record);
                out.push('\n');
            }
        }
        self.file_footer(&mut out);
        out
    }

    pub fn classes_header(&self, package: &PackageOutput) -> String {
        let mut out = String::new();
        self.file_header(&mut out, &[]);
        if !package.constants.is_empty() {
            self.section_header(&mut out, "Constants");
            for (name, value) in &package.constants {
                self.print_constant(&mut out, name, value);
            }
            out.push('\n');
        }
        if !package.enums.is_empty() {
            self.section_header(&mut out, "Enums");
            for e in &package.enums {
                self.print_enum(&mut out, e);
                out.push('\n');
            }
            out.push('\n');
        }
        if !package.classes.is_empty() {
            self.section_header(&mut out, "Classes");
            for class in &package.classes {
                self.print_class(&mut out, class);
                out.push('\n');
            }
        }
        self.file_footer(&mut out);
        out
    }

    pub fn functions_source(&self, package: &PackageOutput) -> String {
        let mut out = String::new();
        self.file_header(&mut out, &["\"../SDK.hpp\""]);
        self.section_header(&mut out, "Functions");

        let out_of_line = |methods: &[PredefinedMethod], out: &mut String| {
            for method in methods.iter().filter(|m| !m.is_inline()) {
                let _ = write!(out, "{}\n\n", method.body);
            }
        };
        for record in &package.script_structs {
            out_of_line(&record.predefined_methods, &mut out);
        }
        for class in &package.classes {
            out_of_line(&class.record.predefined_methods, &mut out);
            for method in &class.methods {
                self.print_method(&mut out, &class.record.name_cpp, method);
            }
        }

        self.file_footer(&mut out);
        out
    }

    /// Umbrella header including every package in the given order.
    pub fn sdk_header(&self, packages: &[&PackageOutput]) -> String {
        let mut out = String::from("#pragma once\n\n");
        let _ = writeln!(out, "// Name: {}\n", self.policy.game_name_short());
        out.push_str("#include <set>\n#include <string>\n\n");
        for package in packages {
            let _ = writeln!(out, "#include \"SDK/{}\"", self.file_name(&package.name, FileKind::Structs));
            let _ = writeln!(out, "#include \"SDK/{}\"", self.file_name(&package.name, FileKind::Classes));
        }
        out
    }
}
