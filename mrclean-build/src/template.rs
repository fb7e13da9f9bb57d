//! Text templates for generated sources.
//!
//! Every function here is pure: the output depends only on its arguments.
//! `runtime` is the path generated code uses to reach the `mrclean` crate,
//! usually `::mrclean`.

use std::fmt::Write as _;

use mrclean::{GenerationMode, NOT_GENERATED_MESSAGE};

use crate::declaration::{FieldSpec, TargetDeclaration};

/// Header line of the root placeholder file.
pub const ROOT_HEADER: &str = "// This is the root function that generated functions will overload";

const GENERATED_NOTICE: &str = "// @generated by mrclean-build. Do not edit.";

/// The expression returned by a declaration's `sanitized_to_string`.
///
/// - Debug: `::std::format!("Account(id = {}, email = {})", self.id, self.email)`
/// - Release: `::std::format!("Account@{:x}", ::mrclean::identity_hash(self))`
pub fn sanitized_body(decl: &TargetDeclaration, mode: GenerationMode, runtime: &str) -> String {
    let name = decl.type_name();
    match mode {
        GenerationMode::Release => {
            format!("::std::format!(\"{name}@{{:x}}\", {runtime}::identity_hash(self))")
        }
        GenerationMode::Debug if decl.fields().is_empty() => {
            format!("::std::string::String::from(\"{name}()\")")
        }
        GenerationMode::Debug => {
            let pattern = decl
                .fields()
                .iter()
                .map(|field| format!("{} = {}", field.name(), field.format().placeholder()))
                .collect::<Vec<_>>()
                .join(", ");
            let arguments: String = decl
                .fields()
                .iter()
                .map(|field| format!(", self.{}", field.accessor()))
                .collect();
            format!("::std::format!(\"{name}({pattern})\"{arguments})")
        }
    }
}

/// The inherent `impl` block holding a declaration's `sanitized_to_string`.
pub fn sanitized_function(decl: &TargetDeclaration, mode: GenerationMode, runtime: &str) -> String {
    let generics = decl.generics();
    let mut predicates = generics.where_predicates.clone();
    if mode.is_debug() {
        predicates.extend(decl.fields().iter().filter_map(field_bound));
    }
    let where_clause = if predicates.is_empty() {
        String::from(" ")
    } else {
        format!("\nwhere\n    {},\n", predicates.join(",\n    "))
    };

    format!(
        "impl{impl_generics} {receiver}{type_generics}{where_clause}{{\n    \
         #[inline]\n    \
         #[allow(dead_code)]\n    \
         pub(crate) fn sanitized_to_string(&self) -> ::std::string::String {{\n        \
         {body}\n    \
         }}\n\
         }}\n",
        impl_generics = generics.impl_generics,
        receiver = decl.receiver_path(),
        type_generics = generics.type_generics,
        body = sanitized_body(decl, mode, runtime),
    )
}

fn field_bound(field: &FieldSpec) -> Option<String> {
    field
        .generic_type()
        .map(|ty| format!("{ty}: {}", field.format().trait_path()))
}

/// `register_sanitizations`, which fills a `SanitizerTable` with every
/// non-generic declaration's function.
///
/// Generic receivers have no single `TypeId`; callers register each
/// instantiation themselves.
pub fn registration_function(decls: &[TargetDeclaration], runtime: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#[allow(dead_code)]");
    let _ = writeln!(
        out,
        "pub(crate) fn register_sanitizations(table: &mut {runtime}::SanitizerTable) {{"
    );
    let mut registered = 0_usize;
    for decl in decls {
        let receiver = decl.receiver_path();
        if decl.is_generic() {
            let _ = writeln!(
                out,
                "    // {receiver} is generic; register each instantiation explicitly."
            );
        } else {
            let _ = writeln!(
                out,
                "    table.register::<{receiver}>({receiver}::sanitized_to_string);"
            );
            registered += 1;
        }
    }
    if registered == 0 {
        let _ = writeln!(out, "    let _ = table;");
    }
    out.push_str("}\n");
    out
}

/// Contents of `sanitizations.rs`: the mode header, one function per
/// declaration in the given order, then `register_sanitizations`.
pub fn sanitizations_file(decls: &[TargetDeclaration], mode: GenerationMode, runtime: &str) -> String {
    let mut out = format!("// {}\n{GENERATED_NOTICE}\n", mode.marker());
    for decl in decls {
        out.push('\n');
        out.push_str(&sanitized_function(decl, mode, runtime));
    }
    out.push('\n');
    out.push_str(&registration_function(decls, runtime));
    out
}

/// Contents of `root_sanitize_function.rs`.
///
/// Declares `SanitizedToString` with a blanket impl. Debug returns the `Debug`
/// representation; release panics with [`NOT_GENERATED_MESSAGE`].
pub fn root_function_file(mode: GenerationMode) -> String {
    let (bound, body) = match mode {
        GenerationMode::Debug => (
            "?Sized + ::core::fmt::Debug",
            String::from("::std::format!(\"{:?}\", self)"),
        ),
        GenerationMode::Release => (
            "?Sized",
            format!("::core::panic!({NOT_GENERATED_MESSAGE:?})"),
        ),
    };

    format!(
        "{ROOT_HEADER}\n\
         // {marker}\n\
         {GENERATED_NOTICE}\n\
         \n\
         #[allow(dead_code)]\n\
         pub(crate) trait SanitizedToString {{\n    \
         fn sanitized_to_string(&self) -> ::std::string::String;\n\
         }}\n\
         \n\
         impl<T: {bound}> SanitizedToString for T {{\n    \
         fn sanitized_to_string(&self) -> ::std::string::String {{\n        \
         {body}\n    \
         }}\n\
         }}\n",
        marker = mode.marker(),
    )
}
