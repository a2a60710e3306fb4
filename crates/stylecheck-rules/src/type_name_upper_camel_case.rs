//! Rule requiring `UpperCamelCase` type names.
//!
//! # Detected Patterns
//!
//! - `struct`, `enum`, `union`, `trait` and `type` items whose name starts
//!   with a lowercase letter or contains an underscore
//!
//! # Good Patterns
//!
//! ```ignore
//! struct HttpClient;
//! enum Mode { On, Off }
//! type Result<T> = std::result::Result<T, Error>;
//! ```

use proc_macro2::Ident;
use stylecheck_core::{Diagnostic, FileContext, Location, Rule, Severity};
use syn::visit::Visit;
use syn::{ItemEnum, ItemStruct, ItemTrait, ItemType, ItemUnion};

/// Rule code for type-name-upper-camel-case.
pub const CODE: &str = "SC1004";

/// Rule name for type-name-upper-camel-case.
pub const NAME: &str = "type-name-upper-camel-case";

/// Requires type and trait names to be `UpperCamelCase`.
#[derive(Debug, Clone)]
pub struct TypeNameUpperCamelCase {
    /// Severity level.
    pub severity: Severity,
}

impl Default for TypeNameUpperCamelCase {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeNameUpperCamelCase {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }
}

impl Rule for TypeNameUpperCamelCase {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires UpperCamelCase names for types and traits"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, ast: &syn::File) -> Vec<Diagnostic> {
        let mut visitor = TypeNameVisitor {
            ctx,
            rule: self,
            diagnostics: Vec::new(),
        };

        visitor.visit_file(ast);
        visitor.diagnostics
    }
}

/// Returns true if `name` starts uppercase and contains no underscore.
fn is_upper_camel_case(name: &str) -> bool {
    let name = name.strip_prefix("r#").unwrap_or(name);
    name.chars().next().is_some_and(char::is_uppercase) && !name.contains('_')
}

struct TypeNameVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a TypeNameUpperCamelCase,
    diagnostics: Vec<Diagnostic>,
}

impl TypeNameVisitor<'_> {
    fn check_ident(&mut self, kind: &str, ident: &Ident) {
        let name = ident.to_string();
        if is_upper_camel_case(&name) {
            return;
        }

        self.diagnostics.push(Diagnostic::new(
            CODE,
            NAME,
            self.rule.severity,
            Location::from_span(self.ctx.path.to_path_buf(), ident.span()),
            format!("{kind} name `{name}` should be UpperCamelCase"),
        ));
    }
}

impl<'ast> Visit<'ast> for TypeNameVisitor<'_> {
    fn visit_item_struct(&mut self, node: &'ast ItemStruct) {
        self.check_ident("Struct", &node.ident);
        syn::visit::visit_item_struct(self, node);
    }

    fn visit_item_enum(&mut self, node: &'ast ItemEnum) {
        self.check_ident("Enum", &node.ident);
        syn::visit::visit_item_enum(self, node);
    }

    fn visit_item_union(&mut self, node: &'ast ItemUnion) {
        self.check_ident("Union", &node.ident);
        syn::visit::visit_item_union(self, node);
    }

    fn visit_item_trait(&mut self, node: &'ast ItemTrait) {
        self.check_ident("Trait", &node.ident);
        syn::visit::visit_item_trait(self, node);
    }

    fn visit_item_type(&mut self, node: &'ast ItemType) {
        self.check_ident("Type alias", &node.ident);
        syn::visit::visit_item_type(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use stylecheck_core::StyleSettings;

    fn check_code(code: &str) -> Vec<Diagnostic> {
        let ast = syn::parse_file(code).expect("Failed to parse");
        let settings = StyleSettings::new();
        let ctx = FileContext::new(Path::new("src/lib.rs"), code, Path::new("."), &settings);
        TypeNameUpperCamelCase::new().check(&ctx, &ast)
    }

    #[test]
    fn accepts_upper_camel_case() {
        let code = r"
            struct HttpClient;
            enum Mode { On, Off }
            trait Render {}
            type Id = u64;
            union Bits { a: u32, b: f32 }
        ";
        assert!(check_code(code).is_empty());
    }

    #[test]
    fn detects_snake_and_lower_case() {
        let code = "struct http_client;\nenum mode { On }\ntrait Re_nder {}\n";
        let diagnostics = check_code(code);
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Struct name `http_client` should be UpperCamelCase",
                "Enum name `mode` should be UpperCamelCase",
                "Trait name `Re_nder` should be UpperCamelCase",
            ]
        );
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn reports_identifier_position() {
        let diagnostics = check_code("fn f() {}\npub struct bad_name;\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 2);
        assert_eq!(diagnostics[0].location.column, 12);
    }

    #[test]
    fn finds_nested_items() {
        let code = "mod inner {\n    fn f() {\n        struct local_type;\n    }\n}\n";
        let diagnostics = check_code(code);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 3);
    }

    #[test]
    fn raw_identifiers_are_judged_without_prefix() {
        assert!(is_upper_camel_case("r#Match"));
        assert!(!is_upper_camel_case("r#match"));
        assert!(!is_upper_camel_case(""));
    }
}
