//! Resolved metadata of a tagged declaration.
//!
//! These types are what the templates consume. They carry no syntax trees, so
//! templates can be exercised with hand-built declarations.

/// How a field value is rendered by debug bodies.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FieldFormat {
    /// `{}`: the value's `Display` impl.
    #[default]
    Display,
    /// `{:?}`: the value's `Debug` impl, selected with `#[mrclean(debug)]`.
    Debug,
}

impl FieldFormat {
    pub(crate) const fn placeholder(self) -> &'static str {
        match self {
            Self::Display => "{}",
            Self::Debug => "{:?}",
        }
    }

    pub(crate) const fn trait_path(self) -> &'static str {
        match self {
            Self::Display => "::core::fmt::Display",
            Self::Debug => "::core::fmt::Debug",
        }
    }
}

/// One stored field, in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    name: String,
    accessor: String,
    format: FieldFormat,
    generic_type: Option<String>,
}

impl FieldSpec {
    /// A field rendered as `name = {}` and read as `self.name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            accessor: name.clone(),
            name,
            format: FieldFormat::Display,
            generic_type: None,
        }
    }

    /// Reads the value through `accessor` (e.g. `r#type` or `0`) instead of the name.
    #[must_use]
    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = accessor.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = format;
        self
    }

    /// Records the field type when it mentions a type parameter, so debug
    /// bodies can bound it.
    #[must_use]
    pub fn with_generic_type(mut self, ty: impl Into<String>) -> Self {
        self.generic_type = Some(ty.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    pub fn format(&self) -> FieldFormat {
        self.format
    }

    pub fn generic_type(&self) -> Option<&str> {
        self.generic_type.as_deref()
    }
}

/// Generic parameters of the receiver, as source text.
///
/// Empty strings for non-generic receivers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReceiverGenerics {
    /// Parameters with bounds, brackets included: `<T: Clone>`.
    pub impl_generics: String,
    /// Parameters as arguments, brackets included: `<T>`.
    pub type_generics: String,
    /// Predicates of the declaration's own `where` clause.
    pub where_predicates: Vec<String>,
}

impl ReceiverGenerics {
    pub fn is_empty(&self) -> bool {
        self.impl_generics.is_empty()
    }
}

/// A tagged declaration: qualified name plus ordered fields.
///
/// Identity is the qualified name. Field order is declaration order; the list
/// is neither sorted nor deduplicated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetDeclaration {
    qualified_name: String,
    fields: Vec<FieldSpec>,
    generics: ReceiverGenerics,
}

impl TargetDeclaration {
    /// `qualified_name` is the path from the crate root, e.g. `user::Account`.
    pub fn new<I, S>(qualified_name: impl Into<String>, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            qualified_name: qualified_name.into(),
            fields: field_names.into_iter().map(FieldSpec::new).collect(),
            generics: ReceiverGenerics::default(),
        }
    }

    pub fn with_fields(qualified_name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            fields,
            generics: ReceiverGenerics::default(),
        }
    }

    #[must_use]
    pub fn with_generics(mut self, generics: ReceiverGenerics) -> Self {
        self.generics = generics;
        self
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The last path segment without a raw prefix: `Account` for `user::Account`.
    pub fn type_name(&self) -> &str {
        let last = self
            .qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.qualified_name);
        last.strip_prefix("r#").unwrap_or(last)
    }

    /// Path of the receiver from inside the crate: `crate::user::Account`.
    pub fn receiver_path(&self) -> String {
        format!("crate::{}", self.qualified_name)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldSpec::name).collect()
    }

    pub fn generics(&self) -> &ReceiverGenerics {
        &self.generics
    }

    pub fn is_generic(&self) -> bool {
        !self.generics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_is_last_segment() {
        let decl = TargetDeclaration::new("user::Account", ["id"]);
        assert_eq!(decl.type_name(), "Account");
        assert_eq!(decl.receiver_path(), "crate::user::Account");
    }

    #[test]
    fn root_declaration_keeps_its_name() {
        let decl = TargetDeclaration::new("Account", Vec::<String>::new());
        assert_eq!(decl.type_name(), "Account");
        assert_eq!(decl.receiver_path(), "crate::Account");
    }

    #[test]
    fn raw_type_name_is_unprefixed() {
        let decl = TargetDeclaration::new("model::r#Match", ["id"]);
        assert_eq!(decl.type_name(), "Match");
        assert_eq!(decl.receiver_path(), "crate::model::r#Match");
    }

    #[test]
    fn field_order_and_duplicates_are_kept() {
        let decl = TargetDeclaration::new("Account", ["id", "email", "id"]);
        assert_eq!(decl.field_names(), ["id", "email", "id"]);
    }

    #[test]
    fn field_accessor_defaults_to_name() {
        let field = FieldSpec::new("email");
        assert_eq!(field.accessor(), "email");
        assert_eq!(field.format(), FieldFormat::Display);

        let field = FieldSpec::new("type").with_accessor("r#type");
        assert_eq!(field.name(), "type");
        assert_eq!(field.accessor(), "r#type");
    }
}
