//! Reading declaration metadata.
//!
//! [`MetadataReader`] is the single seam between host syntax and the
//! templates. [`SynMetadataReader`] implements it for declarations found by the
//! scanner; tests and other front ends can implement it over anything that
//! yields a name and a field list.

use std::path::PathBuf;

use quote::ToTokens;
use syn::{ext::IdentExt, Attribute, Data, DeriveInput, Fields, Meta};
use thiserror::Error;

use crate::{
    declaration::{FieldFormat, FieldSpec, ReceiverGenerics, TargetDeclaration},
    namespace::Namespace,
};

/// A tagged declaration could not be turned into a [`TargetDeclaration`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MetadataError {
    /// The tag sits on something without a fixed list of stored fields.
    #[error("`{name}` is {kind}; only structs can be sanitized")]
    NotAStruct { name: String, kind: &'static str },

    /// A `#[mrclean(...)]` field attribute is malformed.
    #[error("invalid #[mrclean] attribute on `{name}`: {message}")]
    InvalidAttribute { name: String, message: String },
}

/// Resolves a declaration into its qualified name and ordered fields.
pub trait MetadataReader {
    type Declaration;

    fn resolve(&self, declaration: &Self::Declaration) -> Result<TargetDeclaration, MetadataError>;
}

/// A `#[derive(Sanitize)]` item found in the crate's sources.
#[derive(Clone, Debug)]
pub struct SourceDeclaration {
    /// Module the item is declared in.
    pub namespace: Namespace,
    pub input: DeriveInput,
    /// File the item was read from.
    pub path: PathBuf,
}

/// [`MetadataReader`] over `syn` syntax trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct SynMetadataReader;

impl MetadataReader for SynMetadataReader {
    type Declaration = SourceDeclaration;

    fn resolve(&self, declaration: &SourceDeclaration) -> Result<TargetDeclaration, MetadataError> {
        let input = &declaration.input;
        let qualified_name = declaration.namespace.qualify(&input.ident.to_string());

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(_) => {
                return Err(MetadataError::NotAStruct {
                    name: qualified_name,
                    kind: "an enum",
                })
            }
            Data::Union(_) => {
                return Err(MetadataError::NotAStruct {
                    name: qualified_name,
                    kind: "a union",
                })
            }
        };

        let mut fields = Vec::new();
        match &data.fields {
            Fields::Named(named) => {
                for field in &named.named {
                    let Some(ident) = &field.ident else {
                        continue;
                    };
                    let spec = FieldSpec::new(ident.unraw().to_string())
                        .with_accessor(ident.to_string());
                    fields.push(finish_field(&qualified_name, spec, field, &input.generics)?);
                }
            }
            Fields::Unnamed(unnamed) => {
                for (index, field) in unnamed.unnamed.iter().enumerate() {
                    let spec = FieldSpec::new(index.to_string());
                    fields.push(finish_field(&qualified_name, spec, field, &input.generics)?);
                }
            }
            Fields::Unit => {}
        }

        Ok(TargetDeclaration::with_fields(qualified_name, fields)
            .with_generics(receiver_generics(&input.generics)))
    }
}

fn finish_field(
    qualified_name: &str,
    spec: FieldSpec,
    field: &syn::Field,
    generics: &syn::Generics,
) -> Result<FieldSpec, MetadataError> {
    let format = parse_field_format(&field.attrs).map_err(|err| MetadataError::InvalidAttribute {
        name: qualified_name.to_string(),
        message: err.to_string(),
    })?;
    let spec = spec.with_format(format);
    if mentions_type_param(&field.ty, generics) {
        Ok(spec.with_generic_type(field.ty.to_token_stream().to_string()))
    } else {
        Ok(spec)
    }
}

/// Same grammar the `Sanitize` derive accepts: `#[mrclean(debug)]` or
/// `#[mrclean(display)]`, at most once per field.
fn parse_field_format(attrs: &[Attribute]) -> syn::Result<FieldFormat> {
    let mut format: Option<FieldFormat> = None;
    for attr in attrs {
        if !attr.path().is_ident("mrclean") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected a format: #[mrclean(debug)] or #[mrclean(display)]",
            ));
        };
        list.parse_nested_meta(|meta| {
            let next = if meta.path.is_ident("debug") {
                FieldFormat::Debug
            } else if meta.path.is_ident("display") {
                FieldFormat::Display
            } else {
                return Err(meta.error("unknown field option; expected `debug` or `display`"));
            };
            if format.replace(next).is_some() {
                return Err(meta.error("multiple #[mrclean] attributes specified on the same field"));
            }
            Ok(())
        })?;
    }
    Ok(format.unwrap_or_default())
}

fn receiver_generics(generics: &syn::Generics) -> ReceiverGenerics {
    if generics.params.is_empty() {
        return ReceiverGenerics::default();
    }
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();
    ReceiverGenerics {
        impl_generics: impl_generics.to_token_stream().to_string(),
        type_generics: type_generics.to_token_stream().to_string(),
        where_predicates: where_clause
            .map(|clause| {
                clause
                    .predicates
                    .iter()
                    .map(|predicate| predicate.to_token_stream().to_string())
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Whether `ty` names one of the declaration's type parameters.
///
/// `PhantomData<T>` does not count: it never carries a value of `T`.
fn mentions_type_param(ty: &syn::Type, generics: &syn::Generics) -> bool {
    match ty {
        syn::Type::Path(path) => {
            if let Some(qself) = &path.qself {
                if mentions_type_param(&qself.ty, generics) {
                    return true;
                }
            }
            path.path.segments.iter().any(|segment| {
                if segment.ident == "PhantomData" {
                    return false;
                }
                let is_param = path.path.segments.len() == 1
                    && generics
                        .type_params()
                        .any(|param| segment.ident == param.ident);
                let in_args = match &segment.arguments {
                    syn::PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| {
                        matches!(arg, syn::GenericArgument::Type(inner) if mentions_type_param(inner, generics))
                    }),
                    _ => false,
                };
                is_param || in_args
            }) || (path.path.segments.len() > 1
                && path.qself.is_none()
                && generics
                    .type_params()
                    .any(|param| path.path.segments[0].ident == param.ident))
        }
        syn::Type::Reference(reference) => mentions_type_param(&reference.elem, generics),
        syn::Type::Ptr(pointer) => mentions_type_param(&pointer.elem, generics),
        syn::Type::Slice(slice) => mentions_type_param(&slice.elem, generics),
        syn::Type::Array(array) => mentions_type_param(&array.elem, generics),
        syn::Type::Paren(paren) => mentions_type_param(&paren.elem, generics),
        syn::Type::Group(group) => mentions_type_param(&group.elem, generics),
        syn::Type::Tuple(tuple) => tuple
            .elems
            .iter()
            .any(|elem| mentions_type_param(elem, generics)),
        _ => false,
    }
}
