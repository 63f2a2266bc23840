use std::{convert::Infallible, str::FromStr};

use serde::Deserialize;

use crate::{
    diagnostics::StructuralPath,
    error::EmitError,
    parse::Schema,
    render::{
        TypeRenderer,
        emit::{emit_module, export_type_alias, type_lit},
    },
};

/// The placeholder for the bare name in a [`NameFormat`].
const PLACEHOLDER: &str = "{name}";

/// A template for exported declaration names, like `I{name}` or
/// `{name}Dto`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct NameFormat(String);

impl NameFormat {
    /// Substitutes `name` for the first `{name}` in the template. A
    /// template without a placeholder is used as-is.
    pub fn apply(&self, name: &str) -> String {
        self.0.replacen(PLACEHOLDER, name, 1)
    }
}

impl Default for NameFormat {
    fn default() -> Self {
        Self(PLACEHOLDER.to_owned())
    }
}

impl From<String> for NameFormat {
    fn from(template: String) -> Self {
        Self(template)
    }
}

impl FromStr for NameFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

/// Turns named schemas into exported type declarations.
pub struct DeclarationAssembler<'a> {
    renderer: TypeRenderer<'a>,
    format: &'a NameFormat,
}

impl<'a> DeclarationAssembler<'a> {
    pub fn new(renderer: TypeRenderer<'a>, format: &'a NameFormat) -> Self {
        Self { renderer, format }
    }

    /// Emits `export type {Name} = { ... };` for the schema.
    ///
    /// The declaration is always a block of the root schema's own
    /// properties, including those declared beside a combinator or an
    /// `enum`. A root without properties becomes an empty block.
    pub fn assemble(&self, name: &str, schema: &Schema) -> Result<String, EmitError> {
        let path = StructuralPath::root(name);
        let properties = schema
            .root_object()
            .map(|object| self.renderer.render_properties(object, &path))
            .unwrap_or_default();
        emit_module(vec![export_type_alias(
            &self.format.apply(name),
            type_lit(properties),
        )])
    }
}
