//! Converts schemas into TypeScript type expressions.

use itertools::Itertools;
use swc_ecma_ast::{TsKeywordTypeKind, TsType, TsTypeElement};

use crate::{
    diagnostics::{Diagnostics, Step, StructuralPath},
    parse::{ArraySchema, Combinator, CombinatorOp, ObjectSchema, PrimitiveTy, Schema},
};

pub mod emit;

use self::emit::{
    array, intersection, kw, lit_json, nullable, paren, property_sig, record, type_lit, union,
};

/// Renders schemas, reporting properties it can't render to a
/// [`Diagnostics`] sink.
///
/// A schema that can't be rendered produces `None`, and the property
/// that contains it is left out of its parent. Rendering never fails
/// outright.
#[derive(Clone, Copy)]
pub struct TypeRenderer<'a> {
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> TypeRenderer<'a> {
    pub fn new(diagnostics: &'a dyn Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Renders the declared properties of an object, in declaration
    /// order, skipping any that can't be rendered.
    pub fn render_properties(
        &self,
        object: &ObjectSchema,
        path: &StructuralPath<'_>,
    ) -> Vec<TsTypeElement> {
        object
            .properties
            .iter()
            .filter_map(|(name, schema)| {
                self.render_property(name, schema, object.is_required(name), path)
            })
            .collect()
    }

    /// Renders a named property, like `name: T` or `name?: T`.
    pub fn render_property(
        &self,
        name: &str,
        schema: &Schema,
        required: bool,
        path: &StructuralPath<'_>,
    ) -> Option<TsTypeElement> {
        let path = path.join(Step::Property(name));
        let ty = self.render_type(schema, &path)?;
        Some(property_sig(name, !required, ty))
    }

    /// Renders a schema as an unnamed type expression.
    pub fn render_type(
        &self,
        schema: &Schema,
        path: &StructuralPath<'_>,
    ) -> Option<Box<TsType>> {
        match schema {
            Schema::Combinator(combinator) => self.render_combinator(combinator, path),
            // A nullable enum lists `null` among its values;
            // we never add it ourselves.
            Schema::Enum(schema) => Some(union(schema.values.iter().map(lit_json).collect())),
            &Schema::Primitive { ty, nullable: n } => Some(nullable(primitive(ty), n)),
            Schema::Object(object) => Some(self.render_object(object, path)),
            Schema::Array(schema) => self.render_array(schema, path),
            Schema::Unsupported(schema) => {
                self.warn(path, &format!("has unsupported type: {schema}. Skipping."));
                None
            }
        }
    }

    fn render_combinator(
        &self,
        combinator: &Combinator,
        path: &StructuralPath<'_>,
    ) -> Option<Box<TsType>> {
        let branches = combinator
            .branches
            .iter()
            .enumerate()
            .filter_map(|(index, branch)| {
                self.render_type(branch, &path.join(Step::Branch(combinator.op, index)))
            })
            .collect_vec();
        if branches.is_empty() {
            return None;
        }
        let ty = match combinator.op {
            CombinatorOp::OneOf | CombinatorOp::AnyOf => union(branches),
            CombinatorOp::AllOf => intersection(branches),
        };
        Some(paren(ty))
    }

    fn render_object(&self, object: &ObjectSchema, path: &StructuralPath<'_>) -> Box<TsType> {
        let body = (!object.properties.is_empty())
            .then(|| nullable(type_lit(self.render_properties(object, path)), object.nullable));
        let rest = object.additional_properties.as_deref().map(|values| {
            let values = self
                .render_type(values, &path.join(Step::AdditionalProperties))
                .unwrap_or_else(|| kw(TsKeywordTypeKind::TsUnknownKeyword));
            record(values)
        });
        match (body, rest) {
            (Some(body), Some(rest)) => intersection(vec![body, rest]),
            (Some(body), None) => body,
            (None, Some(rest)) => nullable(rest, object.nullable),
            (None, None) => nullable(
                record(kw(TsKeywordTypeKind::TsUnknownKeyword)),
                object.nullable,
            ),
        }
    }

    fn render_array(
        &self,
        schema: &ArraySchema,
        path: &StructuralPath<'_>,
    ) -> Option<Box<TsType>> {
        let Some(items) = &schema.items else {
            self.warn(path, "is an array with no items. Skipping.");
            return None;
        };
        let items = self.render_type(items, &path.join(Step::Items))?;
        Some(nullable(array(items), schema.nullable))
    }

    fn warn(&self, path: &StructuralPath<'_>, message: &str) {
        self.diagnostics.warn(&path.to_string(), message);
    }
}

/// Maps a primitive type to its TypeScript keyword.
pub fn primitive(ty: PrimitiveTy) -> Box<TsType> {
    kw(match ty {
        PrimitiveTy::String => TsKeywordTypeKind::TsStringKeyword,
        PrimitiveTy::Integer | PrimitiveTy::Number => TsKeywordTypeKind::TsNumberKeyword,
        PrimitiveTy::Boolean => TsKeywordTypeKind::TsBooleanKeyword,
    })
}
