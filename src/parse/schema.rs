use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Deserializer};

/// An OpenAPI schema, classified by the shape it describes.
///
/// Classification happens once, at deserialization. A non-empty
/// combinator list takes priority over everything else, then a
/// non-empty `enum`, then the `type` keyword.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(from = "RawSchema")]
pub enum Schema {
    /// `oneOf`, `anyOf`, or `allOf`.
    Combinator(Combinator),
    /// An enumeration of literal values.
    Enum(EnumSchema),
    Primitive {
        ty: PrimitiveTy,
        nullable: bool,
    },
    Object(ObjectSchema),
    Array(ArraySchema),
    /// A schema whose `type` isn't understood, or that has no `type`
    /// and nothing else to infer one from.
    Unsupported(UnsupportedSchema),
}

impl Schema {
    /// Returns the object shape of this schema, if it has one.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the properties declared on this schema itself.
    ///
    /// Unlike [`as_object`](Self::as_object), this includes properties
    /// written beside a combinator or an `enum`.
    pub fn root_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(object) => Some(object),
            Self::Combinator(Combinator { shape, .. }) | Self::Enum(EnumSchema { shape, .. }) => {
                shape.as_ref()
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Combinator {
    pub op: CombinatorOp,
    pub branches: Vec<Schema>,
    /// Properties declared beside the combinator.
    pub shape: Option<ObjectSchema>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumSchema {
    pub values: Vec<serde_json::Value>,
    /// Properties declared beside the `enum`.
    pub shape: Option<ObjectSchema>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CombinatorOp {
    OneOf,
    AnyOf,
    AllOf,
}

impl CombinatorOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
            Self::AllOf => "allOf",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrimitiveTy {
    String,
    Integer,
    Number,
    Boolean,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, Schema>,
    pub required: Vec<String>,
    /// The value type of undeclared keys. `None` if unconstrained.
    pub additional_properties: Option<Box<Schema>>,
    pub nullable: bool,
}

impl ObjectSchema {
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArraySchema {
    pub items: Option<Box<Schema>>,
    pub nullable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnsupportedSchema {
    pub ty: Option<String>,
}

impl fmt::Display for UnsupportedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => f.write_str(ty),
            None => f.write_str("(none)"),
        }
    }
}

/// A schema as written in the document, before classification.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "type", default, deserialize_with = "deserialize_type")]
    ty: Vec<String>,
    #[serde(default)]
    nullable: bool,

    // Object properties.
    #[serde(default)]
    properties: Option<IndexMap<String, Schema>>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    additional_properties: Option<AdditionalProperties>,

    // Array items.
    #[serde(default)]
    items: Option<Box<Schema>>,

    // Enum variants.
    #[serde(rename = "enum", default)]
    variants: Option<Vec<serde_json::Value>>,

    // Composition.
    #[serde(default)]
    one_of: Option<Vec<Schema>>,
    #[serde(default)]
    any_of: Option<Vec<Schema>>,
    #[serde(default)]
    all_of: Option<Vec<Schema>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

impl RawSchema {
    /// Takes the declared properties, if there are any.
    fn into_shape(self) -> Option<ObjectSchema> {
        let properties = self.properties.filter(|properties| !properties.is_empty())?;
        Some(ObjectSchema {
            properties,
            required: self.required,
            ..Default::default()
        })
    }
}

impl From<RawSchema> for Schema {
    fn from(mut raw: RawSchema) -> Self {
        let combinators = [
            (CombinatorOp::OneOf, raw.one_of.take()),
            (CombinatorOp::AnyOf, raw.any_of.take()),
            (CombinatorOp::AllOf, raw.all_of.take()),
        ];
        if let Some((op, branches)) = combinators
            .into_iter()
            .find_map(|(op, branches)| Some((op, branches?)).filter(|(_, b)| !b.is_empty()))
        {
            return Self::Combinator(Combinator {
                op,
                branches,
                shape: raw.into_shape(),
            });
        }

        if let Some(values) = raw.variants.take()
            && !values.is_empty()
        {
            return Self::Enum(EnumSchema {
                values,
                shape: raw.into_shape(),
            });
        }

        // OpenAPI 3.1 spells nullability as a second `"null"` type.
        let (ty, nullable) = match &*raw.ty {
            [] => (None, raw.nullable),
            [ty] => (Some(ty.as_str()), raw.nullable),
            [ty, null] | [null, ty] if null == "null" && ty != "null" => (Some(ty.as_str()), true),
            types => {
                return Self::Unsupported(UnsupportedSchema {
                    ty: Some(types.iter().join(", ")),
                });
            }
        };

        // `additionalProperties: true` and `{}` both mean "anything".
        let additional_properties = match raw.additional_properties {
            Some(AdditionalProperties::Schema(schema))
                if !matches!(*schema, Schema::Unsupported(UnsupportedSchema { ty: None })) =>
            {
                Some(schema)
            }
            _ => None,
        };

        match ty {
            Some("string") => Self::Primitive {
                ty: PrimitiveTy::String,
                nullable,
            },
            Some("integer") => Self::Primitive {
                ty: PrimitiveTy::Integer,
                nullable,
            },
            Some("number") => Self::Primitive {
                ty: PrimitiveTy::Number,
                nullable,
            },
            Some("boolean") => Self::Primitive {
                ty: PrimitiveTy::Boolean,
                nullable,
            },
            Some("array") => Self::Array(ArraySchema {
                items: raw.items,
                nullable,
            }),
            Some("object") => Self::Object(ObjectSchema {
                properties: raw.properties.unwrap_or_default(),
                required: raw.required,
                additional_properties,
                nullable,
            }),
            None if raw.properties.is_some() || additional_properties.is_some() => {
                Self::Object(ObjectSchema {
                    properties: raw.properties.unwrap_or_default(),
                    required: raw.required,
                    additional_properties,
                    nullable,
                })
            }
            ty => Self::Unsupported(UnsupportedSchema {
                ty: ty.map(str::to_owned),
            }),
        }
    }
}

fn deserialize_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TypesOr {
        /// An OpenAPI 3.1-style `type` array.
        Types(Vec<String>),
        /// A single `type`.
        Type(String),
    }
    Ok(match TypesOr::deserialize(deserializer)? {
        TypesOr::Types(types) => types,
        TypesOr::Type(ty) => vec![ty],
    })
}
