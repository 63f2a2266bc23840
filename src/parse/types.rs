use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer,
    de::{IgnoredAny, MapAccess, Visitor},
};
use unicase::UniCase;

use crate::error::LoadError;

use super::{Schema, resolve::resolve_refs};

const JSON_MEDIA_TYPE: &str = "application/json";

/// An OpenAPI document, with all local references inlined.
#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub info: Option<Info>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub components: Option<Components>,
}

impl Document {
    /// Parse an OpenAPI document from a YAML or JSON string.
    ///
    /// Every `#/...` reference is replaced with a copy of the value
    /// it points to before the document is deserialized.
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        let mut tree: serde_json::Value =
            serde_yaml::from_str(yaml).map_err(|err| LoadError::Syntax(err.into()))?;
        resolve_refs(&mut tree)?;
        let result =
            serde_path_to_error::deserialize(tree).map_err(|err| LoadError::Shape(err.into()))?;
        Ok(result)
    }

    /// Returns the reusable schemas under `components`, in document order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.components
            .iter()
            .flat_map(|components| &components.schemas)
            .map(|(name, schema)| (name.as_str(), schema))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Info {
    pub title: String,
}

/// Operation definitions for a single path, in document order.
#[derive(Debug, Default)]
pub struct PathItem(IndexMap<Method, Operation>);

impl PathItem {
    /// Yields all operations and their HTTP methods.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        self.0.iter().map(|(&method, op)| (method, op))
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathItemVisitor;
        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a path item")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut operations = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    // Path-level `parameters`, `summary`, `servers`, and
                    // extensions aren't operations.
                    match key.parse::<Method>() {
                        Ok(method) => {
                            operations.insert(method, map.next_value()?);
                        }
                        Err(_) => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(PathItem(operations))
            }
        }
        deserializer.deserialize_map(PathItemVisitor)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl FromStr for Method {
    type Err = BadMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "get" => Self::Get,
            "put" => Self::Put,
            "post" => Self::Post,
            "delete" => Self::Delete,
            "options" => Self::Options,
            "head" => Self::Head,
            "patch" => Self::Patch,
            "trace" => Self::Trace,
            _ => return Err(BadMethod),
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("not an HTTP method")]
pub struct BadMethod;

/// An HTTP operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// Request body definition.
#[derive(Debug, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    /// Returns the schema of the JSON request body, if there is one.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_content(&self.content)?.schema.as_ref()
    }
}

/// Response definition.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub content: Option<IndexMap<String, MediaType>>,
}

impl Response {
    /// Returns the schema of the JSON response body, if there is one.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_content(self.content.as_ref()?)?.schema.as_ref()
    }
}

/// Media type content.
#[derive(Debug, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Components section containing reusable schemas.
#[derive(Debug, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// Finds the `application/json` entry of a content map. Media types
/// are case-insensitive, and parameters like `charset` are ignored.
fn json_content(content: &IndexMap<String, MediaType>) -> Option<&MediaType> {
    content.iter().find_map(|(media_type, content)| {
        let essence = media_type.split(';').next().unwrap_or_default().trim();
        (UniCase::new(essence) == UniCase::new(JSON_MEDIA_TYPE)).then_some(content)
    })
}
