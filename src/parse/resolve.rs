use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::error::LoadError;

/// Replaces every local `$ref` object in `tree` with a copy of its
/// (recursively resolved) target.
///
/// References are JSON Pointers into the same document, written as URI
/// fragments: `#/components/schemas/Pet`. A reference that's reached
/// again while it's still being expanded is a cycle, and is rejected.
pub fn resolve_refs(tree: &mut Value) -> Result<(), LoadError> {
    let source = tree.clone();
    Resolver::new(&source).resolve(tree)
}

struct Resolver<'a> {
    source: &'a Value,
    expanding: Vec<String>,
    resolved: HashMap<String, Value>,
}

impl<'a> Resolver<'a> {
    fn new(source: &'a Value) -> Self {
        Self {
            source,
            expanding: Vec::new(),
            resolved: HashMap::new(),
        }
    }

    fn resolve(&mut self, value: &mut Value) -> Result<(), LoadError> {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(reference)) = map.get("$ref") {
                    *value = self.expand(reference.clone())?;
                    return Ok(());
                }
                for child in map.values_mut() {
                    self.resolve(child)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.resolve(item)?;
                }
            }
            _ => (),
        }
        Ok(())
    }

    fn expand(&mut self, reference: String) -> Result<Value, LoadError> {
        if let Some(value) = self.resolved.get(&reference) {
            return Ok(value.clone());
        }
        if self.expanding.contains(&reference) {
            return Err(LoadError::CyclicRef(reference));
        }
        let Some(fragment) = reference.strip_prefix('#') else {
            return Err(LoadError::ExternalRef(reference));
        };
        let pointer = percent_decode_str(fragment).decode_utf8_lossy();
        let Some(target) = self.source.pointer(&pointer) else {
            return Err(LoadError::DanglingRef(reference));
        };

        let mut target = target.clone();
        self.expanding.push(reference);
        self.resolve(&mut target)?;
        let reference = self.expanding.pop().unwrap_or_default();
        self.resolved.insert(reference, target.clone());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::tests::assert_matches;

    #[test]
    fn test_inlines_schema_refs() {
        let mut tree = json!({
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "properties": {
                            "owner": { "$ref": "#/components/schemas/Owner" },
                        },
                    },
                    "Owner": { "type": "string" },
                },
            },
        });

        resolve_refs(&mut tree).unwrap();

        assert_eq!(
            tree.pointer("/components/schemas/Pet/properties/owner"),
            Some(&json!({ "type": "string" }))
        );
    }

    #[test]
    fn test_resolves_nested_refs() {
        let mut tree = json!({
            "a": { "$ref": "#/b" },
            "b": { "items": { "$ref": "#/c" } },
            "c": { "type": "integer" },
        });

        resolve_refs(&mut tree).unwrap();

        assert_eq!(tree["a"], json!({ "items": { "type": "integer" } }));
    }

    #[test]
    fn test_escaped_pointer() {
        let mut tree = json!({
            "paths": {
                "/pets/{id}": { "get": { "summary": "Get a pet" } },
            },
            "link": { "$ref": "#/paths/~1pets~1%7Bid%7D/get" },
        });

        resolve_refs(&mut tree).unwrap();

        assert_eq!(tree["link"], json!({ "summary": "Get a pet" }));
    }

    #[test]
    fn test_same_ref_twice_is_not_a_cycle() {
        let mut tree = json!({
            "pair": [{ "$ref": "#/one" }, { "$ref": "#/one" }],
            "one": { "type": "boolean" },
        });

        resolve_refs(&mut tree).unwrap();

        assert_eq!(tree["pair"][1], json!({ "type": "boolean" }));
    }

    #[test]
    fn test_rejects_cycles() {
        let mut tree = json!({
            "Node": {
                "type": "object",
                "properties": { "next": { "$ref": "#/Node" } },
            },
        });

        assert_matches!(
            resolve_refs(&mut tree),
            Err(LoadError::CyclicRef(reference)) if reference == "#/Node",
        );
    }

    #[test]
    fn test_rejects_external_refs() {
        let mut tree = json!({ "a": { "$ref": "other.yaml#/Pet" } });
        assert_matches!(resolve_refs(&mut tree), Err(LoadError::ExternalRef(_)));
    }

    #[test]
    fn test_rejects_dangling_refs() {
        let mut tree = json!({ "a": { "$ref": "#/missing" } });
        assert_matches!(resolve_refs(&mut tree), Err(LoadError::DanglingRef(_)));
    }
}
