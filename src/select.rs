//! Picks the schemas that become declarations.

use indexmap::{IndexMap, map::Entry};

use crate::{
    config::GenerateConfig,
    naming::{NameSuffix, declaration_name},
    parse::{Document, RequestBody, Schema},
};

/// Selects every schema to declare, keyed by its bare declaration name.
///
/// Component schemas come first, under their own names. Then, for each
/// retained path and each of its operations, every `2xx` response with a
/// JSON body, followed by the JSON request body.
///
/// Names that collide are last-write-wins: the later schema replaces
/// the earlier one, keeping its position.
pub fn select<'a>(doc: &'a Document, config: &GenerateConfig) -> IndexMap<String, &'a Schema> {
    let mut selected = Selected::default();

    if config.schemas {
        for (name, schema) in doc.schemas() {
            selected.insert(name.to_owned(), schema);
        }
    }

    if config.paths.enabled {
        for (template, item) in &doc.paths {
            if !config.paths.retains(template) {
                tracing::debug!(path = template, "skipping filtered path");
                continue;
            }
            for (method, op) in item.operations() {
                for (status, response) in &op.responses {
                    if !status.starts_with('2') {
                        continue;
                    }
                    let Some(schema) = response.json_schema() else {
                        continue;
                    };
                    let name = declaration_name(template, method, NameSuffix::Response(status));
                    selected.insert(name, schema);
                }
                if let Some(schema) = op.request_body.as_ref().and_then(RequestBody::json_schema) {
                    let name = declaration_name(template, method, NameSuffix::RequestBody);
                    selected.insert(name, schema);
                }
            }
        }
    }

    selected.0
}

#[derive(Default)]
struct Selected<'a>(IndexMap<String, &'a Schema>);

impl<'a> Selected<'a> {
    fn insert(&mut self, name: String, schema: &'a Schema) {
        match self.0.entry(name) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(name = entry.key(), "replacing declaration with the same name");
                entry.insert(schema);
            }
            Entry::Vacant(entry) => {
                entry.insert(schema);
            }
        }
    }
}
