use std::path::Path;

use indoc::formatdoc;
use miette::{Context, IntoDiagnostic};

use crate::{
    assemble::DeclarationAssembler,
    config::GenerateConfig,
    diagnostics::Diagnostics,
    error::EmitError,
    parse::Document,
    render::{TypeRenderer, emit::NULLABLE},
    select::select,
};

/// Generates a declaration for every selected schema in the document,
/// in selection order.
///
/// Properties that can't be rendered are left out and reported to
/// `diagnostics`. Only a failure to print the output is an error.
pub fn generate(
    doc: &Document,
    config: &GenerateConfig,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<String>, EmitError> {
    let selected = select(doc, config);
    tracing::debug!(count = selected.len(), "selected schemas");

    let assembler =
        DeclarationAssembler::new(TypeRenderer::new(diagnostics), &config.type_name_format);
    selected
        .iter()
        .map(|(name, schema)| {
            tracing::debug!(name, "generating declaration");
            assembler.assemble(name, schema)
        })
        .collect()
}

/// A TypeScript module with all the generated declarations.
#[derive(Clone, Debug)]
pub struct TypesModule {
    declarations: Vec<String>,
}

impl TypesModule {
    pub fn new(declarations: Vec<String>) -> Self {
        Self { declarations }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn into_string(self) -> String {
        let mut module = formatdoc! {"
            // This file was generated by {name}. Do not edit it by hand.

            export type {NULLABLE}<T> = T | null;
            ",
            name = env!("CARGO_PKG_NAME"),
        };
        for declaration in self.declarations {
            module.push('\n');
            module.push_str(&declaration);
        }
        module
    }

    /// Writes the module to `path`, creating parent directories as needed.
    pub fn write_to_disk(self, path: &Path) -> miette::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .into_diagnostic()
                .with_context(|| format!("Failed to create directory `{}`", parent.display()))?;
        }
        std::fs::write(path, self.into_string())
            .into_diagnostic()
            .with_context(|| format!("Failed to write `{}`", path.display()))?;
        Ok(())
    }
}
