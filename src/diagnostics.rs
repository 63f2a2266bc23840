use std::{cell::RefCell, fmt};

use crate::parse::CombinatorOp;

/// Receives warnings about properties that were left out of the
/// generated types.
pub trait Diagnostics {
    /// Reports a problem with the schema at `path`.
    fn warn(&self, path: &str, message: &str);
}

/// Forwards diagnostics to [`tracing`] as warnings.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, path: &str, message: &str) {
        tracing::warn!(path, "{path} {message}");
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics(RefCell<Vec<Diagnostic>>);

impl CollectedDiagnostics {
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.0.into_inner()
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn warn(&self, path: &str, message: &str) {
        self.0.borrow_mut().push(Diagnostic {
            path: path.to_owned(),
            message: message.to_owned(),
        });
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

/// The location of a schema within a declaration, like
/// `Pet.tags.items[]`.
///
/// Each step borrows its parent, so descending into a schema never
/// allocates.
#[derive(Clone, Copy, Debug)]
pub struct StructuralPath<'a> {
    parent: Option<&'a StructuralPath<'a>>,
    step: Step<'a>,
}

impl<'a> StructuralPath<'a> {
    /// Starts a path at a named declaration.
    pub fn root(name: &'a str) -> Self {
        Self {
            parent: None,
            step: Step::Root(name),
        }
    }

    /// Returns a path one step below this one.
    pub fn join<'b>(&'b self, step: Step<'b>) -> StructuralPath<'b> {
        StructuralPath {
            parent: Some(self),
            step,
        }
    }
}

impl fmt::Display for StructuralPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            write!(f, "{parent}.")?;
        }
        match self.step {
            Step::Root(name) | Step::Property(name) => f.write_str(name),
            Step::Items => f.write_str("items[]"),
            Step::Branch(op, index) => write!(f, "{}.{index}", op.as_str()),
            Step::AdditionalProperties => f.write_str("additionalProperties"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Step<'a> {
    Root(&'a str),
    Property(&'a str),
    Items,
    Branch(CombinatorOp, usize),
    AdditionalProperties,
}
