use std::fmt::{self, Display};

use crate::{
    parse::{
        Method,
        path::{self, PathFragment},
    },
    text::{pascal_case, status_text},
};

/// The last part of a path-derived declaration name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameSuffix<'a> {
    /// A response body for the given status code.
    Response(&'a str),
    RequestBody,
}

impl Display for NameSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response(status) => write!(f, "{}Response", status_text(status)),
            Self::RequestBody => f.write_str("RequestBody"),
        }
    }
}

/// Derives a declaration name from an operation's path template and
/// method, like `GetPetsByPetIdOkResponse` for a `200` response to
/// `GET /pets/{petId}`.
///
/// Literal path text is `PascalCase`d; each `{param}` becomes `By` and
/// the `PascalCase`d parameter name. Empty segments are skipped.
pub fn declaration_name(template: &str, method: Method, suffix: NameSuffix<'_>) -> String {
    let mut name = pascal_case(method.as_str());
    for segment in path::segments(template) {
        for fragment in segment.fragments() {
            match fragment {
                PathFragment::Literal(text) => name.push_str(&pascal_case(text)),
                PathFragment::Param(param) => {
                    name.push_str("By");
                    name.push_str(&pascal_case(param));
                }
            }
        }
    }
    name.push_str(&suffix.to_string());
    name
}
