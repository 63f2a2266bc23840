use std::borrow::Cow;

use winnow::{Parser, combinator::eof};

/// Splits a path template, like `/v1/pets/{petId}/toy`, into its
/// slash-delimited segments.
///
/// Empty segments are skipped, so `//` and leading or trailing slashes
/// contribute nothing. A segment that isn't a well-formed sequence of
/// literals and `{param}` templates is kept whole, as a literal.
pub fn segments(input: &str) -> impl Iterator<Item = PathSegment<'_>> {
    input
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(PathSegment::parse)
}

/// A path segment that contains one or more template fragments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathSegment<'input>(Vec<PathFragment<'input>>);

impl<'input> PathSegment<'input> {
    fn parse(input: &'input str) -> Self {
        (self::parser::segment, eof)
            .map(|(segment, _)| segment)
            .parse(input)
            .unwrap_or_else(|_| Self(vec![PathFragment::Literal(input.into())]))
    }

    pub fn fragments(&self) -> &[PathFragment<'input>] {
        &self.0
    }
}

/// A fragment within a path segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathFragment<'input> {
    /// Literal text, percent-decoded.
    Literal(Cow<'input, str>),
    /// Template parameter name.
    Param(&'input str),
}

mod parser {
    use super::*;

    use winnow::{
        combinator::{alt, delimited, repeat},
        token::take_while,
    };

    pub fn segment<'a>(input: &mut &'a str) -> winnow::Result<PathSegment<'a>> {
        repeat(1.., fragment).map(PathSegment).parse_next(input)
    }

    fn fragment<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
        alt((param, literal)).parse_next(input)
    }

    fn param<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
        delimited('{', take_while(1.., |c| c != '{' && c != '}'), '}')
            .map(PathFragment::Param)
            .parse_next(input)
    }

    fn literal<'a>(input: &mut &'a str) -> winnow::Result<PathFragment<'a>> {
        take_while(1.., |c| c != '{' && c != '}')
            .map(|text| {
                PathFragment::Literal(percent_encoding::percent_decode_str(text).decode_utf8_lossy())
            })
            .parse_next(input)
    }
}
