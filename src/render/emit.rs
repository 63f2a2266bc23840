//! Constructors for TypeScript type syntax, and the emitter that prints
//! it.

use swc_common::{DUMMY_SP, SourceMap, sync::Lrc};
use swc_ecma_ast::{
    Bool, Decl, ExportDecl, Expr, Ident, Lit, Module, ModuleDecl, ModuleItem, Number, Str,
    TsArrayType, TsEntityName, TsIntersectionType, TsKeywordType, TsKeywordTypeKind, TsLit,
    TsLitType, TsParenthesizedType, TsPropertySignature, TsType, TsTypeAliasDecl, TsTypeAnn,
    TsTypeElement, TsTypeLit, TsTypeParamInstantiation, TsTypeRef, TsUnionOrIntersectionType,
    TsUnionType,
};
use swc_ecma_codegen::{Emitter, text_writer::JsWriter};

use crate::error::EmitError;

/// The name of the helper alias for nullable types.
pub const NULLABLE: &str = "Nullable";

// MARK: Ident helpers

/// Creates an [`Ident`] with `DUMMY_SP` and no syntax context.
pub fn ident(name: &str) -> Ident {
    Ident::new_no_ctxt(name.into(), DUMMY_SP)
}

/// Returns `true` if `name` can be written as a bare property key.
pub fn is_valid_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '$' || c == '_' || unicode_ident::is_xid_start(c))
        && chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
}

// MARK: Type constructors

/// Creates a keyword type like `string`, `number`, `boolean`,
/// `unknown`, or `null`.
pub fn kw(kind: TsKeywordTypeKind) -> Box<TsType> {
    Box::new(TsType::TsKeywordType(TsKeywordType {
        span: DUMMY_SP,
        kind,
    }))
}

/// Creates a string literal type like `"active"`.
pub fn lit_str(s: &str) -> Box<TsType> {
    Box::new(TsType::TsLitType(TsLitType {
        span: DUMMY_SP,
        lit: TsLit::Str(str_lit(s)),
    }))
}

/// Creates a number literal type, keeping the number's source text.
pub fn lit_num(n: &serde_json::Number) -> Box<TsType> {
    Box::new(TsType::TsLitType(TsLitType {
        span: DUMMY_SP,
        lit: TsLit::Number(Number {
            span: DUMMY_SP,
            value: n.as_f64().unwrap_or_default(),
            raw: Some(n.to_string().into()),
        }),
    }))
}

/// Creates a boolean literal type like `true` or `false`.
pub fn lit_bool(b: bool) -> Box<TsType> {
    Box::new(TsType::TsLitType(TsLitType {
        span: DUMMY_SP,
        lit: TsLit::Bool(Bool {
            span: DUMMY_SP,
            value: b,
        }),
    }))
}

/// Creates a literal type from an enum value. Strings are quoted;
/// `null`, numbers, and booleans are written as-is. Arrays and objects
/// can't be literal types, so they're written as their JSON text in a
/// string literal.
pub fn lit_json(value: &serde_json::Value) -> Box<TsType> {
    match value {
        serde_json::Value::Null => kw(TsKeywordTypeKind::TsNullKeyword),
        serde_json::Value::Bool(b) => lit_bool(*b),
        serde_json::Value::Number(n) => lit_num(n),
        serde_json::Value::String(s) => lit_str(s),
        other => lit_str(&other.to_string()),
    }
}

/// Creates a generic type reference like `Name<T>`.
pub fn generic(name: &str, params: Vec<Box<TsType>>) -> Box<TsType> {
    Box::new(TsType::TsTypeRef(TsTypeRef {
        span: DUMMY_SP,
        type_name: TsEntityName::Ident(ident(name)),
        type_params: Some(Box::new(TsTypeParamInstantiation {
            span: DUMMY_SP,
            params,
        })),
    }))
}

/// Wraps a type in `Nullable<T>` if `nullable` is set.
pub fn nullable(ty: Box<TsType>, nullable: bool) -> Box<TsType> {
    if nullable {
        generic(NULLABLE, vec![ty])
    } else {
        ty
    }
}

/// Creates a `Record<string, T>` type reference.
pub fn record(value: Box<TsType>) -> Box<TsType> {
    generic(
        "Record",
        vec![kw(TsKeywordTypeKind::TsStringKeyword), value],
    )
}

/// Creates an array type `T[]`, wrapping union and intersection
/// element types in parentheses to preserve precedence.
pub fn array(elem: Box<TsType>) -> Box<TsType> {
    // The emitter doesn't add parentheses, so `(A | B)[]` would come
    // out as `A | B[]`.
    let elem = match *elem {
        TsType::TsUnionOrIntersectionType(_) => paren(elem),
        _ => elem,
    };
    Box::new(TsType::TsArrayType(TsArrayType {
        span: DUMMY_SP,
        elem_type: elem,
    }))
}

/// Creates a union type `A | B | C`.
#[allow(clippy::vec_box)] // `TsUnionType` requires `Vec<Box<TsType>>`.
pub fn union(types: Vec<Box<TsType>>) -> Box<TsType> {
    Box::new(TsType::TsUnionOrIntersectionType(
        TsUnionOrIntersectionType::TsUnionType(TsUnionType {
            span: DUMMY_SP,
            types,
        }),
    ))
}

/// Creates an intersection type `A & B & C`, wrapping union members in
/// parentheses, since `&` binds tighter than `|`.
#[allow(clippy::vec_box)] // `TsIntersectionType` requires `Vec<Box<TsType>>`.
pub fn intersection(types: Vec<Box<TsType>>) -> Box<TsType> {
    let types = types
        .into_iter()
        .map(|ty| {
            let wrap = matches!(
                &*ty,
                TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union))
                    if union.types.len() > 1
            );
            if wrap { paren(ty) } else { ty }
        })
        .collect();
    Box::new(TsType::TsUnionOrIntersectionType(
        TsUnionOrIntersectionType::TsIntersectionType(TsIntersectionType {
            span: DUMMY_SP,
            types,
        }),
    ))
}

/// Creates a parenthesized type `(T)`.
pub fn paren(ty: Box<TsType>) -> Box<TsType> {
    Box::new(TsType::TsParenthesizedType(TsParenthesizedType {
        span: DUMMY_SP,
        type_ann: ty,
    }))
}

/// Creates an anonymous object type `{ field: Type; ... }`.
pub fn type_lit(members: Vec<TsTypeElement>) -> Box<TsType> {
    Box::new(TsType::TsTypeLit(TsTypeLit {
        span: DUMMY_SP,
        members,
    }))
}

// MARK: Property helper

/// Creates a property signature for a type literal. Names that aren't
/// identifiers are written as string keys.
pub fn property_sig(name: &str, optional: bool, ty: Box<TsType>) -> TsTypeElement {
    let key = if is_valid_js_identifier(name) {
        Expr::Ident(ident(name))
    } else {
        Expr::Lit(Lit::Str(str_lit(name)))
    };
    TsTypeElement::TsPropertySignature(TsPropertySignature {
        span: DUMMY_SP,
        readonly: false,
        key: Box::new(key),
        computed: false,
        optional,
        type_ann: Some(Box::new(TsTypeAnn {
            span: DUMMY_SP,
            type_ann: ty,
        })),
    })
}

fn str_lit(s: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: s.into(),
        raw: None,
    }
}

// MARK: Declaration helpers

/// Creates `export type Name = Type`.
pub fn export_type_alias(name: &str, ty: Box<TsType>) -> ModuleItem {
    ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
        span: DUMMY_SP,
        decl: Decl::TsTypeAlias(Box::new(TsTypeAliasDecl {
            span: DUMMY_SP,
            declare: false,
            id: ident(name),
            type_params: None,
            type_ann: ty,
        })),
    }))
}

// MARK: Emitter

/// Renders a type as a formatted TypeScript string.
///
/// Emits a `type __T = <ty>;` module via [`emit_module`], then strips
/// the wrapper to extract the bare type text.
pub fn emit_type_to_string(ty: Box<TsType>) -> Result<String, EmitError> {
    let output = emit_module(vec![export_type_alias("__T", ty)])?;
    Ok(output
        .strip_prefix("export type __T = ")
        .and_then(|s| s.strip_suffix(";\n"))
        .unwrap_or(&output)
        .to_owned())
}

/// Emits a list of module items as a formatted TypeScript string,
/// indented with two spaces.
pub fn emit_module(body: Vec<ModuleItem>) -> Result<String, EmitError> {
    let cm: Lrc<SourceMap> = Lrc::new(SourceMap::default());
    let mut buf = Vec::new();

    let module = Module {
        span: DUMMY_SP,
        body,
        shebang: None,
    };

    {
        let mut wr = JsWriter::new(cm.clone(), "\n", &mut buf, None);
        wr.set_indent_str("  ");
        let mut emitter = Emitter {
            cfg: Default::default(),
            cm: cm.clone(),
            comments: None,
            wr,
        };
        emitter.emit_module(&module)?;
    }

    let mut result = String::from_utf8(buf)?;
    if !result.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}
