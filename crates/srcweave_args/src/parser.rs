//! Classification of argument segments.
//!
//! Each top-level segment is tried against the grammar forms in a fixed
//! order: object literal, type assertion, array literal, arrow function,
//! call or generic, and finally a verbatim leaf. A form that does not fit
//! falls through to the next one, so parsing never fails.

use srcweave_scanner::is_identifier;
use tracing::trace;

use crate::element::{ArrowTypes, ObjectEntries, ParsedElement};
use crate::split::{
    find_first_code, find_matching_close, find_top_level, is_wrapped, split_top_level,
    trim_trivia,
};

/// Parse the text of an argument list (without its parentheses).
pub fn parse_arguments(text: &str) -> Vec<ParsedElement> {
    split_top_level(text).into_iter().map(parse_element).collect()
}

/// Classify a single argument.
pub fn parse_element(text: &str) -> ParsedElement {
    let text = trim_trivia(text);

    if is_wrapped(text, b'{') {
        return parse_object(text);
    }

    // Checked after the object form so `as` inside property values does not
    // split the whole literal.
    if let Some(&at) = find_top_level(text, " as ").last() {
        let expr = &text[..at];
        let target_type = trim_trivia(&text[at + 4..]);
        if !expr.trim().is_empty() && !target_type.is_empty() {
            return ParsedElement::TypeAssertion {
                target_type: target_type.to_string(),
                expr: Box::new(parse_element(expr)),
            };
        }
    }

    if is_wrapped(text, b'[') {
        return ParsedElement::ArrayLiteral(parse_arguments(&text[1..text.len() - 1]));
    }

    if text.contains("=>") {
        if let Some(arrow) = parse_arrow(text) {
            return arrow;
        }
    }

    if text.contains('(') || text.contains('<') {
        if let Some(call) = parse_call_or_generic(text) {
            return call;
        }
    }

    ParsedElement::Leaf(text.to_string())
}

fn parse_object(text: &str) -> ParsedElement {
    let mut entries = ObjectEntries::new();
    for property in split_top_level(&text[1..text.len() - 1]) {
        let colon = if property.starts_with("...") {
            None
        } else {
            find_top_level(property, ":").first().copied()
        };
        match colon {
            Some(at) => {
                let key = trim_trivia(&property[..at]);
                entries.insert(key.to_string(), parse_element(&property[at + 1..]));
            }
            // Shorthand, spread and method properties keep their text as key.
            None => {
                entries.insert(property.to_string(), ParsedElement::leaf(property));
            }
        }
    }
    ParsedElement::ObjectLiteral(entries)
}

fn parse_arrow(text: &str) -> Option<ParsedElement> {
    let (params, types, body) = if text.starts_with('(') {
        let close = find_matching_close(text, 0)?;
        let params_text = &text[1..close];
        let rest = text[close + 1..].trim_start();

        if let Some(body) = rest.strip_prefix("=>") {
            (parse_arguments(params_text), None, body)
        } else if let Some(annotated) = rest.strip_prefix(':') {
            let arrow = *find_top_level(annotated, "=>").first()?;
            let return_type = trim_trivia(&annotated[..arrow]);
            if return_type.is_empty() {
                return None;
            }
            let (params, param_types) = split_typed_params(params_text);
            let types = ArrowTypes {
                params: param_types,
                return_type: return_type.to_string(),
            };
            (params, Some(types), &annotated[arrow + 2..])
        } else {
            return None;
        }
    } else {
        let arrow = *find_top_level(text, "=>").first()?;
        let param = text[..arrow].trim();
        if !is_identifier(param) {
            return None;
        }
        (vec![ParsedElement::leaf(param)], None, &text[arrow + 2..])
    };

    let body = trim_trivia(body);
    if body.is_empty() {
        return None;
    }
    // A block body is statements, not an object literal.
    let body = if body.starts_with('{') {
        ParsedElement::leaf(body)
    } else {
        parse_element(body)
    };

    Some(ParsedElement::ArrowFn {
        params,
        types,
        body: Box::new(body),
    })
}

/// Split `a: A, b` into parameter elements and their annotations.
fn split_typed_params(text: &str) -> (Vec<ParsedElement>, Vec<Option<String>>) {
    split_top_level(text)
        .into_iter()
        .map(|param| match find_top_level(param, ":").first() {
            Some(&at) => (
                parse_element(&param[..at]),
                Some(trim_trivia(&param[at + 1..]).to_string()),
            ),
            None => (parse_element(param), None),
        })
        .unzip()
}

fn parse_call_or_generic(text: &str) -> Option<ParsedElement> {
    let paren = find_first_code(text, b'(');
    let angle = find_first_code(text, b'<');

    let element = match (angle, paren) {
        (Some(lt), Some(p)) if lt < p => parse_generic(text, lt),
        (Some(lt), None) => parse_generic(text, lt),
        (_, Some(p)) => parse_call(text, p),
        (None, None) => None,
    };
    if element.is_none() {
        trace!(text, "call-like argument kept as leaf");
    }
    element
}

fn parse_call(text: &str, paren: usize) -> Option<ParsedElement> {
    let name = text[..paren].trim();
    if !is_callee(name) {
        return None;
    }
    let close = find_matching_close(text, paren)?;
    // Anything after the closing paren (`.b`, `[0]`, `()`, `!`, `?.c`, an
    // operator) means the call is only part of a larger expression.
    if !text[close + 1..].trim().is_empty() {
        return None;
    }
    Some(ParsedElement::Call {
        name: name.to_string(),
        args: parse_arguments(&text[paren + 1..close]),
    })
}

fn parse_generic(text: &str, angle: usize) -> Option<ParsedElement> {
    let name = text[..angle].trim();
    if !is_callee(name) {
        return None;
    }
    let close = find_matching_close(text, angle)?;
    let type_args = parse_arguments(&text[angle + 1..close]);

    let rest = text[close + 1..].trim();
    let call_args = if rest.is_empty() {
        None
    } else if rest.starts_with('(') {
        let call_close = find_matching_close(rest, 0)?;
        if !rest[call_close + 1..].trim().is_empty() {
            return None;
        }
        Some(parse_arguments(&rest[1..call_close]))
    } else {
        return None;
    };

    Some(ParsedElement::Generic {
        name: name.to_string(),
        type_args,
        call_args,
    })
}

/// `foo`, `a.b.c`, or `new Foo`.
fn is_callee(name: &str) -> bool {
    let path = name
        .strip_prefix("new ")
        .map(str::trim_start)
        .unwrap_or(name);
    !path.is_empty() && path.split('.').all(is_identifier)
}
