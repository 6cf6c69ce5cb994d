//! Reconstruction of source text from parsed arguments.

use srcweave_scanner::is_identifier;

use crate::element::{ArrowTypes, ObjectEntries, ParsedElement};

/// Serialize an argument list, joining elements with `", "`.
pub fn serialize(elements: &[ParsedElement]) -> String {
    elements
        .iter()
        .map(serialize_element)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serialize one element back to source text.
pub fn serialize_element(element: &ParsedElement) -> String {
    match element {
        ParsedElement::Leaf(text) => text.clone(),
        ParsedElement::ArrayLiteral(items) => format!("[{}]", serialize(items)),
        ParsedElement::Call { name, args } => format!("{}({})", name, serialize(args)),
        ParsedElement::Generic {
            name,
            type_args,
            call_args,
        } => {
            let mut out = format!("{}<{}>", name, serialize(type_args));
            if let Some(args) = call_args {
                out.push('(');
                out.push_str(&serialize(args));
                out.push(')');
            }
            out
        }
        ParsedElement::ArrowFn {
            params,
            types,
            body,
        } => {
            let head = match types {
                Some(types) => serialize_typed_params(params, types),
                None => serialize_params(params),
            };
            format!("{} => {}", head, serialize_element(body))
        }
        ParsedElement::ObjectLiteral(entries) => serialize_object(entries),
        ParsedElement::TypeAssertion { target_type, expr } => {
            format!("{} as {}", serialize_element(expr), target_type)
        }
    }
}

fn serialize_params(params: &[ParsedElement]) -> String {
    match params {
        [ParsedElement::Leaf(name)] if is_identifier(name) => name.clone(),
        _ => format!("({})", serialize(params)),
    }
}

fn serialize_typed_params(params: &[ParsedElement], types: &ArrowTypes) -> String {
    let rendered: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, param)| match types.params.get(i) {
            Some(Some(ty)) => format!("{}: {}", serialize_element(param), ty),
            _ => serialize_element(param),
        })
        .collect();
    format!("({}): {}", rendered.join(", "), types.return_type)
}

fn serialize_object(entries: &ObjectEntries) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    let properties: Vec<String> = entries
        .iter()
        .map(|(key, value)| match value {
            ParsedElement::Leaf(text) if text == key => key.clone(),
            _ => format!("{}: {}", key, serialize_element(value)),
        })
        .collect();
    format!("{{ {} }}", properties.join(", "))
}
