use crate::codec::{TypeTag, ELEMENT_NAME, KEY_ATTR, TYPE_ATTR};
use crate::diagnostics::Diagnostics;
use crate::value::{Mapping, Sequence, Value};
use crate::xml::Element;

/// Rebuild the value stored in `node`.
///
/// Returns `None` when the node carries no data: no `type` attribute, an
/// unknown type, an unparseable scalar, or a `dict` with an unkeyed entry.
/// Inside lists and dicts such children are kept as [`Value::Null`].
pub fn decode(node: &Element, diagnostics: &mut Diagnostics) -> Option<Value> {
    let raw_tag = node.attribute(TYPE_ATTR)?;
    let Some(tag) = TypeTag::from_attr(raw_tag) else {
        diagnostics.warn(format!("invalid type {raw_tag} found on import, skipped"));
        return None;
    };

    match tag {
        TypeTag::List => {
            let mut items = Sequence::new();
            for element in node.child_elements().filter(|e| e.name == ELEMENT_NAME) {
                items.push(decode(element, diagnostics).unwrap_or_default());
            }
            Some(Value::Sequence(items))
        }
        TypeTag::Dict => decode_mapping(node, diagnostics).map(Value::Mapping),
        TypeTag::Bool | TypeTag::Int | TypeTag::Float | TypeTag::String => {
            decode_scalar(tag, node.text(), diagnostics)
        }
    }
}

/// A single entry without a `key` discards the whole mapping.
fn decode_mapping(node: &Element, diagnostics: &mut Diagnostics) -> Option<Mapping> {
    let mut mapping = Mapping::new();
    for element in node.child_elements().filter(|e| e.name == ELEMENT_NAME) {
        let Some(key) = element.attribute(KEY_ATTR) else {
            diagnostics.warn("no key found for dict on import, skipped");
            return None;
        };
        let value = decode(element, diagnostics).unwrap_or_default();
        mapping.insert(key, value);
    }
    Some(mapping)
}

fn decode_scalar(tag: TypeTag, text: String, diagnostics: &mut Diagnostics) -> Option<Value> {
    if tag == TypeTag::String {
        return Some(Value::Text(text));
    }

    let literal = text.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
    let value = match tag {
        TypeTag::Bool => parse_bool(literal).map(Value::Bool),
        TypeTag::Int => literal.parse::<i64>().ok().map(Value::Int),
        TypeTag::Float => literal.parse::<f64>().ok().map(Value::Float),
        TypeTag::String | TypeTag::List | TypeTag::Dict => None,
    };
    if value.is_none() {
        diagnostics.warn(format!(
            "invalid {tag} literal '{literal}' found on import, skipped"
        ));
    }
    value
}

fn parse_bool(literal: &str) -> Option<bool> {
    if literal.eq_ignore_ascii_case("true") || literal == "1" {
        Some(true)
    } else if literal.eq_ignore_ascii_case("false") || literal == "0" {
        Some(false)
    } else {
        None
    }
}
