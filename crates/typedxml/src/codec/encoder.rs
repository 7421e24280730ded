use crate::codec::{TypeTag, ELEMENT_NAME, KEY_ATTR, TYPE_ATTR};
use crate::diagnostics::Diagnostics;
use crate::value::Value;
use crate::xml::{is_xml_char, Element};

/// Write `value` into `node`, setting its `type` attribute and children.
///
/// Mapping entries are written in lexicographic key order so the same value
/// always produces the same tree. A `Null`, or text holding characters XML
/// cannot carry, leaves `node` untouched apart from a recorded warning;
/// mapping entries whose key holds such characters are left out.
pub fn encode(value: &Value, node: &mut Element, diagnostics: &mut Diagnostics) {
    match value {
        Value::Sequence(items) => {
            node.set_attribute(TYPE_ATTR, TypeTag::List.as_str());
            for item in items {
                let mut element = Element::new(ELEMENT_NAME);
                encode(item, &mut element, diagnostics);
                node.push_element(element);
            }
        }
        Value::Mapping(mapping) => {
            node.set_attribute(TYPE_ATTR, TypeTag::Dict.as_str());
            for (key, item) in mapping.sorted_entries() {
                if !key.chars().all(is_xml_char) {
                    diagnostics.warn(format!(
                        "key {key:?} holds characters XML cannot carry, skipped on export"
                    ));
                    continue;
                }
                let mut element = Element::new(ELEMENT_NAME);
                element.set_attribute(KEY_ATTR, key);
                encode(item, &mut element, diagnostics);
                node.push_element(element);
            }
        }
        Value::Bool(b) => set_scalar(node, TypeTag::Bool, format_bool(*b)),
        Value::Int(n) => set_scalar(node, TypeTag::Int, n.to_string()),
        Value::Float(n) => set_scalar(node, TypeTag::Float, format_float(*n)),
        Value::Text(text) if !text.chars().all(is_xml_char) => {
            diagnostics.warn(format!(
                "text for {} holds characters XML cannot carry, skipped on export",
                location(node)
            ));
        }
        Value::Text(text) => set_scalar(node, TypeTag::String, text.clone()),
        Value::Null => {
            diagnostics.warn(format!(
                "invalid type {} found for {} on export, skipped",
                value.kind_name(),
                location(node)
            ));
        }
    }
}

fn location(node: &Element) -> String {
    node.attribute(KEY_ATTR)
        .map_or_else(|| "unkeyed value".to_string(), |key| format!("key '{key}'"))
}

fn set_scalar(node: &mut Element, tag: TypeTag, text: String) {
    node.set_attribute(TYPE_ATTR, tag.as_str());
    node.push_text(text);
}

pub(crate) fn format_bool(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// Shortest decimal that parses back to `value`.
///
/// Decimal exponents below -4 or from 16 up switch to scientific notation
/// with a signed, two-digit minimum exponent (`1e+16`, `1.5e-05`); other
/// integral values keep a `.0` so the text still reads as a float.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
            }
        }
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
