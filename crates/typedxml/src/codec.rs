//! Typed tree codec
//!
//! Maps a [`Value`] onto a tree of XML elements in which every node names
//! its own type, and back again:
//!
//! ```xml
//! <object type="dict">
//!  <element key="a" type="list">
//!   <element type="bool">True</element>
//!   <element type="string">x</element>
//!  </element>
//!  <element key="b" type="int">1</element>
//! </object>
//! ```
//!
//! Neither direction fails. Values that cannot be written and nodes that
//! cannot be read are skipped with a warning recorded in [`Diagnostics`].

mod decoder;
mod encoder;

pub use decoder::decode;
pub use encoder::encode;

use std::fmt;

use crate::diagnostics::Diagnostics;
use crate::value::Value;
use crate::xml::{Document, Element};

/// Name of the document root element
pub const ROOT_NAME: &str = "object";
/// Name of every nested element
pub const ELEMENT_NAME: &str = "element";
/// Attribute carrying the node type
pub const TYPE_ATTR: &str = "type";
/// Attribute carrying the mapping key of a `dict` child
pub const KEY_ATTR: &str = "key";

/// The `type` attribute values understood by the codec
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    List,
    Dict,
    Bool,
    Int,
    Float,
    String,
}

impl TypeTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Dict => "dict",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        }
    }

    /// Look up a tag by its attribute value; matching is exact
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "list" => Some(Self::List),
            "dict" => Some(Self::Dict),
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "string" => Some(Self::String),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode `value` into a new document rooted at `<object>`
pub fn encode_document(value: &Value, diagnostics: &mut Diagnostics) -> Document {
    let mut root = Element::new(ROOT_NAME);
    encode(value, &mut root, diagnostics);
    Document::new(root)
}

/// Decode the root of `doc`
///
/// A root with another name than `object` is still decoded, with a warning.
pub fn decode_document(doc: &Document, diagnostics: &mut Diagnostics) -> Option<Value> {
    if doc.root.name != ROOT_NAME {
        diagnostics.warn(format!(
            "unexpected root element <{}>, expected <{ROOT_NAME}>",
            doc.root.name
        ));
    }
    decode(&doc.root, diagnostics)
}
