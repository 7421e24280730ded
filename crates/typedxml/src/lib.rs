//! typedxml - self-describing XML export/import of nested settings
//!
//! Settings values (mappings, sequences, booleans, integers, floats and
//! text) are written as a tree of `<element>` nodes, each tagged with its
//! type, so a document can be read back without a schema.
//!
//! # Quick Start
//!
//! ```
//! use typedxml::{Diagnostics, Mapping, Value};
//! # fn main() -> Result<(), typedxml::Error> {
//! let settings: Mapping = [("b", Value::from(1)), ("a", Value::from("x"))]
//!     .into_iter()
//!     .collect();
//!
//! let mut diagnostics = Diagnostics::new();
//! let xml = typedxml::to_string(&Value::Mapping(settings.clone()), &mut diagnostics);
//! assert!(xml.contains("<element key=\"a\" type=\"string\">x</element>"));
//!
//! let decoded = typedxml::from_str(&xml, &mut diagnostics)?;
//! assert_eq!(decoded, Some(Value::Mapping(settings)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod diagnostics;
pub use diagnostics::{Diagnostic, Diagnostics, Level};

pub mod value;
pub use value::{Mapping, Sequence, Value};

pub mod xml;
pub use xml::{
    Config as XmlConfig, Content as XmlContent, Document as XmlDocument, Element as XmlElement,
    Parser as XmlParser, WriterConfig,
};

pub mod codec;
pub use codec::{decode, decode_document, encode, encode_document, TypeTag};

pub mod settings;
pub use settings::SettingsStore;

pub mod host;
pub use host::{
    export_settings, import_settings, BodyHandler, DataBundle, HandlerLocator, NamedLocator,
    Outcome, SkipReason,
};

pub mod adapter;
pub use adapter::{AdapterConfig, XmlSettingsAdapter};

pub mod bundle;
pub use bundle::{DirectoryBundle, MemoryBundle};

/// Parse an XML document from a string
pub fn parse_xml_str(s: &str) -> Result<XmlDocument> {
    XmlParser::new(s.as_bytes()).parse()
}

/// Parse an XML document from bytes
pub fn parse_xml_bytes(bytes: &[u8]) -> Result<XmlDocument> {
    XmlParser::new(bytes).parse()
}

/// Encode a value into an indented settings document with XML declaration
pub fn to_string(value: &Value, diagnostics: &mut Diagnostics) -> String {
    to_string_with_config(value, WriterConfig::default(), diagnostics)
}

/// Encode a value into a settings document with a custom layout
pub fn to_string_with_config(
    value: &Value,
    config: WriterConfig,
    diagnostics: &mut Diagnostics,
) -> String {
    let doc = encode_document(value, diagnostics);
    xml::write_document(&doc, config)
}

/// Decode a settings document from a string
///
/// `Ok(None)` means the document is well-formed but its root carries no
/// decodable data.
pub fn from_str(s: &str, diagnostics: &mut Diagnostics) -> Result<Option<Value>> {
    from_bytes(s.as_bytes(), diagnostics)
}

/// Decode a settings document from bytes
pub fn from_bytes(bytes: &[u8], diagnostics: &mut Diagnostics) -> Result<Option<Value>> {
    let doc = parse_xml_bytes(bytes)?;
    Ok(decode_document(&doc, diagnostics))
}

/// Decode a settings document with custom parser limits
pub fn from_bytes_with_config(
    bytes: &[u8],
    config: XmlConfig,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Value>> {
    let doc = XmlParser::with_config(bytes, config).parse()?;
    Ok(decode_document(&doc, diagnostics))
}
