//! XML document model, parser and writer

pub mod cursor;
pub mod model;
pub mod parser;
pub mod writer;

pub use model::{is_xml_char, Content, Document, Element};
pub use parser::{Config, Parser};
pub use writer::{write_document, WriterConfig};
