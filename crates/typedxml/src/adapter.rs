//! XML body handler for a settings store

use crate::codec::{decode_document, encode_document};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::host::BodyHandler;
use crate::settings::SettingsStore;
use crate::value::Value;
use crate::xml::{self, write_document, Document, Parser, WriterConfig};

pub const DEFAULT_NAME: &str = "ldapsettings";
pub const DEFAULT_SUFFIX: &str = ".xml";
pub const DEFAULT_MIME_TYPE: &str = "text/xml";

/// File naming and document layout for [`XmlSettingsAdapter`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterConfig {
    pub name: String,
    pub suffix: String,
    pub mime_type: String,
    pub writer: WriterConfig,
    pub parser: xml::Config,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            writer: WriterConfig::default(),
            parser: xml::Config::default(),
        }
    }
}

impl AdapterConfig {
    /// Default config with a different file name stem
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_writer(mut self, writer: WriterConfig) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_parser(mut self, parser: xml::Config) -> Self {
        self.parser = parser;
        self
    }
}

/// Exports a settings store as a typed XML document and merges documents
/// back into it.
#[derive(Debug, Clone, Default)]
pub struct XmlSettingsAdapter<S> {
    settings: S,
    config: AdapterConfig,
}

impl<S: SettingsStore> XmlSettingsAdapter<S> {
    pub fn new(settings: S) -> Self {
        Self::with_config(settings, AdapterConfig::default())
    }

    pub fn with_config(settings: S, config: AdapterConfig) -> Self {
        Self { settings, config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub fn into_settings(self) -> S {
        self.settings
    }

    /// Encode the whole store under an `<object>` root
    pub fn export_document(&self, diagnostics: &mut Diagnostics) -> Document {
        encode_document(&Value::Mapping(self.settings.snapshot()), diagnostics)
    }

    /// Merge the top-level keys of `doc` into the store.
    ///
    /// A document whose root is not a mapping imports nothing.
    pub fn import_document(&mut self, doc: &Document, diagnostics: &mut Diagnostics) -> Vec<String> {
        match decode_document(doc, diagnostics) {
            Some(Value::Mapping(mapping)) => self.settings.merge(mapping, diagnostics),
            Some(other) => {
                diagnostics.warn(format!(
                    "settings document holds a {} instead of a mapping, nothing imported",
                    other.kind_name()
                ));
                Vec::new()
            }
            None => {
                diagnostics.warn("settings document carries no data, nothing imported");
                Vec::new()
            }
        }
    }
}

impl<S: SettingsStore> BodyHandler for XmlSettingsAdapter<S> {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn suffix(&self) -> &str {
        &self.config.suffix
    }

    fn mime_type(&self) -> &str {
        &self.config.mime_type
    }

    /// `None` when the document would break the limits `set_body` enforces,
    /// so nothing is written that this adapter cannot read back.
    fn body(&self, diagnostics: &mut Diagnostics) -> Option<Vec<u8>> {
        let doc = self.export_document(diagnostics);
        let limits = self.config.parser;

        let depth = doc.root.depth();
        if limits.max_depth > 0 && depth > usize::from(limits.max_depth) {
            diagnostics.warn(format!(
                "settings nest {depth} levels deep, import accepts at most {}",
                limits.max_depth
            ));
            return None;
        }

        let body = write_document(&doc, self.config.writer).into_bytes();
        if limits.max_size > 0 && body.len() > limits.max_size {
            diagnostics.warn(format!(
                "settings document is {} bytes, import accepts at most {}",
                body.len(),
                limits.max_size
            ));
            return None;
        }
        Some(body)
    }

    fn set_body(&mut self, body: &[u8], diagnostics: &mut Diagnostics) -> Result<Vec<String>> {
        let doc = Parser::with_config(body, self.config.parser).parse()?;
        Ok(self.import_document(&doc, diagnostics))
    }
}
