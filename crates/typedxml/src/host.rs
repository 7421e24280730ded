//! Import/export entry points and the host collaborators they call
//!
//! A host wires three things together: a [`HandlerLocator`] that finds the
//! settings holder, the [`BodyHandler`] that turns that holder into document
//! bytes and back, and a [`DataBundle`] that stores the files of a snapshot.

use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Named file store of a configuration snapshot
pub trait DataBundle {
    /// Read a file; `Ok(None)` if the bundle has no such file
    fn read_data_file(&self, filename: &str) -> Result<Option<Vec<u8>>>;

    fn write_data_file(&mut self, filename: &str, body: &[u8], mime_type: &str) -> Result<()>;
}

/// Serializes a settings holder to a document body and back
pub trait BodyHandler {
    fn name(&self) -> &str;

    fn suffix(&self) -> &str;

    fn mime_type(&self) -> &str;

    /// Bundle file name: name followed by suffix
    fn filename(&self) -> String {
        format!("{}{}", self.name(), self.suffix())
    }

    /// Export the holder; `None` if no body could be produced
    fn body(&self, diagnostics: &mut Diagnostics) -> Option<Vec<u8>>;

    /// Import `body` into the holder, returning the keys that were written
    fn set_body(&mut self, body: &[u8], diagnostics: &mut Diagnostics) -> Result<Vec<String>>;
}

/// Finds the handler for the settings holder, if the site has one
pub trait HandlerLocator {
    type Handler: BodyHandler;

    fn locate(&mut self) -> Option<&mut Self::Handler>;
}

impl<H: BodyHandler> HandlerLocator for Option<H> {
    type Handler = H;

    fn locate(&mut self) -> Option<&mut H> {
        self.as_mut()
    }
}

/// Holders registered by name, one of which is looked up by a well-known name
#[derive(Debug, Clone)]
pub struct NamedLocator<H> {
    target: String,
    holders: IndexMap<String, H>,
}

impl<H> NamedLocator<H> {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            holders: IndexMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, handler: H) -> Option<H> {
        self.holders.insert(name.into(), handler)
    }

    pub fn with(mut self, name: impl Into<String>, handler: H) -> Self {
        self.register(name, handler);
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.holders.get(name)
    }

    pub fn into_inner(self) -> IndexMap<String, H> {
        self.holders
    }
}

impl<H: BodyHandler> HandlerLocator for NamedLocator<H> {
    type Handler = H;

    fn locate(&mut self) -> Option<&mut H> {
        self.holders.get_mut(&self.target)
    }
}

/// Why an import or export did nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingHandler,
    MissingFile,
    MissingBody,
}

/// Result of a completed import or export step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Imported { filename: String, keys: Vec<String> },
    Exported { filename: String, bytes: usize },
    Skipped(SkipReason),
}

/// Import the handler's file from `bundle` into the settings holder.
///
/// Missing handler and missing file are no-ops. Keys not present in the
/// document keep their current values.
#[instrument(skip_all)]
pub fn import_settings<L, B>(
    locator: &mut L,
    bundle: &B,
    diagnostics: &mut Diagnostics,
) -> Result<Outcome>
where
    L: HandlerLocator + ?Sized,
    B: DataBundle + ?Sized,
{
    let Some(handler) = locator.locate() else {
        diagnostics.warn("can't handle settings, no settings handler found");
        return Ok(Outcome::Skipped(SkipReason::MissingHandler));
    };

    let filename = handler.filename();
    let Some(body) = bundle.read_data_file(&filename)? else {
        diagnostics.info(format!("no settings file found: {filename}"));
        return Ok(Outcome::Skipped(SkipReason::MissingFile));
    };

    debug!(%filename, bytes = body.len(), "importing settings");
    let keys = handler.set_body(&body, diagnostics)?;
    Ok(Outcome::Imported { filename, keys })
}

/// Export the settings holder into `bundle` under the handler's file name.
#[instrument(skip_all)]
pub fn export_settings<L, B>(
    locator: &mut L,
    bundle: &mut B,
    diagnostics: &mut Diagnostics,
) -> Result<Outcome>
where
    L: HandlerLocator + ?Sized,
    B: DataBundle + ?Sized,
{
    let Some(handler) = locator.locate() else {
        diagnostics.warn("can't handle settings, no settings handler found");
        return Ok(Outcome::Skipped(SkipReason::MissingHandler));
    };

    let filename = handler.filename();
    let Some(body) = handler.body(diagnostics) else {
        diagnostics.warn(format!("problem getting settings for {filename}"));
        return Ok(Outcome::Skipped(SkipReason::MissingBody));
    };

    debug!(%filename, bytes = body.len(), "exporting settings");
    bundle.write_data_file(&filename, &body, handler.mime_type())?;
    Ok(Outcome::Exported {
        filename,
        bytes: body.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::MemoryBundle;

    /// Handler that never produces a body and records what it was given
    #[derive(Default)]
    struct Silent {
        received: Vec<Vec<u8>>,
    }

    impl BodyHandler for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn suffix(&self) -> &str {
            ".xml"
        }

        fn mime_type(&self) -> &str {
            "text/xml"
        }

        fn body(&self, _diagnostics: &mut Diagnostics) -> Option<Vec<u8>> {
            None
        }

        fn set_body(&mut self, body: &[u8], _diagnostics: &mut Diagnostics) -> Result<Vec<String>> {
            self.received.push(body.to_vec());
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_missing_handler() -> Result<()> {
        let mut locator: Option<Silent> = None;
        let mut bundle = MemoryBundle::new();
        let mut diagnostics = Diagnostics::new();

        let outcome = export_settings(&mut locator, &mut bundle, &mut diagnostics)?;
        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingHandler));
        let outcome = import_settings(&mut locator, &bundle, &mut diagnostics)?;
        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingHandler));
        assert_eq!(diagnostics.warnings().count(), 2);
        assert!(bundle.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_info() -> Result<()> {
        let mut locator = Some(Silent::default());
        let bundle = MemoryBundle::new();
        let mut diagnostics = Diagnostics::new();

        let outcome = import_settings(&mut locator, &bundle, &mut diagnostics)?;
        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingFile));
        assert!(!diagnostics.has_warnings());
        assert_eq!(diagnostics.len(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_body_writes_nothing() -> Result<()> {
        let mut locator = Some(Silent::default());
        let mut bundle = MemoryBundle::new();
        let mut diagnostics = Diagnostics::new();

        let outcome = export_settings(&mut locator, &mut bundle, &mut diagnostics)?;
        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingBody));
        assert!(bundle.is_empty());
        assert!(diagnostics.has_warnings());
        Ok(())
    }

    #[test]
    fn test_import_hands_file_to_handler() -> Result<()> {
        let mut locator = NamedLocator::new("pasldap").with("pasldap", Silent::default());
        let mut bundle = MemoryBundle::new();
        bundle.write_data_file("silent.xml", b"<object/>", "text/xml")?;
        let mut diagnostics = Diagnostics::new();

        let outcome = import_settings(&mut locator, &bundle, &mut diagnostics)?;
        assert_eq!(
            outcome,
            Outcome::Imported {
                filename: "silent.xml".to_string(),
                keys: Vec::new(),
            }
        );
        let received = locator.get("pasldap").map(|h| h.received.clone());
        assert_eq!(received, Some(vec![b"<object/>".to_vec()]));
        Ok(())
    }

    #[test]
    fn test_named_locator_misses_other_names() {
        let mut locator = NamedLocator::new("pasldap").with("other", Silent::default());
        assert!(locator.locate().is_none());
        assert_eq!(locator.target(), "pasldap");
    }
}
