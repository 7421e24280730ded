//! Key-indexed access to a live settings object

use crate::diagnostics::Diagnostics;
use crate::value::{Mapping, Value};

/// The capabilities the import/export glue needs from a settings object.
///
/// Only keyed reads and writes are required; how the store orders or
/// persists its entries is its own business.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value);

    fn keys(&self) -> Vec<String>;

    /// Collect every entry into a mapping for export
    fn snapshot(&self) -> Mapping {
        self.keys()
            .into_iter()
            .filter_map(|key| self.get(&key).map(|value| (key, value)))
            .collect()
    }

    /// Overwrite each key of `mapping` in the store, leaving other keys alone.
    ///
    /// Entries that decoded to nothing (`Null`) are skipped. Returns the keys
    /// that were written, in document order.
    fn merge(&mut self, mapping: Mapping, diagnostics: &mut Diagnostics) -> Vec<String> {
        let mut written = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            if value.is_null() {
                diagnostics.info(format!("no data for key '{key}', left unchanged"));
                continue;
            }
            self.set(&key, value);
            written.push(key);
        }
        written
    }
}

impl SettingsStore for Mapping {
    fn get(&self, key: &str) -> Option<Value> {
        Self::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key, value);
    }

    fn keys(&self) -> Vec<String> {
        Self::keys(self).cloned().collect()
    }

    fn snapshot(&self) -> Mapping {
        self.clone()
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        (**self).set(key, value);
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }

    fn snapshot(&self) -> Mapping {
        (**self).snapshot()
    }
}
