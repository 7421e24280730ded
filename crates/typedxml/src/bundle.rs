//! [`DataBundle`] implementations

use std::io;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::host::DataBundle;

/// Bundle backed by a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    root: PathBuf,
}

impl DirectoryBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

impl DataBundle for DirectoryBundle {
    fn read_data_file(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_of(filename);
        match std::fs::read(&path) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::io(path.display().to_string(), &err)),
        }
    }

    fn write_data_file(&mut self, filename: &str, body: &[u8], mime_type: &str) -> Result<()> {
        let path = self.path_of(filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| Error::io(parent.display().to_string(), &err))?;
        }
        debug!(path = %path.display(), %mime_type, "writing data file");
        std::fs::write(&path, body).map_err(|err| Error::io(path.display().to_string(), &err))
    }
}

/// In-memory bundle that remembers the MIME type of every file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBundle {
    files: IndexMap<String, (Vec<u8>, String)>,
}

impl MemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files.get(filename).map(|(body, _)| body.as_slice())
    }

    pub fn mime_type(&self, filename: &str) -> Option<&str> {
        self.files.get(filename).map(|(_, mime)| mime.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl DataBundle for MemoryBundle {
    fn read_data_file(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.get(filename).map(<[u8]>::to_vec))
    }

    fn write_data_file(&mut self, filename: &str, body: &[u8], mime_type: &str) -> Result<()> {
        self.files
            .insert(filename.to_string(), (body.to_vec(), mime_type.to_string()));
        Ok(())
    }
}
