use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{
    catalog::StyleCatalog,
    error::{Error, Result},
    settings::{SettingsStyle, StylesheetBacking},
};

const FILE_PREFIX: &str = "egui-text-scaling";
const FILE_SUFFIX: &str = ".css";

/// Handle a scene uses to reference the generated rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    File(PathBuf),
    Inline(Arc<str>),
}

/// Generated size rules, created once per binder.
///
/// With file backing the temporary file lives exactly as long as this value.
#[derive(Debug)]
pub struct Stylesheet {
    text: Arc<str>,
    source: StyleSource,
    _file: Option<NamedTempFile>,
}

impl Stylesheet {
    /// # Errors
    ///
    /// Returns an error if the temporary file backing cannot be created or written.
    pub fn create(catalog: &StyleCatalog, settings: &SettingsStyle) -> Result<Self> {
        match settings.backing {
            StylesheetBacking::InMemory => Ok(Self::in_memory(catalog)),
            StylesheetBacking::TempFile => {
                Self::temp_file(catalog, settings.stylesheet_dir.as_deref())
            }
        }
    }

    pub fn in_memory(catalog: &StyleCatalog) -> Self {
        let text: Arc<str> = catalog.stylesheet().into();
        Self {
            source: StyleSource::Inline(Arc::clone(&text)),
            text,
            _file: None,
        }
    }

    /// Writes the rules to a new temporary `.css` file inside `dir`, or the
    /// system temp dir when `dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreateStylesheet`] if the file cannot be created and
    /// [`Error::WriteStylesheet`] if writing it fails.
    pub fn temp_file(catalog: &StyleCatalog, dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(FILE_PREFIX).suffix(FILE_SUFFIX);
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(Error::CreateStylesheet)?;

        let text: Arc<str> = catalog.stylesheet().into();
        let path = file.path().to_path_buf();
        file.write_all(text.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| Error::WriteStylesheet {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), "stylesheet written");

        Ok(Self {
            text,
            source: StyleSource::File(path),
            _file: Some(file),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &StyleSource {
        &self.source
    }
}
