// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` (platform config dir or an explicit file).

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::config::{ConfigError, ConfigStore};

enum Layout {
    /// `<dir>/<key>.json`
    Dir(PathBuf),
    /// Every key resolves to the same file.
    File(PathBuf),
}

/// Stores configs as JSON files.
pub struct FsConfigStore {
    layout: Layout,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/hyperdpo`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "hyperdpo")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Ok(Self::in_dir(proj.config_dir()))
    }

    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            layout: Layout::Dir(dir.as_ref().to_path_buf()),
        }
    }

    /// Create a store that reads and writes a single file, whatever the key.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            layout: Layout::File(path.as_ref().to_path_buf()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        match &self.layout {
            Layout::Dir(base) => base.join(format!("{key}.json")),
            Layout::File(path) => path.clone(),
        }
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }
}
