//! Resolution of sound resource names to files on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Audio file extensions tried, in order, for each resource name.
pub const SOUND_EXTENSIONS: &[&str] = &["mp3", "ogg", "flac", "wav", "m4a"];

/// Looks up sound resources inside one directory.
#[derive(Debug, Clone)]
pub struct SoundLibrary {
    /// Directory holding the sound files.
    root: PathBuf,
}

impl SoundLibrary {
    /// Creates a library rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Gets the directory sounds are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a resource name to an existing file.
    ///
    /// # Returns
    ///
    /// The first `<root>/<resource_name>.<ext>` that exists, or `None` if the
    /// resource is missing or the name tries to leave the directory.
    pub fn resolve(&self, resource_name: &str) -> Option<PathBuf> {
        if resource_name.is_empty()
            || resource_name.contains(['/', '\\'])
            || resource_name.starts_with('.')
        {
            return None;
        }

        let found = SOUND_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{resource_name}.{ext}")))
            .find(|candidate| candidate.is_file());

        debug!("Resource path for {resource_name}: {:?}", found);
        found
    }
}
