use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// A file that must not outlive the operation that wrote it. The file is
/// removed when the guard drops, on success and on every error path alike.
/// Removal failures are logged and otherwise ignored.
#[derive(Debug)]
pub(crate) struct ScopedArtifact {
    path: PathBuf,
}

impl ScopedArtifact {
    /// Take responsibility for `path` before anything is written there, so a
    /// partially written file is removed as well.
    pub(crate) fn claim(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed temporary artifact"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "temporary artifact was never written")
            }
            Err(err) => warn!(
                path = %self.path.display(),
                error = %err,
                "could not remove temporary artifact"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scratch.png");
        fs::write(&path, b"x").unwrap();

        {
            let artifact = ScopedArtifact::claim(path.clone());
            assert!(artifact.path().exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn claimed_path_is_removed_when_written_after_claiming() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.png");

        let result: Result<(), io::Error> = (|| {
            let artifact = ScopedArtifact::claim(path.clone());
            fs::write(artifact.path(), b"half a png")?;
            Err(io::Error::new(io::ErrorKind::Other, "encoder gave up"))
        })();

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        drop(ScopedArtifact::claim(dir.path().join("never-written.png")));
    }
}
