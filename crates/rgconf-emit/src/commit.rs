use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{EmitError, EmitResult};

/// A set of files that are either all replaced or none are.
///
/// Contents are staged next to their destination and only renamed into place once every file has
/// been written out in full, so a failed run never leaves a stale output looking fresh.
#[derive(Debug, Default)]
pub struct Commit {
    files: Vec<(PathBuf, String)>,
}

impl Commit {
    pub fn new() -> Self {
        Commit::default()
    }

    pub fn add<P: Into<PathBuf>>(&mut self, path: P, contents: String) -> &mut Self {
        self.files.push((path.into(), contents));
        self
    }

    pub fn finish(self) -> EmitResult<()> {
        let mut staged = Vec::with_capacity(self.files.len());
        for (path, contents) in &self.files {
            let mut tmp = stage_in(path)?;
            tmp.write_all(contents.as_bytes())
                .and_then(|_| tmp.flush())
                .map_err(|source| EmitError::Write {
                    path: path.clone(),
                    source,
                })?;
            staged.push((tmp, path));
        }

        for (tmp, path) in staged {
            tmp.persist(path)
                .map_err(|e| EmitError::Write {
                    path: path.clone(),
                    source: e.error,
                })
                .with_context(|| format!("failed to replace {}", path.display()))?;
            debug!("wrote {}", path.display());
        }
        Ok(())
    }
}

fn stage_in(path: &Path) -> EmitResult<NamedTempFile> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir)
        .map_err(|source| EmitError::Write {
            path: path.to_path_buf(),
            source,
        })
        .with_context(|| format!("failed to stage {}", path.display()))
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::Commit;

    #[test]
    fn writes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.h");
        let b = dir.path().join("b.mk");
        fs::write(&a, "stale").unwrap();

        let mut commit = Commit::new();
        commit.add(&a, "fresh\n".to_string()).add(&b, "B=1\n".to_string());
        commit.finish().unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "fresh\n");
        assert_eq!(fs::read_to_string(&b).unwrap(), "B=1\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn nothing_replaced_when_staging_fails() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.h");
        fs::write(&a, "stale").unwrap();

        let mut commit = Commit::new();
        commit
            .add(&a, "fresh\n".to_string())
            .add(dir.path().join("missing/b.mk"), String::new());
        assert!(commit.finish().is_err());

        assert_eq!(fs::read_to_string(&a).unwrap(), "stale");
    }
}
