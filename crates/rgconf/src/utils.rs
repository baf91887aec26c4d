use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::RgConfResult;

/// Looks `item` up in a `:`-separated search path, first match wins unless `reversed`. With
/// `executable`, entries without an execute bit are skipped.
pub fn which<P: AsRef<str>, I: AsRef<Path>>(
    path: P,
    item: I,
    reversed: bool,
    executable: bool,
) -> RgConfResult<Option<PathBuf>> {
    let paths: Box<dyn Iterator<Item = &str>> = match reversed {
        false => Box::new(path.as_ref().split(':')),
        true => Box::new(path.as_ref().rsplit(':')),
    };

    for dir in paths.filter(|p| !p.is_empty()) {
        let candidate = PathBuf::from(dir).join(item.as_ref());
        let Ok(metadata) = candidate.metadata() else {
            continue;
        };
        if executable && (metadata.permissions().mode() & 0o111) == 0 {
            continue;
        }
        return Ok(Some(candidate.canonicalize()?));
    }

    Ok(None)
}

/// Resolves a tool given on the command line: names containing a `/` are taken as they are,
/// bare names are searched for in `PATH`.
pub fn resolve_tool(name: &str) -> RgConfResult<PathBuf> {
    if name.contains('/') {
        return Ok(PathBuf::from(name));
    }
    let path = std::env::var("PATH").unwrap_or_default();
    Ok(which(path, name, false, true)?.unwrap_or_else(|| PathBuf::from(name)))
}
