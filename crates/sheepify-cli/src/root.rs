use sheepify_core::paths::SHEEPIFY_DIR;
use std::path::{Path, PathBuf};

/// Locate the farm root.
///
/// An explicit path (`--root` flag or `SHEEPIFY_ROOT` env var) always wins.
/// Otherwise the ancestors of the working directory are searched for a
/// `.sheepify/` pen, so every subdirectory of a farm talks to the same
/// flock; failing that, the nearest enclosing git checkout is used so that
/// `sheepify init` lands at the project top. With neither marker the
/// working directory itself becomes the farm.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_farm(&cwd).unwrap_or(cwd)
}

/// One pass up the ancestor chain. A `.sheepify/` directory at any level
/// beats a `.git/` directory at any level, even a closer one.
fn find_farm(start: &Path) -> Option<PathBuf> {
    let mut checkout = None;
    for dir in start.ancestors() {
        if dir.join(SHEEPIFY_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        if checkout.is_none() && dir.join(".git").is_dir() {
            checkout = Some(dir.to_path_buf());
        }
    }
    checkout
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn farm_marker_found_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".sheepify")).unwrap();
        let deep = dir.path().join("barn/stall");
        fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_farm(&deep), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn farm_marker_beats_closer_git_checkout() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".sheepify")).unwrap();
        let nested = dir.path().join("vendored");
        fs::create_dir_all(nested.join(".git")).unwrap();

        assert_eq!(find_farm(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn git_checkout_used_when_no_farm_exists() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        let deep = dir.path().join("src");
        fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_farm(&deep), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn unmarked_tree_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_farm(dir.path()), None);
    }
}
