use crate::error::{Result, SheepifyError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SHEEPIFY_DIR: &str = ".sheepify";

pub const CONFIG_FILE: &str = ".sheepify/config.yaml";
pub const STATE_FILE: &str = ".sheepify/state.yaml";
pub const AUDIO_DIR: &str = ".sheepify/audio";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn sheepify_dir(root: &Path) -> PathBuf {
    root.join(SHEEPIFY_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

pub fn audio_dir(root: &Path) -> PathBuf {
    root.join(AUDIO_DIR)
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    // Printable characters only; control characters would corrupt table output.
    NAME_RE.get_or_init(|| Regex::new(r"^[^\x00-\x1f\x7f]{1,50}$").unwrap())
}

/// Validate a shepherd or sheep display name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || !name_re().is_match(name) {
        return Err(SheepifyError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["Fluffy", "Sir Baa-baa III", "羊", "Dolly the 2nd"] {
            validate_name(name).unwrap_or_else(|_| panic!("expected valid: {name}"));
        }
    }

    #[test]
    fn invalid_names() {
        let too_long = "x".repeat(51);
        for name in ["", "   ", "tab\tname", "new\nline", too_long.as_str()] {
            assert!(validate_name(name).is_err(), "expected invalid: {name:?}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/farm");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/farm/.sheepify/config.yaml")
        );
        assert_eq!(
            state_path(root),
            PathBuf::from("/tmp/farm/.sheepify/state.yaml")
        );
    }
}
