use mascot_agent::MascotClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub mascot: Arc<MascotClient>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            mascot: Arc::new(MascotClient::from_env()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_stores_root() {
        let state = AppState::new(PathBuf::from("/tmp/farm"));
        assert_eq!(state.root, PathBuf::from("/tmp/farm"));
    }
}
