use anyhow::Context;
use sheepify_core::{config::Config, io, paths, state::UserState};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let shepherd_name = match name {
        Some(n) => n.to_string(),
        None => std::env::var("USER").unwrap_or_else(|_| "Shepherd".to_string()),
    };
    paths::validate_name(&shepherd_name)?;

    println!("Setting up the farm in: {}", root.display());

    let dirs = [paths::SHEEPIFY_DIR, paths::AUDIO_DIR];
    for dir in dirs {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let config_path = paths::config_path(root);
    if !config_path.exists() {
        let cfg = Config::new(&shepherd_name);
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    let state_path = paths::state_path(root);
    if !state_path.exists() {
        let user = UserState::new(&shepherd_name);
        user.save(root).context("failed to write state.yaml")?;
        println!("  created: {}", paths::STATE_FILE);
        println!(
            "\nWelcome, {shepherd_name}. {} is waiting in your flock.",
            sheepify_core::sheep::STARTER_NAME
        );
    } else {
        println!("  exists:  {}", paths::STATE_FILE);
    }

    Ok(())
}
