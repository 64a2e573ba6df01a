use crate::output::{print_json, Table};
use anyhow::bail;
use clap::Subcommand;
use sheepify_core::state::UserState;
use std::path::Path;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum SheepSubcommand {
    /// List the flock
    List,
    /// Rename a sheep
    Rename { name: String, new_name: String },
    /// Put an outfit on a sheep
    Dress { name: String, outfit: String },
    /// Take a sheep's outfit off
    Undress { name: String },
    /// Mark a sheep as the favorite (only one at a time)
    Favorite { name: String },
    /// Remove every sheep, including the starter
    Clear {
        /// Skip the confirmation check
        #[arg(long)]
        force: bool,
    },
}

pub fn run(root: &Path, subcmd: SheepSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SheepSubcommand::List => list(root, json),
        SheepSubcommand::Rename { name, new_name } => rename(root, &name, &new_name, json),
        SheepSubcommand::Dress { name, outfit } => dress(root, &name, Some(outfit), json),
        SheepSubcommand::Undress { name } => dress(root, &name, None, json),
        SheepSubcommand::Favorite { name } => favorite(root, &name, json),
        SheepSubcommand::Clear { force } => clear(root, force, json),
    }
}

fn find_by_name(user: &UserState, name: &str) -> anyhow::Result<Uuid> {
    match user.flock.iter().find(|s| s.name == name) {
        Some(sheep) => Ok(sheep.id),
        None => bail!("no sheep named '{name}' in the flock"),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let user = UserState::load(root)?;

    if json {
        return print_json(&serde_json::json!({
            "total": user.flock.len(),
            "living": user.living_count(),
            "sheep": user.flock,
        }));
    }

    if user.flock.is_empty() {
        println!("The flock is empty.");
        return Ok(());
    }

    let mut table = Table::new(&["name", "status", "outfit", "fav", "earned"]);
    for s in &user.flock {
        table.row([
            s.name.clone(),
            if s.alive { "alive" } else { "lost" }.to_string(),
            s.outfit.clone().unwrap_or_else(|| "-".to_string()),
            if s.favorite { "*" } else { "" }.to_string(),
            s.earned.date_naive().to_string(),
        ]);
    }
    table.print();
    println!(
        "\n{} sheep ({} living), {} wool/day",
        user.flock.len(),
        user.living_count(),
        user.generation_rate()
    );
    Ok(())
}

fn rename(root: &Path, name: &str, new_name: &str, json: bool) -> anyhow::Result<()> {
    let mut user = UserState::load(root)?;
    let id = find_by_name(&user, name)?;
    user.rename_sheep(id, new_name)?;
    user.save(root)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": new_name }))?;
    } else {
        println!("{name} is now called {new_name}.");
    }
    Ok(())
}

fn dress(root: &Path, name: &str, outfit: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut user = UserState::load(root)?;
    let id = find_by_name(&user, name)?;
    user.dress_sheep(id, outfit.clone())?;
    user.save(root)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "outfit": outfit }))?;
    } else {
        match outfit {
            Some(o) => println!("{name} is wearing the {o}."),
            None => println!("{name} is back to plain wool."),
        }
    }
    Ok(())
}

fn favorite(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut user = UserState::load(root)?;
    let id = find_by_name(&user, name)?;
    user.favorite_sheep(id)?;
    user.save(root)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "favorite": true }))?;
    } else {
        println!("{name} is the favorite now.");
    }
    Ok(())
}

fn clear(root: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    if !force {
        bail!("this removes the whole flock; re-run with --force to confirm");
    }

    let mut user = UserState::load(root)?;
    let removed = user.clear_flock();
    user.save(root)?;

    if json {
        print_json(&serde_json::json!({ "removed": removed }))?;
    } else {
        println!("Removed {removed} sheep. The meadow is quiet.");
    }
    Ok(())
}
