use crate::output::{print_json, Table};
use clap::Subcommand;
use sheepify_core::state::UserState;
use std::path::Path;

#[derive(Subcommand)]
pub enum WoolSubcommand {
    /// Show the wool balance and daily generation rate
    Balance,
    /// Spend wool on a shop item
    Spend { amount: u64, item: String },
    /// Show the transaction ledger
    History {
        /// Maximum entries to show, newest last
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

pub fn run(root: &Path, subcmd: WoolSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        WoolSubcommand::Balance => balance(root, json),
        WoolSubcommand::Spend { amount, item } => spend(root, amount, &item, json),
        WoolSubcommand::History { limit } => history(root, limit, json),
    }
}

fn balance(root: &Path, json: bool) -> anyhow::Result<()> {
    let user = UserState::load(root)?;

    if json {
        return print_json(&serde_json::json!({
            "wool_balance": user.wool_balance,
            "generation_rate": user.generation_rate(),
        }));
    }

    println!(
        "{} wool ({} living sheep producing {}/day)",
        user.wool_balance,
        user.living_count(),
        user.generation_rate()
    );
    Ok(())
}

fn spend(root: &Path, amount: u64, item: &str, json: bool) -> anyhow::Result<()> {
    let mut user = UserState::load(root)?;
    let balance = user.spend_wool(amount, item)?;
    user.save(root)?;

    if json {
        print_json(&serde_json::json!({ "spent": amount, "item": item, "wool_balance": balance }))?;
    } else {
        println!("Spent {amount} wool on {item}. Balance: {balance}");
    }
    Ok(())
}

fn history(root: &Path, limit: usize, json: bool) -> anyhow::Result<()> {
    let user = UserState::load(root)?;
    let start = user.ledger.len().saturating_sub(limit);
    let entries = &user.ledger[start..];

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No wool has moved yet.");
        return Ok(());
    }

    let mut table = Table::new(&["date", "amount", "balance", "source", "ref"]);
    for e in entries {
        table.row([
            e.at.date_naive().to_string(),
            format!("{:+}", e.amount),
            e.balance_after.to_string(),
            e.source.to_string(),
            e.reference.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.print();
    Ok(())
}
