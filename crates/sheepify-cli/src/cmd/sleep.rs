use crate::output::{print_json, Table};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use sheepify_core::{config::Config, engine, state::UserState, stats};
use std::path::Path;

#[derive(Subcommand)]
pub enum SleepSubcommand {
    /// Open a sleep session (head hits the pillow)
    Start {
        /// Bed time as RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Close the open session and collect the night's verdict
    Wake {
        /// Wake time as RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Record a past night from explicit bed and wake times
    Log {
        /// Bed time as RFC 3339
        bed: String,
        /// Wake time as RFC 3339
        wake: String,
    },
    /// Show recorded nights, most recent first
    History {
        /// Maximum nights to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Weekly summary: hours, average score, consistency
    Stats,
}

pub fn run(root: &Path, subcmd: SleepSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SleepSubcommand::Start { at } => start(root, at.as_deref(), json),
        SleepSubcommand::Wake { at } => wake(root, at.as_deref(), json),
        SleepSubcommand::Log { bed, wake } => log(root, &bed, &wake, json),
        SleepSubcommand::History { limit } => history(root, limit, json),
        SleepSubcommand::Stats => weekly_stats(root, json),
    }
}

fn parse_ts(input: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp '{input}' (expected RFC 3339)"))
}

fn start(root: &Path, at: Option<&str>, json: bool) -> anyhow::Result<()> {
    let bed = match at {
        Some(s) => parse_ts(s)?,
        None => Utc::now(),
    };

    let mut user = UserState::load(root)?;
    let active = user.start_session(bed)?.clone();
    user.save(root)?;

    if json {
        print_json(&serde_json::json!({ "id": active.id, "bed": active.bed }))?;
    } else {
        println!("Sleep session started at {}. Sweet dreams!", active.bed);
    }
    Ok(())
}

fn wake(root: &Path, at: Option<&str>, json: bool) -> anyhow::Result<()> {
    let wake = match at {
        Some(s) => parse_ts(s)?,
        None => Utc::now(),
    };

    let config = Config::load(root)?;
    let mut user = UserState::load(root)?;
    let completion = engine::complete_active(&mut user, wake, &config)?;
    user.save(root)?;

    report_completion(&completion, &user, json)
}

fn log(root: &Path, bed: &str, wake: &str, json: bool) -> anyhow::Result<()> {
    let bed = parse_ts(bed)?;
    let wake = parse_ts(wake)?;

    let config = Config::load(root)?;
    let mut user = UserState::load(root)?;
    let completion = engine::complete_night(&mut user, bed, wake, &config)?;
    user.save(root)?;

    report_completion(&completion, &user, json)
}

fn report_completion(
    completion: &engine::Completion,
    user: &UserState,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "session": completion.session,
            "quality": completion.quality,
            "score": completion.score,
            "wool_awarded": completion.wool_awarded,
            "sheep_awarded": completion.sheep_awarded,
            "token_granted": completion.token_granted,
            "sheep_lost": completion.sheep_lost,
            "entered_penalty": completion.entered_penalty,
            "left_penalty": completion.left_penalty,
            "too_short": completion.too_short,
            "streak": user.streak,
            "wool_balance": user.wool_balance,
        }));
    }

    println!(
        "Night recorded: {:.1}h — {} (score {}/100)",
        completion.session.duration_hours, completion.quality, completion.score
    );
    if completion.too_short {
        println!("Too short to count; the flock barely noticed.");
        return Ok(());
    }
    if completion.wool_awarded > 0 {
        println!(
            "+{} wool (balance: {})",
            completion.wool_awarded, user.wool_balance
        );
    }
    if let Some(sheep) = &completion.sheep_awarded {
        println!("A new sheep joins the flock: {}!", sheep.name);
    }
    if completion.token_granted {
        println!(
            "{}-night streak! Shepherd token earned (total: {}).",
            user.streak, user.shepherd_tokens
        );
    }
    if let Some(lost) = &completion.sheep_lost {
        println!("Lamb chop! {lost} was lost to the penalty.");
    }
    if completion.entered_penalty {
        println!("Penalty mode: {} bad nights.", user.penalty.bad_nights);
    }
    if completion.left_penalty {
        println!("Back out of penalty mode. Keep it up.");
    }
    println!("Streak: {}", user.streak);

    // A word from the mascot, fallback lines when no API key is set.
    println!("Shleepy says: {}", crate::cmd::mascot::line_for(user));
    Ok(())
}

fn history(root: &Path, limit: usize, json: bool) -> anyhow::Result<()> {
    let user = UserState::load(root)?;
    let nights: Vec<_> = user.history.iter().take(limit).collect();

    if json {
        return print_json(&nights);
    }

    if nights.is_empty() {
        println!("No nights recorded yet. Try 'sheepify sleep log'.");
        return Ok(());
    }

    let mut table = Table::new(&["date", "duration", "quality", "score", "wool"]);
    for s in &nights {
        table.row([
            s.date.to_string(),
            format!("{:.1}h", s.duration_hours),
            s.quality.to_string(),
            s.score.to_string(),
            s.wool_awarded.to_string(),
        ]);
    }
    table.print();
    Ok(())
}

fn weekly_stats(root: &Path, json: bool) -> anyhow::Result<()> {
    let user = UserState::load(root)?;
    let stats = stats::weekly(&user, Utc::now());

    if json {
        return print_json(&stats);
    }

    println!("Last 7 days:");
    println!("  nights:      {}", stats.total_sessions);
    println!("  hours:       {:.1}", stats.total_hours);
    println!("  avg score:   {:.1}", stats.average_score);
    println!("  wool earned: {}", stats.total_wool_earned);
    println!("  consistency: {:.2}", stats.consistency);
    if let Some(best) = stats.best_night {
        println!("  best night:  {best}");
    }
    Ok(())
}
