use crate::output::print_json;
use sheepify_core::state::UserState;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let user = UserState::load(root)?;

    if json {
        return print_json(&serde_json::json!({
            "shepherd_name": user.shepherd_name,
            "streak": user.streak,
            "wool_balance": user.wool_balance,
            "shepherd_tokens": user.shepherd_tokens,
            "prank_tokens": user.prank_tokens,
            "flock_total": user.flock.len(),
            "flock_living": user.living_count(),
            "bad_nights": user.penalty.bad_nights,
            "in_penalty": user.penalty.in_penalty,
            "sleeping": user.active_session.is_some(),
            "last_sleep": user.last_sleep,
        }));
    }

    println!("Shepherd: {}", user.shepherd_name);
    println!("Streak:   {} night(s)", user.streak);
    println!(
        "Wool:     {} (+{}/day)",
        user.wool_balance,
        user.generation_rate()
    );
    println!(
        "Flock:    {} sheep ({} living)",
        user.flock.len(),
        user.living_count()
    );
    println!("Tokens:   {} shepherd", user.shepherd_tokens);
    if user.penalty.in_penalty {
        println!(
            "Penalty:  ACTIVE ({} bad nights) — sleep well tonight",
            user.penalty.bad_nights
        );
    } else if user.penalty.bad_nights > 0 {
        println!("Penalty:  {} bad night(s) on record", user.penalty.bad_nights);
    }
    if let Some(active) = &user.active_session {
        println!("Sleeping: since {}", active.bed);
    }
    if let Some(last) = user.last_sleep {
        println!("Last:     {last}");
    }
    Ok(())
}
