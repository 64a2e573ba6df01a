use crate::output::print_json;
use sheepify_core::state::UserState;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut user = UserState::load(root)?;
    user.reset_penalty();
    user.save(root)?;

    if json {
        print_json(&serde_json::json!({
            "bad_nights": user.penalty.bad_nights,
            "in_penalty": user.penalty.in_penalty,
        }))?;
    } else {
        println!("Penalty debt cleared. Fresh start tonight.");
    }
    Ok(())
}
