use anyhow::{bail, Context};
use mascot_agent::{fallback, MascotClient, NightBucket, SleepContext, SpeechRequest, TtsClient};
use sheepify_core::{state::UserState, types::Quality};
use std::path::Path;

/// Build the mascot's view of the farm from the latest recorded night.
fn context_for(user: &UserState) -> Option<SleepContext> {
    let latest = user.history.first()?;
    let bucket = match latest.quality {
        Quality::Poor => NightBucket::Poor,
        Quality::Good => NightBucket::Good,
        Quality::Perfect => NightBucket::Perfect,
    };
    Some(SleepContext {
        shepherd_name: user.shepherd_name.clone(),
        duration_hours: latest.duration_hours,
        bucket,
        score: latest.score,
        streak: user.streak,
        bad_nights: user.penalty.bad_nights,
        in_penalty: user.penalty.in_penalty,
        sheep_count: user.living_count(),
    })
}

/// A canned mascot line, used inline after a night is recorded.
pub fn line_for(user: &UserState) -> String {
    match context_for(user) {
        Some(ctx) => fallback::line(&ctx),
        None => "Baa? Nothing to say yet.".to_string(),
    }
}

pub fn run(root: &Path, voice: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let user = UserState::load(root)?;
    let Some(ctx) = context_for(&user) else {
        bail!("no nights recorded yet; log one with 'sheepify sleep log'");
    };

    let rt = tokio::runtime::Runtime::new()?;
    let message = rt.block_on(async {
        let client = MascotClient::from_env();
        client.generate_message(&ctx).await
    });

    if json {
        crate::output::print_json(&serde_json::json!({ "message": message }))?;
    } else {
        println!("Shleepy says: {message}");
    }

    if let Some(out) = voice {
        let tts = TtsClient::from_env().context("voice synthesis needs FISH_AUDIO_API_KEY")?;
        let bytes = rt
            .block_on(tts.synthesize(&SpeechRequest::new(&message)))
            .context("speech synthesis failed")?;
        std::fs::write(out, &bytes)
            .with_context(|| format!("failed to write {}", out.display()))?;
        if !json {
            println!("Audio written to {}", out.display());
        }
    }

    Ok(())
}
