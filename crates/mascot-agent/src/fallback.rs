//! Canned mascot lines, used whenever the Claude API is unavailable. The
//! reward flow must never surface an AI failure, so every path lands here
//! instead of erroring.

use crate::types::{NightBucket, SleepContext};

const POOR_LINES: &[&str] = &[
    "Baa-d night, {name}. The flock is getting nervous.",
    "That was barely a nap. Even the lambs stayed up longer than ewe.",
    "Counting sheep works better when ewe actually close your eyes.",
];

const GOOD_LINES: &[&str] = &[
    "Not baa-d at all, {name}. The flock approves.",
    "Solid night! A little more and there's a new sheep in it for ewe.",
    "The pasture is peaceful when ewe sleep like that.",
];

const PERFECT_LINES: &[&str] = &[
    "Ewe nailed it, {name}! A brand new sheep joins the flock!",
    "Legendary shut-eye. The whole flock is doing a happy stomp.",
    "That's shepherd-grade sleep. Wool for days!",
];

const PENALTY_LINE: &str =
    "{name}... we lost one. Three rough nights in a row. Sleep well tonight, for the flock.";

/// Pick a deterministic fallback line for the night. Penalty nights always
/// get the somber line; otherwise the pool is cycled by streak so repeated
/// identical nights don't repeat the same text.
pub fn line(ctx: &SleepContext) -> String {
    if ctx.in_penalty && ctx.bucket == NightBucket::Poor {
        return PENALTY_LINE.replace("{name}", &ctx.shepherd_name);
    }
    let pool = match ctx.bucket {
        NightBucket::Poor => POOR_LINES,
        NightBucket::Good => GOOD_LINES,
        NightBucket::Perfect => PERFECT_LINES,
    };
    let idx = (ctx.streak as usize + ctx.bad_nights as usize) % pool.len();
    pool[idx].replace("{name}", &ctx.shepherd_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(bucket: NightBucket) -> SleepContext {
        SleepContext {
            shepherd_name: "Bo".to_string(),
            duration_hours: 7.0,
            bucket,
            score: 70,
            streak: 0,
            bad_nights: 0,
            in_penalty: false,
            sheep_count: 2,
        }
    }

    #[test]
    fn name_is_substituted() {
        let line = line(&ctx(NightBucket::Poor));
        assert!(line.contains("Bo"));
        assert!(!line.contains("{name}"));
    }

    #[test]
    fn penalty_gets_the_somber_line() {
        let mut c = ctx(NightBucket::Poor);
        c.in_penalty = true;
        c.bad_nights = 3;
        assert!(line(&c).contains("we lost one"));
    }

    #[test]
    fn streak_cycles_the_pool() {
        let mut a = ctx(NightBucket::Good);
        let mut b = ctx(NightBucket::Good);
        a.streak = 0;
        b.streak = 1;
        assert_ne!(line(&a), line(&b));
    }
}
