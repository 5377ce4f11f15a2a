use web_time::{SystemTime, UNIX_EPOCH};

use crate::Millis;

/// Time source for the game-start and game-end timestamps.
pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Wall clock, works natively and in the browser.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as Millis)
            .unwrap_or(0)
    }
}

/// Clock stuck at a single instant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedClock(pub Millis);

impl Clock for FixedClock {
    fn now_millis(&self) -> Millis {
        self.0
    }
}
