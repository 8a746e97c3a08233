// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Poll-until-deadline primitive.

use std::time::Duration;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};

/// Run `probe` every `every` until it yields a value or `deadline` elapses.
///
/// The first probe fires one interval after the call. Returns `None` on
/// deadline. Dropping the returned future cancels both the ticker and the
/// deadline timer.
pub async fn await_with_deadline<T, F>(mut probe: F, every: Duration, deadline: Duration) -> Option<T>
where
    F: FnMut() -> Option<T>,
{
    let poll = async {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Some(value) = probe() {
                return value;
            }
        }
    };

    timeout(deadline, poll).await.ok()
}
