// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tick-driven timing utilities.
//!
//! Neither timer reads a clock. The host advances them with the frame delta
//! through `advance`, which keeps them deterministic and trivially testable
//! alongside the rest of the cooperative tick loop.

use std::time::Duration;

/// Accumulates elapsed time while running.
#[derive(Debug, Default)]
pub struct Stopwatch {
    elapsed: Duration,
    running: bool,
}

impl Stopwatch {
    /// Creates a stopped stopwatch at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts or resumes the stopwatch.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Pauses the stopwatch, keeping the accumulated time.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops the stopwatch and resets the accumulated time to zero.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
    }

    /// Advances the stopwatch by one tick's delta. Paused stopwatches are
    /// unaffected.
    pub fn advance(&mut self, delta: Duration) {
        if self.running {
            self.elapsed += delta;
        }
    }

    /// The accumulated running time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the stopwatch is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// A listener invoked when a [`Countdown`] expires.
pub type FinishedListener = Box<dyn FnMut() + Send>;

/// Counts down a fixed duration and fires its listeners exactly once on
/// expiry.
pub struct Countdown {
    duration: Duration,
    elapsed: Duration,
    running: bool,
    finished: bool,
    on_finished: Vec<FinishedListener>,
}

impl Countdown {
    /// Creates a stopped countdown for the given duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            running: false,
            finished: false,
            on_finished: Vec::new(),
        }
    }

    /// Adds a listener to be called when the countdown expires.
    pub fn add_finished_listener(&mut self, listener: FinishedListener) {
        self.on_finished.push(listener);
    }

    /// Starts or resumes the countdown. Finished countdowns stay finished
    /// until [`reset`](Self::reset).
    pub fn start(&mut self) {
        if !self.finished {
            self.running = true;
        }
    }

    /// Pauses the countdown, keeping the elapsed time.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops the countdown and clears elapsed time and the finished state.
    /// Listeners stay registered.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
        self.finished = false;
    }

    /// Advances the countdown by one tick's delta, firing the finished
    /// listeners if the duration is reached.
    pub fn advance(&mut self, delta: Duration) {
        if !self.running {
            return;
        }

        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.running = false;
            self.finished = true;
            for listener in &mut self.on_finished {
                listener();
            }
        }
    }

    /// The time left before expiry.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Whether the countdown has expired.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the countdown is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("running", &self.running)
            .field("finished", &self.finished)
            .field("listeners", &self.on_finished.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn stopwatch_accumulates_only_while_running() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.advance(Duration::from_millis(100));
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);

        stopwatch.start();
        stopwatch.advance(Duration::from_millis(100));
        stopwatch.pause();
        stopwatch.advance(Duration::from_millis(100));
        assert_eq!(stopwatch.elapsed(), Duration::from_millis(100));

        stopwatch.reset();
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);
        assert!(!stopwatch.is_running());
    }

    #[test]
    fn countdown_fires_listeners_exactly_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();

        let mut countdown = Countdown::new(Duration::from_millis(250));
        countdown.add_finished_listener(Box::new(move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }));

        countdown.start();
        countdown.advance(Duration::from_millis(100));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(countdown.remaining(), Duration::from_millis(150));

        countdown.advance(Duration::from_millis(200));
        assert!(countdown.is_finished());
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // An expired countdown no longer advances or fires.
        countdown.start();
        countdown.advance(Duration::from_millis(500));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn countdown_reset_allows_reuse() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();

        let mut countdown = Countdown::new(Duration::from_millis(50));
        countdown.add_finished_listener(Box::new(move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }));

        countdown.start();
        countdown.advance(Duration::from_millis(60));
        countdown.reset();
        countdown.start();
        countdown.advance(Duration::from_millis(60));

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
