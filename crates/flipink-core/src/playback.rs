//! Timed playback over the frame sequence.

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

use std::time::Duration;

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// Fixed-cadence tick source for previewing the animation.
///
/// The host owns the clock and calls [`AnimationPlayer::poll`] with the current time.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    state: PlaybackState,
    interval: Duration,
    next_tick: Option<Instant>,
}

impl AnimationPlayer {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: PlaybackState::Stopped,
            interval,
            next_tick: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begin playing. The first tick is due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.state = PlaybackState::Playing;
        self.next_tick = Some(now + self.interval);
    }

    /// Stop playing and drop the pending tick.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.next_tick = None;
    }

    /// When the next tick is due, if playing.
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Returns true if a tick is due at `now`. Fires at most once per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_tick else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.interval;
        // Don't try to catch up after a stall
        self.next_tick = Some(if next <= now { now + self.interval } else { next });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn test_stopped_never_ticks() {
        let mut player = AnimationPlayer::new(TICK);
        let now = Instant::now();
        assert!(!player.poll(now + TICK * 10));
        assert_eq!(player.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_ticks_on_cadence() {
        let mut player = AnimationPlayer::new(TICK);
        let start = Instant::now();
        player.start(start);
        assert!(player.is_playing());

        assert!(!player.poll(start + Duration::from_millis(50)));
        assert!(player.poll(start + TICK));
        assert!(!player.poll(start + Duration::from_millis(150)));
        assert!(player.poll(start + TICK * 2));
    }

    #[test]
    fn test_stall_does_not_burst() {
        let mut player = AnimationPlayer::new(TICK);
        let start = Instant::now();
        player.start(start);

        let late = start + TICK * 10;
        assert!(player.poll(late));
        assert!(!player.poll(late));
        assert_eq!(player.next_tick(), Some(late + TICK));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let mut player = AnimationPlayer::new(TICK);
        let start = Instant::now();
        player.start(start);
        player.stop();
        assert!(player.next_tick().is_none());
        assert!(!player.poll(start + TICK * 3));
    }
}
