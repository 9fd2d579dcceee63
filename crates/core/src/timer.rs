use serde::{Deserialize, Serialize};

/// Identifies one countdown run.
///
/// Every `reset` or `stop` moves the timer to a new generation; ticks scheduled
/// for an older generation are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerGeneration(u64);

impl TimerGeneration {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running { remaining: u32 },
    Expired,
    Stopped,
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale generation, or the timer is not running.
    Ignored,
    Running { remaining: u32 },
    /// The countdown reached zero. Emitted once per generation.
    TimeUp,
}

/// Per-question countdown, driven by one external tick per elapsed second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTimer {
    duration: u32,
    state: TimerState,
    generation: TimerGeneration,
}

impl QuestionTimer {
    /// Start a countdown from `duration` seconds.
    #[must_use]
    pub fn start(duration: u32) -> Self {
        Self {
            duration,
            state: TimerState::Running {
                remaining: duration,
            },
            generation: TimerGeneration(0),
        }
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn generation(&self) -> TimerGeneration {
        self.generation
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        match self.state {
            TimerState::Running { remaining } => remaining,
            TimerState::Expired | TimerState::Stopped => 0,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Apply one elapsed second scheduled for `generation`.
    pub fn tick(&mut self, generation: TimerGeneration) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Ignored;
        }
        let TimerState::Running { remaining } = self.state else {
            return TickOutcome::Ignored;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.state = TimerState::Expired;
            TickOutcome::TimeUp
        } else {
            self.state = TimerState::Running { remaining };
            TickOutcome::Running { remaining }
        }
    }

    /// Restart the countdown from the full duration and invalidate pending ticks.
    pub fn reset(&mut self) -> TimerGeneration {
        self.bump_generation();
        self.state = TimerState::Running {
            remaining: self.duration,
        };
        self.generation
    }

    /// Stop permanently (until the next `reset`) and invalidate pending ticks.
    pub fn stop(&mut self) {
        self.bump_generation();
        self.state = TimerState::Stopped;
    }

    fn bump_generation(&mut self) {
        self.generation = TimerGeneration(self.generation.0.wrapping_add(1));
    }
}
