//! Round timer state structures and the phase engine that drives them

use serde::{Deserialize, Serialize};

use super::profiles::TimerProfile;

/// Discrete phase of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Preparing,
    InRound,
    Resting,
    Finished,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Preparing => "preparing",
            TimerPhase::InRound => "in_round",
            TimerPhase::Resting => "resting",
            TimerPhase::Finished => "finished",
        }
    }
}

/// Duration field that can be edited on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerField {
    Round,
    Rest,
    Prepare,
    Warning,
}

/// Timer configuration, always replaced as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub rounds: u32,
    pub round_duration_seconds: u32,
    pub rest_duration_seconds: u32,
    pub prepare_duration_seconds: u32,
    pub warning_threshold_seconds: u32,
}

impl TimerConfig {
    pub const fn new(rounds: u32, round: u32, rest: u32, prepare: u32, warning: u32) -> Self {
        Self {
            rounds,
            round_duration_seconds: round,
            rest_duration_seconds: rest,
            prepare_duration_seconds: prepare,
            warning_threshold_seconds: warning,
        }
    }

    /// Copy of this config with one duration field replaced
    pub fn with_duration(mut self, field: TimerField, seconds: u32) -> Self {
        match field {
            TimerField::Round => self.round_duration_seconds = seconds,
            TimerField::Rest => self.rest_duration_seconds = seconds,
            TimerField::Prepare => self.prepare_duration_seconds = seconds,
            TimerField::Warning => self.warning_threshold_seconds = seconds,
        }
        self
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(12, 180, 60, 25, 10)
    }
}

/// Runtime state of the round timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub current_round: u32,
    pub seconds_remaining: u32,
    pub is_running: bool,
}

impl TimerState {
    /// Create an idle state at the start of round one
    pub fn idle(round_duration_seconds: u32) -> Self {
        Self {
            phase: TimerPhase::Idle,
            current_round: 1,
            seconds_remaining: round_duration_seconds,
            is_running: false,
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is paused
    Stopped,
    Counted { seconds_remaining: u32 },
    /// The countdown just reached the round end warning threshold
    Warning { seconds_remaining: u32 },
    Transitioned { from: TimerPhase, to: TimerPhase },
    /// The workout is finished and waits for a reset
    Halted,
}

/// Point-in-time view of the timer for observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    #[serde(flatten)]
    pub state: TimerState,
    pub config: TimerConfig,
    pub title: String,
    pub display: String,
    pub warning: bool,
}

/// Format seconds as `MM:SS`
pub fn format_seconds(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Phase sequencing for a multi-round interval workout.
///
/// The engine holds no clock of its own. The host calls [`TimerEngine::tick`]
/// once per second and every call advances exactly one second.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
}

impl TimerEngine {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            state: TimerState::idle(config.round_duration_seconds),
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Replace the configuration.
    ///
    /// A stopped timer is rewound to idle. A running timer keeps its current
    /// countdown and picks the new durations up at the next phase change.
    pub fn configure(&mut self, config: TimerConfig) {
        self.config = config;
        if !self.state.is_running {
            self.state.phase = TimerPhase::Idle;
            self.state.current_round = 1;
            self.state.seconds_remaining = config.round_duration_seconds;
        }
    }

    /// Replace a single duration, going through [`TimerEngine::configure`]
    pub fn set_duration(&mut self, field: TimerField, seconds: u32) {
        self.configure(self.config.with_duration(field, seconds));
    }

    pub fn set_rounds(&mut self, rounds: u32) {
        self.configure(TimerConfig { rounds, ..self.config });
    }

    pub fn start(&mut self) {
        self.state.is_running = true;
    }

    pub fn pause(&mut self) {
        self.state.is_running = false;
    }

    pub fn toggle(&mut self) {
        self.state.is_running = !self.state.is_running;
    }

    pub fn reset(&mut self) {
        self.state = TimerState::idle(self.config.round_duration_seconds);
    }

    pub fn apply_profile(&mut self, profile: &TimerProfile) {
        self.configure(profile.config);
        self.reset();
    }

    /// Advance the timer by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome::Stopped;
        }

        // Idle leaves on the first running tick without counting down
        if self.state.phase != TimerPhase::Idle && self.state.seconds_remaining > 0 {
            self.state.seconds_remaining -= 1;
            let seconds_remaining = self.state.seconds_remaining;
            let threshold = self.config.warning_threshold_seconds;
            if self.state.phase == TimerPhase::InRound && threshold > 0 && seconds_remaining == threshold {
                return TickOutcome::Warning { seconds_remaining };
            }
            return TickOutcome::Counted { seconds_remaining };
        }

        let config = self.config;
        match self.state.phase {
            TimerPhase::Idle if config.prepare_duration_seconds > 0 => {
                self.enter(TimerPhase::Preparing, config.prepare_duration_seconds)
            }
            TimerPhase::Idle | TimerPhase::Preparing => {
                self.enter(TimerPhase::InRound, config.round_duration_seconds)
            }
            TimerPhase::InRound if self.state.current_round < config.rounds => {
                self.enter(TimerPhase::Resting, config.rest_duration_seconds)
            }
            TimerPhase::InRound => {
                self.state.is_running = false;
                self.enter(TimerPhase::Finished, 0)
            }
            TimerPhase::Resting => {
                self.state.current_round = self.state.current_round.saturating_add(1);
                self.enter(TimerPhase::InRound, config.round_duration_seconds)
            }
            TimerPhase::Finished => TickOutcome::Halted,
        }
    }

    fn enter(&mut self, phase: TimerPhase, seconds: u32) -> TickOutcome {
        let from = self.state.phase;
        self.state.phase = phase;
        self.state.seconds_remaining = seconds;
        TickOutcome::Transitioned { from, to: phase }
    }

    /// True while a round is inside its end-of-round warning window
    pub fn is_warning(&self) -> bool {
        let threshold = self.config.warning_threshold_seconds;
        self.state.phase == TimerPhase::InRound
            && threshold > 0
            && threshold <= self.config.round_duration_seconds
            && self.state.seconds_remaining <= threshold
    }

    /// Headline shown above the countdown
    pub fn title(&self) -> String {
        match self.state.phase {
            TimerPhase::Idle => "READY".to_string(),
            TimerPhase::Preparing => "PREPARE".to_string(),
            TimerPhase::InRound => format!("ROUND {}", self.state.current_round),
            TimerPhase::Resting => "REST".to_string(),
            TimerPhase::Finished => "DONE".to_string(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state.clone(),
            config: self.config,
            title: self.title(),
            display: format_seconds(self.state.seconds_remaining),
            warning: self.is_warning(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::profiles::find_profile;

    fn running(config: TimerConfig) -> TimerEngine {
        let mut engine = TimerEngine::new(config);
        engine.start();
        engine
    }

    fn ticks(engine: &mut TimerEngine, n: u32) {
        for _ in 0..n {
            engine.tick();
        }
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = TimerEngine::new(TimerConfig::new(3, 120, 30, 10, 5));
        assert_eq!(engine.state(), &TimerState::idle(120));
        assert_eq!(engine.title(), "READY");
        assert_eq!(engine.snapshot().display, "02:00");
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut engine = TimerEngine::new(TimerConfig::new(3, 120, 30, 10, 5));
        assert_eq!(engine.tick(), TickOutcome::Stopped);
        assert_eq!(engine.state(), &TimerState::idle(120));
    }

    #[test]
    fn test_start_leaves_idle_on_next_tick() {
        let mut engine = running(TimerConfig::new(3, 120, 30, 10, 5));
        assert_eq!(engine.state().phase, TimerPhase::Idle);
        assert_eq!(
            engine.tick(),
            TickOutcome::Transitioned { from: TimerPhase::Idle, to: TimerPhase::Preparing }
        );
        assert_eq!(engine.state().seconds_remaining, 10);

        let mut engine = running(TimerConfig::new(3, 120, 30, 0, 5));
        engine.tick();
        assert_eq!(engine.state().phase, TimerPhase::InRound);
        assert_eq!(engine.state().seconds_remaining, 120);
    }

    #[test]
    fn test_prepare_then_round() {
        let mut engine = running(TimerConfig::new(3, 120, 30, 10, 5));
        engine.tick();
        ticks(&mut engine, 10);
        assert_eq!(engine.state().phase, TimerPhase::Preparing);
        assert_eq!(engine.state().seconds_remaining, 0);
        engine.tick();
        assert_eq!(engine.state().phase, TimerPhase::InRound);
        assert_eq!(engine.state().seconds_remaining, 120);
        assert_eq!(engine.state().current_round, 1);
    }

    #[test]
    fn test_round_completion_enters_rest() {
        let mut engine = running(TimerConfig::new(3, 20, 7, 0, 0));
        engine.tick();
        ticks(&mut engine, 20);
        assert_eq!(engine.state().phase, TimerPhase::InRound);
        assert_eq!(engine.state().seconds_remaining, 0);

        engine.tick();
        assert_eq!(engine.state().phase, TimerPhase::Resting);
        assert_eq!(engine.state().seconds_remaining, 7);
        assert_eq!(engine.state().current_round, 1);
    }

    #[test]
    fn test_rest_completion_increments_round() {
        let mut engine = running(TimerConfig::new(3, 20, 7, 0, 0));
        engine.tick();
        ticks(&mut engine, 21);
        ticks(&mut engine, 7);
        assert_eq!(engine.state().phase, TimerPhase::Resting);

        engine.tick();
        assert_eq!(engine.state().phase, TimerPhase::InRound);
        assert_eq!(engine.state().current_round, 2);
        assert_eq!(engine.state().seconds_remaining, 20);
        assert_eq!(engine.title(), "ROUND 2");
    }

    #[test]
    fn test_last_round_finishes_and_stops() {
        let mut engine = running(TimerConfig::new(2, 3, 2, 0, 0));
        engine.tick();
        // round 1, rest, round 2
        ticks(&mut engine, 4 + 3 + 3);
        assert_eq!(engine.state().phase, TimerPhase::InRound);
        assert_eq!(engine.state().current_round, 2);
        assert_eq!(engine.state().seconds_remaining, 0);

        assert_eq!(
            engine.tick(),
            TickOutcome::Transitioned { from: TimerPhase::InRound, to: TimerPhase::Finished }
        );
        assert!(!engine.state().is_running);

        let finished = engine.state().clone();
        assert_eq!(engine.tick(), TickOutcome::Stopped);
        engine.start();
        assert_eq!(engine.tick(), TickOutcome::Halted);
        assert_eq!(engine.state().phase, finished.phase);
        assert_eq!(engine.state().current_round, finished.current_round);
    }

    #[test]
    fn test_single_round_has_no_rest() {
        let mut engine = running(TimerConfig::new(1, 2, 30, 0, 0));
        ticks(&mut engine, 1 + 2 + 1);
        assert_eq!(engine.state().phase, TimerPhase::Finished);
    }

    #[test]
    fn test_reset_from_any_phase() {
        let config = TimerConfig::new(3, 5, 2, 3, 1);
        for n in [0, 1, 4, 6, 9, 11, 40] {
            let mut engine = running(config);
            ticks(&mut engine, n);
            engine.reset();
            assert_eq!(engine.state(), &TimerState::idle(5), "after {n} ticks");
        }
    }

    #[test]
    fn test_pause_keeps_countdown() {
        let mut engine = running(TimerConfig::new(3, 20, 7, 0, 0));
        ticks(&mut engine, 5);
        let before = engine.state().clone();
        engine.pause();
        ticks(&mut engine, 5);
        assert_eq!(engine.state().seconds_remaining, before.seconds_remaining);
        assert_eq!(engine.state().phase, before.phase);
        engine.toggle();
        assert!(engine.state().is_running);
    }

    #[test]
    fn test_configure_while_stopped_rewinds() {
        let mut engine = running(TimerConfig::new(3, 20, 7, 0, 0));
        ticks(&mut engine, 30);
        engine.pause();
        engine.configure(TimerConfig::new(5, 60, 10, 0, 0));
        assert_eq!(engine.state(), &TimerState::idle(60));
    }

    #[test]
    fn test_configure_while_running_keeps_countdown() {
        let mut engine = running(TimerConfig::new(3, 20, 7, 0, 0));
        ticks(&mut engine, 6);
        let before = engine.state().clone();
        assert_eq!(before.seconds_remaining, 15);

        engine.configure(TimerConfig::new(3, 90, 45, 0, 0));
        assert_eq!(engine.state(), &before);

        // the new durations apply from the next transition on
        ticks(&mut engine, 16);
        assert_eq!(engine.state().phase, TimerPhase::Resting);
        assert_eq!(engine.state().seconds_remaining, 45);
        ticks(&mut engine, 46);
        assert_eq!(engine.state().phase, TimerPhase::InRound);
        assert_eq!(engine.state().seconds_remaining, 90);
    }

    #[test]
    fn test_apply_profile_resets_even_while_running() {
        let mut engine = running(TimerConfig::new(3, 20, 7, 0, 0));
        ticks(&mut engine, 6);
        let mma = find_profile("MMA").expect("mma profile");
        engine.apply_profile(mma);
        assert_eq!(engine.config(), &mma.config);
        assert_eq!(engine.state(), &TimerState::idle(300));
    }

    #[test]
    fn test_set_duration_goes_through_configure() {
        let mut engine = TimerEngine::default();
        engine.set_duration(TimerField::Round, 2 * 60 + 30);
        assert_eq!(engine.config().round_duration_seconds, 150);
        assert_eq!(engine.state().seconds_remaining, 150);
        engine.set_rounds(4);
        assert_eq!(engine.config().rounds, 4);
    }

    #[test]
    fn test_warning_fires_at_threshold() {
        let mut engine = running(TimerConfig::new(1, 5, 0, 0, 2));
        engine.tick();
        assert!(!engine.is_warning());
        assert_eq!(engine.tick(), TickOutcome::Counted { seconds_remaining: 4 });
        engine.tick();
        assert_eq!(engine.tick(), TickOutcome::Warning { seconds_remaining: 2 });
        assert!(engine.is_warning());
        assert!(engine.snapshot().warning);
    }

    #[test]
    fn test_warning_larger_than_round_never_fires() {
        let mut engine = running(TimerConfig::new(1, 5, 0, 0, 30));
        engine.tick();
        for _ in 0..5 {
            assert!(matches!(engine.tick(), TickOutcome::Counted { .. }));
            assert!(!engine.is_warning());
        }
    }

    #[test]
    fn test_zero_rounds_accepted() {
        let mut engine = running(TimerConfig::new(0, 1, 1, 0, 0));
        ticks(&mut engine, 3);
        assert_eq!(engine.state().phase, TimerPhase::Finished);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(185), "03:05");
        assert_eq!(format_seconds(3600), "60:00");
    }
}
