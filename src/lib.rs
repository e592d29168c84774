//! Core timing engine for the interval exercise timer.
//!
//! The engine owns all temporal state and derives the current phase from
//! wall-clock sampling: the caller feeds it `now` timestamps on a fixed
//! cadence and it recomputes the sub-phase and cycle index from absolute
//! elapsed time instead of accumulating ticks. A late or missed sample
//! therefore never drifts the displayed state away from wall-clock truth.
//!
//! Side effects (audio cues, wake lock) are not performed here. [`TimerEngine::start`]
//! and [`TimerEngine::tick`] return [`Transition`] events that a dispatcher
//! forwards to the effectful collaborators, keeping the state machine pure.

use log::{debug, info};

/// Default engine timing parameters.
pub mod defaults {
    /// Length of the preparatory countdown before the first cycle, seconds.
    pub const COUNT_IN_SECS: f64 = 3.0;
}

/// User-tunable run parameters.
///
/// Mutable at any time, including mid-run: phase boundaries are recomputed
/// from the current configuration on every sample, so a change takes effect
/// at the next tick without reinterpreting already-elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerConfig {
    /// How many engage+pause cycles make a full run. At least 1.
    pub repeat_times: u32,
    /// Length of the active-exercise segment, seconds. Must be positive;
    /// the form layer validates, the engine does not.
    pub exercise_duration: f64,
    /// Length of the rest segment, seconds. Zero is allowed.
    pub exercise_pause: f64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            repeat_times: 30,
            exercise_duration: 10.0,
            exercise_pause: 10.0,
        }
    }
}

/// Top-level run phase. Exactly one holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    CountingIn,
    Running,
    /// Reached when the configured cycle count has elapsed. Transient: the
    /// tick that detects completion resets straight back to [`Phase::Idle`],
    /// so observers only ever see it through [`Transition::RunCompleted`].
    Completed,
}

/// Named state-machine transitions emitted by `start`/`tick`.
///
/// The dispatcher maps these to side effects: `EnterEngaged` plays the
/// engage cue, `EnterPaused` the pause cue, `RunCompleted` the completion
/// cue plus teardown. `EnterCountIn` carries no cue of its own; the start
/// gesture handles audio warm-up and the wake-lock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    EnterCountIn,
    EnterEngaged,
    EnterPaused,
    RunCompleted,
}

/// Immutable view of the run state for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSnapshot {
    pub phase: Phase,
    /// Seconds shown on the big display: the reflected countdown while
    /// counting in, elapsed run time while running, zero otherwise.
    pub display_time: f64,
    /// Full engage+pause cycles elapsed so far.
    pub cycle_index: u32,
    /// True during the active-exercise sub-phase. Meaningful only while
    /// the phase is `Running`.
    pub engaged: bool,
}

impl RunSnapshot {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            display_time: 0.0,
            cycle_index: 0,
            engaged: false,
        }
    }
}

/// The countdown-then-run state machine.
///
/// Timestamps are seconds on an arbitrary monotonically non-decreasing
/// clock; the browser wiring feeds it `Date.now() / 1000`.
#[derive(Debug)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: Phase,
    count_in_started_at: f64,
    run_started_at: f64,
    cycle_index: u32,
    engaged: bool,
    display_time: f64,
}

impl TimerEngine {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            count_in_started_at: 0.0,
            run_started_at: 0.0,
            cycle_index: 0,
            engaged: false,
            display_time: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// Replace the run parameters. Safe mid-run: only boundary math from
    /// the next tick onwards is affected.
    pub fn set_config(&mut self, config: TimerConfig) {
        self.config = config;
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            phase: self.phase,
            display_time: self.display_time,
            cycle_index: self.cycle_index,
            engaged: self.engaged,
        }
    }

    /// Begin the count-in. Returns `None` unless the engine is idle, so a
    /// second press of the start button while running changes nothing.
    pub fn start(&mut self, now: f64) -> Option<Transition> {
        if self.phase != Phase::Idle {
            return None;
        }
        info!("starting count-in at t={now:.3}");
        self.count_in_started_at = now;
        self.display_time = defaults::COUNT_IN_SECS;
        self.phase = Phase::CountingIn;
        Some(Transition::EnterCountIn)
    }

    /// Reset fully to idle from any phase. Idempotent.
    pub fn stop(&mut self) {
        if self.phase != Phase::Idle {
            info!("timer stopped");
        }
        self.reset();
    }

    /// Advance the state machine against the current wall clock. Called on
    /// a fixed 100 ms cadence while counting in or running; a no-op in any
    /// other phase.
    pub fn tick(&mut self, now: f64) -> Vec<Transition> {
        match self.phase {
            Phase::CountingIn => self.tick_count_in(now),
            Phase::Running => self.tick_running(now),
            Phase::Idle | Phase::Completed => Vec::new(),
        }
    }

    fn tick_count_in(&mut self, now: f64) -> Vec<Transition> {
        let elapsed = now - self.count_in_started_at;
        // Reflected around zero rather than clamped: a sample landing past
        // the boundary briefly counts back up, exactly as displayed.
        self.display_time = (defaults::COUNT_IN_SECS - elapsed).abs();
        if elapsed > defaults::COUNT_IN_SECS {
            debug!("count-in complete, entering first cycle");
            self.phase = Phase::Running;
            self.run_started_at = now;
            self.engaged = true;
            vec![Transition::EnterEngaged]
        } else {
            Vec::new()
        }
    }

    fn tick_running(&mut self, now: f64) -> Vec<Transition> {
        let elapsed = now - self.run_started_at;
        let duration = self.config.exercise_duration;
        let pause = self.config.exercise_pause;
        let k = f64::from(self.cycle_index);

        let engage_end = (k + 1.0) * duration + k * pause;
        let cycle_end = (k + 1.0) * duration + (k + 1.0) * pause;

        // Both the sub-phase and the rollover check read the pre-increment
        // cycle index within the same sample.
        let was_engaged = self.engaged;
        self.engaged = !(elapsed > engage_end && elapsed < cycle_end);
        self.display_time = elapsed;

        let mut cycle_changed = false;
        if elapsed > cycle_end {
            self.cycle_index += 1;
            cycle_changed = true;
            debug!("cycle {} complete at elapsed={elapsed:.3}", self.cycle_index);
        }

        if self.cycle_index >= self.config.repeat_times {
            info!("run complete after {} cycles", self.cycle_index);
            self.phase = Phase::Completed;
            self.reset();
            return vec![Transition::RunCompleted];
        }

        if self.engaged != was_engaged || cycle_changed {
            if self.engaged {
                vec![Transition::EnterEngaged]
            } else {
                vec![Transition::EnterPaused]
            }
        } else {
            Vec::new()
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.cycle_index = 0;
        self.engaged = false;
        self.display_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(repeat_times: u32, duration: f64, pause: f64) -> TimerConfig {
        TimerConfig {
            repeat_times,
            exercise_duration: duration,
            exercise_pause: pause,
        }
    }

    /// Start at t=0 and tick just past the count-in so the run base time
    /// is known exactly.
    fn started_engine(cfg: TimerConfig, base: f64) -> TimerEngine {
        let mut engine = TimerEngine::new(cfg);
        assert_eq!(engine.start(0.0), Some(Transition::EnterCountIn));
        let events = engine.tick(base);
        assert_eq!(events, vec![Transition::EnterEngaged]);
        assert_eq!(engine.phase(), Phase::Running);
        engine
    }

    #[test]
    fn countdown_reflects_past_zero() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        engine.start(0.0);

        engine.tick(1.0);
        assert_eq!(engine.snapshot().display_time, 2.0);

        engine.tick(3.0);
        assert_eq!(engine.snapshot().display_time, 0.0);
        assert_eq!(engine.phase(), Phase::CountingIn);

        // A sample landing a full second late still shows the reflected
        // value for that tick while the run phase begins.
        let events = engine.tick(4.0);
        assert_eq!(engine.snapshot().display_time, 1.0);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(events, vec![Transition::EnterEngaged]);
    }

    #[test]
    fn start_requires_idle() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        assert!(engine.start(0.0).is_some());
        assert!(engine.start(1.0).is_none());
        engine.tick(3.5);
        assert!(engine.start(4.0).is_none());
    }

    #[test]
    fn ten_ten_scenario() {
        let base = 3.5;
        let mut engine = started_engine(config(30, 10.0, 10.0), base);

        // elapsed 5: engaged, first cycle.
        assert!(engine.tick(base + 5.0).is_empty());
        let snap = engine.snapshot();
        assert!(snap.engaged);
        assert_eq!(snap.cycle_index, 0);
        assert_eq!(snap.display_time, 5.0);

        // elapsed 15: inside the pause segment.
        assert_eq!(engine.tick(base + 15.0), vec![Transition::EnterPaused]);
        assert!(!engine.snapshot().engaged);

        // elapsed 21: second cycle, engaged again.
        assert_eq!(engine.tick(base + 21.0), vec![Transition::EnterEngaged]);
        let snap = engine.snapshot();
        assert!(snap.engaged);
        assert_eq!(snap.cycle_index, 1);
    }

    #[test]
    fn sub_phase_boundaries_are_strict() {
        let base = 3.5;
        // engage_end(0) = 2, cycle_end(0) = 3.
        let mut engine = started_engine(config(10, 2.0, 1.0), base);

        engine.tick(base + 2.001);
        assert!(!engine.snapshot().engaged);

        engine.tick(base + 2.999);
        assert!(!engine.snapshot().engaged);
        assert_eq!(engine.snapshot().cycle_index, 0);

        engine.tick(base + 3.001);
        let snap = engine.snapshot();
        assert!(snap.engaged);
        assert_eq!(snap.cycle_index, 1);
    }

    #[test]
    fn engage_cue_fires_exactly_once_through_first_half_cycle() {
        let mut engine = TimerEngine::new(config(30, 10.0, 10.0));
        engine.start(0.0);

        let mut engage_cues = 0;
        for step in 1..=35 {
            for event in engine.tick(f64::from(step) * 0.1) {
                if event == Transition::EnterEngaged {
                    engage_cues += 1;
                }
            }
        }

        assert_eq!(engage_cues, 1);
        let snap = engine.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.cycle_index, 0);
        assert!(snap.engaged);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut engine = TimerEngine::new(config(5, 2.0, 1.0));
        engine.start(0.0);
        engine.tick(3.5);
        engine.tick(4.5);

        engine.stop();
        let first = engine.snapshot();
        engine.stop();
        assert_eq!(engine.snapshot(), first);
        assert_eq!(first, RunSnapshot::idle());
    }

    #[test]
    fn auto_completes_and_resets_to_idle() {
        // Two cycles of 1s+1s: completion crosses cycle_end(1) = 4.
        let mut engine = TimerEngine::new(config(2, 1.0, 1.0));
        engine.start(0.0);

        let mut completions = 0;
        for step in 31..=80 {
            let now = f64::from(step) * 0.1;
            for event in engine.tick(now) {
                if event == Transition::RunCompleted {
                    completions += 1;
                    // The count-in handed over at ~3.1, so completion lands
                    // just past elapsed 4.
                    assert!(now > 7.0 && now < 7.3, "completed at now={now}");
                }
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(engine.snapshot(), RunSnapshot::idle());
    }

    #[test]
    fn zero_pause_replays_engage_cue_on_cycle_rollover() {
        let base = 3.5;
        let mut engine = started_engine(config(10, 1.0, 0.0), base);

        // The pause interval is empty, so the engaged flag never drops;
        // the cycle change alone retriggers the engage cue.
        assert_eq!(engine.tick(base + 1.1), vec![Transition::EnterEngaged]);
        let snap = engine.snapshot();
        assert!(snap.engaged);
        assert_eq!(snap.cycle_index, 1);
    }

    #[test]
    fn config_change_mid_run_moves_future_boundaries() {
        let base = 3.5;
        let mut engine = started_engine(config(30, 10.0, 10.0), base);

        assert!(engine.tick(base + 5.0).is_empty());
        assert!(engine.snapshot().engaged);

        // Doubling the duration pushes engage_end(0) from 10 to 20, so a
        // sample at elapsed 15 now stays engaged.
        engine.set_config(config(30, 20.0, 10.0));
        assert!(engine.tick(base + 15.0).is_empty());
        let snap = engine.snapshot();
        assert!(snap.engaged);
        assert_eq!(snap.cycle_index, 0);
        assert_eq!(snap.display_time, 15.0);
    }

    #[test]
    fn tick_is_a_no_op_while_idle() {
        let mut engine = TimerEngine::new(TimerConfig::default());
        assert!(engine.tick(1.0).is_empty());
        assert_eq!(engine.snapshot(), RunSnapshot::idle());
    }
}
