//! Application-level configuration constants.

// Engine sampling cadence
pub const TICK_INTERVAL_MS: u32 = 100;

// Default values for input fields
pub const DEFAULT_REPEAT_TIMES: &str = "30";
pub const DEFAULT_EXERCISE_DURATION: &str = "10";
pub const DEFAULT_EXERCISE_PAUSE: &str = "10";

// Min/Max limits for input fields
pub const MAX_REPEAT_TIMES: u32 = 999;
pub const MIN_DURATION_SECS: f64 = 0.5;
pub const MAX_DURATION_SECS: f64 = 3600.0;
pub const MAX_PAUSE_SECS: f64 = 3600.0;

// Preference store keys
pub const KEY_REPEAT_TIMES: &str = "exerciseRepeatTimes";
pub const KEY_EXERCISE_DURATION: &str = "exerciseDuration";
pub const KEY_EXERCISE_PAUSE: &str = "exercisePause";
pub const KEY_BLINK_ON_CHANGE: &str = "blinkOnStateChange";

// Audio cue assets
pub const SOUND_ENGAGE_START: &str = "/sounds/start.mp3";
pub const SOUND_PHASE_STOP: &str = "/sounds/stop.mp3";
pub const SOUND_SEQUENCE_COMPLETE: &str = "/sounds/fullStop.mp3";

// Volumes: cues play at full volume, the warm-up pass inside the start
// gesture is near-silent.
pub const CUE_VOLUME: f64 = 1.0;
pub const PRIME_VOLUME: f64 = 0.001;
