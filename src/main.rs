//! Main module for the Engage Timer application using Yew.
//! Wires UI components, state hooks, and side-effect dispatch.

use std::rc::Rc;

use engage_timer::{Phase, RunSnapshot, TimerConfig, TimerEngine, Transition};
use gloo_timers::callback::Interval;
use yew::prelude::*;

mod audio;
mod components;
mod config;
mod hooks;
mod prefs;
mod utils;
mod wake_lock;

use audio::{AudioCues, Cue};
use components::{render_setting_field, PhaseBanners, TimeDisplay};
use config::*;
use hooks::{use_stored_input, use_stored_toggle};
use wake_lock::WakeLockHandle;

// ──────────────────────────────────────────────────────────────────────────────

/// Wall clock in seconds, the timestamp domain of the engine.
fn now_secs() -> f64 {
    js_sys::Date::now() / 1000.0
}

/// Primary application component wiring run state, the sampling loop, and
/// side-effect dispatch for engine transitions.
#[function_component(Main)]
fn main_component() -> Html {
    let repeat_validator: Rc<dyn Fn(&str) -> Result<u32, String>> =
        Rc::new(|s| utils::validate_repeat_times(s));
    let duration_validator: Rc<dyn Fn(&str) -> Result<f64, String>> =
        Rc::new(|s| utils::validate_duration(s));
    let pause_validator: Rc<dyn Fn(&str) -> Result<f64, String>> =
        Rc::new(|s| utils::validate_pause(s));

    let repeat_times = use_stored_input(KEY_REPEAT_TIMES, DEFAULT_REPEAT_TIMES, repeat_validator);
    let exercise_duration = use_stored_input(
        KEY_EXERCISE_DURATION,
        DEFAULT_EXERCISE_DURATION,
        duration_validator,
    );
    let exercise_pause =
        use_stored_input(KEY_EXERCISE_PAUSE, DEFAULT_EXERCISE_PAUSE, pause_validator);
    let (blink_on_change, blink_onchange) = use_stored_toggle(KEY_BLINK_ON_CHANGE, false);

    let engine = {
        let initial = TimerConfig {
            repeat_times: repeat_times.value,
            exercise_duration: exercise_duration.value,
            exercise_pause: exercise_pause.value,
        };
        use_mut_ref(move || TimerEngine::new(initial))
    };
    let snapshot = use_state(RunSnapshot::idle);
    // Holding the interval in state ties the sampling schedule to the
    // component: clearing it (stop, completion, unmount) cancels the timer.
    let interval = use_state(|| None::<Interval>);
    let audio = use_memo((), |_| AudioCues::new());
    let wake_lock = use_memo((), |_| WakeLockHandle::new());

    // Keep the engine's parameters in step with committed form values,
    // including mid-run: the next sample derives its boundaries from them.
    {
        let engine = engine.clone();
        use_effect_with(
            (
                repeat_times.value,
                exercise_duration.value,
                exercise_pause.value,
            ),
            move |&(repeat, duration, pause)| {
                engine.borrow_mut().set_config(TimerConfig {
                    repeat_times: repeat,
                    exercise_duration: duration,
                    exercise_pause: pause,
                });
            },
        );
    }

    let on_start = {
        let engine = engine.clone();
        let snapshot = snapshot.clone();
        let interval = interval.clone();
        let audio = audio.clone();
        let wake_lock = wake_lock.clone();
        Callback::from(move |_: MouseEvent| {
            if engine.borrow_mut().start(now_secs()).is_none() {
                return;
            }
            // Still inside the click gesture: warm the cues up so later
            // playback is allowed, and grab the lock while we can.
            if let Some(cues) = audio.as_ref() {
                cues.prime();
            }
            wake_lock.request();
            snapshot.set(engine.borrow().snapshot());

            let tick_engine = engine.clone();
            let tick_snapshot = snapshot.clone();
            let tick_audio = audio.clone();
            let tick_lock = wake_lock.clone();
            let tick_interval = interval.clone();
            let handle = Interval::new(TICK_INTERVAL_MS, move || {
                let transitions = tick_engine.borrow_mut().tick(now_secs());
                let snap = tick_engine.borrow().snapshot();

                for transition in &transitions {
                    match transition {
                        Transition::EnterCountIn => {}
                        Transition::EnterEngaged => {
                            if let Some(cues) = tick_audio.as_ref() {
                                cues.play(Cue::EngageStart);
                            }
                        }
                        Transition::EnterPaused => {
                            if let Some(cues) = tick_audio.as_ref() {
                                cues.play(Cue::PhaseStop);
                            }
                        }
                        Transition::RunCompleted => {
                            if let Some(cues) = tick_audio.as_ref() {
                                cues.play(Cue::SequenceComplete);
                            }
                            tick_lock.release();
                            tick_interval.set(None);
                        }
                    }
                }

                // The platform may revoke the lock on a tab switch; take it
                // back while an exercise segment is active.
                if snap.phase == Phase::Running && snap.engaged && !tick_lock.is_held() {
                    tick_lock.request();
                }

                tick_snapshot.set(snap);
            });
            interval.set(Some(handle));
        })
    };

    let on_stop = {
        let engine = engine.clone();
        let snapshot = snapshot.clone();
        let interval = interval.clone();
        let wake_lock = wake_lock.clone();
        Callback::from(move |_: MouseEvent| {
            engine.borrow_mut().stop();
            wake_lock.release();
            interval.set(None);
            snapshot.set(engine.borrow().snapshot());
        })
    };

    let snap = *snapshot;
    let blink_class = if blink_on_change && snap.phase == Phase::Running {
        if snap.engaged {
            "engaged"
        } else {
            "paused"
        }
    } else {
        ""
    };

    html! {
        <div class={format!("app {}", blink_class)}>
            <TimeDisplay display_time={snap.display_time} cycle_index={snap.cycle_index} />
            <PhaseBanners engaged={snap.engaged} />

            <div class="settings">
                { render_setting_field(
                    "repeat_times_input",
                    "Exercise repeat times:",
                    "number",
                    "30",
                    &repeat_times,
                ) }
                { render_setting_field(
                    "exercise_duration_input",
                    "Exercise duration:",
                    "text",
                    "10 or 1:30",
                    &exercise_duration,
                ) }
                { render_setting_field(
                    "exercise_pause_input",
                    "Exercise pause:",
                    "text",
                    "10 or 1:30",
                    &exercise_pause,
                ) }
                <div class="form-group checkbox-group">
                    <label>
                        <input type="checkbox"
                            checked={blink_on_change}
                            onchange={blink_onchange}
                        />
                        { "Blink on phase change" }
                    </label>
                </div>
            </div>

            <div class="run-controls">
                <button class="btn-start" onclick={on_start}>{ "START" }</button>
                <button class="btn-stop" onclick={on_stop}>{ "STOP" }</button>
            </div>
        </div>
    }
}

/// App wrapper around the main component.
#[function_component(App)]
pub fn app() -> Html {
    html! { <Main /> }
}

/// Entry point: installs the panic hook and mounts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
