//! Pure Yew view components for the timer UI.
//!
//! This module contains stateless components that render based on props,
//! keeping all run state and side effects in the main component.

use yew::prelude::*;

use crate::hooks::StoredInput;
use crate::utils::format_seconds;

/// The big one-decimal clock with the completed-cycle badge beneath it.
#[derive(Properties, PartialEq)]
pub struct TimeDisplayProps {
    pub display_time: f64,
    pub cycle_index: u32,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    html! {
        <div class="time-display">
            { format_seconds(props.display_time) }
            <div class="cycle-badge">
                <span>{ props.cycle_index }</span>
            </div>
        </div>
    }
}

/// ENGAGE / PAUSE banners. Both are always in the tree; the sub-phase
/// toggles their open/close classes so CSS can animate the swap.
#[derive(Properties, PartialEq)]
pub struct PhaseBannersProps {
    pub engaged: bool,
}

#[function_component(PhaseBanners)]
pub fn phase_banners(props: &PhaseBannersProps) -> Html {
    let (engage_class, pause_class) = if props.engaged {
        ("open", "close")
    } else {
        ("close", "open")
    };
    html! {
        <div class="phase-banners">
            <div class={format!("phase-banner phase-banner-engage {}", engage_class)}>
                { "ENGAGE" }
            </div>
            <div class={format!("phase-banner phase-banner-pause {}", pause_class)}>
                { "PAUSE" }
            </div>
        </div>
    }
}

/// Renders one labelled settings field bound to a stored input, with its
/// inline validation error when the last commit failed.
pub fn render_setting_field<T>(
    id: &'static str,
    label: &str,
    input_type: &'static str,
    placeholder: &'static str,
    field: &StoredInput<T>,
) -> Html
where
    T: Clone + PartialEq + 'static,
{
    html! {
        <div class="form-group">
            <label for={id}>{ label }</label>
            <input
                type={input_type}
                id={id}
                value={field.text.clone()}
                class={if field.error.is_some() { "invalid" } else { "" }}
                placeholder={placeholder}
                oninput={field.on_text_input.clone()}
                onchange={field.on_commit.reform(|_| ())}
                onkeydown={field.onkeydown.clone()}
            />
            if let Some(ref err) = field.error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}
