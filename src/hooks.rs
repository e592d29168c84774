use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::prefs;

/// Holds the state and callbacks for a validated, persisted input field.
#[derive(Clone)]
pub struct StoredInput<T: Clone + PartialEq + 'static> {
    /// The current text content of the input field.
    pub text: String,
    /// The current parsed and validated value.
    pub value: T,
    /// An optional error message if the last commit failed validation.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event.
    pub on_text_input: Callback<InputEvent>,
    /// Callback to parse, validate, and persist the current text.
    /// Wired to `onchange`.
    pub on_commit: Callback<()>,
    /// Commits on Enter.
    pub onkeydown: Callback<KeyboardEvent>,
}

/// State hook for an input field whose committed value persists in the
/// preference store.
///
/// The field seeds from the stored text under `key` (falling back to
/// `default_text`), keeps free-form text while the user types, and on
/// commit either persists the canonical form or surfaces the validation
/// error without touching the stored value.
#[hook]
pub fn use_stored_input<T>(
    key: &'static str,
    default_text: &'static str,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
) -> StoredInput<T>
where
    T: Clone + PartialEq + std::fmt::Display + 'static,
{
    let value_state = use_state({
        let parse = parse_and_validate.clone();
        move || {
            let stored = prefs::get(key, default_text.to_string());
            parse(&stored).unwrap_or_else(|_| {
                parse(default_text).expect("default input text must validate")
            })
        }
    });
    let text_state = use_state(|| (*value_state).to_string());
    let error_state = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let text_state = text_state.clone();
        let value_state = value_state.clone();
        let error_state = error_state.clone();
        let parse = parse_and_validate.clone();
        Callback::from(move |_| match parse(&text_state) {
            Ok(parsed) => {
                prefs::set(key, &parsed.to_string());
                value_state.set(parsed.clone());
                text_state.set(parsed.to_string());
                error_state.set(None);
            }
            Err(err) => error_state.set(Some(err)),
        })
    };

    let onkeydown = {
        let on_commit = on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_commit.emit(());
            }
        })
    };

    StoredInput {
        text: (*text_state).clone(),
        value: (*value_state).clone(),
        error: (*error_state).clone(),
        on_text_input,
        on_commit,
        onkeydown,
    }
}

/// State hook for a persisted checkbox. Returns the current value and an
/// `onchange` callback that stores every toggle.
#[hook]
pub fn use_stored_toggle(key: &'static str, default: bool) -> (bool, Callback<Event>) {
    let state = use_state(|| prefs::get(key, default));

    let onchange = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let checked = input.checked();
            prefs::set(key, &checked);
            state.set(checked);
        })
    };

    (*state, onchange)
}
