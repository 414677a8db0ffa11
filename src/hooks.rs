use crate::utils::{format_field, parse_or_zero, sanitize_digits, step_value, TimeField};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Text and committed value of one duration field.
#[derive(Clone, PartialEq, Debug)]
pub struct FieldState {
    pub field: TimeField,
    /// What the user sees; digits only.
    pub text: String,
    /// Clamped numeric value used when the timer starts.
    pub value: u64,
}

pub enum FieldAction {
    /// Raw text typed into the input.
    Input(String),
    /// Rewrite the text in canonical form (blur or Enter).
    Commit,
    /// Stepper press; positive steps up, negative steps down.
    Step(i64),
}

impl FieldState {
    pub fn new(field: TimeField, value: u64) -> Self {
        let value = field.clamp(value);
        Self {
            field,
            text: format_field(value),
            value,
        }
    }
}

impl Reducible for FieldState {
    type Action = FieldAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let field = self.field;
        match action {
            FieldAction::Input(raw) => {
                let text = sanitize_digits(&raw);
                let value = field.clamp(parse_or_zero(&text));
                Rc::new(Self { field, text, value })
            }
            FieldAction::Commit => Rc::new(Self::new(field, self.value)),
            FieldAction::Step(direction) => {
                Rc::new(Self::new(field, step_value(field, self.value, direction)))
            }
        }
    }
}

/// Holds the state and callbacks for a duration input field.
#[derive(Clone, PartialEq)]
pub struct TimeFieldHandle {
    pub field: TimeField,
    pub text: String,
    pub value: u64,
    /// Callback for the input's `oninput` event.
    pub on_input: Callback<InputEvent>,
    /// Normalize the displayed text; used on blur and Enter.
    pub on_commit: Callback<()>,
    /// Step the value; safe to emit repeatedly from a timer.
    pub on_step: Callback<i64>,
}

/// Custom hook to manage a sanitized, clamped duration field.
#[hook]
pub fn use_time_field(field: TimeField, initial: u64) -> TimeFieldHandle {
    let state = use_reducer_eq(|| FieldState::new(field, initial));

    let on_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(FieldAction::Input(input.value()));
        })
    };

    let on_commit = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(FieldAction::Commit))
    };

    let on_step = {
        let dispatcher = state.dispatcher();
        Callback::from(move |direction: i64| dispatcher.dispatch(FieldAction::Step(direction)))
    };

    TimeFieldHandle {
        field,
        text: state.text.clone(),
        value: state.value,
        on_input,
        on_commit,
        on_step,
    }
}
