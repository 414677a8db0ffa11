//! View components for the timer controls.

use crate::config::{HOLD_DELAY_TICKS, HOLD_REPEAT_MS};
use crate::hooks::TimeFieldHandle;
use gloo_timers::callback::Interval;
use std::cell::Cell;
use std::rc::Rc;
use wave_timer::{ControlState, PrimaryAction};
use yew::prelude::*;

/// Stepper button that steps once on press and keeps stepping while held.
#[derive(Properties, PartialEq)]
pub struct StepButtonProps {
    pub direction: i64,
    pub onstep: Callback<i64>,
}

#[function_component(StepButton)]
pub fn step_button(props: &StepButtonProps) -> Html {
    let repeat = use_mut_ref(|| None::<Interval>);

    let onmousedown = {
        let repeat = repeat.clone();
        let onstep = props.onstep.clone();
        let direction = props.direction;
        Callback::from(move |_: MouseEvent| {
            onstep.emit(direction);
            let ticks = Rc::new(Cell::new(0u32));
            let onstep = onstep.clone();
            let interval = Interval::new(HOLD_REPEAT_MS, move || {
                ticks.set(ticks.get() + 1);
                if ticks.get() > HOLD_DELAY_TICKS {
                    onstep.emit(direction);
                }
            });
            *repeat.borrow_mut() = Some(interval);
        })
    };

    let stop = {
        let repeat = repeat.clone();
        Callback::from(move |_: MouseEvent| {
            repeat.borrow_mut().take();
        })
    };

    let glyph = if props.direction > 0 { "+" } else { "−" };
    html! {
        <button type="button"
            class="step"
            onmousedown={onmousedown}
            onmouseup={stop.clone()}
            onmouseleave={stop}
        >
            { glyph }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimeFieldInputProps {
    pub handle: TimeFieldHandle,
}

/// Numeric input with increment/decrement steppers.
#[function_component(TimeFieldInput)]
pub fn time_field_input(props: &TimeFieldInputProps) -> Html {
    let handle = &props.handle;
    let label = handle.field.label();

    let onblur = {
        let commit = handle.on_commit.clone();
        Callback::from(move |_: FocusEvent| commit.emit(()))
    };
    let onkeydown = {
        let commit = handle.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    html! {
        <div class="time-field">
            <StepButton direction={1} onstep={handle.on_step.clone()} />
            <input type="text"
                inputmode="numeric"
                aria-label={label}
                value={handle.text.clone()}
                oninput={handle.on_input.clone()}
                onblur={onblur}
                onkeydown={onkeydown}
            />
            <StepButton direction={-1} onstep={handle.on_step.clone()} />
            <span class="time-field-label">{ label }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub state: ControlState,
    pub on_primary: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    let on_primary = props.on_primary.reform(|_: MouseEvent| ());
    let on_reset = props.on_reset.reform(|_: MouseEvent| ());
    let primary_class = match props.state.primary {
        PrimaryAction::Pause => "primary pausing",
        PrimaryAction::Start | PrimaryAction::Resume => "primary",
    };

    html! {
        <div class="controls">
            <button type="button" class={primary_class} onclick={on_primary}>
                { props.state.primary.label() }
            </button>
            <button type="button"
                class="reset"
                disabled={!props.state.reset_enabled}
                onclick={on_reset}
            >
                { "Reset" }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimerLabelProps {
    pub text: AttrValue,
}

#[function_component(TimerLabel)]
pub fn timer_label(props: &TimerLabelProps) -> Html {
    html! {
        <div id="timerLabel" class="timer-label">{ props.text.clone() }</div>
    }
}
