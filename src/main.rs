//! Main module for the Dragon Boat Scale application using Yew.
//! Wires UI components, roster state, persistence and the balance chart.

use dragon_boat_scale::{
    apply, read_roster_from_csv_string, suggest, write_roster_to_csv_string, BalanceConfig,
    BalanceSummary, Roster, Side,
};
use gloo_timers::callback::Timeout;
use log::{info, warn};
use std::rc::Rc;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

mod chart;
mod components;
mod config;
mod hooks;
mod storage;
mod utils;

use chart::{init_balance_chart, update_balance_chart};
use components::{render_suggestion, SeatEdit, SeatField, SideCard, SummaryPanel};
use config::*;
use hooks::{use_validated_input, ValidatedInput};
use utils::{validate_boat_weight, validate_tolerance};

type Validator = Rc<dyn Fn(&str) -> Result<f64, String>>;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Create a debounced callback that cancels any previous pending call
fn debounce_callback<T: 'static>(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    callback: Callback<T>,
    value: T,
    delay_ms: u32,
) {
    // Dropping the old Timeout cancels it
    timer_handle.set(None);

    let timer_handle_clone = timer_handle.clone();
    let handle = Timeout::new(delay_ms, move || {
        callback.emit(value);
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}

fn save_both(left: &Roster, right: &Roster) {
    for (side, roster) in [(Side::Left, left), (Side::Right, right)] {
        if let Err(e) = storage::save_roster(side, roster) {
            warn!("Could not save {} side: {}", side, e);
        }
    }
}

fn apply_edit(roster: &Roster, edit: &SeatEdit) -> Roster {
    match edit.field {
        SeatField::Name => roster.with_name(edit.index, edit.value.clone()),
        SeatField::Weight => roster.with_weight(edit.index, edit.value.clone()),
    }
}

/// Render a numeric settings field backed by a validated input hook.
fn render_setting(id: &'static str, label: &'static str, field: &ValidatedInput<f64>) -> Html {
    let on_commit = field.on_commit.clone();
    let onkeydown = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            on_commit.emit(());
        }
    });
    html! {
        <div class="form-group">
            <label for={id}>{ label }</label>
            <input
                type="text"
                inputmode="decimal"
                id={id}
                value={field.text.clone()}
                class={if field.error.is_some() { "invalid" } else { "" }}
                oninput={field.on_text_input.clone()}
                onchange={field.on_commit.reform(|_| ())}
                onkeydown={onkeydown}
            />
            if let Some(ref err) = field.error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let left = use_state(|| storage::load_roster(Side::Left, SEATS_PER_SIDE));
    let right = use_state(|| storage::load_roster(Side::Right, SEATS_PER_SIDE));

    let tolerance = use_validated_input(
        DEFAULT_TOLERANCE_KG,
        Rc::new(validate_tolerance) as Validator,
    );
    let max_capacity = use_validated_input(
        DEFAULT_MAX_CAPACITY_KG,
        Rc::new(|s: &str| validate_boat_weight(s, "Max capacity")) as Validator,
    );
    let empty_boat = use_validated_input(
        DEFAULT_EMPTY_BOAT_KG,
        Rc::new(|s: &str| validate_boat_weight(s, "Empty boat weight")) as Validator,
    );

    let save_timer = use_state(|| None::<Timeout>);
    let settings_visible = use_state(|| false);
    let csv_text = use_state(String::new);
    let csv_message = use_state(|| None::<String>);

    let balance_config = BalanceConfig {
        capacity: SEATS_PER_SIDE,
        tolerance_kg: tolerance.value,
        max_capacity_kg: max_capacity.value,
        empty_boat_kg: empty_boat.value,
    };
    let summary = BalanceSummary::compute(&left, &right, &balance_config);
    let suggestion = suggest(&left, &right, balance_config.tolerance_kg);

    // Chart setup on mount
    use_effect_with((), |_| {
        init_balance_chart(CHART_CANVAS_ID, "Left", "Right");
    });

    {
        let deps = (summary.total_left, summary.total_right, summary.over_limit);
        use_effect_with(deps, |&(l, r, over)| {
            update_balance_chart(l, r, over);
        });
    }

    // Debounced save whenever either side changes
    {
        let save_timer = save_timer.clone();
        use_effect_with(((*left).clone(), (*right).clone()), move |rosters| {
            let save = Callback::from(|(l, r): (Roster, Roster)| save_both(&l, &r));
            debounce_callback(&save_timer, save, rosters.clone(), SAVE_DEBOUNCE_MS);
        });
    }

    let on_edit = {
        let left = left.clone();
        let right = right.clone();
        Callback::from(move |edit: SeatEdit| match edit.side {
            Side::Left => left.set(apply_edit(&left, &edit)),
            Side::Right => right.set(apply_edit(&right, &edit)),
        })
    };

    let on_apply = {
        let left = left.clone();
        let right = right.clone();
        let tolerance_kg = balance_config.tolerance_kg;
        Callback::from(move |_: MouseEvent| {
            // Apply only what these rosters yield, never a cached suggestion
            let fresh = suggest(&left, &right, tolerance_kg);
            if fresh.is_none() {
                return;
            }
            info!("Applying suggestion {:?}", fresh);
            let (next_left, next_right) = apply(&fresh, &left, &right);
            left.set(next_left);
            right.set(next_right);
        })
    };

    let on_reset = {
        let left = left.clone();
        let right = right.clone();
        let save_timer = save_timer.clone();
        Callback::from(move |_: MouseEvent| {
            save_timer.set(None);
            let (empty_left, empty_right) = (left.cleared(), right.cleared());
            save_both(&empty_left, &empty_right);
            left.set(empty_left);
            right.set(empty_right);
            info!("Rosters reset");
        })
    };

    let on_restore_defaults = {
        let tolerance_set = tolerance.set_value.clone();
        let max_set = max_capacity.set_value.clone();
        let empty_set = empty_boat.set_value.clone();
        Callback::from(move |_: MouseEvent| {
            tolerance_set.emit(DEFAULT_TOLERANCE_KG);
            max_set.emit(DEFAULT_MAX_CAPACITY_KG);
            empty_set.emit(DEFAULT_EMPTY_BOAT_KG);
        })
    };

    let csv_oninput = {
        let csv_text = csv_text.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            csv_text.set(area.value());
        })
    };

    let import_to = |side: Side| {
        let target = match side {
            Side::Left => left.clone(),
            Side::Right => right.clone(),
        };
        let capacity = balance_config.capacity;
        let csv_text = csv_text.clone();
        let csv_message = csv_message.clone();
        Callback::from(move |_: MouseEvent| {
            match read_roster_from_csv_string(&csv_text, capacity) {
                Ok(roster) => {
                    info!("Imported {} rowers into {} side", roster.occupied_count(), side);
                    csv_message.set(Some(format!(
                        "Loaded {} rowers into the {} side",
                        roster.occupied_count(),
                        side
                    )));
                    target.set(roster);
                }
                Err(e) => {
                    warn!("CSV import failed: {}", e);
                    csv_message.set(Some(e.to_string()));
                }
            }
        })
    };

    let export_from = |side: Side| {
        let source = match side {
            Side::Left => left.clone(),
            Side::Right => right.clone(),
        };
        let csv_text = csv_text.clone();
        let csv_message = csv_message.clone();
        Callback::from(move |_: MouseEvent| match write_roster_to_csv_string(&source) {
            Ok(text) => {
                csv_text.set(text);
                csv_message.set(None);
            }
            Err(e) => csv_message.set(Some(e.to_string())),
        })
    };

    html! {
        <div class="container">
            <h1>{ "Dragon Boat Scale" }</h1>

            <div class="sides">
                <SideCard side={Side::Left} roster={(*left).clone()} total_kg={summary.total_left} on_edit={on_edit.clone()} />
                <SideCard side={Side::Right} roster={(*right).clone()} total_kg={summary.total_right} on_edit={on_edit} />
            </div>

            <div class="summary-section">
                <SummaryPanel summary={summary} />
                { render_suggestion(&suggestion, &left, &right, on_apply) }

                <div class="chart-section">
                    <canvas id={CHART_CANVAS_ID}></canvas>
                </div>

                <button class="btn-primary" onclick={on_reset}>{ "Reset" }</button>
            </div>

            // Settings section (collapsible)
            <div class="settings-section">
                <button class="settings-toggle"
                    aria-expanded={(*settings_visible).to_string()}
                    onclick={
                        let settings_visible = settings_visible.clone();
                        Callback::from(move |_| settings_visible.set(!*settings_visible))
                    }
                >
                    <span class="settings-title">{ "Settings" }</span>
                </button>

                if *settings_visible {
                    <div class="settings-content">
                        <div class="form-row">
                            { render_setting("tolerance_input", "Balance tolerance (kg):", &tolerance) }
                            { render_setting("max_capacity_input", "Max boat capacity (kg):", &max_capacity) }
                            { render_setting("empty_boat_input", "Empty boat weight (kg):", &empty_boat) }
                        </div>
                        <button class="btn-secondary small" onclick={on_restore_defaults}>
                            { "Restore defaults" }
                        </button>

                        <div class="csv-section">
                            <label for="csv_input">{ "Roster CSV (name,weight per line):" }</label>
                            <textarea id="csv_input" rows="6" value={(*csv_text).clone()} oninput={csv_oninput} />
                            <div class="csv-actions">
                                <button class="btn-secondary small" onclick={import_to(Side::Left)}>{ "Import into left" }</button>
                                <button class="btn-secondary small" onclick={import_to(Side::Right)}>{ "Import into right" }</button>
                                <button class="btn-secondary small" onclick={export_from(Side::Left)}>{ "Export left" }</button>
                                <button class="btn-secondary small" onclick={export_from(Side::Right)}>{ "Export right" }</button>
                            </div>
                            if let Some(ref msg) = *csv_message {
                                <div class="csv-message">{ msg }</div>
                            }
                        </div>
                    </div>
                }
            </div>
        </div>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: initializes Yew renderer for the App component.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
