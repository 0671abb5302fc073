//! Pure Yew view components for the boat scale UI.
//!
//! Components here only render props and emit callbacks; roster state,
//! persistence and balancing live in `main.rs`.

use crate::utils::{describe_suggestion, format_kg};
use dragon_boat_scale::{BalanceSummary, Roster, SeatIndex, Side, Suggestion};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeatField {
    Name,
    Weight,
}

/// One keystroke in a seat's name or weight box.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatEdit {
    pub side: Side,
    pub index: SeatIndex,
    pub field: SeatField,
    pub value: String,
}

fn side_title(side: Side) -> &'static str {
    match side {
        Side::Left => "Left Side",
        Side::Right => "Right Side",
    }
}

#[derive(Properties, PartialEq)]
pub struct SideCardProps {
    pub side: Side,
    pub roster: Roster,
    pub total_kg: f64,
    pub on_edit: Callback<SeatEdit>,
}

/// Name/weight rows for every seat on one side, with the side total.
#[function_component(SideCard)]
pub fn side_card(props: &SideCardProps) -> Html {
    let side = props.side;
    html! {
        <div class="side-card">
            <h2>{ side_title(side) }</h2>
            { props.roster.entries().iter().enumerate().map(|(index, entry)| {
                let on_name = {
                    let on_edit = props.on_edit.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        on_edit.emit(SeatEdit { side, index, field: SeatField::Name, value: input.value() });
                    })
                };
                let on_weight = {
                    let on_edit = props.on_edit.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        on_edit.emit(SeatEdit { side, index, field: SeatField::Weight, value: input.value() });
                    })
                };
                let invalid_weight = !entry.weight.trim().is_empty() && entry.weight_kg().is_none();
                html! {
                    <div class="seat-row" key={index}>
                        <span class="seat-number">{ index + 1 }</span>
                        <input
                            type="text"
                            class="seat-name"
                            placeholder="Name"
                            value={entry.name.clone()}
                            oninput={on_name}
                        />
                        <input
                            type="text"
                            inputmode="decimal"
                            class={classes!("seat-weight", invalid_weight.then_some("invalid"))}
                            placeholder="kg"
                            value={entry.weight.clone()}
                            oninput={on_weight}
                        />
                    </div>
                }
            }).collect::<Html>() }
            <div class="side-total">{ format!("Total: {} kg", format_kg(props.total_kg)) }</div>
        </div>
    }
}

/// Renders the suggestion line and its apply button.
pub fn render_suggestion(
    suggestion: &Suggestion,
    left: &Roster,
    right: &Roster,
    on_apply: Callback<MouseEvent>,
) -> Html {
    match describe_suggestion(suggestion, left, right) {
        Some(text) => html! {
            <div class="suggestion">
                <p class="suggestion-text">{ text }</p>
                <button class="btn-secondary" onclick={on_apply}>{ "Apply suggestion" }</button>
            </div>
        },
        None => html! {
            <div class="suggestion">
                <p class="suggestion-text">{ "Already balanced, or not enough data." }</p>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct SummaryPanelProps {
    pub summary: BalanceSummary,
}

/// Combined load against the safe limit, and the gap between sides.
#[function_component(SummaryPanel)]
pub fn summary_panel(props: &SummaryPanelProps) -> Html {
    let s = &props.summary;
    html! {
        <div class="summary">
            <div class="summary-total">
                { format!("Total weight: {} kg / Limit: {} kg", format_kg(s.total_combined), format_kg(s.safe_limit)) }
            </div>
            if s.over_limit {
                <div class="capacity-status over">{ "Capacity exceeded!" }</div>
            } else {
                <div class="capacity-status ok">{ "Within safe capacity" }</div>
            }
            <div class="summary-gap">{ format!("Difference between sides: {} kg", format_kg(s.gap)) }</div>
        </div>
    }
}
