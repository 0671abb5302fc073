use crate::config::{MAX_BOAT_KG, MAX_TOLERANCE_KG, MIN_BOAT_KG, MIN_TOLERANCE_KG, UNNAMED_ROWER};
use dragon_boat_scale::{Entry, Roster, Side, Suggestion};

/// Format kilograms with at most two decimals and no trailing zeros.
pub fn format_kg(kg: f64) -> String {
    let text = format!("{:.2}", kg);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

pub fn display_name(entry: &Entry) -> &str {
    if entry.name.trim().is_empty() {
        UNNAMED_ROWER
    } else {
        &entry.name
    }
}

/// Human-readable text for a suggestion, or `None` when there is nothing to do.
///
/// Seats that no longer exist render as an unnamed rower rather than failing;
/// the suggestion is recomputed on the next render anyway.
pub fn describe_suggestion(suggestion: &Suggestion, left: &Roster, right: &Roster) -> Option<String> {
    let blank = Entry::default();
    match *suggestion {
        Suggestion::Swap {
            left_index,
            right_index,
            resulting_difference,
        } => {
            let l = left.get(left_index).unwrap_or(&blank);
            let r = right.get(right_index).unwrap_or(&blank);
            Some(format!(
                "Swap {} ({} kg, left) with {} ({} kg, right). Final difference: {} kg",
                display_name(l),
                l.weight.trim(),
                display_name(r),
                r.weight.trim(),
                format_kg(resulting_difference)
            ))
        }
        Suggestion::Move {
            source_side,
            source_index,
            resulting_difference,
        } => {
            let source = match source_side {
                Side::Left => left,
                Side::Right => right,
            };
            let e = source.get(source_index).unwrap_or(&blank);
            Some(format!(
                "Move {} ({} kg) from the {} side to the {} side. Final difference: {} kg",
                display_name(e),
                e.weight.trim(),
                source_side,
                source_side.opposite(),
                format_kg(resulting_difference)
            ))
        }
        Suggestion::None => None,
    }
}

/// Generic numeric input validation; a decimal comma is accepted.
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim().replace(',', ".");
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Kilogram fields: like [`validate_numeric_input`], but `NaN` and infinities
/// (which `f64::from_str` accepts) are refused.
fn validate_kg_input(input: &str, min: f64, max: f64, field_name: &str) -> Result<f64, String> {
    let val = validate_numeric_input(input, Some(min), Some(max), field_name)?;
    if !val.is_finite() {
        return Err(format!("{} must be a valid number", field_name));
    }
    Ok(val)
}

/// Validate balance tolerance input
pub fn validate_tolerance(input: &str) -> Result<f64, String> {
    validate_kg_input(input, MIN_TOLERANCE_KG, MAX_TOLERANCE_KG, "Tolerance")
}

/// Validate max capacity / empty boat weight input
pub fn validate_boat_weight(input: &str, field_name: &str) -> Result<f64, String> {
    validate_kg_input(input, MIN_BOAT_KG, MAX_BOAT_KG, field_name)
}
