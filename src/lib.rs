use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::prelude::*;

/// Default balancing parameters
pub mod defaults {
    pub const ROSTER_CAPACITY: usize = 10;
    pub const BALANCE_TOLERANCE_KG: f64 = 1.0;
    pub const MAX_CAPACITY_KG: f64 = 2000.0;
    pub const EMPTY_BOAT_KG: f64 = 250.0;
}

// Longest leading number, the way a browser's parseFloat reads it
static WEIGHT_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());
static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Parse weight text in kilograms. Accepts `,` or `.` as decimal separator.
///
/// Returns `None` for empty or unparsable text, which callers treat as an
/// unset weight: it contributes nothing to totals and is never moved or
/// swapped as a numeric contributor.
///
/// # Examples
/// ```
/// use dragon_boat_scale::parse_weight;
/// assert_eq!(parse_weight("72,5"), Some(72.5));
/// assert_eq!(parse_weight("80kg"), Some(80.0));
/// assert_eq!(parse_weight("abc"), None);
/// ```
pub fn parse_weight(text: &str) -> Option<f64> {
    let normalized = text.replace(',', ".");
    let prefix = WEIGHT_PREFIX_REGEX.find(&normalized)?;
    prefix
        .as_str()
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One seat: a rower's name and the weight text as it was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub weight: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
        }
    }

    pub fn weight_kg(&self) -> Option<f64> {
        parse_weight(&self.weight)
    }

    /// A slot is empty only when both fields are blank. A name without a
    /// weight still occupies the seat.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.weight.is_empty()
    }
}

/// Fixed-length side of the boat. Every edit returns a new roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<Entry>,
}

pub type SeatIndex = usize;

impl Roster {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![Entry::default(); capacity],
        }
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: SeatIndex) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn with_entry(&self, index: SeatIndex, entry: Entry) -> Roster {
        let mut next = self.clone();
        if let Some(slot) = next.entries.get_mut(index) {
            *slot = entry;
        }
        next
    }

    pub fn with_name(&self, index: SeatIndex, name: impl Into<String>) -> Roster {
        let mut next = self.clone();
        if let Some(slot) = next.entries.get_mut(index) {
            slot.name = name.into();
        }
        next
    }

    pub fn with_weight(&self, index: SeatIndex, weight: impl Into<String>) -> Roster {
        let mut next = self.clone();
        if let Some(slot) = next.entries.get_mut(index) {
            slot.weight = weight.into();
        }
        next
    }

    /// Same capacity, every seat blank.
    pub fn cleared(&self) -> Roster {
        Roster::new(self.len())
    }

    /// Pad with empty seats or drop trailing seats to reach `capacity`.
    pub fn resized(&self, capacity: usize) -> Roster {
        let mut entries = self.entries.clone();
        entries.resize(capacity, Entry::default());
        Roster { entries }
    }

    pub fn occupied_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_empty()).count()
    }

    /// Seats with a parseable weight, in index order.
    fn weighted(&self) -> impl Iterator<Item = (SeatIndex, f64)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, e)| e.weight_kg().map(|w| (idx, w)))
    }
}

/// Sum of all parseable weights; unset or unparsable weights add nothing.
pub fn total_weight(roster: &Roster) -> f64 {
    roster.weighted().map(|(_, w)| w).sum()
}

/// Tunables for balancing and the capacity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub capacity: usize,
    pub tolerance_kg: f64,
    pub max_capacity_kg: f64,
    pub empty_boat_kg: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::ROSTER_CAPACITY,
            tolerance_kg: defaults::BALANCE_TOLERANCE_KG,
            max_capacity_kg: defaults::MAX_CAPACITY_KG,
            empty_boat_kg: defaults::EMPTY_BOAT_KG,
        }
    }
}

impl BalanceConfig {
    /// Maximum crew load: boat capacity minus the weight of the empty boat.
    pub fn safe_limit(&self) -> f64 {
        self.max_capacity_kg - self.empty_boat_kg
    }
}

/// Totals derived from both sides, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSummary {
    pub total_left: f64,
    pub total_right: f64,
    pub total_combined: f64,
    /// Signed, `left - right`.
    pub difference: f64,
    pub gap: f64,
    pub safe_limit: f64,
    pub over_limit: bool,
}

impl BalanceSummary {
    pub fn compute(left: &Roster, right: &Roster, config: &BalanceConfig) -> Self {
        let total_left = total_weight(left);
        let total_right = total_weight(right);
        let total_combined = total_left + total_right;
        let difference = total_left - total_right;
        let safe_limit = config.safe_limit();
        Self {
            total_left,
            total_right,
            total_combined,
            difference,
            gap: difference.abs(),
            safe_limit,
            over_limit: total_combined > safe_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Suggestion {
    /// Exchange the left seat's entry with the right seat's entry.
    Swap {
        left_index: SeatIndex,
        right_index: SeatIndex,
        resulting_difference: f64,
    },
    /// Send one rower from `source_side` to the other side.
    Move {
        source_side: Side,
        source_index: SeatIndex,
        resulting_difference: f64,
    },
    None,
}

impl Suggestion {
    pub fn resulting_difference(&self) -> Option<f64> {
        match self {
            Suggestion::Swap {
                resulting_difference,
                ..
            }
            | Suggestion::Move {
                resulting_difference,
                ..
            } => Some(*resulting_difference),
            Suggestion::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Suggestion::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapCandidate {
    pub left_index: SeatIndex,
    pub right_index: SeatIndex,
    pub post_difference: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveCandidate {
    pub side: Side,
    pub index: SeatIndex,
    pub post_difference: f64,
}

/// Best single swap for a signed difference `diff = left - right`.
///
/// Pairs are visited left-index first, then right-index. A pair only replaces
/// the current best when it is strictly better, and the search starts from
/// `|diff|`, so `None` means no swap narrows the gap.
pub fn best_swap(left: &Roster, right: &Roster, diff: f64) -> Option<SwapCandidate> {
    let mut best: Option<SwapCandidate> = None;
    let mut best_post = diff.abs();

    for (i, wl) in left.weighted() {
        for (j, wr) in right.weighted() {
            let post = (diff - 2.0 * (wl - wr)).abs();
            if post < best_post {
                best_post = post;
                best = Some(SwapCandidate {
                    left_index: i,
                    right_index: j,
                    post_difference: post,
                });
            }
        }
    }
    best
}

/// Best single move off the heavier side (left when `diff > 0`).
///
/// Same ordering and seeding rules as [`best_swap`].
pub fn best_move(left: &Roster, right: &Roster, diff: f64) -> Option<MoveCandidate> {
    let (side, heavier) = if diff > 0.0 {
        (Side::Left, left)
    } else {
        (Side::Right, right)
    };
    let gap = diff.abs();
    let mut best: Option<MoveCandidate> = None;
    let mut best_post = gap;

    for (idx, w) in heavier.weighted() {
        let post = (gap - 2.0 * w).abs();
        if post < best_post {
            best_post = post;
            best = Some(MoveCandidate {
                side,
                index: idx,
                post_difference: post,
            });
        }
    }
    best
}

/// Propose the single swap or move that best narrows the gap between sides.
///
/// Returns [`Suggestion::None`] when the gap is already under `tolerance_kg`
/// or nothing improves it. A swap wins ties with a move.
pub fn suggest(left: &Roster, right: &Roster, tolerance_kg: f64) -> Suggestion {
    let diff = total_weight(left) - total_weight(right);
    if diff.abs() < tolerance_kg {
        debug!("Gap {:.2} kg under tolerance {} kg", diff.abs(), tolerance_kg);
        return Suggestion::None;
    }

    let swap = best_swap(left, right, diff);
    let mv = best_move(left, right, diff);
    let move_post = mv.map_or(diff.abs(), |m| m.post_difference);
    debug!(
        "diff={:.2} best swap={:?} best move={:?}",
        diff, swap, mv
    );

    match (swap, mv) {
        (Some(s), _) if s.post_difference <= move_post => Suggestion::Swap {
            left_index: s.left_index,
            right_index: s.right_index,
            resulting_difference: s.post_difference,
        },
        (_, Some(m)) => Suggestion::Move {
            source_side: m.side,
            source_index: m.index,
            resulting_difference: m.post_difference,
        },
        _ => Suggestion::None,
    }
}

/// Seat that receives a moved rower: the first empty slot, else the lightest.
///
/// Unparsable weights count as zero here, matching how totals are summed.
fn landing_slot(destination: &Roster) -> Option<SeatIndex> {
    if let Some(idx) = destination.entries().iter().position(Entry::is_empty) {
        return Some(idx);
    }
    let mut lightest: Option<(SeatIndex, f64)> = None;
    for (idx, entry) in destination.entries().iter().enumerate() {
        let w = entry.weight_kg().unwrap_or(0.0);
        if lightest.map_or(true, |(_, lw)| w < lw) {
            lightest = Some((idx, w));
        }
    }
    lightest.map(|(idx, _)| idx)
}

/// Carry out a suggestion, returning fresh `(left, right)` rosters.
///
/// The suggestion must come from these same rosters. Indices that no longer
/// exist leave both rosters unchanged.
pub fn apply(suggestion: &Suggestion, left: &Roster, right: &Roster) -> (Roster, Roster) {
    match *suggestion {
        Suggestion::None => (left.clone(), right.clone()),
        Suggestion::Swap {
            left_index,
            right_index,
            ..
        } => {
            let (Some(l), Some(r)) = (left.get(left_index), right.get(right_index)) else {
                warn!(
                    "Stale swap ignored: seats {}/{} out of range",
                    left_index, right_index
                );
                return (left.clone(), right.clone());
            };
            info!("Swapping left seat {} with right seat {}", left_index, right_index);
            (
                left.with_entry(left_index, r.clone()),
                right.with_entry(right_index, l.clone()),
            )
        }
        Suggestion::Move {
            source_side,
            source_index,
            ..
        } => {
            let (source, destination) = match source_side {
                Side::Left => (left, right),
                Side::Right => (right, left),
            };
            let Some(rower) = source.get(source_index).cloned() else {
                warn!(
                    "Stale move ignored: {} seat {} out of range",
                    source_side, source_index
                );
                return (left.clone(), right.clone());
            };
            let Some(slot) = landing_slot(destination) else {
                warn!("Move ignored: {} side has no seats", source_side.opposite());
                return (left.clone(), right.clone());
            };

            let mut source_next = source.with_entry(source_index, Entry::default());
            let displaced = destination.get(slot).cloned().unwrap_or_default();
            if !displaced.is_empty() {
                debug!(
                    "Seat {} on {} side full, displacing '{}' to {} seat {}",
                    slot,
                    source_side.opposite(),
                    displaced.name,
                    source_side,
                    source_index
                );
                source_next = source_next.with_entry(source_index, displaced);
            }
            let destination_next = destination.with_entry(slot, rower);
            info!(
                "Moved {} seat {} to {} seat {}",
                source_side,
                source_index,
                source_side.opposite(),
                slot
            );

            match source_side {
                Side::Left => (source_next, destination_next),
                Side::Right => (destination_next, source_next),
            }
        }
    }
}

#[derive(Debug)]
pub enum RosterError {
    TooManyRows { capacity: usize, found: usize },
    ExtraColumns { line: u64, found: usize },
    Csv(csv::Error),
    Encoding(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::TooManyRows { capacity, found } => write!(
                f,
                "Too many rowers: the side holds {}, but {} rows were given",
                capacity, found
            ),
            RosterError::ExtraColumns { line, found } => write!(
                f,
                "Line {}: expected name,weight but found {} columns (quote decimal commas, e.g. \"65,5\")",
                line, found
            ),
            RosterError::Csv(e) => write!(f, "Malformed CSV: {}", e),
            RosterError::Encoding(e) => write!(f, "Could not encode roster: {}", e),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

/// Read headerless `name,weight` rows into a roster of `capacity` seats.
///
/// Blank rows are skipped; a missing weight column leaves the weight unset.
/// An unquoted decimal comma such as `Bia,65,5` is read back as `65,5`; any
/// other row with more than two columns is rejected.
pub fn read_roster_from_csv_string(data: &str, capacity: usize) -> Result<Roster, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut entries = Vec::with_capacity(capacity);
    for record in reader.records() {
        let record = record?;
        let name = record.get(0).unwrap_or("");
        let weight = match (record.len(), record.get(1), record.get(2)) {
            (0..=2, w, _) => w.unwrap_or("").to_string(),
            (3, Some(whole), Some(frac))
                if DIGITS_REGEX.is_match(whole) && DIGITS_REGEX.is_match(frac) =>
            {
                format!("{},{}", whole, frac)
            }
            (found, _, _) => {
                return Err(RosterError::ExtraColumns {
                    line: record.position().map_or(0, |p| p.line()),
                    found,
                })
            }
        };
        let entry = Entry::new(name, weight);
        if entry.is_empty() {
            continue;
        }
        entries.push(entry);
    }

    if entries.len() > capacity {
        return Err(RosterError::TooManyRows {
            capacity,
            found: entries.len(),
        });
    }
    info!("Imported {} rowers from CSV", entries.len());
    Ok(Roster::from_entries(entries).resized(capacity))
}

/// Write the occupied seats of a roster as `name,weight` rows.
pub fn write_roster_to_csv_string(roster: &Roster) -> Result<String, RosterError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for entry in roster.entries().iter().filter(|e| !e.is_empty()) {
        writer.write_record([entry.name.as_str(), entry.weight.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RosterError::Encoding(e.to_string()))
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

/// JavaScript entry point for [`suggest`].
///
/// Takes both rosters as arrays of `{ name, weight }` objects and returns the
/// serialized suggestion, or an `Error` value when the input cannot be read.
#[wasm_bindgen(js_name = suggestBalance)]
pub fn suggest_balance(left_js: JsValue, right_js: JsValue, tolerance_kg: f64) -> JsValue {
    let (left, right): (Roster, Roster) = match (
        serde_wasm_bindgen::from_value(left_js),
        serde_wasm_bindgen::from_value(right_js),
    ) {
        (Ok(l), Ok(r)) => (l, r),
        (Err(e), _) | (_, Err(e)) => return js_error(format!("Failed to read roster: {}", e)),
    };
    let suggestion = suggest(&left, &right, tolerance_kg);
    serde_wasm_bindgen::to_value(&suggestion)
        .unwrap_or_else(|e| js_error(format!("Failed to write suggestion: {}", e)))
}

/// JavaScript entry point for [`apply`]; returns `[left, right]`.
#[wasm_bindgen(js_name = applySuggestion)]
pub fn apply_suggestion(suggestion_js: JsValue, left_js: JsValue, right_js: JsValue) -> JsValue {
    let suggestion: Suggestion = match serde_wasm_bindgen::from_value(suggestion_js) {
        Ok(s) => s,
        Err(e) => return js_error(format!("Failed to read suggestion: {}", e)),
    };
    let (left, right): (Roster, Roster) = match (
        serde_wasm_bindgen::from_value(left_js),
        serde_wasm_bindgen::from_value(right_js),
    ) {
        (Ok(l), Ok(r)) => (l, r),
        (Err(e), _) | (_, Err(e)) => return js_error(format!("Failed to read roster: {}", e)),
    };
    let rosters = apply(&suggestion, &left, &right);
    serde_wasm_bindgen::to_value(&rosters)
        .unwrap_or_else(|e| js_error(format!("Failed to write rosters: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(weights: &[&str], capacity: usize) -> Roster {
        let entries = weights
            .iter()
            .enumerate()
            .map(|(i, w)| Entry::new(format!("R{}", i), *w))
            .collect();
        Roster::from_entries(entries).resized(capacity)
    }

    fn combined(left: &Roster, right: &Roster) -> f64 {
        total_weight(left) + total_weight(right)
    }

    fn post_difference(left: &Roster, right: &Roster) -> f64 {
        (total_weight(left) - total_weight(right)).abs()
    }

    #[test]
    fn parse_weight_accepts_both_separators() {
        assert_eq!(parse_weight("72.5"), Some(72.5));
        assert_eq!(parse_weight("72,5"), Some(72.5));
        assert_eq!(parse_weight("  64 "), Some(64.0));
        assert_eq!(parse_weight("81 kg"), Some(81.0));
        assert_eq!(parse_weight(".5"), Some(0.5));
    }

    #[test]
    fn parse_weight_rejects_garbage() {
        assert_eq!(parse_weight(""), None);
        assert_eq!(parse_weight("   "), None);
        assert_eq!(parse_weight("heavy"), None);
        assert_eq!(parse_weight("kg80"), None);
        assert_eq!(parse_weight("1e999"), None);
    }

    #[test]
    fn total_weight_skips_unset_and_unparsable() {
        let r = Roster::from_entries(vec![
            Entry::new("Ana", "70"),
            Entry::new("Bia", ""),
            Entry::new("Caio", "n/a"),
            Entry::new("", "65,5"),
        ]);
        assert_eq!(total_weight(&r), 135.5);
        assert_eq!(total_weight(&Roster::new(10)), 0.0);
    }

    #[test]
    fn entry_with_name_only_is_occupied() {
        assert!(Entry::default().is_empty());
        assert!(!Entry::new("Ana", "").is_empty());
        assert!(!Entry::new("", "70").is_empty());
    }

    #[test]
    fn roster_edits_return_new_values() {
        let original = Roster::new(3);
        let edited = original.with_name(1, "Ana").with_weight(1, "70");
        assert_eq!(original, Roster::new(3));
        assert_eq!(edited.get(1), Some(&Entry::new("Ana", "70")));
        assert_eq!(edited.occupied_count(), 1);
        // out of range edits are ignored
        assert_eq!(edited.with_name(7, "Zé"), edited);
        assert_eq!(edited.cleared(), Roster::new(3));
    }

    #[test]
    fn equal_sides_are_balanced() {
        let left = roster(&["100"], 10);
        let right = roster(&["90", "10"], 10);
        assert_eq!(suggest(&left, &right, 1.0), Suggestion::None);
    }

    #[test]
    fn gap_under_tolerance_is_balanced() {
        let left = roster(&["70.5"], 10);
        let right = roster(&["70"], 10);
        assert_eq!(suggest(&left, &right, 1.0), Suggestion::None);
        // a wider tolerance swallows bigger gaps
        let left = roster(&["70", "2", "2"], 10);
        assert_eq!(suggest(&left, &right, 5.0), Suggestion::None);
        assert_ne!(suggest(&left, &right, 1.0), Suggestion::None);
    }

    #[test]
    fn empty_rosters_are_balanced() {
        assert_eq!(suggest(&Roster::new(10), &Roster::new(10), 1.0), Suggestion::None);
    }

    #[test]
    fn three_by_three_prefers_first_swap() {
        let left = roster(&["80", "80", "80"], 10);
        let right = roster(&["70", "70", "70"], 10);
        let s = suggest(&left, &right, 1.0);
        assert_eq!(
            s,
            Suggestion::Swap {
                left_index: 0,
                right_index: 0,
                resulting_difference: 10.0
            }
        );
        let (l, r) = apply(&s, &left, &right);
        assert_eq!(post_difference(&l, &r), 10.0);
    }

    #[test]
    fn no_improvement_returns_none() {
        // swap keeps the gap at 60, moving 100 makes it 140
        let left = roster(&["100"], 10);
        let right = roster(&["40"], 10);
        assert_eq!(best_swap(&left, &right, 60.0), None);
        assert_eq!(best_move(&left, &right, 60.0), None);
        assert_eq!(suggest(&left, &right, 1.0), Suggestion::None);
    }

    #[test]
    fn swap_ties_keep_lowest_indices() {
        let left = roster(&["", "75", "75"], 10);
        let right = roster(&["70", "70"], 10);
        // diff = 10, every 75<->70 swap lands at exactly 0
        let swap = best_swap(&left, &right, 10.0).unwrap();
        assert_eq!((swap.left_index, swap.right_index), (1, 0));
        assert_eq!(swap.post_difference, 0.0);
    }

    #[test]
    fn move_from_heavier_side() {
        let left = roster(&["70", "70", "10"], 10);
        let right = roster(&["130"], 10);
        let s = suggest(&left, &right, 1.0);
        assert_eq!(
            s,
            Suggestion::Move {
                source_side: Side::Left,
                source_index: 2,
                resulting_difference: 0.0
            }
        );
        let right_heavy = suggest(&right, &left, 1.0);
        assert!(matches!(
            right_heavy,
            Suggestion::Move {
                source_side: Side::Right,
                source_index: 2,
                ..
            }
        ));
    }

    #[test]
    fn move_strictly_improves() {
        let left = roster(&["70", "70", "10"], 10);
        let right = roster(&["130"], 10);
        let mv = best_move(&left, &right, 20.0).unwrap();
        assert!(mv.post_difference < 20.0);
        // the only candidate with w == |diff| gives the same gap back
        let left = roster(&["20"], 10);
        assert_eq!(best_move(&left, &Roster::new(10), 20.0), None);
    }

    #[test]
    fn swap_wins_tie_with_move() {
        // diff = 10: moving 5 -> 0, swapping 5 with 0 -> 0
        let left = roster(&["50", "5"], 10);
        let right = roster(&["45", "0"], 10);
        let s = suggest(&left, &right, 1.0);
        assert!(matches!(s, Suggestion::Swap { resulting_difference, .. } if resulting_difference == 0.0));
    }

    #[test]
    fn resulting_difference_matches_applied_rosters() {
        let left = roster(&["82", "91", "66", "74"], 10);
        let right = roster(&["60", "73", "58"], 10);
        let s = suggest(&left, &right, 1.0);
        let before = post_difference(&left, &right);
        let recorded = s.resulting_difference().unwrap();
        let (l, r) = apply(&s, &left, &right);
        assert!((post_difference(&l, &r) - recorded).abs() < 1e-9);
        assert!(recorded < before);
        assert_eq!(combined(&l, &r), combined(&left, &right));
    }

    #[test]
    fn apply_none_is_identity() {
        let left = roster(&["80"], 4);
        let right = roster(&["60"], 4);
        assert_eq!(apply(&Suggestion::None, &left, &right), (left, right));
    }

    #[test]
    fn apply_swap_exchanges_whole_entries() {
        let left = roster(&["80", "90"], 3);
        let right = roster(&["60"], 3);
        let s = Suggestion::Swap {
            left_index: 1,
            right_index: 0,
            resulting_difference: 0.0,
        };
        let (l, r) = apply(&s, &left, &right);
        assert_eq!(l.get(1), Some(&Entry::new("R0", "60")));
        assert_eq!(r.get(0), Some(&Entry::new("R1", "90")));
        assert_eq!(l.len(), 3);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn apply_move_uses_first_empty_slot() {
        let left = roster(&["80", "80", "30"], 4);
        let right = Roster::from_entries(vec![
            Entry::new("A", "70"),
            Entry::new("B", "70"),
            Entry::default(),
            Entry::new("C", "70"),
        ]);
        let s = Suggestion::Move {
            source_side: Side::Left,
            source_index: 2,
            resulting_difference: 0.0,
        };
        let (l, r) = apply(&s, &left, &right);
        assert_eq!(l.get(2), Some(&Entry::default()));
        assert_eq!(r.get(2), Some(&Entry::new("R2", "30")));
        assert_eq!(r.get(0), Some(&Entry::new("A", "70")));
        assert_eq!(combined(&l, &r), combined(&left, &right));
    }

    #[test]
    fn apply_move_into_full_side_displaces_lightest() {
        let left = roster(&["90", "85", "88"], 3);
        let right = Roster::from_entries(vec![
            Entry::new("A", "70"),
            Entry::new("B", "61"),
            Entry::new("C", "61"),
        ]);
        let s = Suggestion::Move {
            source_side: Side::Left,
            source_index: 1,
            resulting_difference: 0.0,
        };
        let (l, r) = apply(&s, &left, &right);
        assert_eq!(r.get(1), Some(&Entry::new("R1", "85")));
        assert_eq!(l.get(1), Some(&Entry::new("B", "61")));
        assert_eq!(r.get(2), Some(&Entry::new("C", "61")));
        assert_eq!(l.occupied_count() + r.occupied_count(), 6);
        assert_eq!(combined(&l, &r), combined(&left, &right));
    }

    #[test]
    fn apply_move_into_full_side_displaces_unweighed_seat_first() {
        let left = roster(&["90", "85"], 2);
        let right = Roster::from_entries(vec![
            Entry::new("A", "70"),
            Entry::new("B", "55"),
            Entry::new("Bia", ""),
            Entry::new("C", "n/a"),
        ]);
        let s = Suggestion::Move {
            source_side: Side::Left,
            source_index: 0,
            resulting_difference: 0.0,
        };
        let (l, r) = apply(&s, &left, &right);
        // name-only and unparsable seats weigh 0; the first of them is taken
        assert_eq!(r.get(2), Some(&Entry::new("R0", "90")));
        assert_eq!(l.get(0), Some(&Entry::new("Bia", "")));
        assert_eq!(r.get(3), Some(&Entry::new("C", "n/a")));
        assert_eq!(r.get(1), Some(&Entry::new("B", "55")));
        assert_eq!(l.occupied_count() + r.occupied_count(), 6);
        assert_eq!(combined(&l, &r), combined(&left, &right));
    }

    #[test]
    fn apply_move_from_right_lands_on_left() {
        // a name without a weight occupies seat 0 but offers no swap
        let left = Roster::from_entries(vec![Entry::new("Ana", "")]).resized(3);
        let right = roster(&["80", "75"], 3);
        let s = suggest(&left, &right, 1.0);
        let Suggestion::Move {
            source_side,
            source_index,
            ..
        } = s
        else {
            panic!("expected a move, got {:?}", s);
        };
        assert_eq!(source_side, Side::Right);
        // moving 80 or 75 both leave a 5 kg gap; the first seat wins
        assert_eq!(source_index, 0);
        let (l, r) = apply(&s, &left, &right);
        assert_eq!(l.occupied_count(), 2);
        assert_eq!(r.occupied_count(), 1);
        assert_eq!(post_difference(&l, &r), s.resulting_difference().unwrap());
    }

    #[test]
    fn stale_suggestion_is_ignored() {
        let left = roster(&["80"], 2);
        let right = roster(&["60"], 2);
        let s = Suggestion::Swap {
            left_index: 5,
            right_index: 0,
            resulting_difference: 0.0,
        };
        assert_eq!(apply(&s, &left, &right), (left.clone(), right.clone()));
        let s = Suggestion::Move {
            source_side: Side::Right,
            source_index: 9,
            resulting_difference: 0.0,
        };
        assert_eq!(apply(&s, &left, &right), (left, right));
    }

    #[test]
    fn reapplying_does_not_oscillate() {
        let left = roster(&["92", "88", "79", "71"], 10);
        let right = roster(&["68", "66", "75"], 10);
        let (l1, r1) = apply(&suggest(&left, &right, 1.0), &left, &right);
        let (l2, r2) = apply(&suggest(&l1, &r1, 1.0), &l1, &r1);
        assert!(post_difference(&l2, &r2) <= post_difference(&l1, &r1));
        assert!((l2.clone(), r2.clone()) != (left, right));
    }

    #[test]
    fn summary_reports_limit() {
        let config = BalanceConfig::default();
        assert_eq!(config.safe_limit(), 1750.0);
        let left = roster(&["100"; 10], 10);
        let right = roster(&["80"; 10], 10);
        let summary = BalanceSummary::compute(&left, &right, &config);
        assert_eq!(summary.total_combined, 1800.0);
        assert_eq!(summary.difference, 200.0);
        assert_eq!(summary.gap, 200.0);
        assert!(summary.over_limit);
    }

    #[test]
    fn csv_import_pads_to_capacity() {
        let data = "Ana, 70\n\nBia,65,5\nCaio\n";
        let r = read_roster_from_csv_string(data, 5).unwrap();
        assert_eq!(r.len(), 5);
        assert_eq!(r.get(0), Some(&Entry::new("Ana", "70")));
        assert_eq!(r.get(1), Some(&Entry::new("Bia", "65,5")));
        assert_eq!(total_weight(&r), 135.5);
        assert_eq!(r.get(2), Some(&Entry::new("Caio", "")));
        assert_eq!(r.occupied_count(), 3);
    }

    #[test]
    fn csv_import_rejects_extra_columns() {
        match read_roster_from_csv_string("Ana,70\nBia,65,kg\n", 5) {
            Err(RosterError::ExtraColumns { line, found }) => {
                assert_eq!((line, found), (2, 3));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            read_roster_from_csv_string("Bia,65,5,1\n", 5),
            Err(RosterError::ExtraColumns { found: 4, .. })
        ));
    }

    #[test]
    fn csv_import_rejects_overflow() {
        let data = "a,1\nb,2\nc,3\n";
        match read_roster_from_csv_string(data, 2) {
            Err(RosterError::TooManyRows { capacity, found }) => {
                assert_eq!((capacity, found), (2, 3));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn csv_export_skips_empty_seats() {
        let r = Roster::from_entries(vec![
            Entry::new("Ana", "70"),
            Entry::default(),
            Entry::new("Bia, Jr", "65,5"),
        ]);
        let text = write_roster_to_csv_string(&r).unwrap();
        assert_eq!(text, "Ana,70\n\"Bia, Jr\",\"65,5\"\n");
        let back = read_roster_from_csv_string(&text, 3).unwrap();
        assert_eq!(back.get(1), Some(&Entry::new("Bia, Jr", "65,5")));
        assert_eq!(back.get(2), Some(&Entry::default()));
    }

    #[test]
    fn suggestion_serializes_tagged() {
        let s = Suggestion::Move {
            source_side: Side::Left,
            source_index: 3,
            resulting_difference: 2.5,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"type":"move","source_side":"left","source_index":3,"resulting_difference":2.5}"#
        );
    }
}
