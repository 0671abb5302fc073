//! Application-level configuration constants.

use dragon_boat_scale::defaults;

// Boat layout
pub const SEATS_PER_SIDE: usize = defaults::ROSTER_CAPACITY;

// UI Behavior
pub const SAVE_DEBOUNCE_MS: u32 = 300;
pub const CHART_CANVAS_ID: &str = "balanceChart";

// localStorage keys, one per side
pub const STORAGE_KEY_LEFT: &str = "dragon-boat-scale.left";
pub const STORAGE_KEY_RIGHT: &str = "dragon-boat-scale.right";

// Default values for settings fields
pub const DEFAULT_TOLERANCE_KG: f64 = defaults::BALANCE_TOLERANCE_KG;
pub const DEFAULT_MAX_CAPACITY_KG: f64 = defaults::MAX_CAPACITY_KG;
pub const DEFAULT_EMPTY_BOAT_KG: f64 = defaults::EMPTY_BOAT_KG;

// Min/Max limits for settings fields
pub const MIN_TOLERANCE_KG: f64 = 0.0;
pub const MAX_TOLERANCE_KG: f64 = 50.0;
pub const MIN_BOAT_KG: f64 = 0.0;
pub const MAX_BOAT_KG: f64 = 10_000.0;

// Shown when a rower has no name
pub const UNNAMED_ROWER: &str = "rower";
