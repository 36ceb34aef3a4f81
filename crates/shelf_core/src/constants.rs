/// Shelf defaults (px, relative to the layout container top-left)
pub const DEFAULT_SHELF_W: f32 = 140.0;
pub const DEFAULT_SHELF_H: f32 = 90.0;

/// Resize floor: labels are unreadable below this
pub const MIN_SHELF_W: f32 = 100.0;
pub const MIN_SHELF_H: f32 = 70.0;

/// Cascade placement for newly added shelves
pub const CASCADE_STEP_X: f32 = 90.0;
pub const CASCADE_STEP_Y: f32 = 40.0;
pub const CASCADE_MARGIN: f32 = 10.0;
pub const CASCADE_COLUMNS: u32 = 5;

/// Number of entries in the fixed shelf color palette
pub const PALETTE_LEN: usize = 8;

/// Shelf map rendering
pub const MAP_MARGIN: f32 = 30.0; // margin around normalized node positions
pub const MAP_NODE_SIZE: f32 = 60.0; // node diameter (px)

/// Node lightness from the backend-supplied rank: min(base + rank*step, max)
pub const RANK_LIGHTNESS_BASE: f32 = 20.0;
pub const RANK_LIGHTNESS_STEP: f32 = 10.0;
pub const RANK_LIGHTNESS_MAX: f32 = 90.0;

/// Map hues: one for maximize mode, a two-group split for minimize mode
pub const HUE_MAXIMIZE: f32 = 211.0;
pub const HUE_MINIMIZE_EVEN: f32 = 354.0;
pub const HUE_MINIMIZE_ODD: f32 = 150.0;

/// Distance window for minimize-mode edge fading (px)
pub const DIST_FADE_MIN: f32 = 50.0;
pub const DIST_FADE_MAX: f32 = 400.0;

/// Confidence tiers for rule cards
pub const CONFIDENCE_HIGH: f64 = 0.7;
pub const CONFIDENCE_MEDIUM: f64 = 0.4;

/// Lift thresholds shared by map edges, matrix cells and detail panels
pub const LIFT_VERY_STRONG: f64 = 3.0;
pub const LIFT_STRONG: f64 = 2.0;
pub const LIFT_MODERATE: f64 = 1.5;
pub const LIFT_WEAK: f64 = 1.2;

/// Placement verdict distances (px) for relation details
pub const NEAR_DISTANCE: f32 = 100.0;
pub const FAR_DISTANCE: f32 = 200.0;
