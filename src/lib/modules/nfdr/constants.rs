/// National Fire Danger Rating (1964 piecewise-regression formula set)

// FINE FUEL MOISTURE: piecewise regression on the dry-wet bulb difference
/// upper bounds (exclusive) of the first three dry-wet difference bands
pub const DRY_WET_BREAKPOINTS: [f32; 3] = [4.5, 12.5, 27.5];
/// regression coefficient A for each band
pub const FFM_A: [f32; 4] = [30.0, 19.2, 13.8, 22.5];
/// regression coefficient B for each band (enters the formula as exp(B))
pub const FFM_B: [f32; 4] = [-0.1859, -0.0859, -0.579, -0.0774];

// DRYING FACTOR
/// fine fuel moisture breakpoints, scanned in order
pub const DRYING_BREAKPOINTS: [f32; 6] = [16.0, 10.0, 7.0, 5.0, 4.0, 3.0];
/// class returned when the moisture is not above any breakpoint
pub const DRYING_CLASS_MAX: u8 = 7;

// HERB ADJUSTMENT
/// moisture at or below this value is clamped to it
pub const FFM_MIN: f32 = 1.0;

// BUILD UP INDEX
/// daily precipitation [in] above which the build up index is reduced
pub const BUI_RAIN_TH: f32 = 0.1;
pub const BUI_SCALE: f32 = 50.0;
pub const BUI_RAIN_DECAY: f32 = 1.175;

// ADJUSTED (10-DAY LAG) FUEL MOISTURE
pub const ADFM_A1: f32 = 0.9;
pub const ADFM_A2: f32 = 0.5;
pub const ADFM_A3: f32 = 9.5;

// SPREAD INDEX
/// wind speed [mph] switching to the high-wind formula
pub const HIGH_WIND_TH: f32 = 14.0;
pub const SPREAD_HIGH_WIND_A: f32 = 0.00918;
pub const SPREAD_HIGH_WIND_OFFSET: f32 = 14.0;
pub const SPREAD_LOW_WIND_A: f32 = 0.01312;
pub const SPREAD_LOW_WIND_OFFSET: f32 = 6.0;
pub const SPREAD_EXP: f32 = 1.65;
pub const SPREAD_SHIFT: f32 = 3.0;
/// spread index assigned when fuels are saturated or the index floors out
pub const SPREAD_MIN: f32 = 1.0;

// FIRE LOAD INDEX
pub const FLOAD_TIMBER: f32 = 1.75;
pub const FLOAD_BUI: f32 = 0.32;
pub const FLOAD_OFFSET: f32 = 1.640;
/// linear rescaling used by the legacy transform
pub const FLOAD_LEGACY_SCALE: f32 = 10.0;

// MODEL VERSIONS
// The reference routine exists in two variants that disagree on the moisture
// scale. They are kept as two named model versions and never mixed:
//   "v1964"  - percent scale: herb step 5, threshold 30/33, ceiling 99, fire load 10^x
//   "legacy" - fractional scale: herb step 0.05, threshold 0.30/0.33, ceiling 0.99, fire load 10*x
pub const MODEL_VERSION_DEFAULT: &str = "v1964";
pub const MODEL_VERSION_LEGACY: &str = "legacy";

/// Scale-dependent constants of a model version
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConstants {
    /// moisture added per herb stage above "cured"
    pub herb_step: f32,
    /// both moistures at or above this value saturate the spread indices
    pub saturation_th: f32,
    /// moisture of extinction used by the spread formulas
    pub threshold_max: f32,
    /// upper bound of the high-wind spread indices
    pub spread_ceiling: f32,
    /// moisture reported when the fuel moisture stages are skipped (snow)
    pub saturated_moisture: f32,
}

pub const PERCENT_SCALE: ScaleConstants = ScaleConstants {
    herb_step: 5.0,
    saturation_th: 30.0,
    threshold_max: 33.0,
    spread_ceiling: 99.0,
    saturated_moisture: 99.0,
};

pub const FRACTIONAL_SCALE: ScaleConstants = ScaleConstants {
    herb_step: 0.05,
    saturation_th: 0.30,
    threshold_max: 0.33,
    spread_ceiling: 0.99,
    saturated_moisture: 0.99,
};
