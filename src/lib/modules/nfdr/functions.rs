use crate::models::{input::WeatherObservation, output::DangerIndices};

use super::{config::NFDRModelConfig, constants::*};

// COEFFICIENT TABLES
/// Regression coefficients (A, B) for a dry-wet bulb difference.
/// Each breakpoint is exclusive: a difference equal to it selects the next band.
pub fn lookup_ab(difference: f32) -> (f32, f32) {
    let band = DRY_WET_BREAKPOINTS
        .iter()
        .position(|&breakpoint| difference < breakpoint)
        .unwrap_or(DRY_WET_BREAKPOINTS.len());
    (FFM_A[band], FFM_B[band])
}

/// Index of the first drying breakpoint strictly below the fine fuel moisture,
/// DRYING_CLASS_MAX when the moisture is not above any of them.
pub fn lookup_drying_class(ffm: f32) -> u8 {
    DRYING_BREAKPOINTS
        .iter()
        .position(|&breakpoint| ffm > breakpoint)
        .map(|idx| idx as u8)
        .unwrap_or(DRYING_CLASS_MAX)
}

// FINE FUEL MOISTURE
pub fn fine_fuel_moisture(
    dry: f32, // dry bulb temperature
    wet: f32, // wet bulb temperature
) -> f32 {
    let difference = dry - wet;
    let (a, b) = lookup_ab(difference);
    // B is a per-band multiplier exp(B), it does not scale with the difference
    a * f32::exp(b) * difference
}

// DRYING FACTOR
pub fn drying_factor(ffm: f32) -> u8 {
    lookup_drying_class(ffm)
}

// HERB ADJUSTMENT
fn herb_adjustment(ffm: f32, herb_code: u8, herb_step: f32) -> f32 {
    if ffm <= FFM_MIN {
        FFM_MIN
    } else {
        ffm + (herb_code as f32 - 1.0) * herb_step
    }
}

/// Herb adjustment on the percent scale (5% per stage)
pub fn herb_adjustment_percent(ffm: f32, herb_code: u8) -> f32 {
    herb_adjustment(ffm, herb_code, PERCENT_SCALE.herb_step)
}

/// Herb adjustment on the fractional scale (0.05 per stage)
pub fn herb_adjustment_fractional(ffm: f32, herb_code: u8) -> f32 {
    herb_adjustment(ffm, herb_code, FRACTIONAL_SCALE.herb_step)
}

// BUILD UP INDEX
/// Yesterday's build up index reduced by the precipitation of the last 24h.
/// Returned untouched when the precipitation does not exceed BUI_RAIN_TH.
pub fn precipitation_adjusted_bui(
    prior_bui: f32,     // build up index of the previous day
    precipitation: f32, // precipitation of the last 24h [in]
) -> f32 {
    if precipitation <= BUI_RAIN_TH {
        return prior_bui;
    }
    let recovery = (1.0 - f32::exp(-prior_bui / BUI_SCALE))
        * f32::exp(-BUI_RAIN_DECAY * (precipitation - BUI_RAIN_TH));
    let arg = 1.0 - recovery;
    if arg <= 0.0 {
        return 0.0;
    }
    let bui = -BUI_SCALE * f32::ln(arg);
    // clip to positive values (also drops a -0.0 from ln(1))
    if bui > 0.0 {
        bui
    } else {
        0.0
    }
}

/// Today's build up index: the precipitation correction comes first,
/// then the drying factor is added.
pub fn build_up_index(prior_bui: f32, precipitation: f32, drying_factor: u8) -> f32 {
    precipitation_adjusted_bui(prior_bui, precipitation) + drying_factor as f32
}

// ADJUSTED FUEL MOISTURE
pub fn adjusted_fuel_moisture(ffm: f32, bui: f32) -> f32 {
    ADFM_A1 * ffm + ADFM_A2 + ADFM_A3 * f32::exp(-bui / BUI_SCALE)
}

// SPREAD INDEX
fn spread_formula(coeff: f32, wind_speed: f32, moisture: f32, threshold_max: f32) -> f32 {
    // a moisture above the extinction value gives no spread contribution
    let dryness = f32::max(threshold_max - moisture, 0.0);
    coeff * wind_speed * dryness.powf(SPREAD_EXP) - SPREAD_SHIFT
}

/// Grass and timber spread indices.
/// Grass follows the adjusted fuel moisture, timber the fine fuel moisture.
pub fn spread_indices(
    wind_speed: f32, // [mph]
    adfm: f32,       // adjusted fuel moisture
    ffm: f32,        // fine fuel moisture (herb adjusted)
    scale: &ScaleConstants,
) -> (f32, f32) {
    if adfm >= scale.saturation_th && ffm >= scale.saturation_th {
        return (SPREAD_MIN, SPREAD_MIN);
    }

    if wind_speed >= HIGH_WIND_TH {
        let wind = wind_speed + SPREAD_HIGH_WIND_OFFSET;
        let mut grass = spread_formula(SPREAD_HIGH_WIND_A, wind, adfm, scale.threshold_max);
        let mut timber = spread_formula(SPREAD_HIGH_WIND_A, wind, ffm, scale.threshold_max);
        if grass > scale.spread_ceiling && timber > scale.spread_ceiling {
            grass = scale.spread_ceiling;
            timber = scale.spread_ceiling;
        }
        (grass, timber)
    } else {
        let wind = wind_speed + SPREAD_LOW_WIND_OFFSET;
        let mut grass = spread_formula(SPREAD_LOW_WIND_A, wind, adfm, scale.threshold_max);
        let mut timber = spread_formula(SPREAD_LOW_WIND_A, wind, ffm, scale.threshold_max);
        if timber <= 0.0 {
            timber = SPREAD_MIN;
        }
        // an exact zero grass index is kept
        if grass < 0.0 {
            grass = SPREAD_MIN;
        }
        (grass, timber)
    }
}

// FIRE LOAD INDEX
/// Log-linear fire load score, None when either operand is not positive
fn fire_load_score(timber: f32, bui: f32) -> Option<f32> {
    if timber <= 0.0 || bui <= 0.0 {
        return None;
    }
    Some(FLOAD_TIMBER * f32::log10(timber) + FLOAD_BUI * f32::log10(bui) - FLOAD_OFFSET)
}

/// Fire load rating (man-hour base), exponentiated: 10^score
pub fn fire_load_exponential(timber: f32, bui: f32) -> f32 {
    match fire_load_score(timber, bui) {
        Some(score) if score > 0.0 => f32::powf(10.0, score),
        _ => 0.0,
    }
}

/// Fire load rating as a linear score scaled by 10
pub fn fire_load_linear(timber: f32, bui: f32) -> f32 {
    match fire_load_score(timber, bui) {
        Some(score) if score > 0.0 => FLOAD_LEGACY_SCALE * score,
        _ => 0.0,
    }
}

// PIPELINE BRANCHES
/// Snow on the ground: no spread, only the build up index is carried
pub fn snow_branch_fn(obs: &WeatherObservation, config: &NFDRModelConfig) -> DangerIndices {
    let bui = precipitation_adjusted_bui(obs.prior_build_up_index, obs.precipitation);
    DangerIndices {
        drying_factor: 0,
        fine_fuel_moisture: config.scale.saturated_moisture,
        adjusted_fuel_moisture: config.scale.saturated_moisture,
        grass_spread_index: 0.0,
        timber_spread_index: 0.0,
        build_up_index: bui,
        fire_load_index: 0.0,
    }
}

pub fn no_snow_branch_fn(obs: &WeatherObservation, config: &NFDRModelConfig) -> DangerIndices {
    let ffm = fine_fuel_moisture(obs.dry_bulb_temperature, obs.wet_bulb_temperature);
    // the drying factor is taken before the herb adjustment
    let df = drying_factor(ffm);
    let ffm = config.herb_adjustment(ffm, obs.herb_stage.code());
    let bui = build_up_index(obs.prior_build_up_index, obs.precipitation, df);
    let adfm = adjusted_fuel_moisture(ffm, bui);
    let (grass, timber) = spread_indices(obs.wind_speed, adfm, ffm, &config.scale);
    let fload = if timber > 0.0 && bui > 0.0 {
        config.fire_load(timber, bui)
    } else {
        0.0
    };
    DangerIndices {
        drying_factor: df,
        fine_fuel_moisture: ffm,
        adjusted_fuel_moisture: adfm,
        grass_spread_index: grass,
        timber_spread_index: timber,
        build_up_index: bui,
        fire_load_index: fload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn lookup_ab_selects_band_by_difference() {
        assert_eq!(lookup_ab(2.0), (30.0, -0.1859));
        assert_eq!(lookup_ab(8.0), (19.2, -0.0859));
        assert_eq!(lookup_ab(20.0), (13.8, -0.579));
        assert_eq!(lookup_ab(40.0), (22.5, -0.0774));
    }

    #[test]
    fn lookup_ab_breakpoints_select_upper_band() {
        assert_eq!(lookup_ab(4.5), (19.2, -0.0859));
        assert_eq!(lookup_ab(12.5), (13.8, -0.579));
        assert_eq!(lookup_ab(27.5), (22.5, -0.0774));
        assert_eq!(lookup_ab(4.499), (30.0, -0.1859));
    }

    #[test]
    fn lookup_ab_negative_difference_is_first_band() {
        assert_eq!(lookup_ab(-3.0), (30.0, -0.1859));
    }

    #[test]
    fn lookups_are_idempotent() {
        for diff in [0.0, 4.5, 11.0, 27.5, 31.2] {
            assert_eq!(lookup_ab(diff), lookup_ab(diff));
        }
        for ffm in [0.5, 3.0, 4.2, 16.0, 16.1, 80.0] {
            assert_eq!(lookup_drying_class(ffm), lookup_drying_class(ffm));
        }
    }

    #[test]
    fn drying_class_scans_breakpoints_in_order() {
        assert_eq!(lookup_drying_class(50.0), 0);
        // breakpoints are strict: 16 is not above 16
        assert_eq!(lookup_drying_class(16.0), 1);
        assert_eq!(lookup_drying_class(12.0), 1);
        assert_eq!(lookup_drying_class(8.0), 2);
        assert_eq!(lookup_drying_class(6.0), 3);
        assert_eq!(lookup_drying_class(4.5), 4);
        assert_eq!(lookup_drying_class(3.5), 5);
        assert_eq!(lookup_drying_class(3.0), 7);
        assert_eq!(lookup_drying_class(0.2), 7);
    }

    #[test]
    fn fine_fuel_moisture_uses_exp_b_as_multiplier() {
        // band 0: 30 * exp(-0.1859) * 2
        assert_relative_eq!(fine_fuel_moisture(12.0, 10.0), 49.821_4, max_relative = 1e-5);
        assert_relative_eq!(
            fine_fuel_moisture(70.0, 69.5),
            30.0 * f32::exp(-0.1859) * 0.5,
            max_relative = 1e-6
        );
        // band 1 at its lower breakpoint
        assert_relative_eq!(fine_fuel_moisture(14.5, 10.0), 79.288_07, max_relative = 1e-5);
    }

    #[test]
    fn herb_adjustment_clamps_low_moisture() {
        assert_eq!(herb_adjustment_percent(0.4, 3), 1.0);
        assert_eq!(herb_adjustment_percent(1.0, 2), 1.0);
        assert_eq!(herb_adjustment_fractional(-2.0, 1), 1.0);
    }

    #[test]
    fn herb_adjustment_adds_step_per_stage() {
        assert_relative_eq!(herb_adjustment_percent(12.0, 1), 12.0);
        assert_relative_eq!(herb_adjustment_percent(12.0, 2), 17.0);
        assert_relative_eq!(herb_adjustment_percent(12.0, 3), 22.0);
        assert_relative_eq!(herb_adjustment_fractional(12.0, 3), 12.1, max_relative = 1e-6);
    }

    #[test]
    fn light_precipitation_keeps_prior_bui() {
        assert_eq!(precipitation_adjusted_bui(40.0, 0.05), 40.0);
        assert_eq!(precipitation_adjusted_bui(40.0, 0.1), 40.0);
        assert_eq!(build_up_index(40.0, 0.05, 3), 43.0);
    }

    #[test]
    fn heavy_precipitation_reduces_bui() {
        assert_relative_eq!(precipitation_adjusted_bui(15.0, 1.0), 4.716_622, max_relative = 1e-4);
        assert_relative_eq!(precipitation_adjusted_bui(200.0, 2.0), 5.563_084, max_relative = 1e-4);
        // precipitation correction happens before the drying factor is added
        assert_relative_eq!(build_up_index(15.0, 1.0, 2), 6.716_622, max_relative = 1e-4);
    }

    #[test]
    fn bui_reduction_never_negative() {
        assert_eq!(precipitation_adjusted_bui(0.0, 3.0), 0.0);
        assert_eq!(precipitation_adjusted_bui(-20.0, 0.5), 0.0);
        for prior in [0.0, 0.5, 10.0, 100.0, 1000.0] {
            for rain in [0.11, 0.5, 1.0, 5.0, 20.0] {
                assert!(precipitation_adjusted_bui(prior, rain) >= 0.0);
            }
        }
    }

    #[test]
    fn adjusted_fuel_moisture_blends_ffm_and_bui() {
        assert_relative_eq!(adjusted_fuel_moisture(10.0, 50.0), 12.994_855, max_relative = 1e-5);
        assert_relative_eq!(adjusted_fuel_moisture(0.0, 0.0), 10.0);
    }

    #[test]
    fn spread_saturated_fuels() {
        assert_eq!(spread_indices(30.0, 58.5, 54.8, &PERCENT_SCALE), (1.0, 1.0));
        assert_eq!(spread_indices(5.0, 30.0, 30.0, &PERCENT_SCALE), (1.0, 1.0));
        assert_eq!(spread_indices(5.0, 0.3, 0.3, &FRACTIONAL_SCALE), (1.0, 1.0));
    }

    #[test]
    fn spread_high_wind() {
        let (grass, timber) = spread_indices(20.0, 15.893_915, 12.455_349, &PERCENT_SCALE);
        assert_relative_eq!(grass, 30.808_05, max_relative = 1e-4);
        assert_relative_eq!(timber, 42.737_724, max_relative = 1e-4);
    }

    #[test]
    fn spread_high_wind_ceiling_applies_when_both_exceed() {
        let (grass, timber) = spread_indices(40.0, 4.409_407, 2.491_07, &PERCENT_SCALE);
        assert_eq!((grass, timber), (99.0, 99.0));
        // only timber above the ceiling: nothing is clamped
        let (grass, timber) = spread_indices(27.0, 4.409_407, 2.491_07, &PERCENT_SCALE);
        assert_relative_eq!(grass, 92.146_93, max_relative = 1e-4);
        assert_relative_eq!(timber, 102.908_56, max_relative = 1e-4);
    }

    #[test]
    fn spread_low_wind() {
        let (grass, timber) = spread_indices(8.0, 15.893_915, 12.455_349, &PERCENT_SCALE);
        assert_relative_eq!(grass, 16.895_754, max_relative = 1e-4);
        assert_relative_eq!(timber, 23.916_267, max_relative = 1e-4);
    }

    #[test]
    fn spread_low_wind_floors_negative_indices() {
        // adfm above the extinction moisture, ffm just below the threshold
        let (grass, timber) = spread_indices(0.0, 34.0, 29.0, &PERCENT_SCALE);
        assert_eq!(grass, 1.0);
        assert_eq!(timber, 1.0);
    }

    #[test]
    fn spread_moisture_above_extinction_is_finite() {
        let (grass, timber) = spread_indices(20.0, 45.0, 25.0, &PERCENT_SCALE);
        assert_abs_diff_eq!(grass, -3.0);
        assert!(timber.is_finite());
    }

    #[test]
    fn fire_load_requires_positive_operands() {
        assert_eq!(fire_load_exponential(0.0, 50.0), 0.0);
        assert_eq!(fire_load_exponential(20.0, 0.0), 0.0);
        assert_eq!(fire_load_exponential(-3.0, -1.0), 0.0);
        assert_eq!(fire_load_linear(0.0, 50.0), 0.0);
        assert_eq!(fire_load_linear(20.0, -2.0), 0.0);
    }

    #[test]
    fn fire_load_non_positive_score_is_zero() {
        // 1.75*log10(1) + 0.32*log10(100) - 1.64 < 0
        assert_eq!(fire_load_exponential(1.0, 100.0), 0.0);
        assert_eq!(fire_load_linear(1.0, 100.0), 0.0);
    }

    #[test]
    fn fire_load_transforms() {
        assert_relative_eq!(fire_load_exponential(20.0, 100.0), 18.914_83, max_relative = 1e-4);
        assert_relative_eq!(fire_load_linear(20.0, 100.0), 12.768_025, max_relative = 1e-4);
    }
}
