use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, Utc};
use nfdr::models::{
    input::{HerbStage, InputError, WeatherObservation},
    output::{DangerIndices, OutputVariableName},
};
use strum::{EnumProperty, IntoEnumIterator};

#[derive(Debug)]
pub struct NFDRError {
    msg: String,
}

impl From<String> for NFDRError {
    fn from(msg: String) -> Self {
        NFDRError { msg }
    }
}

impl From<NFDRError> for String {
    fn from(value: NFDRError) -> String {
        value.msg
    }
}

impl From<&str> for NFDRError {
    fn from(msg: &str) -> Self {
        NFDRError { msg: msg.into() }
    }
}

impl From<InputError> for NFDRError {
    fn from(error: InputError) -> Self {
        NFDRError {
            msg: format!("invalid observation: {error}"),
        }
    }
}

impl Display for NFDRError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for NFDRError {}

/// Parse a run date in the format YYYYMMDDHHMM
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>, NFDRError> {
    let date = NaiveDateTime::parse_from_str(date_str, "%Y%m%d%H%M")
        .map_err(|_| format!("Could not parse run date '{}'", date_str))?;
    Ok(DateTime::from_naive_utc_and_offset(date, Utc))
}

/// Parse a herb stage given by name or numeric code
pub fn parse_herb_stage(value: &str) -> Result<HerbStage, NFDRError> {
    value
        .parse::<HerbStage>()
        .map_err(|_| InputError::InvalidHerbStage(value.to_owned()).into())
}

/// Build the observation and check it before running the model
pub fn build_observation(
    dry: f32,
    wet: f32,
    snow_present: bool,
    precipitation: f32,
    wind_speed: f32,
    prior_build_up_index: f32,
    herb_stage: HerbStage,
) -> Result<WeatherObservation, NFDRError> {
    let obs = WeatherObservation {
        dry_bulb_temperature: dry,
        wet_bulb_temperature: wet,
        snow_present,
        precipitation,
        wind_speed,
        prior_build_up_index,
        herb_stage,
    };
    obs.validate()?;
    Ok(obs)
}

/// One labelled line per index
pub fn format_indices(indices: &DangerIndices) -> String {
    OutputVariableName::iter()
        .map(|variable| {
            let long_name = variable.get_str("long_name").unwrap_or_default();
            format!("The {} is: {}", long_name, indices.get(&variable))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_date_ok() {
        let date = parse_date("202407011230").expect("should parse");
        assert_eq!((date.year(), date.month(), date.day()), (2024, 7, 1));
        assert_eq!((date.hour(), date.minute()), (12, 30));
    }

    #[test]
    fn parse_date_fails_for_malformed_date() {
        assert!(parse_date("2024-07-01").is_err());
    }

    #[test]
    fn parse_herb_stage_names_the_value() {
        assert_eq!(parse_herb_stage("transition").ok(), Some(HerbStage::Transition));
        assert_eq!(parse_herb_stage("3").ok(), Some(HerbStage::Green));
        let err = parse_herb_stage("5").unwrap_err();
        assert!(err.to_string().contains("'5'"));
    }

    #[test]
    fn build_observation_rejects_negative_precipitation() {
        let result = build_observation(12.0, 10.0, false, -1.0, 15.0, 15.0, HerbStage::Cured);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("precipitation"));
    }

    #[test]
    fn format_indices_lists_every_variable() {
        let indices = DangerIndices {
            drying_factor: 2,
            fine_fuel_moisture: 8.0,
            adjusted_fuel_moisture: 10.0,
            grass_spread_index: 5.0,
            timber_spread_index: 7.0,
            build_up_index: 30.0,
            fire_load_index: 4.0,
        };
        let text = format_indices(&indices);
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("The Build Up Index is: 30"));
        assert!(text.contains("The Drying Factor is: 2"));
    }
}
