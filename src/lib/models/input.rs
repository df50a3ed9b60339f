use chrono::{DateTime, Utc};
use ndarray::Array1;

use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Vegetation cure state of the district
#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HerbStage {
    #[strum(to_string = "cured", serialize = "1")]
    Cured = 1,
    #[strum(to_string = "transition", serialize = "2")]
    Transition = 2,
    #[strum(to_string = "green", serialize = "3")]
    Green = 3,
}

impl HerbStage {
    /// numeric code used by the herb adjustment (1 = cured, 2 = transition, 3 = green)
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for HerbStage {
    type Error = InputError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(HerbStage::Cured),
            2 => Ok(HerbStage::Transition),
            3 => Ok(HerbStage::Green),
            _ => Err(InputError::InvalidHerbStage(code.to_string())),
        }
    }
}

/// Observation rejected before any stage of the pipeline runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("invalid herb stage '{0}': expected 1 (cured), 2 (transition) or 3 (green)")]
    InvalidHerbStage(String),

    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: f32 },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
}

/// Weather and site observation of a single day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// dry bulb temperature
    pub dry_bulb_temperature: f32,
    /// wet bulb temperature
    pub wet_bulb_temperature: f32,
    /// snow on the ground
    pub snow_present: bool,
    /// precipitation of the last 24h [in]
    pub precipitation: f32,
    /// wind speed [mph]
    pub wind_speed: f32,
    /// build up index of the previous day
    pub prior_build_up_index: f32,
    pub herb_stage: HerbStage,
}

impl WeatherObservation {
    /// Check every field, naming the first invalid one
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("dry_bulb_temperature", self.dry_bulb_temperature),
            ("wet_bulb_temperature", self.wet_bulb_temperature),
            ("precipitation", self.precipitation),
            ("wind_speed", self.wind_speed),
            ("prior_build_up_index", self.prior_build_up_index),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InputError::NonFinite {
                field: *field,
                value: *value,
            });
        }

        let non_negative = [
            ("precipitation", self.precipitation),
            ("wind_speed", self.wind_speed),
            ("prior_build_up_index", self.prior_build_up_index),
        ];
        if let Some((field, value)) = non_negative.iter().find(|(_, value)| *value < 0.0) {
            return Err(InputError::NegativeValue {
                field: *field,
                value: *value,
            });
        }
        Ok(())
    }
}

/// Observations of many sites for the same day
pub struct Input {
    pub time: DateTime<Utc>,
    pub data: Array1<WeatherObservation>,
}

impl Input {
    pub fn new(time: DateTime<Utc>, data: Array1<WeatherObservation>) -> Self {
        Self { time, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
