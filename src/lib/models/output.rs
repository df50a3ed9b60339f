use chrono::{DateTime, Utc};
use ndarray::Array1;
use rayon::prelude::*;
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumProperty, EnumString};

use crate::constants::NODATAVAL;

/// Fire danger indices of one observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerIndices {
    /// Drying factor class [0-7]
    pub drying_factor: u8,
    /// Fine fuel moisture
    pub fine_fuel_moisture: f32,
    /// Adjusted (10 day lag) fuel moisture
    pub adjusted_fuel_moisture: f32,
    /// Grass spread index
    pub grass_spread_index: f32,
    /// Timber spread index
    pub timber_spread_index: f32,
    /// Build up index
    pub build_up_index: f32,
    /// Fire load rating (man-hour base)
    pub fire_load_index: f32,
}

impl DangerIndices {
    pub fn get(&self, variable: &OutputVariableName) -> f32 {
        use OutputVariableName::*;
        match variable {
            df => self.drying_factor as f32,
            ffm => self.fine_fuel_moisture,
            adfm => self.adjusted_fuel_moisture,
            grass => self.grass_spread_index,
            timber => self.timber_spread_index,
            bui => self.build_up_index,
            fload => self.fire_load_index,
        }
    }
}

#[allow(non_camel_case_types)]
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    EnumString,
    EnumProperty,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum OutputVariableName {
    /// Drying Factor
    #[strum(props(long_name = "Drying Factor", units = "-"))]
    df,
    /// Fine Fuel Moisture
    #[strum(props(long_name = "Fine Fuel Moisture", units = "%"))]
    ffm,
    /// Adjusted (10 day lag) Fuel Moisture
    #[strum(props(long_name = "Adjusted (10 day lag) Fuel Moisture", units = "%"))]
    adfm,
    /// Grass Spread Index
    #[strum(props(long_name = "Grass Spread Index", units = "-"))]
    grass,
    /// Timber Spread Index
    #[strum(props(long_name = "Timber Spread Index", units = "-"))]
    timber,
    /// Build Up Index
    #[strum(props(long_name = "Build Up Index", units = "-"))]
    bui,
    /// Fire Load Rating
    #[strum(props(long_name = "Fire Load Rating (man-hour base)", units = "-"))]
    fload,
}

/// Indices of many sites for the same day, None where the observation was rejected
pub struct Output {
    pub time: DateTime<Utc>,
    pub data: Array1<Option<DangerIndices>>,
}

impl Output {
    pub fn new(time: DateTime<Utc>, data: Array1<Option<DangerIndices>>) -> Self {
        Self { time, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, variable: &OutputVariableName) -> Array1<f32> {
        let vec = self
            .data
            .par_iter()
            .map(|element| element.map_or(NODATAVAL, |indices| indices.get(variable)))
            .collect::<Vec<_>>();
        Array1::from_vec(vec)
    }
}
