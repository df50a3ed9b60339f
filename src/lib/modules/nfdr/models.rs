use log::{trace, warn};
use ndarray::Zip;

use crate::models::{
    input::{Input, InputError, WeatherObservation},
    output::{DangerIndices, Output},
};

use super::{
    config::NFDRModelConfig,
    functions::{no_snow_branch_fn, snow_branch_fn},
};

// National Fire Danger Rating
// Source: U.S. Forest Service computer routine for the 1964 fire danger rating system

/// The only fork of the pipeline, chosen once per observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineBranch {
    /// snow on the ground: only the build up index is computed
    Snow,
    /// full chain: fuel moisture, drying factor, herb, build up, adjusted moisture, spread, fire load
    NoSnow,
}

impl PipelineBranch {
    pub fn select(obs: &WeatherObservation) -> Self {
        if obs.snow_present {
            PipelineBranch::Snow
        } else {
            PipelineBranch::NoSnow
        }
    }

    fn run(&self, obs: &WeatherObservation, config: &NFDRModelConfig) -> DangerIndices {
        match self {
            PipelineBranch::Snow => snow_branch_fn(obs, config),
            PipelineBranch::NoSnow => no_snow_branch_fn(obs, config),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DangerPipeline {
    config: NFDRModelConfig,
}

impl DangerPipeline {
    pub fn new(config: NFDRModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NFDRModelConfig {
        &self.config
    }

    /// Validate the observation and run exactly one branch
    pub fn run(&self, obs: &WeatherObservation) -> Result<DangerIndices, InputError> {
        obs.validate()?;
        let branch = PipelineBranch::select(obs);
        trace!("Running {:?} branch", branch);
        Ok(branch.run(obs, &self.config))
    }

    /// Evaluate every observation of the input independently.
    /// Rejected observations are logged and left empty in the output.
    pub fn output(&self, input: &Input) -> Output {
        let data = Zip::indexed(&input.data).par_map_collect(|idx, obs| match self.run(obs) {
            Ok(indices) => Some(indices),
            Err(err) => {
                warn!("Skipping observation {}: {}", idx, err);
                None
            }
        });
        Output::new(input.time, data)
    }
}

/// Run the default model version on a single observation
pub fn danger_indices(obs: &WeatherObservation) -> Result<DangerIndices, InputError> {
    DangerPipeline::default().run(obs)
}
