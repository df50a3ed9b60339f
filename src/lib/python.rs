use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ndarray::Array1;
use pyo3::{exceptions::PyValueError, prelude::*, types::PyModule, wrap_pyfunction, Bound};
use strum::IntoEnumIterator;

use crate::{
    constants::NODATAVAL,
    models::{
        input::{HerbStage, Input, WeatherObservation},
        output::{DangerIndices, OutputVariableName},
    },
    modules::nfdr::{config::NFDRModelConfig, models::DangerPipeline},
};

#[pyclass(name = "WeatherObservation")]
#[derive(Clone)]
pub struct PyWeatherObservation {
    inner: WeatherObservation,
}

#[pymethods]
impl PyWeatherObservation {
    #[new]
    #[pyo3(
        signature = (
            dry,
            wet,
            wind_speed,
            snow_present=false,
            precipitation=0.0,
            prior_build_up_index=0.0,
            herb_stage=1
        )
    )]
    fn new(
        dry: f32,
        wet: f32,
        wind_speed: f32,
        snow_present: bool,
        precipitation: f32,
        prior_build_up_index: f32,
        herb_stage: u8,
    ) -> PyResult<Self> {
        let herb_stage =
            HerbStage::try_from(herb_stage).map_err(|err| PyValueError::new_err(err.to_string()))?;
        let inner = WeatherObservation {
            dry_bulb_temperature: dry,
            wet_bulb_temperature: wet,
            snow_present,
            precipitation,
            wind_speed,
            prior_build_up_index,
            herb_stage,
        };
        inner
            .validate()
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        Ok(Self { inner })
    }

    #[getter]
    fn herb_stage(&self) -> u8 {
        self.inner.herb_stage.code()
    }

    #[getter]
    fn snow_present(&self) -> bool {
        self.inner.snow_present
    }
}

#[pyclass(name = "DangerIndices")]
#[derive(Clone)]
pub struct PyDangerIndices {
    inner: DangerIndices,
}

#[pymethods]
impl PyDangerIndices {
    #[getter]
    fn drying_factor(&self) -> u8 {
        self.inner.drying_factor
    }

    #[getter]
    fn fine_fuel_moisture(&self) -> f32 {
        self.inner.fine_fuel_moisture
    }

    #[getter]
    fn adjusted_fuel_moisture(&self) -> f32 {
        self.inner.adjusted_fuel_moisture
    }

    #[getter]
    fn grass_spread_index(&self) -> f32 {
        self.inner.grass_spread_index
    }

    #[getter]
    fn timber_spread_index(&self) -> f32 {
        self.inner.timber_spread_index
    }

    #[getter]
    fn build_up_index(&self) -> f32 {
        self.inner.build_up_index
    }

    #[getter]
    fn fire_load_index(&self) -> f32 {
        self.inner.fire_load_index
    }

    fn get(&self, name: &str) -> PyResult<f32> {
        let variable = name
            .parse::<OutputVariableName>()
            .map_err(|_| PyValueError::new_err(format!("Unknown output variable '{name}'")))?;
        Ok(self.inner.get(&variable))
    }
}

#[pyclass(name = "Pipeline")]
pub struct PyPipeline {
    inner: DangerPipeline,
}

#[pymethods]
impl PyPipeline {
    #[new]
    #[pyo3(signature = (model_version="v1964"))]
    fn new(model_version: &str) -> Self {
        let config = NFDRModelConfig::new(model_version);
        Self {
            inner: DangerPipeline::new(config),
        }
    }

    #[getter]
    fn model_version(&self) -> String {
        self.inner.config().model_version.clone()
    }

    fn run(&self, obs: &PyWeatherObservation) -> PyResult<PyDangerIndices> {
        let inner = self
            .inner
            .run(&obs.inner)
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        Ok(PyDangerIndices { inner })
    }

    /// Evaluate many observations of the same day.
    /// Returns one list per output variable, nodata where the observation was rejected.
    fn run_batch(
        &self,
        py: Python<'_>,
        time: DateTime<Utc>,
        observations: Vec<Py<PyWeatherObservation>>,
    ) -> PyResult<HashMap<String, Vec<f32>>> {
        if observations.is_empty() {
            return Err(PyValueError::new_err(
                "Batch evaluation requires at least one observation",
            ));
        }
        let data = observations
            .into_iter()
            .map(|obs| obs.borrow(py).inner)
            .collect();
        let input = Input::new(time, Array1::from_vec(data));
        let output = self.inner.output(&input);
        Ok(OutputVariableName::iter()
            .map(|variable| (variable.to_string(), output.get(&variable).to_vec()))
            .collect())
    }
}

#[pyfunction]
#[pyo3(signature = (obs, model_version="v1964"))]
fn evaluate(obs: &PyWeatherObservation, model_version: &str) -> PyResult<PyDangerIndices> {
    PyPipeline::new(model_version).run(obs)
}

#[pyfunction]
fn available_output_variables() -> Vec<String> {
    OutputVariableName::iter().map(|v| v.to_string()).collect()
}

#[pyfunction]
fn nodata_value() -> f32 {
    NODATAVAL
}

#[pymodule]
fn nfdr_py(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyWeatherObservation>()?;
    module.add_class::<PyDangerIndices>()?;
    module.add_class::<PyPipeline>()?;

    module.add_function(wrap_pyfunction!(evaluate, module)?)?;
    module.add_function(wrap_pyfunction!(available_output_variables, module)?)?;
    module.add_function(wrap_pyfunction!(nodata_value, module)?)?;

    module.add("NFDR_VERSION", crate::version::FULL_VERSION)?;
    Ok(())
}
