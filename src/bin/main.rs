mod common;
use std::env::{set_var, var};
use std::error::Error;

use chrono::prelude::*;
use clap::Parser;

use common::helpers::{build_observation, format_indices, parse_date, parse_herb_stage, NFDRError};
use log::{info, trace};
use nfdr::modules::nfdr::{config::NFDRModelConfig, models::DangerPipeline};
use nfdr::version::LONG_VERSION;

#[derive(Parser, Debug)]
#[command(
    version,
    long_version=LONG_VERSION,
    about="National Fire Danger Rating indices from a single day of weather observations",
    long_about="Computes drying factor, fine fuel moisture, adjusted fuel moisture, grass and timber spread indices, \
build up index and fire load rating from dry/wet bulb temperatures, precipitation, wind speed, \
yesterday's build up index and the herb stage of the district."
)]
struct Args {
    #[arg(long, help = "Dry bulb temperature")]
    dry: f32,

    #[arg(long, help = "Wet bulb temperature")]
    wet: f32,

    #[arg(long, help = "Snow on the ground")]
    snow: bool,

    #[arg(long, default_value_t = 0.0, help = "Precipitation of the last 24h [in]")]
    precipitation: f32,

    #[arg(long, help = "Wind speed [mph]")]
    wind_speed: f32,

    #[arg(long, default_value_t = 0.0, help = "Build up index of the previous day")]
    prior_bui: f32,

    #[arg(
        long,
        default_value = "cured",
        help = "Herb stage: cured|transition|green (or 1|2|3)"
    )]
    herb_stage: String,

    #[arg(long, default_value = "v1964", help = "Model version: v1964|legacy")]
    model_version: String,

    #[arg(long, help = "Run date in the format YYYYMMDDHHMM (defaults to now)")]
    date: Option<String>,

    #[arg(long, help = "Print the indices as JSON")]
    json: bool,
}

fn run(args: &Args) -> Result<String, NFDRError> {
    let date = match &args.date {
        Some(date_str) => parse_date(date_str)?,
        None => Utc::now(),
    };
    let herb_stage = parse_herb_stage(&args.herb_stage)?;
    let obs = build_observation(
        args.dry,
        args.wet,
        args.snow,
        args.precipitation,
        args.wind_speed,
        args.prior_bui,
        herb_stage,
    )?;
    trace!("Observation: {:?}", obs);

    let pipeline = DangerPipeline::new(NFDRModelConfig::new(&args.model_version));
    info!("Processing {}", date.format("%Y-%m-%d %H:%M"));
    let indices = pipeline.run(&obs)?;

    if args.json {
        serde_json::to_string_pretty(&indices)
            .map_err(|err| format!("Could not serialize indices: {err}").into())
    } else {
        Ok(format_indices(&indices))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if var("RUST_LOG").is_err() {
        set_var("RUST_LOG", "info")
    }
    pretty_env_logger::init();

    let start_time = Utc::now();
    let text = run(&args)?;
    println!("{}", text);
    trace!("Elapsed time: {} ms", (Utc::now() - start_time).num_milliseconds());
    Ok(())
}
