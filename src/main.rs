extern crate ct_water;

use anyhow::Context;
use clap::Parser;
use csv::WriterBuilder;
use ct_water::{run_tower, LoadUnits, TowerReport};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct TowerArgs {
    /// Hourly cooling load profile (one header row, 8760 rows)
    #[arg(default_value = "inputs/cooling_hourly.csv")]
    cooling_file: String,
    /// Hourly weather data (TMY-style, 18 metadata rows then a header row)
    #[arg(default_value = "inputs/weather_data.csv")]
    weather_file: String,
    /// Units of the cooling profile values
    #[arg(long, default_value = "btuh")]
    units: LoadUnits,
    /// Cycles of concentration of the circulating water
    #[arg(long, default_value_t = 5.)]
    cycles: f64,
    /// Fraction of condenser water flow lost as drift
    #[arg(long, default_value_t = 0.002)]
    drift: f64,
    /// Condenser water range (entering minus leaving temperature), in °F
    #[arg(long, default_value_t = 10.)]
    dt: f64,
    /// Write the hourly flow and make-up profiles to this CSV file
    #[arg(long, short)]
    output_file: Option<String>,
    /// Print the summary as JSON instead of plain text
    #[arg(long, default_value_t = false)]
    json_summary: bool,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let args = TowerArgs::parse();

    let cooling_file = BufReader::new(
        File::open(&args.cooling_file)
            .with_context(|| format!("could not open cooling profile {}", args.cooling_file))?,
    );
    let weather_file = BufReader::new(
        File::open(&args.weather_file)
            .with_context(|| format!("could not open weather data {}", args.weather_file))?,
    );

    let report = run_tower(
        cooling_file,
        weather_file,
        args.units,
        args.cycles,
        args.drift,
        args.dt,
    )?;

    if let Some(output_file) = &args.output_file {
        write_hourly_output_file(output_file, &report)?;
    }

    if args.json_summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "total annual make-up water: {:.1} gpm-hours",
            report.total_annual_water_make_up
        );
        println!(
            "peak make-up water: {:.3} gpm at hour {}",
            report.peak_water_make_up, report.peak_water_make_up_hour
        );
        println!(
            "design wet bulb: {:.1}°F on {}",
            report.design_wet_bulb, report.design_day
        );
        println!(
            "design entering air: {:.1}°F dry bulb, {:.5} lb/lb, {:.2} btu/lb",
            report.design_air_state.coincident_dry_bulb,
            report.design_air_state.humidity_ratio,
            report.design_air_state.enthalpy
        );
        println!(
            "1% wet bulb: {:.1}°F, mean dry bulb: {:.1}°F",
            report.weather_stats.wet_bulb_1_percent, report.weather_stats.mean_dry_bulb
        );
    }

    Ok(())
}

fn write_hourly_output_file(output_file: &str, report: &TowerReport) -> anyhow::Result<()> {
    info!("writing hourly profiles to {output_file}");
    let file = File::create(output_file)?;
    let writer = BufWriter::new(file);
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(["Hour", "Cooling water flow [gpm]", "Make-up water [gpm]"])?;
    for (hour, (flow, make_up)) in report
        .cooling_water_flow
        .iter()
        .zip(&report.make_up_profile)
        .enumerate()
    {
        writer.write_record(&[hour.to_string(), flow.to_string(), make_up.to_string()])?;
    }
    writer.flush()?;

    Ok(())
}
