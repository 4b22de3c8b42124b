pub mod errors;
pub mod psychrometrics;
pub mod read_cooling_profile;
pub mod read_weather_file;
mod statistics;
pub mod tower;
pub mod units;

pub use crate::errors::TowerError;
pub use crate::read_cooling_profile::LoadUnits;
pub use crate::tower::{DesignAirState, Tower, WeatherStats};

use serde::Serialize;
use std::io::Read;
use tracing::info;

/// Everything derived from one run over the two input files.
///
/// The two hourly profiles are skipped when the report is serialized; they
/// are written out separately as CSV.
#[derive(Clone, Debug, Serialize)]
pub struct TowerReport {
    #[serde(skip_serializing)]
    pub cooling_water_flow: Vec<f64>,
    #[serde(skip_serializing)]
    pub make_up_profile: Vec<f64>,
    pub total_annual_water_make_up: f64,
    pub peak_water_make_up: f64,
    pub peak_water_make_up_hour: usize,
    pub design_wet_bulb: f64,
    pub design_day: String,
    pub design_air_state: DesignAirState,
    pub weather_stats: WeatherStats,
}

/// Builds a tower, imports both hourly series and derives every annual
/// make-up water and design-condition figure in one pass.
pub fn run_tower(
    cooling_profile: impl Read,
    weather_data: impl Read,
    units: LoadUnits,
    cycles: f64,
    drift: f64,
    dt: f64,
) -> Result<TowerReport, TowerError> {
    let mut tower = Tower::new(cycles, drift, dt);
    info!(
        "tower configured with {} cycles of concentration, drift fraction {}, range {}°F",
        tower.cycles(),
        tower.drift(),
        tower.water_range()
    );

    tower.import_cooling_profile(cooling_profile, units)?;
    tower.import_weather_data(weather_data)?;

    Ok(TowerReport {
        cooling_water_flow: tower.cooling_water_flow()?,
        make_up_profile: tower.annual_water_make_up_profile()?,
        total_annual_water_make_up: tower.total_annual_water_make_up()?,
        peak_water_make_up: tower.peak_water_make_up()?,
        peak_water_make_up_hour: tower.peak_water_make_up_hour()?,
        design_wet_bulb: tower.design_wb()?,
        design_day: tower.design_day()?,
        design_air_state: tower.design_air_state()?,
        weather_stats: tower.weather_stats()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::HOURS_PER_YEAR;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    #[rstest]
    fn should_run_a_tower_over_a_constant_year() {
        let mut cooling = String::from("Cooling Load {Btu/h}\n");
        for _ in 0..HOURS_PER_YEAR {
            cooling.push_str("100000\n");
        }

        let mut weather = String::new();
        for i in 0..18 {
            weather.push_str(&format!("station metadata row {i}\n"));
        }
        weather.push_str(
            "Date,HH:MM,Dry Bulb Temperature {C},Dew Point Temperature {C},Relative Humidity {%}\n",
        );
        for hour in 0..HOURS_PER_YEAR {
            weather.push_str(&format!("1990-01-01,{}:00,20,10,50\n", hour % 24 + 1));
        }

        let report = run_tower(
            Cursor::new(cooling),
            Cursor::new(weather),
            LoadUnits::Btuh,
            5.,
            0.002,
            10.,
        )
        .unwrap();

        assert_eq!(report.cooling_water_flow.len(), HOURS_PER_YEAR);
        assert_relative_eq!(report.cooling_water_flow[0], 25.);
        assert_relative_eq!(report.make_up_profile[0], 0.2);
        assert_relative_eq!(
            report.total_annual_water_make_up,
            0.2 * HOURS_PER_YEAR as f64,
            max_relative = 1e-9
        );
        assert_relative_eq!(report.peak_water_make_up, 0.2);
        assert_relative_eq!(report.design_wet_bulb, report.weather_stats.max_wet_bulb);
        assert_relative_eq!(
            report.design_air_state.coincident_dry_bulb,
            68. // 20°C everywhere
        );
    }
}
