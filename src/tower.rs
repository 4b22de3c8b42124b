//! The cooling tower make-up water calculator.
//!
//! A [`Tower`] holds its operating parameters and two imported hourly series
//! (cooling load and ambient weather) and derives hourly and annual make-up
//! water figures from them, under the proof-of-concept assumptions of
//! constant entering/leaving water temperatures, sea-level pressure, constant
//! water quality and a 100% efficient tower.

use crate::errors::TowerError;
use crate::psychrometrics::{
    hum_ratio_from_rel_hum, hum_ratio_from_wet_bulb, moist_air_enthalpy, wet_bulb_from_dew_point,
};
use crate::read_cooling_profile::{cooling_profile_to_vec, LoadUnits};
use crate::read_weather_file::{weather_data_to_vec, AmbientConditions};
use crate::statistics::{mean, percentile};
use itertools::Itertools;
use serde::Serialize;
use std::io::Read;
use tracing::info;

/// Design entering/leaving condenser water temperatures, in °F.
pub const ENTERING_WATER_TEMP: f64 = 95.;
pub const LEAVING_WATER_TEMP: f64 = 85.;
/// Enthalpy of the condenser water at the design temperatures, in btu/lb.
pub const ENTERING_WATER_ENTHALPY: f64 = 62.95;
pub const LEAVING_WATER_ENTHALPY: f64 = 52.85;
/// Sea-level atmospheric pressure, in psi.
pub const ATMOSPHERIC_PRESSURE: f64 = 14.6959;

// 1 gpm of condenser water rejects 500 btu/h per °F of range
const BTUH_PER_GPM_DEGREE: f64 = 500.;
// evaporation + drift + blowdown losses as a fraction of condenser water flow
const MAKE_UP_FRACTION: f64 = 0.008;

/// Entering air state at the design (peak wet bulb) hour, for sizing design
/// airflow.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DesignAirState {
    pub wet_bulb: f64,            // in °F
    pub coincident_dry_bulb: f64, // in °F
    pub humidity_ratio: f64,      // in lb water / lb dry air
    pub enthalpy: f64,            // in btu/lb dry air
}

/// Summary statistics over the imported weather year, in °F.
///
/// The percentile values are ASHRAE-style design conditions: the 1% wet bulb
/// is exceeded for roughly 88 hours of the year.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct WeatherStats {
    pub max_wet_bulb: f64,
    pub wet_bulb_1_percent: f64,
    pub wet_bulb_2_percent: f64,
    pub max_dry_bulb: f64,
    pub dry_bulb_1_percent: f64,
    pub mean_dry_bulb: f64,
}

#[derive(Clone, Debug)]
pub struct Tower {
    cycles: f64,
    drift: f64,
    dt: f64,
    cooling_profile: Vec<f64>,
    ambient: AmbientConditions,
    air_entering_w: Vec<f64>,
    air_entering_h: Vec<f64>,
    air_entering_wb: Vec<f64>,
}

impl Default for Tower {
    fn default() -> Self {
        Self::new(5., 0.002, ENTERING_WATER_TEMP - LEAVING_WATER_TEMP)
    }
}

impl Tower {
    /// Construct a tower with empty series.
    ///
    /// Arguments:
    /// * `cycles` - cycles of concentration of the circulating water
    /// * `drift` - fraction of condenser water flow lost as drift
    /// * `dt` - condenser water range (entering minus leaving temperature), in °F
    pub fn new(cycles: f64, drift: f64, dt: f64) -> Self {
        Self {
            cycles,
            drift,
            dt,
            cooling_profile: vec![],
            ambient: AmbientConditions::default(),
            air_entering_w: vec![],
            air_entering_h: vec![],
            air_entering_wb: vec![],
        }
    }

    pub fn cycles(&self) -> f64 {
        self.cycles
    }

    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Condenser water range, in °F.
    pub fn water_range(&self) -> f64 {
        self.dt
    }

    /// Replaces the cooling load series from an hourly profile file.
    pub fn import_cooling_profile(
        &mut self,
        file: impl Read,
        units: LoadUnits,
    ) -> Result<(), TowerError> {
        self.cooling_profile = cooling_profile_to_vec(file, units)?;
        info!("imported {} hourly cooling loads", self.cooling_profile.len());
        Ok(())
    }

    /// Replaces the ambient series and derives the entering air state
    /// (humidity ratio, enthalpy, wet bulb) for every hour of the year.
    pub fn import_weather_data(&mut self, file: impl Read) -> Result<(), TowerError> {
        let ambient = weather_data_to_vec(file)?;

        let mut air_entering_w = Vec::with_capacity(ambient.len());
        let mut air_entering_h = Vec::with_capacity(ambient.len());
        let mut air_entering_wb = Vec::with_capacity(ambient.len());
        for hour in 0..ambient.len() {
            let dry_bulb = ambient.dry_bulb_temps[hour];
            let dew_point = ambient.dew_point_temps[hour];
            let rel_hum = ambient.relative_humidities[hour];
            let hum_ratio = hum_ratio_from_rel_hum(dry_bulb, rel_hum, ATMOSPHERIC_PRESSURE)?;
            air_entering_w.push(hum_ratio);
            air_entering_h.push(moist_air_enthalpy(dry_bulb, hum_ratio)?);
            air_entering_wb.push(wet_bulb_from_dew_point(
                dry_bulb,
                dew_point,
                ATMOSPHERIC_PRESSURE,
            )?);
        }

        self.ambient = ambient;
        self.air_entering_w = air_entering_w;
        self.air_entering_h = air_entering_h;
        self.air_entering_wb = air_entering_wb;
        info!("imported {} hourly weather records", self.ambient.len());
        Ok(())
    }

    pub fn ambient(&self) -> &AmbientConditions {
        &self.ambient
    }

    /// Entering air wet bulb temperatures over the year, in °F.
    pub fn entering_wet_bulbs(&self) -> &[f64] {
        &self.air_entering_wb
    }

    /// Entering air enthalpies over the year, in btu/lb dry air.
    pub fn entering_enthalpies(&self) -> &[f64] {
        &self.air_entering_h
    }

    /// Entering air humidity ratios over the year.
    pub fn entering_hum_ratios(&self) -> &[f64] {
        &self.air_entering_w
    }

    /// Annual profile of condenser water flow through the tower, in gpm.
    pub fn cooling_water_flow(&self) -> Result<Vec<f64>, TowerError> {
        if self.cooling_profile.is_empty() {
            return Err(TowerError::SeriesNotImported("cooling load"));
        }
        Ok(self
            .cooling_profile
            .iter()
            .map(|load| load / (self.dt * BTUH_PER_GPM_DEGREE))
            .collect())
    }

    /// Annual profile of make-up water drawn by the tower, as gpm averaged
    /// over each hour.
    pub fn annual_water_make_up_profile(&self) -> Result<Vec<f64>, TowerError> {
        Ok(self
            .cooling_water_flow()?
            .iter()
            .map(|flow| flow * MAKE_UP_FRACTION)
            .collect())
    }

    /// Total make-up water consumed over the year, in gpm-hours.
    ///
    /// Multiply by 60 for gallons.
    pub fn total_annual_water_make_up(&self) -> Result<f64, TowerError> {
        Ok(self.annual_water_make_up_profile()?.iter().sum())
    }

    /// Hour index (0-based) at which the make-up water draw peaks.
    pub fn peak_water_make_up_hour(&self) -> Result<usize, TowerError> {
        self.annual_water_make_up_profile()?
            .iter()
            .copied()
            .position_max_by(f64::total_cmp)
            .ok_or(TowerError::SeriesNotImported("cooling load"))
    }

    /// Largest hourly make-up water draw of the year, in gpm.
    pub fn peak_water_make_up(&self) -> Result<f64, TowerError> {
        let profile = self.annual_water_make_up_profile()?;
        Ok(profile[self.peak_water_make_up_hour()?])
    }

    fn design_hour(&self) -> Result<usize, TowerError> {
        self.air_entering_wb
            .iter()
            .copied()
            .position_max_by(f64::total_cmp)
            .ok_or(TowerError::SeriesNotImported("weather"))
    }

    /// The design wet bulb temperature: the annual maximum, in °F.
    pub fn design_wb(&self) -> Result<f64, TowerError> {
        Ok(self.air_entering_wb[self.design_hour()?])
    }

    /// Short "MM-DD-hour" label of the hour the design wet bulb occurs.
    pub fn design_day(&self) -> Result<String, TowerError> {
        let hour = self.design_hour()?;
        let date = &self.ambient.dates[hour];
        // drop a leading "YYYY-" (or "YYYY/") year prefix where present
        let month_day = date.get(5..).unwrap_or(date);
        Ok(format!("{month_day}-{}", self.ambient.hours[hour]))
    }

    /// Entering air state at the design hour.
    pub fn design_air_state(&self) -> Result<DesignAirState, TowerError> {
        let hour = self.design_hour()?;
        let wet_bulb = self.air_entering_wb[hour];
        let coincident_dry_bulb = self.ambient.dry_bulb_temps[hour];
        let humidity_ratio =
            hum_ratio_from_wet_bulb(coincident_dry_bulb, wet_bulb, ATMOSPHERIC_PRESSURE)?;
        let enthalpy = moist_air_enthalpy(coincident_dry_bulb, humidity_ratio)?;
        Ok(DesignAirState {
            wet_bulb,
            coincident_dry_bulb,
            humidity_ratio,
            enthalpy,
        })
    }

    /// Maxima, percentile design conditions and means over the weather year.
    pub fn weather_stats(&self) -> Result<WeatherStats, TowerError> {
        if self.air_entering_wb.is_empty() {
            return Err(TowerError::SeriesNotImported("weather"));
        }
        let max_dry_bulb = self
            .ambient
            .dry_bulb_temps
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(WeatherStats {
            max_wet_bulb: self.design_wb()?,
            wet_bulb_1_percent: percentile(&self.air_entering_wb, 99),
            wet_bulb_2_percent: percentile(&self.air_entering_wb, 98),
            max_dry_bulb,
            dry_bulb_1_percent: percentile(&self.ambient.dry_bulb_temps, 99),
            mean_dry_bulb: mean(&self.ambient.dry_bulb_temps),
        })
    }
}
