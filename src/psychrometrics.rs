//! Moist air property relations in IP units (°F, psi, btu/lb, lb water per lb
//! dry air), following the ASHRAE Handbook of Fundamentals correlations.
//!
//! All relations take the ambient pressure as an argument; the tower passes
//! its fixed sea-level pressure. Impossible states (dew point above dry bulb,
//! relative humidity outside 0..1, temperatures outside the correlation
//! range) are rejected with a [`PsychrometricError`].

use thiserror::Error;

// Validity range of the saturation vapour pressure correlation, in °F.
const MIN_CORRELATION_TEMP: f64 = -148.;
const MAX_CORRELATION_TEMP: f64 = 392.;
const FREEZING_POINT_WATER: f64 = 32.;
const ZERO_FAHRENHEIT_AS_RANKINE: f64 = 459.67;
// Ratio of the molecular masses of water and dry air.
const WATER_TO_DRY_AIR_MASS_RATIO: f64 = 0.621945;
// Smallest humidity ratio returned, so downstream relations stay defined.
const MIN_HUM_RATIO: f64 = 1e-7;
// Convergence tolerance for the wet bulb bisection, in °F.
const WET_BULB_TOLERANCE: f64 = 0.001;
const MAX_BISECTION_ITERATIONS: usize = 100;

#[derive(Clone, Copy, Debug, Error)]
pub enum PsychrometricError {
    #[error("temperature {0}°F is outside the {min}°F to {max}°F range of the saturation pressure correlation", min = MIN_CORRELATION_TEMP, max = MAX_CORRELATION_TEMP)]
    TemperatureOutOfRange(f64),
    #[error("relative humidity {0} is outside the range 0 to 1")]
    RelativeHumidityOutOfRange(f64),
    #[error("dew point temperature {dew_point}°F exceeds dry bulb temperature {dry_bulb}°F")]
    DewPointAboveDryBulb { dew_point: f64, dry_bulb: f64 },
    #[error("wet bulb temperature {wet_bulb}°F exceeds dry bulb temperature {dry_bulb}°F")]
    WetBulbAboveDryBulb { wet_bulb: f64, dry_bulb: f64 },
    #[error("vapour pressure {0} psi is negative")]
    NegativeVapourPressure(f64),
    #[error("humidity ratio {0} is negative")]
    NegativeHumidityRatio(f64),
    #[error("wet bulb bisection failed to converge for dry bulb {0}°F")]
    WetBulbNotConverged(f64),
}

fn to_rankine(temp_f: f64) -> f64 {
    temp_f + ZERO_FAHRENHEIT_AS_RANKINE
}

/// Saturation vapour pressure over liquid water (or ice below freezing), in
/// psi, from the Hyland-Wexler correlations.
pub fn saturation_vapour_pressure(temp: f64) -> Result<f64, PsychrometricError> {
    if !(MIN_CORRELATION_TEMP..=MAX_CORRELATION_TEMP).contains(&temp) {
        return Err(PsychrometricError::TemperatureOutOfRange(temp));
    }

    let t = to_rankine(temp);
    let ln_pws = if temp <= FREEZING_POINT_WATER {
        -1.021_416_5e4 / t - 4.893_242_8 - 5.376_579_4e-3 * t
            + 1.920_237_7e-7 * t.powi(2)
            + 3.557_583_2e-10 * t.powi(3)
            - 9.034_468_8e-14 * t.powi(4)
            + 4.163_501_9 * t.ln()
    } else {
        -1.044_039_7e4 / t - 1.129_465e1 - 2.702_235_5e-2 * t
            + 1.289_036e-5 * t.powi(2)
            - 2.478_068_1e-9 * t.powi(3)
            + 6.545_967_3 * t.ln()
    };

    Ok(ln_pws.exp())
}

/// Partial pressure of water vapour in moist air, in psi.
pub fn vapour_pressure_from_rel_hum(
    dry_bulb: f64,
    rel_hum: f64,
) -> Result<f64, PsychrometricError> {
    if !(0. ..=1.).contains(&rel_hum) {
        return Err(PsychrometricError::RelativeHumidityOutOfRange(rel_hum));
    }

    Ok(saturation_vapour_pressure(dry_bulb)? * rel_hum)
}

pub fn hum_ratio_from_vapour_pressure(
    vapour_pressure: f64,
    pressure: f64,
) -> Result<f64, PsychrometricError> {
    if vapour_pressure < 0. {
        return Err(PsychrometricError::NegativeVapourPressure(vapour_pressure));
    }

    let hum_ratio = WATER_TO_DRY_AIR_MASS_RATIO * vapour_pressure / (pressure - vapour_pressure);
    Ok(hum_ratio.max(MIN_HUM_RATIO))
}

pub fn hum_ratio_from_rel_hum(
    dry_bulb: f64,
    rel_hum: f64,
    pressure: f64,
) -> Result<f64, PsychrometricError> {
    hum_ratio_from_vapour_pressure(vapour_pressure_from_rel_hum(dry_bulb, rel_hum)?, pressure)
}

/// Humidity ratio of saturated air at the given temperature.
pub fn saturation_hum_ratio(temp: f64, pressure: f64) -> Result<f64, PsychrometricError> {
    hum_ratio_from_vapour_pressure(saturation_vapour_pressure(temp)?, pressure)
}

pub fn hum_ratio_from_dew_point(dew_point: f64, pressure: f64) -> Result<f64, PsychrometricError> {
    saturation_hum_ratio(dew_point, pressure)
}

/// Specific enthalpy of moist air, in btu/lb of dry air.
pub fn moist_air_enthalpy(dry_bulb: f64, hum_ratio: f64) -> Result<f64, PsychrometricError> {
    if hum_ratio < 0. {
        return Err(PsychrometricError::NegativeHumidityRatio(hum_ratio));
    }

    Ok(0.240 * dry_bulb + hum_ratio * (1061. + 0.444 * dry_bulb))
}

/// Humidity ratio from dry bulb and wet bulb temperatures, with separate
/// relations above and below freezing.
pub fn hum_ratio_from_wet_bulb(
    dry_bulb: f64,
    wet_bulb: f64,
    pressure: f64,
) -> Result<f64, PsychrometricError> {
    if wet_bulb > dry_bulb {
        return Err(PsychrometricError::WetBulbAboveDryBulb { wet_bulb, dry_bulb });
    }

    let ws_star = saturation_hum_ratio(wet_bulb, pressure)?;
    let hum_ratio = if wet_bulb >= FREEZING_POINT_WATER {
        ((1093. - 0.556 * wet_bulb) * ws_star - 0.240 * (dry_bulb - wet_bulb))
            / (1093. + 0.444 * dry_bulb - wet_bulb)
    } else {
        ((1220. - 0.04 * wet_bulb) * ws_star - 0.240 * (dry_bulb - wet_bulb))
            / (1220. + 0.444 * dry_bulb - 0.48 * wet_bulb)
    };

    Ok(hum_ratio.max(MIN_HUM_RATIO))
}

/// Wet bulb temperature from dry bulb and dew point, in °F.
///
/// The wet bulb always lies between the dew point and the dry bulb, so it is
/// found by bisecting that interval until the humidity ratio implied by the
/// trial wet bulb matches the one implied by the dew point.
pub fn wet_bulb_from_dew_point(
    dry_bulb: f64,
    dew_point: f64,
    pressure: f64,
) -> Result<f64, PsychrometricError> {
    if dew_point > dry_bulb {
        return Err(PsychrometricError::DewPointAboveDryBulb {
            dew_point,
            dry_bulb,
        });
    }

    let hum_ratio = hum_ratio_from_dew_point(dew_point, pressure)?;
    let mut lower = dew_point;
    let mut upper = dry_bulb;
    let mut wet_bulb = (lower + upper) / 2.;
    let mut iterations = 0;

    while upper - lower > WET_BULB_TOLERANCE {
        if iterations > MAX_BISECTION_ITERATIONS {
            return Err(PsychrometricError::WetBulbNotConverged(dry_bulb));
        }
        if hum_ratio_from_wet_bulb(dry_bulb, wet_bulb, pressure)? > hum_ratio {
            upper = wet_bulb;
        } else {
            lower = wet_bulb;
        }
        wet_bulb = (lower + upper) / 2.;
        iterations += 1;
    }

    Ok(wet_bulb)
}
