use crate::errors::TowerError;
use crate::units::{BTUH_PER_TON, HOURS_PER_YEAR};
use csv::ReaderBuilder as CsvReaderBuilder;
use std::fmt::{self, Display};
use std::io::Read;
use std::str::FromStr;

// 3,000 btu/h of compressor heat reaches the tower for every 12,000 btu/h of
// cooling delivered
const COMPRESSOR_HEAT_UPLIFT: f64 = 5. / 4.;

/// Units of the values in a cooling profile file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadUnits {
    #[default]
    Btuh,
    Tons,
}

impl LoadUnits {
    fn btuh_per_unit(&self) -> f64 {
        match self {
            LoadUnits::Btuh => 1.,
            LoadUnits::Tons => BTUH_PER_TON,
        }
    }
}

impl FromStr for LoadUnits {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "btuh" => Ok(LoadUnits::Btuh),
            "tons" => Ok(LoadUnits::Tons),
            _ => Err(TowerError::UnsupportedUnits(s.to_string())),
        }
    }
}

impl Display for LoadUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadUnits::Btuh => write!(f, "btuh"),
            LoadUnits::Tons => write!(f, "tons"),
        }
    }
}

/// Reads an hourly cooling load profile (one header row, then one numeric
/// column of 8760 rows) and uplifts every value for compressor heat, so the
/// returned series is the heat actually rejected at the tower in btu/h.
pub fn cooling_profile_to_vec(file: impl Read, units: LoadUnits) -> Result<Vec<f64>, TowerError> {
    let mut reader = CsvReaderBuilder::new().has_headers(true).from_reader(file);
    let scale = units.btuh_per_unit() * COMPRESSOR_HEAT_UPLIFT;

    let mut loads = Vec::with_capacity(HOURS_PER_YEAR);
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 2; // 1-based, counting the header row
        let raw = record.get(0).ok_or_else(|| {
            TowerError::MalformedInput(format!("cooling profile row {row} is empty"))
        })?;
        let load: f64 = raw.trim().parse().map_err(|_| {
            TowerError::MalformedInput(format!(
                "cooling profile row {row} is not a number: \"{raw}\""
            ))
        })?;
        loads.push(load * scale);
    }

    if loads.len() != HOURS_PER_YEAR {
        return Err(TowerError::MalformedInput(format!(
            "expected {HOURS_PER_YEAR} hourly cooling load rows, found {}",
            loads.len()
        )));
    }

    Ok(loads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    fn cooling_csv(rows: usize, load: f64) -> String {
        let mut csv = String::from("Cooling Load\n");
        for _ in 0..rows {
            csv.push_str(&format!("{load}\n"));
        }
        csv
    }

    #[rstest]
    fn should_uplift_btuh_loads_for_compressor_heat() {
        let loads =
            cooling_profile_to_vec(Cursor::new(cooling_csv(HOURS_PER_YEAR, 12_000.)), LoadUnits::Btuh)
                .unwrap();
        assert_eq!(loads.len(), HOURS_PER_YEAR);
        assert_relative_eq!(loads[0], 15_000.);
    }

    #[rstest]
    fn should_convert_tons_to_btuh() {
        let loads =
            cooling_profile_to_vec(Cursor::new(cooling_csv(HOURS_PER_YEAR, 1.)), LoadUnits::Tons)
                .unwrap();
        assert_relative_eq!(loads[0], 15_000.);
    }

    #[rstest]
    fn an_all_zero_profile_should_stay_zero() {
        let loads =
            cooling_profile_to_vec(Cursor::new(cooling_csv(HOURS_PER_YEAR, 0.)), LoadUnits::Btuh)
                .unwrap();
        assert!(loads.iter().all(|load| *load == 0.));
    }

    #[rstest]
    fn should_reject_a_short_profile() {
        let result = cooling_profile_to_vec(
            Cursor::new(cooling_csv(HOURS_PER_YEAR - 10, 12_000.)),
            LoadUnits::Btuh,
        );
        assert!(matches!(result, Err(TowerError::MalformedInput(_))));
    }

    #[rstest]
    fn should_reject_an_unparseable_load() {
        let mut csv = cooling_csv(HOURS_PER_YEAR - 1, 12_000.);
        csv.push_str("twelve thousand\n");
        let result = cooling_profile_to_vec(Cursor::new(csv), LoadUnits::Btuh);
        assert!(matches!(result, Err(TowerError::MalformedInput(_))));
    }

    #[rstest]
    #[case("btuh", LoadUnits::Btuh)]
    #[case("Btuh", LoadUnits::Btuh)]
    #[case("tons", LoadUnits::Tons)]
    fn should_parse_supported_units(#[case] input: &str, #[case] expected: LoadUnits) {
        assert_eq!(input.parse::<LoadUnits>().unwrap(), expected);
    }

    #[rstest]
    fn should_reject_unsupported_units() {
        assert!(matches!(
            "kW".parse::<LoadUnits>(),
            Err(TowerError::UnsupportedUnits(_))
        ));
    }
}
