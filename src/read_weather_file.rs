use crate::errors::TowerError;
use crate::units::{celsius_to_fahrenheit, percent_to_fraction, HOURS_PER_YEAR};
use csv::ReaderBuilder as CsvReaderBuilder;
use std::io::Read;

// TMY-style station/metadata block before the header row
const METADATA_ROWS: usize = 18;

const COLUMN_DATE: usize = 0;
const COLUMN_HOUR: usize = 1;
const HEADER_DRY_BULB: &str = "Dry Bulb Temperature"; // in degrees C in the file
const HEADER_DEW_POINT: &str = "Dew Point Temperature"; // in degrees C in the file
const HEADER_REL_HUM: &str = "Relative Humidity"; // in percent in the file

/// Hourly ambient conditions for one year, converted to IP units on import.
#[derive(Clone, Debug, Default)]
pub struct AmbientConditions {
    pub dates: Vec<String>,
    pub hours: Vec<String>,
    pub dry_bulb_temps: Vec<f64>,      // in °F
    pub dew_point_temps: Vec<f64>,     // in °F
    pub relative_humidities: Vec<f64>, // as a 0-1 fraction
}

impl AmbientConditions {
    pub fn len(&self) -> usize {
        self.dry_bulb_temps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dry_bulb_temps.is_empty()
    }
}

pub fn weather_data_to_vec(file: impl Read) -> Result<AmbientConditions, TowerError> {
    let mut reader = CsvReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(file);

    let mut dates = vec![];
    let mut hours = vec![];
    let mut dry_bulb_temps = vec![];
    let mut dew_point_temps = vec![];
    let mut relative_humidities = vec![];
    let mut column_dry_bulb: Option<usize> = None;
    let mut column_dew_point: Option<usize> = None;
    let mut column_rel_hum: Option<usize> = None;

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        if i < METADATA_ROWS {
            continue;
        }
        if i == METADATA_ROWS {
            for (column, name) in record.iter().enumerate() {
                if name.contains(HEADER_DRY_BULB) {
                    column_dry_bulb = Some(column);
                } else if name.contains(HEADER_DEW_POINT) {
                    column_dew_point = Some(column);
                } else if name.contains(HEADER_REL_HUM) {
                    column_rel_hum = Some(column);
                }
            }
            continue;
        }

        let (Some(dry_bulb), Some(dew_point), Some(rel_hum)) =
            (column_dry_bulb, column_dew_point, column_rel_hum)
        else {
            return Err(TowerError::MalformedInput(format!(
                "weather file header is missing one of the \"{HEADER_DRY_BULB}\", \
                 \"{HEADER_DEW_POINT}\" or \"{HEADER_REL_HUM}\" columns"
            )));
        };

        let row = i + 1; // 1-based, as a reader of the file would count
        dates.push(string_field(&record, COLUMN_DATE, row)?);
        hours.push(string_field(&record, COLUMN_HOUR, row)?);
        dry_bulb_temps.push(celsius_to_fahrenheit(numeric_field(&record, dry_bulb, row)?));
        dew_point_temps.push(celsius_to_fahrenheit(numeric_field(
            &record, dew_point, row,
        )?));
        relative_humidities.push(percent_to_fraction(numeric_field(&record, rel_hum, row)?));
    }

    if dry_bulb_temps.len() != HOURS_PER_YEAR {
        return Err(TowerError::MalformedInput(format!(
            "expected {HOURS_PER_YEAR} hourly weather rows, found {}",
            dry_bulb_temps.len()
        )));
    }

    Ok(AmbientConditions {
        dates,
        hours,
        dry_bulb_temps,
        dew_point_temps,
        relative_humidities,
    })
}

fn string_field(
    record: &csv::StringRecord,
    column: usize,
    row: usize,
) -> Result<String, TowerError> {
    Ok(record
        .get(column)
        .ok_or_else(|| {
            TowerError::MalformedInput(format!("weather row {row} is missing column {column}"))
        })?
        .to_string())
}

fn numeric_field(record: &csv::StringRecord, column: usize, row: usize) -> Result<f64, TowerError> {
    let raw = record.get(column).ok_or_else(|| {
        TowerError::MalformedInput(format!("weather row {row} is missing column {column}"))
    })?;
    raw.trim().parse().map_err(|_| {
        TowerError::MalformedInput(format!(
            "weather row {row} column {column} is not a number: \"{raw}\""
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    fn weather_csv(rows: usize, dry_bulb_c: f64, dew_point_c: f64, rel_hum_pct: f64) -> String {
        let mut csv = String::new();
        for i in 0..METADATA_ROWS {
            csv.push_str(&format!("station metadata row {i}\n"));
        }
        csv.push_str(
            "Date,HH:MM,ETR {Wh/m2},Dry Bulb Temperature {C},Dew Point Temperature {C},Relative Humidity {%}\n",
        );
        for hour in 0..rows {
            csv.push_str(&format!(
                "1990-01-01,{}:00,0,{dry_bulb_c},{dew_point_c},{rel_hum_pct}\n",
                hour % 24 + 1
            ));
        }
        csv
    }

    #[rstest]
    fn should_import_and_convert_a_full_year() {
        let conditions =
            weather_data_to_vec(Cursor::new(weather_csv(HOURS_PER_YEAR, 30., 18.4, 50.))).unwrap();
        assert_eq!(conditions.len(), HOURS_PER_YEAR);
        assert_relative_eq!(conditions.dry_bulb_temps[0], 86.);
        assert_relative_eq!(conditions.dew_point_temps[0], 65.12);
        assert_relative_eq!(conditions.relative_humidities[0], 0.5);
        assert_eq!(conditions.dates[0], "1990-01-01");
        assert_eq!(conditions.hours[0], "1:00");
    }

    #[rstest]
    fn should_reject_a_short_year() {
        let result = weather_data_to_vec(Cursor::new(weather_csv(HOURS_PER_YEAR - 1, 20., 10., 50.)));
        assert!(matches!(result, Err(TowerError::MalformedInput(_))));
    }

    #[rstest]
    fn should_reject_a_missing_humidity_column() {
        let mut csv = String::new();
        for i in 0..METADATA_ROWS {
            csv.push_str(&format!("station metadata row {i}\n"));
        }
        csv.push_str("Date,HH:MM,Dry Bulb Temperature {C},Dew Point Temperature {C}\n");
        for hour in 0..HOURS_PER_YEAR {
            csv.push_str(&format!("1990-01-01,{}:00,20,10\n", hour % 24 + 1));
        }
        let result = weather_data_to_vec(Cursor::new(csv));
        assert!(matches!(result, Err(TowerError::MalformedInput(_))));
    }

    #[rstest]
    fn should_reject_an_unparseable_field() {
        let mut csv = weather_csv(HOURS_PER_YEAR - 1, 20., 10., 50.);
        csv.push_str("1990-12-31,24:00,0,not-a-number,10,50\n");
        let result = weather_data_to_vec(Cursor::new(csv));
        match result {
            Err(TowerError::MalformedInput(message)) => {
                assert!(message.contains("not-a-number"), "unexpected message: {message}");
            }
            other => panic!("expected a malformed input error, got {other:?}"),
        }
    }
}
