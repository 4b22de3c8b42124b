pub const HOURS_PER_YEAR: usize = 8_760;
pub const MINUTES_PER_HOUR: u32 = 60;
pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
pub(crate) const BTUH_PER_TON: f64 = 12_000.;

pub(crate) fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 9. / 5. + 32.
}

pub(crate) fn percent_to_fraction(value_percent: f64) -> f64 {
    value_percent / 100.
}
