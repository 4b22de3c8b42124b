/// A simple statistics module with some utility functions over annual hourly series.
use statrs::statistics::{Data, OrderStatistics};

pub(crate) fn percentile(numbers: &[f64], percentile: usize) -> f64 {
    let numbers = numbers.to_vec();
    let mut data = Data::new(numbers);

    data.percentile(percentile)
}

pub(crate) fn mean(numbers: &[f64]) -> f64 {
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::*;

    #[fixture]
    fn wet_bulbs() -> Vec<f64> {
        (1..=99).map(|x| x as f64).collect()
    }

    #[rstest]
    fn test_percentile_ordering(wet_bulbs: Vec<f64>) {
        let p98 = percentile(&wet_bulbs, 98);
        let p99 = percentile(&wet_bulbs, 99);
        assert!(p98 <= p99, "98th percentile exceeds 99th");
        assert!(p99 <= 99., "99th percentile exceeds the maximum");
        assert!(p99 >= 97., "99th percentile below expected band");
    }

    #[rstest]
    fn test_percentile_median(wet_bulbs: Vec<f64>) {
        assert_abs_diff_eq!(percentile(&wet_bulbs, 50), 50., epsilon = 1.);
    }

    #[rstest]
    fn test_mean() {
        assert_abs_diff_eq!(mean(&[1., 2., 3., 4.]), 2.5);
    }
}
