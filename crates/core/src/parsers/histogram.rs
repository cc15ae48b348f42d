use serde_json::Value;

use super::ParseError;
use crate::model::MonthlySeries;

/// Parse a month-of-year histogram response.
///
/// Counts are read from `results.month_of_year`, falling back to `results`
/// itself, keyed `"1"` through `"12"`. Numeric strings are accepted and
/// fractional counts round to the nearest integer. Missing, negative or
/// non-numeric months count as zero.
pub fn parse_histogram(data: &[u8]) -> Result<MonthlySeries, ParseError> {
    let value: Value = serde_json::from_slice(data)?;
    let results = value.get("results").ok_or(ParseError::MissingField("results"))?;
    let by_month = results.get("month_of_year").unwrap_or(results);

    let mut counts = [0u32; 12];
    for (month, slot) in counts.iter_mut().enumerate() {
        let key = (month + 1).to_string();
        *slot = by_month.get(key.as_str()).map_or(0, count_from_value);
    }
    Ok(MonthlySeries::new(counts))
}

fn count_from_value(value: &Value) -> u32 {
    let number = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    number
        .filter(|v| v.is_finite() && *v > 0.0)
        .map_or(0, |v| v.round().min(f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_month_of_year() {
        let data = br#"{"total_results":12,"page":1,"per_page":12,"results":{"month_of_year":
            {"1":0,"2":0,"3":0,"4":1,"5":4,"6":7,"7":12,"8":30,"9":41,"10":18,"11":2,"12":0}}}"#;
        let series = parse_histogram(data).unwrap();
        assert_eq!(series.counts(), &[0, 0, 0, 1, 4, 7, 12, 30, 41, 18, 2, 0]);
    }

    #[test]
    fn falls_back_to_flat_results_and_zero_fills() {
        let series = parse_histogram(br#"{"results":{"9":"x","10":3,"11":-2}}"#).unwrap();
        assert_eq!(series.counts()[8], 0);
        assert_eq!(series.counts()[9], 3);
        assert_eq!(series.counts()[10], 0);
        assert_eq!(series.total(), 3);
    }

    #[test]
    fn coerces_numeric_strings_and_fractions() {
        let series =
            parse_histogram(br#"{"results":{"1":"5","2":" 7 ","3":2.6,"4":"1.4","5":true}}"#).unwrap();
        assert_eq!(&series.counts()[..5], &[5, 7, 3, 1, 0]);
    }

    #[test]
    fn huge_counts_saturate() {
        let series = parse_histogram(br#"{"results":{"1":1e12,"2":"1e12"}}"#).unwrap();
        assert_eq!(series.counts()[0], u32::MAX);
        assert_eq!(series.counts()[1], u32::MAX);
    }

    #[test]
    fn missing_results_is_an_error() {
        assert!(matches!(
            parse_histogram(br#"{"month_of_year":{}}"#),
            Err(ParseError::MissingField("results"))
        ));
    }
}
