//! CSV export

use crate::{PredictionResult, ReportError};
use tracing::debug;

/// Name of the trailing column holding the estimate
pub const PREDICTED_PRICE_COLUMN: &str = "PredictedPrice";

/// Suggested filename for the download
pub const CSV_FILENAME: &str = "house_price_prediction.csv";

/// Serialize the input row and its estimate: one header row naming every
/// feature plus `PredictedPrice`, then one data row.
pub fn to_csv(result: &PredictionResult) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header = result
        .record
        .spec()
        .names()
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(PREDICTED_PRICE_COLUMN));
    writer
        .write_record(header)
        .map_err(|e| ReportError::Csv(e.to_string()))?;

    let row = result
        .record
        .values()
        .iter()
        .chain(std::iter::once(&result.price))
        .map(|value| value.to_string());
    writer
        .write_record(row)
        .map_err(|e| ReportError::Csv(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.to_string()))?;
    let csv = String::from_utf8(bytes).map_err(|e| ReportError::Csv(e.to_string()))?;

    debug!("Exported {} bytes of CSV", csv.len());
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_price;
    use feature_engine::{FeatureAssembler, FeatureSpec, UserInput};
    use std::sync::Arc;

    fn result(names: &[&str], input: &[(&str, f64)], price: f64) -> PredictionResult {
        let spec = FeatureSpec::new(names.iter().copied()).unwrap();
        let assembler = FeatureAssembler::new(Arc::new(spec));
        let input: UserInput = input.iter().copied().collect();
        PredictionResult {
            price,
            formatted_price: format_price(price),
            record: assembler.assemble(&input),
            top_features: Vec::new(),
            latency_us: 0,
        }
    }

    #[test]
    fn test_csv_layout() {
        let result = result(
            &["GrLivArea", "GarageArea", "TotalBsmtSF"],
            &[("GrLivArea", 1500.0)],
            181_234.5,
        );
        let csv = to_csv(&result).unwrap();
        assert_eq!(
            csv,
            "GrLivArea,GarageArea,TotalBsmtSF,PredictedPrice\n1500,0,0,181234.5\n"
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let result = result(
            &["1stFlrSF", "LotArea", "MSZoning_RL", "OverallQual"],
            &[("LotArea", 8450.0), ("MSZoning_RL", 1.0), ("OverallQual", 7.0)],
            208_500.123,
        );
        let csv = to_csv(&result).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            header,
            vec!["1stFlrSF", "LotArea", "MSZoning_RL", "OverallQual", "PredictedPrice"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let values: Vec<f64> = rows[0].iter().map(|v| v.parse().unwrap()).collect();
        assert_eq!(values, vec![0.0, 8450.0, 1.0, 7.0, 208_500.123]);
    }

    #[test]
    fn test_names_needing_quotes() {
        let result = result(&["Exterior,1st"], &[("Exterior,1st", 1.0)], 1.0);
        let csv = to_csv(&result).unwrap();
        assert!(csv.starts_with("\"Exterior,1st\",PredictedPrice\n"));
    }
}
