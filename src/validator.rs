use crate::{enums::VerdictStatus, series::Series};

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationVerdict {
    #[serde(rename = "SeriesDescription")]
    pub series_description: String,
    #[serde(rename = "SeriesInstanceUID")]
    pub series_uid: String,
    pub actual: usize,
    pub expected: Option<u32>,
    pub status: VerdictStatus,
}

pub struct SliceCountValidator;

impl SliceCountValidator {
    /// One verdict per series, in input order. Rules match the series
    /// description exactly.
    pub fn validate(
        series: &[Series],
        expected_slice_counts: &BTreeMap<String, u32>,
    ) -> Vec<ValidationVerdict> {
        series
            .iter()
            .map(|s| Self::validate_series(s, expected_slice_counts))
            .collect()
    }

    fn validate_series(
        series: &Series,
        expected_slice_counts: &BTreeMap<String, u32>,
    ) -> ValidationVerdict {
        let expected = expected_slice_counts
            .get(&series.series_description)
            .copied();
        let status = match expected {
            None => VerdictStatus::NoRule,
            Some(expected) if series.slice_count == expected as usize => VerdictStatus::Pass,
            Some(_) => VerdictStatus::Fail,
        };

        ValidationVerdict {
            series_description: series.series_description.clone(),
            series_uid: series.series_uid.clone(),
            actual: series.slice_count,
            expected,
            status,
        }
    }
}
