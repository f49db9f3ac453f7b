use crate::{
    enums::UniformityStatus,
    error::QaError,
    header::{DicomHeaderReader, ImageFile},
    series::Series,
};

use ndarray::{Array2, ArrayView2, s};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UniformityResult {
    #[serde(rename = "SeriesDescription")]
    pub series_description: String,
    #[serde(rename = "SeriesInstanceUID")]
    pub series_uid: String,
    #[serde(rename = "PIU")]
    pub piu: Option<f64>,
    pub status: UniformityStatus,
}

/// Percent Integral Uniformity on the middle slice of a series.
pub struct UniformityAnalyzer;

impl UniformityAnalyzer {
    /// Whether a series description qualifies for uniformity analysis.
    pub fn is_eligible(series: &Series) -> bool {
        series.series_description.contains("T1")
    }

    /// Compute PIU for the middle slice of `series`.
    ///
    /// # Errors
    ///
    /// Returns error if the selected slice cannot be decoded or its central
    /// region is empty
    pub fn analyze(series: &Series, piu_threshold: f64) -> Result<UniformityResult, QaError> {
        let Some(middle) = series.middle_file() else {
            return Ok(UniformityResult {
                series_description: series.series_description.clone(),
                series_uid: series.series_uid.clone(),
                piu: None,
                status: UniformityStatus::SkipNoFiles,
            });
        };

        let image = Self::load_rescaled(middle)?;
        let (piu, status) = Self::score(&image, piu_threshold)?;

        Ok(UniformityResult {
            series_description: series.series_description.clone(),
            series_uid: series.series_uid.clone(),
            piu: Some(piu),
            status,
        })
    }

    /// Reported PIU (two decimals) and its status. The status is decided on
    /// the unrounded value.
    pub fn score(
        image: &Array2<f32>,
        piu_threshold: f64,
    ) -> Result<(f64, UniformityStatus), QaError> {
        let raw = Self::piu(image)?;
        let status = if raw >= piu_threshold {
            UniformityStatus::Pass
        } else {
            UniformityStatus::Fail
        };
        Ok((Self::round_to_hundredths(raw), status))
    }

    fn load_rescaled(image: &ImageFile) -> Result<Array2<f32>, QaError> {
        let raw = DicomHeaderReader::read_pixels(&image.path)?;
        Ok(Self::rescale(raw, image.rescale_slope, image.rescale_intercept))
    }

    /// Apply `raw * slope + intercept` to every sample.
    pub fn rescale(mut image: Array2<f32>, slope: f64, intercept: f64) -> Array2<f32> {
        let (slope, intercept) = (slope as f32, intercept as f32);
        image.mapv_inplace(|v| v * slope + intercept);
        image
    }

    /// The middle half of the image along both axes.
    pub fn central_roi(image: &Array2<f32>) -> ArrayView2<'_, f32> {
        let (height, width) = image.dim();
        let (y1, y2) = ((height as f64 * 0.25) as usize, (height as f64 * 0.75) as usize);
        let (x1, x2) = ((width as f64 * 0.25) as usize, (width as f64 * 0.75) as usize);
        image.slice(s![y1..y2, x1..x2])
    }

    /// Unrounded PIU of the central region; zero when max + min is zero.
    pub fn piu(image: &Array2<f32>) -> Result<f64, QaError> {
        let roi = Self::central_roi(image);
        if roi.is_empty() {
            return Err(QaError::EmptyRoi);
        }

        let (minv, maxv) = roi.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            let v = f64::from(v);
            (lo.min(v), hi.max(v))
        });

        if maxv + minv == 0.0 {
            return Ok(0.0);
        }
        Ok((1.0 - (maxv - minv) / (maxv + minv)) * 100.0)
    }

    // exact halves go to the even neighbour
    fn round_to_hundredths(value: f64) -> f64 {
        (value * 100.0).round_ties_even() / 100.0
    }
}
