use crate::{enums::SkipReason, error::QaError};

use dicom::{
    core::Tag,
    object::{DefaultDicomObject, OpenFileOptions, open_file},
    pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder},
};
use dicom_dictionary_std::tags;
use ndarray::{Array2, s};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Value reported for any metadata field missing from the source file.
pub const NOT_AVAILABLE: &str = "N/A";

/// Header fields of one on-disk DICOM object.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub series_uid: Option<String>,
    pub instance_number: i32,
    pub series_description: String,
    pub rows: Option<u16>,
    pub columns: Option<u16>,
    pub rescale_slope: f64,
    pub rescale_intercept: f64,
}

impl ImageFile {
    /// A record carrying only the path, with every field at its default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            series_uid: None,
            instance_number: 0,
            series_description: NOT_AVAILABLE.to_string(),
            rows: None,
            columns: None,
            rescale_slope: 1.0,
            rescale_intercept: 0.0,
        }
    }

    pub fn has_description(&self) -> bool {
        self.series_description != NOT_AVAILABLE
    }
}

/// Per-file result of a header read.
#[derive(Clone, Debug)]
pub enum HeaderRead {
    Parsed(ImageFile),
    Skipped { path: PathBuf, reason: SkipReason },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudyMetadata {
    pub study_date: String,
    pub study_description: String,
    pub manufacturer: String,
    pub model_name: String,
    pub magnetic_field_strength: String,
}

impl Default for StudyMetadata {
    fn default() -> Self {
        Self {
            study_date: NOT_AVAILABLE.to_string(),
            study_description: NOT_AVAILABLE.to_string(),
            manufacturer: NOT_AVAILABLE.to_string(),
            model_name: NOT_AVAILABLE.to_string(),
            magnetic_field_strength: NOT_AVAILABLE.to_string(),
        }
    }
}

pub struct DicomHeaderReader;

impl DicomHeaderReader {
    /// Read header fields without loading pixel data.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or is not valid DICOM
    pub fn read_header(path: impl AsRef<Path>) -> Result<ImageFile, QaError> {
        let path = path.as_ref();
        let dicom_object = Self::open_header(path)?;
        let slope = Self::float_field(&dicom_object, tags::RESCALE_SLOPE)
            .filter(|slope| *slope != 0.0)
            .unwrap_or(1.0);
        let intercept = Self::float_field(&dicom_object, tags::RESCALE_INTERCEPT).unwrap_or(0.0);

        Ok(ImageFile {
            path: path.to_path_buf(),
            series_uid: Self::string_field(&dicom_object, tags::SERIES_INSTANCE_UID),
            instance_number: Self::int_field(&dicom_object, tags::INSTANCE_NUMBER).unwrap_or(0),
            series_description: Self::string_or_default(
                &dicom_object,
                tags::SERIES_DESCRIPTION,
            ),
            rows: Self::u16_field(&dicom_object, tags::ROWS),
            columns: Self::u16_field(&dicom_object, tags::COLUMNS),
            rescale_slope: slope,
            rescale_intercept: intercept,
        })
    }

    /// Read a header and turn the outcome into a per-file verdict for grouping.
    pub fn classify(path: impl AsRef<Path>) -> HeaderRead {
        let path = path.as_ref();
        match Self::read_header(path) {
            Ok(image) if image.series_uid.is_some() => HeaderRead::Parsed(image),
            Ok(_) => HeaderRead::Skipped {
                path: path.to_path_buf(),
                reason: SkipReason::MissingSeriesUid,
            },
            Err(e) => HeaderRead::Skipped {
                path: path.to_path_buf(),
                reason: SkipReason::Unreadable(e.to_string()),
            },
        }
    }

    /// Whether the header of a file parses at all.
    pub fn is_dicom(path: impl AsRef<Path>) -> bool {
        Self::open_header(path.as_ref()).is_ok()
    }

    /// Study-level fields of a file; every field falls back to [`NOT_AVAILABLE`].
    pub fn read_study_metadata(path: impl AsRef<Path>) -> StudyMetadata {
        let Ok(dicom_object) = Self::open_header(path.as_ref()) else {
            return StudyMetadata::default();
        };

        let model_name = Self::string_field(&dicom_object, tags::MANUFACTURER_MODEL_NAME)
            .or_else(|| Self::string_field(&dicom_object, tags::DEVICE_DESCRIPTION))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        StudyMetadata {
            study_date: Self::string_or_default(&dicom_object, tags::STUDY_DATE),
            study_description: Self::string_or_default(&dicom_object, tags::STUDY_DESCRIPTION),
            manufacturer: Self::string_or_default(&dicom_object, tags::MANUFACTURER),
            model_name,
            magnetic_field_strength: Self::string_or_default(
                &dicom_object,
                tags::MAGNETIC_FIELD_STRENGTH,
            ),
        }
    }

    /// Decode the first frame of a file as raw (un-rescaled) sample values.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or its pixel data cannot be decoded
    pub fn read_pixels(path: impl AsRef<Path>) -> Result<Array2<f32>, QaError> {
        let dicom_object = open_file(path.as_ref())?;
        let pixel_data = dicom_object.decode_pixel_data()?;
        let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
        let frames = pixel_data.to_ndarray_with_options::<f32>(&options)?;
        Ok(frames.slice_move(s![0, .., .., 0]))
    }

    fn open_header(path: &Path) -> Result<DefaultDicomObject, QaError> {
        Ok(OpenFileOptions::new()
            .read_until(tags::PIXEL_DATA)
            .open_file(path)?)
    }

    fn string_field(dicom_object: &DefaultDicomObject, tag: Tag) -> Option<String> {
        let value = dicom_object.element(tag).ok()?.to_str().ok()?;
        let value = value.trim_matches(|c: char| c.is_whitespace() || c == '\0');
        (!value.is_empty()).then(|| value.to_string())
    }

    fn string_or_default(dicom_object: &DefaultDicomObject, tag: Tag) -> String {
        Self::string_field(dicom_object, tag).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    fn int_field(dicom_object: &DefaultDicomObject, tag: Tag) -> Option<i32> {
        dicom_object.element(tag).ok()?.to_int::<i32>().ok()
    }

    fn u16_field(dicom_object: &DefaultDicomObject, tag: Tag) -> Option<u16> {
        dicom_object.element(tag).ok()?.to_int::<u16>().ok()
    }

    fn float_field(dicom_object: &DefaultDicomObject, tag: Tag) -> Option<f64> {
        dicom_object.element(tag).ok()?.to_float64().ok()
    }
}
