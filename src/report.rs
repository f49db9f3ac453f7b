use crate::{
    error::QaError,
    header::StudyMetadata,
    series::Series,
    uniformity::UniformityResult,
    validator::ValidationVerdict,
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

#[derive(Clone, Debug, Serialize)]
pub struct SeriesSummary {
    #[serde(rename = "SeriesInstanceUID")]
    pub series_uid: String,
    #[serde(rename = "SeriesDescription")]
    pub series_description: String,
    pub slice_count: usize,
    pub instance_range: (i32, i32),
}

impl From<&Series> for SeriesSummary {
    fn from(series: &Series) -> Self {
        Self {
            series_uid: series.series_uid.clone(),
            series_description: series.series_description.clone(),
            slice_count: series.slice_count,
            instance_range: series.instance_range,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct QaResults {
    pub slice_count_validation: Vec<ValidationVerdict>,
    pub metrics: Vec<UniformityResult>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub report_generated: String,
    pub dataset: String,
    pub data_folder: String,
    pub study_metadata: StudyMetadata,
    pub series: Vec<SeriesSummary>,
    pub qa_results: QaResults,
}

impl Report {
    pub fn assemble(
        data_folder: &Path,
        study_metadata: StudyMetadata,
        series: &[Series],
        slice_count_validation: Vec<ValidationVerdict>,
        metrics: Vec<UniformityResult>,
    ) -> Self {
        Self {
            report_generated: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            dataset: Self::dataset_name(data_folder),
            data_folder: data_folder.display().to_string(),
            study_metadata,
            series: series.iter().map(SeriesSummary::from).collect(),
            qa_results: QaResults {
                slice_count_validation,
                metrics,
            },
        }
    }

    /// Base name of the data folder, or an empty string for roots.
    pub fn dataset_name(data_folder: &Path) -> String {
        data_folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Write the report as indented JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created or written
    pub fn write(&self, path: &Path) -> Result<(), QaError> {
        self.write_json(path).map_err(|source| QaError::Report {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_json(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        writer.flush()
    }
}
