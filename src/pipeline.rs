use crate::{
    error::QaError,
    header::{DicomHeaderReader, HeaderRead},
    locator::DicomFileLocator,
    report::Report,
    series::SeriesGrouper,
    tolerance::ToleranceConfig,
    uniformity::{UniformityAnalyzer, UniformityResult},
    validator::SliceCountValidator,
};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Inputs of one QA run.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub data_folder: PathBuf,
    pub tolerances: Option<PathBuf>,
    pub report_path: PathBuf,
}

impl PipelineOptions {
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        let data_folder = data_folder.into();
        let report_path = Self::default_report_path(&data_folder);
        Self {
            data_folder,
            tolerances: None,
            report_path,
        }
    }

    /// `reports/report_<dataset>.json`
    pub fn default_report_path(data_folder: &Path) -> PathBuf {
        PathBuf::from("reports").join(format!(
            "report_{}.json",
            Report::dataset_name(data_folder)
        ))
    }
}

/// Run the whole QA pipeline for one study and write the report.
///
/// # Errors
///
/// Returns error if no DICOM files are found, none of them has a readable
/// header, the tolerance file is malformed or the report cannot be written.
/// Unreadable single files and undecodable slices are skipped.
pub fn run_pipeline(options: &PipelineOptions) -> Result<Report, QaError> {
    info!("Starting ACR QA Pipeline");

    let report = build_report(&options.data_folder, options.tolerances.as_deref())?;
    report.write(&options.report_path)?;

    info!("Report generated successfully: {}", options.report_path.display());
    Ok(report)
}

/// Everything [`run_pipeline`] does except writing the report.
pub fn build_report(data_folder: &Path, tolerances: Option<&Path>) -> Result<Report, QaError> {
    let dicom_files = DicomFileLocator::find_dicom_files(data_folder);
    if dicom_files.is_empty() {
        return Err(QaError::NoDicomFiles(data_folder.to_path_buf()));
    }
    info!("Found {} DICOM files in {}", dicom_files.len(), data_folder.display());

    let tolerances = ToleranceConfig::load(tolerances)?;
    let study_metadata = DicomHeaderReader::read_study_metadata(&dicom_files[0]);

    let reads: Vec<HeaderRead> = dicom_files
        .par_iter()
        .map(|path| DicomHeaderReader::classify(path))
        .collect();
    if !reads.iter().any(|read| matches!(read, HeaderRead::Parsed(_))) {
        return Err(QaError::NoUsableFiles(data_folder.to_path_buf()));
    }

    let series = SeriesGrouper::group_reads(reads);
    info!("Grouped into {} series", series.len());

    let slice_count_validation = SliceCountValidator::validate(&series, &tolerances.slice_counts);

    let metrics: Vec<UniformityResult> = series
        .par_iter()
        .filter(|s| UniformityAnalyzer::is_eligible(s))
        .filter_map(|s| {
            UniformityAnalyzer::analyze(s, tolerances.piu_threshold)
                .inspect_err(|e| {
                    warn!(
                        "Skipping uniformity for series {} '{}': {}",
                        s.series_uid, s.series_description, e
                    )
                })
                .ok()
        })
        .collect();

    Ok(Report::assemble(
        data_folder,
        study_metadata,
        &series,
        slice_count_validation,
        metrics,
    ))
}
