//! # ACR-QA library
//!
//! This crate runs automated quality-assurance checks on MRI phantom scan
//! sessions stored as folders of DICOM files.

//!
//! It builds on the dicom-rs ecosystem. All DICOM files below a folder
//! are discovered (".dcm" files, plus extension-less files whose header
//! parses), grouped into series by Series Instance UID and ordered by
//! Instance Number. If the environment supports it, headers are read in
//! parallel using rayon. Two checks are then run:
//!  - Slice count: each series is compared against an expected count keyed
//!    by its Series Description
//!  - Uniformity: the Percent Integral Uniformity (PIU) of the central
//!    region of the middle slice, for every series whose description
//!    contains "T1"
//!
//! Results are assembled into a JSON report. Files are assumed to have the
//! following attributes:
//!   - Uncompressed or otherwise decodable pixel data
//!   - No multiframe (always the first frame is used)
//!
//! # Examples
//!
//! ## Running the pipeline on a study folder
//!
//! ```no_run
//! # use acr_qa::pipeline::{PipelineOptions, run_pipeline};
//! let options = PipelineOptions::new("data/ballinasloe");
//! let report = run_pipeline(&options).expect("should have produced a report");
//! for verdict in &report.qa_results.slice_count_validation {
//!     println!("{}: {:?}", verdict.series_description, verdict.status);
//! }
//! ```
//!
//! ## Checking a single series
//!
//! ```no_run
//! # use acr_qa::{DicomFileLocator, DicomHeaderReader, SeriesGrouper, UniformityAnalyzer};
//! let files = DicomFileLocator::find_dicom_files("dicom");
//! let series = SeriesGrouper::group_reads(files.iter().map(|path| DicomHeaderReader::classify(path)));
//! let result = UniformityAnalyzer::analyze(&series[0], 80.0)
//!     .expect("should have decoded the middle slice");
//! println!("PIU = {:?}", result.piu);
//! ```

pub mod enums;
pub mod error;
pub mod header;
pub mod locator;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod series;
pub mod tolerance;
pub mod uniformity;
pub mod validator;

pub use error::QaError;
pub use header::{DicomHeaderReader, ImageFile, StudyMetadata};
pub use locator::DicomFileLocator;
pub use series::{Series, SeriesGrouper};
pub use tolerance::ToleranceConfig;
pub use uniformity::{UniformityAnalyzer, UniformityResult};
pub use validator::{SliceCountValidator, ValidationVerdict};
