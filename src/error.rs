use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("No DICOM files found in: {}", .0.display())]
    NoDicomFiles(PathBuf),

    #[error("No readable DICOM headers found in: {}", .0.display())]
    NoUsableFiles(PathBuf),

    #[error("Image has no pixels inside the central region of interest")]
    EmptyRoi,

    #[error("Invalid tolerance configuration {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DICOM error: {0}")]
    Dicom(#[from] dicom::object::ReadError),

    #[error("Pixel data error: {0}")]
    PixelData(#[from] dicom::pixeldata::Error),
}
