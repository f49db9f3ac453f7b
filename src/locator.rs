use crate::header::DicomHeaderReader;

use rayon::prelude::*;
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use tracing::debug;
use walkdir::WalkDir;

const DICOM_EXTENSION: &str = "dcm";
const DICOMDIR: &str = "DICOMDIR";

pub struct DicomFileLocator;

impl DicomFileLocator {
    /// Find DICOM candidates below `root`, sorted and deduplicated.
    ///
    /// Files ending in ".dcm" (any case) are always included. Files without
    /// an extension are included only if their header parses; DICOMDIR is
    /// never included. A missing root yields an empty list.
    pub fn find_dicom_files(root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        if !root.exists() {
            debug!("Data folder {} does not exist", root.display());
            return Vec::new();
        }

        let (with_extension, without_extension): (Vec<_>, Vec<_>) = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| Self::has_dicom_extension(path) || Self::is_sniff_candidate(path))
            .partition(|path| Self::has_dicom_extension(path));

        let sniffed: Vec<_> = without_extension
            .into_par_iter()
            .filter(|path| DicomHeaderReader::is_dicom(path))
            .collect();

        with_extension
            .into_iter()
            .chain(sniffed)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn has_dicom_extension(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DICOM_EXTENSION))
    }

    fn is_sniff_candidate(path: &Path) -> bool {
        path.extension().is_none()
            && path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|name| !name.eq_ignore_ascii_case(DICOMDIR))
    }
}
