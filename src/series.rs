use crate::header::{HeaderRead, ImageFile, NOT_AVAILABLE};

use std::collections::HashMap;
use tracing::debug;

/// Files sharing one Series Instance UID, ordered by Instance Number.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub series_uid: String,
    pub series_description: String,
    pub files: Vec<ImageFile>,
    pub slice_count: usize,
    pub instance_range: (i32, i32),
}

impl Series {
    /// The file at `slice_count / 2`; for even counts this is the upper middle.
    pub fn middle_file(&self) -> Option<&ImageFile> {
        self.files.get(self.files.len() / 2)
    }
}

struct SeriesAccumulator {
    series_uid: String,
    series_description: Option<String>,
    files: Vec<ImageFile>,
}

impl SeriesAccumulator {
    fn new(series_uid: String) -> Self {
        Self {
            series_uid,
            series_description: None,
            files: Vec::new(),
        }
    }

    fn push(&mut self, image: ImageFile) {
        if self.series_description.is_none() && image.has_description() {
            self.series_description = Some(image.series_description.clone());
        }
        self.files.push(image);
    }

    fn finish(mut self) -> Option<Series> {
        if self.files.is_empty() {
            return None;
        }
        // stable: equal instance numbers keep discovery order
        self.files.sort_by_key(|image| image.instance_number);

        let first = self.files.first().map(|image| image.instance_number)?;
        let last = self.files.last().map(|image| image.instance_number)?;

        Some(Series {
            series_uid: self.series_uid,
            series_description: self
                .series_description
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            slice_count: self.files.len(),
            instance_range: (first, last),
            files: self.files,
        })
    }
}

pub struct SeriesGrouper;

impl SeriesGrouper {
    /// Group header records into series, in order of first appearance.
    ///
    /// Records without a Series Instance UID are dropped.
    pub fn group(images: impl IntoIterator<Item = ImageFile>) -> Vec<Series> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut buckets: Vec<SeriesAccumulator> = Vec::new();

        for image in images {
            let Some(uid) = image.series_uid.clone() else {
                continue;
            };
            let slot = *index.entry(uid.clone()).or_insert_with(|| {
                buckets.push(SeriesAccumulator::new(uid));
                buckets.len() - 1
            });
            buckets[slot].push(image);
        }

        let series: Vec<_> = buckets
            .into_iter()
            .filter_map(SeriesAccumulator::finish)
            .collect();

        for s in &series {
            debug!(
                "Series {} '{}': {} slices, instances {}..={}",
                s.series_uid,
                s.series_description,
                s.slice_count,
                s.instance_range.0,
                s.instance_range.1
            );
        }
        series
    }

    /// Group per-file read results, logging and discarding skipped files.
    pub fn group_reads(reads: impl IntoIterator<Item = HeaderRead>) -> Vec<Series> {
        let images = reads.into_iter().filter_map(|read| match read {
            HeaderRead::Parsed(image) => Some(image),
            HeaderRead::Skipped { path, reason } => {
                debug!("Skipping {}: {}", path.display(), reason);
                None
            }
        });
        Self::group(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::SkipReason;
    use std::path::PathBuf;

    fn image(path: &str, uid: Option<&str>, instance: i32, description: &str) -> ImageFile {
        ImageFile {
            series_uid: uid.map(str::to_string),
            instance_number: instance,
            series_description: description.to_string(),
            ..ImageFile::new(path)
        }
    }

    fn paths(series: &Series) -> Vec<PathBuf> {
        series.files.iter().map(|f| f.path.clone()).collect()
    }

    #[test]
    fn localizer_is_sorted_by_instance_number() {
        let series = SeriesGrouper::group(vec![
            image("a", Some("1.2.3"), 2, "3-Plane Localizer"),
            image("b", Some("1.2.3"), 1, "3-Plane Localizer"),
            image("c", Some("1.2.3"), 3, "3-Plane Localizer"),
        ]);

        assert_eq!(series.len(), 1);
        let localizer = &series[0];
        assert_eq!(localizer.series_description, "3-Plane Localizer");
        assert_eq!(
            localizer
                .files
                .iter()
                .map(|f| f.instance_number)
                .collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(localizer.slice_count, 3);
        assert_eq!(localizer.instance_range, (1, 3));
    }

    #[test]
    fn equal_instance_numbers_keep_discovery_order() {
        let series = SeriesGrouper::group(vec![
            image("x", Some("9"), 0, "T1"),
            image("y", Some("9"), 5, "T1"),
            image("z", Some("9"), 0, "T1"),
            image("w", Some("9"), 0, "T1"),
        ]);

        assert_eq!(
            paths(&series[0]),
            vec![
                PathBuf::from("x"),
                PathBuf::from("z"),
                PathBuf::from("w"),
                PathBuf::from("y")
            ]
        );
    }

    #[test]
    fn files_without_uid_are_dropped() {
        let series = SeriesGrouper::group(vec![
            image("a", None, 1, "orphan"),
            image("b", Some("1"), 1, "kept"),
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].slice_count, 1);
        assert_eq!(paths(&series[0]), vec![PathBuf::from("b")]);
    }

    #[test]
    fn series_keep_first_appearance_order() {
        let series = SeriesGrouper::group(vec![
            image("a", Some("2"), 1, "second uid first"),
            image("b", Some("1"), 1, "first uid second"),
            image("c", Some("2"), 2, "second uid first"),
        ]);

        let uids: Vec<_> = series.iter().map(|s| s.series_uid.as_str()).collect();
        assert_eq!(uids, vec!["2", "1"]);
        assert_eq!(series[0].slice_count, 2);
    }

    #[test]
    fn first_real_description_wins() {
        let series = SeriesGrouper::group(vec![
            image("a", Some("1"), 1, NOT_AVAILABLE),
            image("b", Some("1"), 2, "SAG T1 SE"),
            image("c", Some("1"), 3, "SAG T1 SE (copy)"),
        ]);
        assert_eq!(series[0].series_description, "SAG T1 SE");

        let unnamed = SeriesGrouper::group(vec![image("a", Some("1"), 1, NOT_AVAILABLE)]);
        assert_eq!(unnamed[0].series_description, NOT_AVAILABLE);
    }

    #[test]
    fn skipped_reads_do_not_count_as_slices() {
        let series = SeriesGrouper::group_reads(vec![
            HeaderRead::Parsed(image("a", Some("1"), 1, "T1")),
            HeaderRead::Skipped {
                path: PathBuf::from("broken"),
                reason: SkipReason::Unreadable("truncated".to_string()),
            },
            HeaderRead::Parsed(image("b", Some("1"), 2, "T1")),
        ]);

        assert_eq!(series[0].slice_count, 2);
    }

    #[test]
    fn middle_file_picks_upper_middle_for_even_counts() {
        let series = SeriesGrouper::group((1..=4).map(|i| image("f", Some("1"), i, "T1")));
        assert_eq!(series[0].middle_file().map(|f| f.instance_number), Some(3));

        let series = SeriesGrouper::group((1..=5).map(|i| image("f", Some("1"), i, "T1")));
        assert_eq!(series[0].middle_file().map(|f| f.instance_number), Some(3));
    }

    #[test]
    fn no_input_no_series() {
        assert!(SeriesGrouper::group(Vec::new()).is_empty());
    }
}
