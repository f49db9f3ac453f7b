#![allow(dead_code)]

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use std::path::Path;

/// A synthetic MR slice written as Explicit VR Little Endian.
#[derive(Clone, Default)]
pub struct TestSlice {
    pub series_uid: Option<String>,
    pub series_description: Option<String>,
    pub instance_number: Option<i32>,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub rescale: Option<(f64, f64)>,
    /// rows, columns, samples in row-major order
    pub pixels: Option<(u16, u16, Vec<u16>)>,
}

impl TestSlice {
    pub fn new(series_uid: &str, description: &str, instance_number: i32) -> Self {
        Self {
            series_uid: Some(series_uid.to_string()),
            series_description: Some(description.to_string()),
            instance_number: Some(instance_number),
            manufacturer: Some("GE MEDICAL SYSTEMS".to_string()),
            model_name: Some("SIGNA Explorer".to_string()),
            ..Self::default()
        }
    }

    pub fn with_uniform_pixels(mut self, size: u16, value: u16) -> Self {
        let count = size as usize * size as usize;
        self.pixels = Some((size, size, vec![value; count]));
        self
    }

    pub fn write(&self, path: &Path) {
        let sop_instance_uid = format!(
            "2.25.{}",
            path.to_string_lossy()
                .bytes()
                .fold(7u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
        );

        let mut elements = vec![
            DataElement::new(tags::SOP_CLASS_UID, VR::UI, uids::MR_IMAGE_STORAGE),
            DataElement::new(
                tags::SOP_INSTANCE_UID,
                VR::UI,
                PrimitiveValue::from(sop_instance_uid.clone()),
            ),
            DataElement::new(tags::MODALITY, VR::CS, "MR"),
            DataElement::new(tags::STUDY_DATE, VR::DA, "20240115"),
            DataElement::new(tags::MAGNETIC_FIELD_STRENGTH, VR::DS, "1.5"),
        ];
        if let Some(uid) = &self.series_uid {
            elements.push(DataElement::new(
                tags::SERIES_INSTANCE_UID,
                VR::UI,
                PrimitiveValue::from(uid.clone()),
            ));
        }
        if let Some(description) = &self.series_description {
            elements.push(DataElement::new(
                tags::SERIES_DESCRIPTION,
                VR::LO,
                PrimitiveValue::from(description.clone()),
            ));
        }
        if let Some(instance) = self.instance_number {
            elements.push(DataElement::new(
                tags::INSTANCE_NUMBER,
                VR::IS,
                PrimitiveValue::from(instance.to_string()),
            ));
        }
        if let Some(manufacturer) = &self.manufacturer {
            elements.push(DataElement::new(
                tags::MANUFACTURER,
                VR::LO,
                PrimitiveValue::from(manufacturer.clone()),
            ));
        }
        if let Some(model) = &self.model_name {
            elements.push(DataElement::new(
                tags::MANUFACTURER_MODEL_NAME,
                VR::LO,
                PrimitiveValue::from(model.clone()),
            ));
        }
        if let Some((slope, intercept)) = self.rescale {
            elements.push(DataElement::new(
                tags::RESCALE_SLOPE,
                VR::DS,
                PrimitiveValue::from(slope.to_string()),
            ));
            elements.push(DataElement::new(
                tags::RESCALE_INTERCEPT,
                VR::DS,
                PrimitiveValue::from(intercept.to_string()),
            ));
        }
        if let Some((rows, columns, samples)) = &self.pixels {
            elements.extend([
                DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1u16)),
                DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, "MONOCHROME2"),
                DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(*rows)),
                DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(*columns)),
                DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16u16)),
                DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16u16)),
                DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(15u16)),
                DataElement::new(tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0u16)),
                DataElement::new(
                    tags::PIXEL_DATA,
                    VR::OW,
                    PrimitiveValue::U16(samples.iter().copied().collect()),
                ),
            ]);
        }

        let file_object = InMemDicomObject::from_element_iter(elements)
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                    .media_storage_sop_class_uid(uids::MR_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid(sop_instance_uid),
            )
            .expect("should have built file meta");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("should have created folder");
        }
        file_object
            .write_to_file(path)
            .expect("should have written DICOM file");
    }
}
