use std::path::PathBuf;

use crate::error::ParseError;

// Extension of the image arrays the annotations describe
pub const ARRAY_EXTENSION: &str = "npy";

// Extension of the written annotation files
pub const ANNOTATION_EXTENSION: &str = "xml";

// Every image array in the dataset has the same shape
pub const IMAGE_SIZE: ImageSize = ImageSize {
    width: 512,
    height: 512,
    depth: 6,
};

// One row of a label file: category token plus center/size box in pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRecord {
    pub label: String,
    pub x_center: i64,
    pub y_center: i64,
    pub width: i64,
    pub height: i64,
}

/// Min/max corner form of a box.
///
/// Half extents use integer division; extents are validated to be
/// non-negative while parsing, so an odd extent loses one pixel
/// (`xmax - xmin == width - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl BoundingBox {
    /// Corners of a center/size box, or `None` if a corner does not fit in `i64`.
    pub fn from_center(x_center: i64, y_center: i64, width: i64, height: i64) -> Option<Self> {
        let half_width = width / 2;
        let half_height = height / 2;
        Some(Self {
            xmin: x_center.checked_sub(half_width)?,
            ymin: y_center.checked_sub(half_height)?,
            xmax: x_center.checked_add(half_width)?,
            ymax: y_center.checked_add(half_height)?,
        })
    }
}

impl TryFrom<&LabelRecord> for BoundingBox {
    type Error = ParseError;

    fn try_from(record: &LabelRecord) -> Result<Self, Self::Error> {
        Self::from_center(
            record.x_center,
            record.y_center,
            record.width,
            record.height,
        )
        .ok_or(ParseError::CoordinateOverflow {
            x_center: record.x_center,
            y_center: record.y_center,
            width: record.width,
            height: record.height,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

// A named box inside an annotation document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedObject {
    pub name: String,
    pub bndbox: BoundingBox,
}

// The annotation of one image array, built from one label file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDocument {
    pub filename: String,
    pub size: ImageSize,
    pub objects: Vec<AnnotatedObject>,
}

impl AnnotationDocument {
    /// Build the document for `file_stem`, keeping the record order.
    ///
    /// Fails with the index of the first record whose corners overflow.
    pub fn from_records(
        file_stem: &str,
        records: Vec<LabelRecord>,
    ) -> Result<Self, (usize, ParseError)> {
        let objects = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let bndbox = BoundingBox::try_from(&record).map_err(|e| (index, e))?;
                Ok(AnnotatedObject {
                    name: record.label,
                    bndbox,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filename: format!("{}.{}", file_stem, ARRAY_EXTENSION),
            size: IMAGE_SIZE,
            objects,
        })
    }
}

// Input and output directory of a single split
#[derive(Debug, Clone)]
pub struct SplitDirs {
    pub name: String,
    pub labels_dir: PathBuf,
    pub annotations_dir: PathBuf,
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub files_converted: usize,
    pub objects_written: usize,
    pub blank_lines_skipped: usize,
    pub outputs_overwritten: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file(&mut self, objects: usize, blank_lines: usize) {
        self.files_converted += 1;
        self.objects_written += objects;
        self.blank_lines_skipped += blank_lines;
    }

    pub fn increment_overwritten(&mut self) {
        self.outputs_overwritten += 1;
    }

    pub fn merge(&mut self, other: &ProcessingStats) {
        self.files_converted += other.files_converted;
        self.objects_written += other.objects_written;
        self.blank_lines_skipped += other.blank_lines_skipped;
        self.outputs_overwritten += other.outputs_overwritten;
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Label files converted: {}", self.files_converted);
        log::info!("Objects written: {}", self.objects_written);
        log::info!("Blank lines skipped: {}", self.blank_lines_skipped);

        if self.outputs_overwritten > 0 {
            log::warn!(
                "Annotations overwritten by a later label file with the same stem: {}",
                self.outputs_overwritten
            );
        }
    }
}
