//! Label file to XML annotation converter
//!
//! This library converts center-format object detection label files into
//! per-image XML annotations with min/max box corners, one split at a time.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;
pub mod xml;

// Re-export commonly used types and functions
pub use config::Args;
pub use conversion::{convert_label_file, parse_label_file, parse_label_line};
pub use dataset::{process_dataset, process_split};
pub use error::{ConvertError, ParseError};
pub use io::{collect_label_files, setup_output_directories};
pub use types::{AnnotationDocument, BoundingBox, LabelRecord, ProcessingStats, SplitDirs};
pub use xml::render_annotation;
