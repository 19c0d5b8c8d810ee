use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ParseError};
use crate::types::{AnnotationDocument, BoundingBox, LabelRecord, ANNOTATION_EXTENSION};
use crate::utils::file_stem;
use crate::xml::render_annotation;

const FIELD_NAMES: [&str; 4] = ["x_center", "y_center", "width", "height"];

// Records of one label file plus the number of blank lines that were skipped
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedLabels {
    pub records: Vec<LabelRecord>,
    // 1-based line number of each record
    pub lines: Vec<usize>,
    pub blank_lines: usize,
}

// Summary of a converted label file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub output_path: PathBuf,
    pub objects: usize,
    pub blank_lines: usize,
}

/// Parse one `<category> <x_center> <y_center> <width> <height>` line.
///
/// Fields are separated by single spaces, so doubled spaces produce an
/// empty field that fails integer parsing.
pub fn parse_label_line(line: &str) -> Result<LabelRecord, ParseError> {
    let fields: Vec<&str> = line.trim().split(' ').collect();
    if fields.len() != 5 {
        return Err(ParseError::FieldCount {
            found: fields.len(),
        });
    }

    let mut values = [0i64; 4];
    for (i, (value, field)) in values.iter_mut().zip(FIELD_NAMES).enumerate() {
        let raw = fields[i + 1];
        *value = raw.parse().map_err(|source| ParseError::InvalidInteger {
            field,
            value: raw.to_string(),
            source,
        })?;
    }
    let [x_center, y_center, width, height] = values;

    for (field, value) in [("width", width), ("height", height)] {
        if value < 0 {
            return Err(ParseError::NegativeExtent { field, value });
        }
    }

    let label = fields[0];
    if !label.chars().all(is_xml_char) {
        return Err(ParseError::InvalidLabelCharacter {
            value: label.to_string(),
        });
    }

    let record = LabelRecord {
        label: label.to_string(),
        x_center,
        y_center,
        width,
        height,
    };
    BoundingBox::try_from(&record)?;
    Ok(record)
}

// Characters allowed in XML 1.0 text; the rest cannot even be escaped
fn is_xml_char(c: char) -> bool {
    !matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
    )
}

/// Parse the full text of a label file, skipping blank lines.
///
/// On failure the 1-based number of the offending line is returned with the
/// error.
pub fn parse_label_file(content: &str) -> Result<ParsedLabels, (usize, ParseError)> {
    let mut parsed = ParsedLabels::default();
    for (line_idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            parsed.blank_lines += 1;
            continue;
        }
        let record = parse_label_line(line).map_err(|e| (line_idx + 1, e))?;
        parsed.records.push(record);
        parsed.lines.push(line_idx + 1);
    }
    Ok(parsed)
}

/// Convert a single label file into `<annotations_dir>/<stem>.xml`.
///
/// The output is only created once the whole input parsed, so a malformed
/// label file leaves nothing behind.
pub fn convert_label_file(
    label_path: &Path,
    annotations_dir: &Path,
) -> Result<ConvertedFile, ConvertError> {
    let content =
        fs::read_to_string(label_path).map_err(|e| ConvertError::io(label_path, e))?;

    let parsed = parse_label_file(&content).map_err(|(line, source)| ConvertError::Parse {
        path: label_path.to_path_buf(),
        line,
        source,
    })?;

    let stem = file_stem(label_path);
    let objects = parsed.records.len();
    let document = AnnotationDocument::from_records(&stem, parsed.records).map_err(
        |(index, source)| ConvertError::Parse {
            path: label_path.to_path_buf(),
            line: parsed.lines.get(index).copied().unwrap_or_default(),
            source,
        },
    )?;

    let output_path = annotations_dir.join(format!("{}.{}", stem, ANNOTATION_EXTENSION));
    write_annotation(&output_path, &document)?;

    debug!(
        "Converted {} -> {} ({} objects)",
        label_path.display(),
        output_path.display(),
        objects
    );

    Ok(ConvertedFile {
        output_path,
        objects,
        blank_lines: parsed.blank_lines,
    })
}

/// Serialize `document` and write it to `output_path`, replacing any existing file
pub fn write_annotation(
    output_path: &Path,
    document: &AnnotationDocument,
) -> Result<(), ConvertError> {
    let xml = render_annotation(document);
    let mut writer =
        BufWriter::new(File::create(output_path).map_err(|e| ConvertError::io(output_path, e))?);
    writer
        .write_all(xml.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ConvertError::io(output_path, e))
}
