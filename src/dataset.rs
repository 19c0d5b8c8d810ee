use log::{info, warn};
use std::collections::HashSet;

use crate::config::Args;
use crate::conversion::convert_label_file;
use crate::error::ConvertError;
use crate::io::{collect_label_files, setup_output_directories};
use crate::types::{ProcessingStats, SplitDirs};
use crate::utils::create_progress_bar;

/// Convert every label file of one split, stopping at the first error
pub fn process_split(split: &SplitDirs) -> Result<ProcessingStats, ConvertError> {
    let label_files = collect_label_files(&split.labels_dir)?;
    info!(
        "Found {} label files in {}",
        label_files.len(),
        split.labels_dir.display()
    );

    let mut stats = ProcessingStats::new();
    let mut written = HashSet::new();
    let pb = create_progress_bar(label_files.len() as u64, &split.name);

    for label_path in &label_files {
        let converted = match convert_label_file(label_path, &split.annotations_dir) {
            Ok(converted) => converted,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };

        if !written.insert(converted.output_path.clone()) {
            warn!(
                "{} overwrote {} written earlier in this run",
                label_path.display(),
                converted.output_path.display()
            );
            stats.increment_overwritten();
        }
        stats.record_file(converted.objects, converted.blank_lines);
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} processing complete", split.name));
    Ok(stats)
}

/// Main dataset processing pipeline: splits are converted one after another
pub fn process_dataset(args: &Args) -> Result<ProcessingStats, ConvertError> {
    let splits = setup_output_directories(args)?;

    let mut stats = ProcessingStats::new();
    for split in &splits {
        info!("Converting split '{}'...", split.name);
        let split_stats = process_split(split)?;
        stats.merge(&split_stats);
    }

    stats.print_summary();
    Ok(stats)
}
