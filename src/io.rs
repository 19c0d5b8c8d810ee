use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use crate::config::Args;
use crate::error::ConvertError;
use crate::types::SplitDirs;
use crate::utils::create_output_directory;

/// Resolve the input and output directory of every split, creating the
/// output directories as needed
pub fn setup_output_directories(args: &Args) -> Result<Vec<SplitDirs>, ConvertError> {
    let labels_root = Path::new(&args.labels_dir);
    let annotations_root = Path::new(&args.annotations_dir);

    args.splits
        .iter()
        .map(|split| -> Result<SplitDirs, ConvertError> {
            let annotations_dir = annotations_root.join(split);
            let annotations_dir = create_output_directory(&annotations_dir)
                .map_err(|e| ConvertError::io(&annotations_dir, e))?;
            Ok(SplitDirs {
                name: split.clone(),
                labels_dir: labels_root.join(split),
                annotations_dir,
            })
        })
        .collect()
}

/// Recursively collect every file below `labels_dir`.
///
/// Hidden entries are included and no extension filter is applied; entries
/// are sorted by name within each directory.
pub fn collect_label_files(labels_dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !labels_dir.is_dir() {
        return Err(ConvertError::MissingSplit {
            path: labels_dir.to_path_buf(),
        });
    }

    let mut label_files = Vec::new();
    for entry in WalkDir::new(labels_dir).skip_hidden(false).sort(true) {
        let entry = entry.map_err(|source| ConvertError::Walk {
            path: labels_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            label_files.push(entry.path());
        }
    }
    Ok(label_files)
}
