use clap::Parser;
use std::path::{Component, Path};

pub const DEFAULT_LABELS_DIR: &str = "./data/simulated/labels";
pub const DEFAULT_ANNOTATIONS_DIR: &str = "./data/simulated/annotations";
pub const DEFAULT_SPLITS: &[&str] = &["train_seg", "val_seg"];

/// Command-line arguments for converting label files to XML annotations.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Root directory holding one label directory per split
    #[arg(short = 'l', long = "labels_dir", default_value = DEFAULT_LABELS_DIR)]
    pub labels_dir: String,

    /// Root directory the per-split annotation directories are written to
    #[arg(short = 'a', long = "annotations_dir", default_value = DEFAULT_ANNOTATIONS_DIR)]
    pub annotations_dir: String,

    /// Dataset splits to convert, in order
    #[arg(
        short = 's',
        long = "splits",
        value_delimiter = ',',
        default_values_t = DEFAULT_SPLITS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        value_parser = validate_split
    )]
    pub splits: Vec<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            labels_dir: DEFAULT_LABELS_DIR.to_string(),
            annotations_dir: DEFAULT_ANNOTATIONS_DIR.to_string(),
            splits: DEFAULT_SPLITS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// A split must name exactly one directory below the labels/annotations roots
pub fn validate_split(s: &str) -> Result<String, String> {
    let mut components = Path::new(s).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(s.to_string()),
        _ => Err("SPLIT must be a single, non-empty directory name".to_string()),
    }
}
