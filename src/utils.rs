use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// File name of a slice image inside its tomogram directory, e.g. `slice_0005.jpg`.
pub fn slice_file_name(slice_index: i64, image_ext: &str) -> String {
    format!("slice_{:04}.{}", slice_index, image_ext)
}

/// Flat output stem `<tomo_id>_slice_<NNNN>` for a discovered slice image.
///
/// The tomogram id is the name of the image's parent directory and the slice
/// number is whatever follows the last `_` of the file stem.
pub fn flat_output_stem(image_path: &Path) -> Result<String> {
    let invalid = || ConvertError::InvalidSliceName {
        path: image_path.to_path_buf(),
    };

    let tomo_id = image_path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;
    let stem = image_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(invalid)?;
    let number = stem.rsplit('_').next().unwrap_or(stem);
    let slice_index: i64 = number.parse().map_err(|_| invalid())?;

    Ok(sanitize_filename::sanitize(format!(
        "{}_slice_{:04}",
        tomo_id, slice_index
    )))
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create an output directory, optionally wiping what is already there.
pub fn create_output_directory(path: &Path, clean: bool) -> Result<PathBuf> {
    if clean && path.exists() {
        log::warn!(
            "Directory {:?} already exists. Deleting and recreating it.",
            path
        );
        fs::remove_dir_all(path).map_err(|e| ConvertError::io(path, e))?;
    }
    fs::create_dir_all(path).map_err(|e| ConvertError::io(path, e))?;
    Ok(path.to_path_buf())
}
