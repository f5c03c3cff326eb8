use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};

use crate::error::{ConvertError, Result};
use crate::types::{PositiveIndex, PositiveSample, SplitStats};
use crate::utils::flat_output_stem;

/// Class index written for every motor box.
pub const MOTOR_CLASS_ID: usize = 0;

/// Copy every image of a split and write its label file.
///
/// When an image fails, the split stops early and returns the error of a failing
/// image. Images run in parallel, so that is not necessarily the earliest failure
/// in split order, and files of other images may already be written.
pub fn process_split(
    images: &[PathBuf],
    images_dir: &Path,
    labels_dir: &Path,
    positives: &PositiveIndex,
    box_size: f64,
    pb: &ProgressBar,
) -> Result<SplitStats> {
    let positive_count = AtomicUsize::new(0);

    images.par_iter().try_for_each(|image_path| {
        let is_positive =
            process_image(image_path, images_dir, labels_dir, positives, box_size)?;
        if is_positive {
            positive_count.fetch_add(1, Relaxed);
        }
        pb.inc(1);
        Ok::<(), ConvertError>(())
    })?;

    let positives = positive_count.into_inner();
    Ok(SplitStats {
        images: images.len(),
        positives,
        negatives: images.len() - positives,
    })
}

/// Copy one slice image and write its label. Returns whether a box was written.
pub fn process_image(
    image_path: &Path,
    images_dir: &Path,
    labels_dir: &Path,
    positives: &PositiveIndex,
    box_size: f64,
) -> Result<bool> {
    let stem = flat_output_stem(image_path)?;

    let image_extension = image_path.extension().unwrap_or_default();
    let image_output_path =
        images_dir.join(format!("{}.{}", stem, image_extension.to_string_lossy()));
    fs::copy(image_path, &image_output_path).map_err(|e| ConvertError::io(image_path, e))?;

    let label_output_path = labels_dir.join(format!("{}.txt", stem));
    let sample = positives.get(image_path);
    let label = sample
        .map(|sample| format_label(sample, box_size))
        .unwrap_or_default();
    write_label(&label_output_path, &label)?;

    Ok(sample.is_some())
}

/// Normalized `(center_x, center_y, width, height)` of a fixed-size box centred on the motor.
pub fn normalized_box(sample: &PositiveSample, box_size: f64) -> (f64, f64, f64, f64) {
    let width = f64::from(sample.width);
    let height = f64::from(sample.height);
    (
        sample.x / width,
        sample.y / height,
        box_size / width,
        box_size / height,
    )
}

/// One YOLO label line for a motor.
///
/// Values use the shortest round-trip form and always keep a fractional part,
/// so an edge coordinate is written as `0.0` or `1.0`.
pub fn format_label(sample: &PositiveSample, box_size: f64) -> String {
    let (x_center, y_center, width, height) = normalized_box(sample, box_size);
    format!(
        "{} {:?} {:?} {:?} {:?}\n",
        MOTOR_CLASS_ID, x_center, y_center, width, height
    )
}

// An empty label marks a negative slice.
fn write_label(path: &Path, label: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(label.as_bytes())?;
        writer.flush()
    };
    write().map_err(|e| ConvertError::io(path, e))
}
