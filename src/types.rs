use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Value of `Motor axis 0` marking a tomogram without a motor.
pub const NO_MOTOR_SENTINEL: f64 = -1.0;

// One row of the motor annotation CSV. Columns not listed here are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnnotationRow {
    pub tomo_id: String,
    #[serde(rename = "Motor axis 0")]
    pub motor_z: f64,
    #[serde(rename = "Motor axis 1")]
    pub motor_y: f64,
    #[serde(rename = "Motor axis 2")]
    pub motor_x: f64,
    #[serde(rename = "Array shape (axis 1)")]
    pub height: u32,
    #[serde(rename = "Array shape (axis 2)")]
    pub width: u32,
}

impl AnnotationRow {
    /// Slice index holding the motor, or `None` when the tomogram has no motor.
    pub fn slice_index(&self) -> Option<i64> {
        if self.motor_z == NO_MOTOR_SENTINEL {
            None
        } else {
            Some(self.motor_z.trunc() as i64)
        }
    }
}

/// Motor point and image size for one positive slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositiveSample {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
}

/// Image path to the motor annotated on it.
pub type PositiveIndex = HashMap<PathBuf, PositiveSample>;

// Struct to hold the paths to the output directories for the train/val splits
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub root: PathBuf,
    pub train_labels_dir: PathBuf,
    pub val_labels_dir: PathBuf,
    pub train_images_dir: PathBuf,
    pub val_images_dir: PathBuf,
}

// Struct to hold the shuffled image paths of each split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitData {
    pub train_images: Vec<PathBuf>,
    pub val_images: Vec<PathBuf>,
}

/// Label counts produced while materializing one split.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitStats {
    pub images: usize,
    pub positives: usize,
    pub negatives: usize,
}

// Counts gathered over a whole conversion run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub annotation_rows: usize,
    pub indexed_positives: usize,
    pub train: SplitStats,
    pub val: SplitStats,
}

impl ConversionStats {
    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Annotation rows read: {}", self.annotation_rows);
        log::info!("Positive slices indexed: {}", self.indexed_positives);
        log::info!(
            "Train images: {} ({} positive, {} negative)",
            self.train.images,
            self.train.positives,
            self.train.negatives
        );
        log::info!(
            "Val images: {} ({} positive, {} negative)",
            self.val.images,
            self.val.positives,
            self.val.negatives
        );

        let written = self.train.positives + self.val.positives;
        if written < self.indexed_positives {
            log::warn!(
                "{} indexed positive slices have no matching image file",
                self.indexed_positives - written
            );
        }
    }
}
