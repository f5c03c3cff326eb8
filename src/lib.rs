//! Flagellar motor annotations to YOLO format converter
//!
//! This library turns the tomogram-level motor coordinates of the BYU flagellar
//! motor dataset into a per-slice YOLO object-detection dataset.

pub mod annotations;
pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use annotations::{build_positive_index, read_annotations};
pub use config::Args;
pub use dataset::{process_dataset, split_images};
pub use error::{ConvertError, Result};
pub use io::{discover_images, setup_output_directories};
pub use types::{AnnotationRow, ConversionStats, OutputDirs, PositiveIndex, PositiveSample, SplitData};
