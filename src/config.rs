use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ConvertError, Result};

/// Command-line arguments for converting motor annotations to a YOLO dataset.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory holding one sub-directory of slice images per tomogram
    #[arg(short = 'd', long = "data_root", default_value = "data/sampled/sampled_train")]
    pub data_root: PathBuf,

    /// CSV file with the motor coordinates of every tomogram
    #[arg(
        short = 'l',
        long = "labels_csv",
        default_value = "data/sampled/sampled_train_labels.csv"
    )]
    pub labels_csv: PathBuf,

    /// Root of the generated YOLO dataset
    #[arg(short = 'o', long = "output_dir", default_value = "data/yolo")]
    pub output_dir: PathBuf,

    /// Proportion of the images to use for training, the rest goes to validation
    #[arg(long = "train_size", default_value_t = 0.8, value_parser = validate_size)]
    pub train_size: f64,

    /// Seed for random shuffling
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,

    /// Edge length in pixels of the box drawn around each motor point
    #[arg(long = "box_size", default_value_t = 10.0, value_parser = validate_box_size)]
    pub box_size: f64,

    /// Extension of the slice images
    #[arg(long = "image_ext", default_value = "jpg")]
    pub image_ext: String,

    /// Class name written for class 0 in dataset.yaml
    #[arg(long = "class_name", default_value = "motor")]
    pub class_name: String,

    /// Delete and recreate the output split directories before writing
    #[arg(long = "clean")]
    pub clean: bool,
}

impl Args {
    /// Re-check the value constraints the parser enforces, for `Args` built in code.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(ConvertError::InvalidArgument { message });

        if !(0.0..=1.0).contains(&self.train_size) {
            return invalid(format!(
                "train_size must be between 0.0 and 1.0, got {}",
                self.train_size
            ));
        }
        if !(self.box_size.is_finite() && self.box_size > 0.0) {
            return invalid(format!(
                "box_size must be a positive number, got {}",
                self.box_size
            ));
        }
        if self.image_ext.is_empty() || self.image_ext.contains(['.', '/']) {
            return invalid(format!(
                "image_ext must be a bare extension such as jpg, got {:?}",
                self.image_ext
            ));
        }
        Ok(())
    }
}

// Validate that the size is between 0.0 and 1.0
pub fn validate_size(s: &str) -> std::result::Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}

pub fn validate_box_size(s: &str) -> std::result::Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if val.is_finite() && val > 0.0 => Ok(val),
        _ => Err("BOX_SIZE must be a positive number".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size() {
        assert!(validate_size("0.8").is_ok());
        assert!(validate_size("1.0").is_ok());
        assert!(validate_size("0.0").is_ok());
        assert!(validate_size("-0.1").is_err());
        assert!(validate_size("1.1").is_err());
        assert!(validate_size("abc").is_err());
    }

    #[test]
    fn test_validate_box_size() {
        assert_eq!(validate_box_size("10"), Ok(10.0));
        assert!(validate_box_size("0").is_err());
        assert!(validate_box_size("-3").is_err());
        assert!(validate_box_size("inf").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["motor2yolo"]);
        assert_eq!(args.data_root, PathBuf::from("data/sampled/sampled_train"));
        assert_eq!(
            args.labels_csv,
            PathBuf::from("data/sampled/sampled_train_labels.csv")
        );
        assert_eq!(args.output_dir, PathBuf::from("data/yolo"));
        assert_eq!(args.train_size, 0.8);
        assert_eq!(args.seed, 42);
        assert_eq!(args.box_size, 10.0);
        assert_eq!(args.image_ext, "jpg");
        assert!(!args.clean);
    }

    #[test]
    fn test_validate_args_built_in_code() {
        let args = Args::parse_from(["motor2yolo"]);
        assert!(args.validate().is_ok());

        let bad_train_size = Args {
            train_size: 1.5,
            ..args.clone()
        };
        assert!(matches!(
            bad_train_size.validate(),
            Err(ConvertError::InvalidArgument { .. })
        ));

        let bad_box_size = Args {
            box_size: 0.0,
            ..args.clone()
        };
        assert!(matches!(
            bad_box_size.validate(),
            Err(ConvertError::InvalidArgument { .. })
        ));

        let bad_ext = Args {
            image_ext: ".jpg".to_string(),
            ..args
        };
        assert!(matches!(
            bad_ext.validate(),
            Err(ConvertError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_train_size() {
        assert!(Args::try_parse_from(["motor2yolo", "--train_size", "1.5"]).is_err());
    }
}
