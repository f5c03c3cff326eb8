use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::annotations::{build_positive_index, read_annotations};
use crate::config::Args;
use crate::conversion::process_split;
use crate::error::Result;
use crate::io::{create_dataset_yaml, discover_images, setup_output_directories};
use crate::types::{ConversionStats, SplitData};
use crate::utils::create_progress_bar;

/// Shuffle the images with a seeded RNG and cut them into train and val sets.
///
/// The first `floor(train_size * n)` shuffled images are the training set.
pub fn split_images(mut images: Vec<PathBuf>, train_size: f64, seed: u64) -> SplitData {
    let mut rng = StdRng::seed_from_u64(seed);
    images.shuffle(&mut rng);

    let split_index = ((images.len() as f64 * train_size).floor() as usize).min(images.len());
    let val_images = images.split_off(split_index);

    SplitData {
        train_images: images,
        val_images,
    }
}

/// Main dataset processing pipeline
///
/// All inputs are read and split before the first output directory is created.
pub fn process_dataset(args: &Args) -> Result<ConversionStats> {
    args.validate()?;

    let rows = read_annotations(&args.labels_csv)?;
    info!("Read {} annotation rows.", rows.len());

    let positives = build_positive_index(&rows, &args.data_root, &args.image_ext)?;

    let images = discover_images(&args.data_root, &args.image_ext)?;
    let split_data = split_images(images, args.train_size, args.seed);
    info!(
        "Split into {} train and {} val images (seed {}).",
        split_data.train_images.len(),
        split_data.val_images.len(),
        args.seed
    );

    let output_dirs = setup_output_directories(args)?;

    let train_pb = create_progress_bar(split_data.train_images.len() as u64, "Train");
    let train = process_split(
        &split_data.train_images,
        &output_dirs.train_images_dir,
        &output_dirs.train_labels_dir,
        &positives,
        args.box_size,
        &train_pb,
    )?;
    train_pb.finish_with_message("Train processing complete");

    let val_pb = create_progress_bar(split_data.val_images.len() as u64, "Val");
    let val = process_split(
        &split_data.val_images,
        &output_dirs.val_images_dir,
        &output_dirs.val_labels_dir,
        &positives,
        args.box_size,
        &val_pb,
    )?;
    val_pb.finish_with_message("Val processing complete");

    info!("Creating dataset.yaml file...");
    let yaml_path = create_dataset_yaml(&output_dirs, &args.class_name)?;
    info!("Wrote {}.", yaml_path.display());

    Ok(ConversionStats {
        annotation_rows: rows.len(),
        indexed_positives: positives.len(),
        train,
        val,
    })
}
