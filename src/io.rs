use jwalk::WalkDir;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Args;
use crate::error::{ConvertError, Result};
use crate::types::OutputDirs;
use crate::utils::create_output_directory;

/// Set up the directory structure for YOLO dataset output
pub fn setup_output_directories(args: &Args) -> Result<OutputDirs> {
    let root = create_output_directory(&args.output_dir, false)?;
    let labels_dir = root.join("labels");
    let images_dir = root.join("images");

    Ok(OutputDirs {
        train_labels_dir: create_output_directory(&labels_dir.join("train"), args.clean)?,
        val_labels_dir: create_output_directory(&labels_dir.join("val"), args.clean)?,
        train_images_dir: create_output_directory(&images_dir.join("train"), args.clean)?,
        val_images_dir: create_output_directory(&images_dir.join("val"), args.clean)?,
        root,
    })
}

/// Recursively collect every file under `data_root` with the given extension.
///
/// The result is sorted so that callers see the same order regardless of how
/// the filesystem enumerates directories.
pub fn discover_images(data_root: &Path, image_ext: &str) -> Result<Vec<PathBuf>> {
    if !data_root.is_dir() {
        return Err(ConvertError::io(
            data_root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "image root is not a directory"),
        ));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(data_root).skip_hidden(false) {
        let entry = entry.map_err(|e| ConvertError::io(data_root, e.into()))?;
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == image_ext) {
            continue;
        }
        // The walk does not follow links; a symlinked slice counts unless it
        // points at a directory. A dangling link fails later, at copy time.
        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && !path.is_dir()) {
            images.push(path);
        }
    }
    images.sort();

    info!(
        "Found {} .{} images under {}.",
        images.len(),
        image_ext,
        data_root.display()
    );
    Ok(images)
}

/// Create the dataset.yaml file for YOLO training
pub fn create_dataset_yaml(output_dirs: &OutputDirs, class_name: &str) -> Result<PathBuf> {
    let dataset_yaml_path = output_dirs.root.join("dataset.yaml");
    let absolute_path =
        fs::canonicalize(&output_dirs.root).map_err(|e| ConvertError::io(&output_dirs.root, e))?;

    let mut yaml_content = format!(
        "path: {}\ntrain: images/train\nval: images/val\ntest:\n",
        absolute_path.to_string_lossy()
    );
    yaml_content.push_str("\nnames:\n");
    yaml_content.push_str(&format!("    0: {}\n", class_name));

    let write = || -> std::io::Result<()> {
        let mut dataset_yaml = BufWriter::new(File::create(&dataset_yaml_path)?);
        dataset_yaml.write_all(yaml_content.as_bytes())?;
        dataset_yaml.flush()
    };
    write().map_err(|e| ConvertError::io(&dataset_yaml_path, e))?;

    Ok(dataset_yaml_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_discover_images_filters_extension_and_sorts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        for tomo in ["tomo_b", "tomo_a"] {
            fs::create_dir_all(root.join(tomo)).unwrap();
            fs::write(root.join(tomo).join("slice_0001.jpg"), b"img").unwrap();
            fs::write(root.join(tomo).join("slice_0000.jpg"), b"img").unwrap();
            fs::write(root.join(tomo).join("notes.txt"), b"text").unwrap();
        }

        let images = discover_images(root, "jpg").unwrap();
        assert_eq!(
            images,
            vec![
                root.join("tomo_a/slice_0000.jpg"),
                root.join("tomo_a/slice_0001.jpg"),
                root.join("tomo_b/slice_0000.jpg"),
                root.join("tomo_b/slice_0001.jpg"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_images_follows_symlinked_slices() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("root");
        let raw = temp_dir.path().join("raw");
        fs::create_dir_all(root.join("T1")).unwrap();
        fs::create_dir_all(&raw).unwrap();
        fs::write(root.join("T1/slice_0000.jpg"), b"img").unwrap();
        fs::write(raw.join("slice_0001.jpg"), b"img").unwrap();
        std::os::unix::fs::symlink(raw.join("slice_0001.jpg"), root.join("T1/slice_0001.jpg"))
            .unwrap();
        std::os::unix::fs::symlink(raw.join("gone.jpg"), root.join("T1/slice_0002.jpg")).unwrap();

        let images = discover_images(&root, "jpg").unwrap();
        assert_eq!(
            images,
            vec![
                root.join("T1/slice_0000.jpg"),
                root.join("T1/slice_0001.jpg"),
                root.join("T1/slice_0002.jpg"),
            ]
        );
    }

    #[test]
    fn test_discover_images_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(discover_images(&temp_dir.path().join("absent"), "jpg").is_err());
    }

    #[test]
    fn test_create_dataset_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_dir = temp_dir.path().join("yolo");
        let args = Args::parse_from(["motor2yolo", "-o", output_dir.to_str().unwrap()]);

        let output_dirs = setup_output_directories(&args).unwrap();
        assert!(output_dirs.train_images_dir.is_dir());
        assert!(output_dirs.val_labels_dir.is_dir());

        let yaml_path = create_dataset_yaml(&output_dirs, "motor").unwrap();
        let yaml_content = fs::read_to_string(yaml_path).unwrap();

        assert!(yaml_content.contains("path:"));
        assert!(yaml_content.contains("train: images/train"));
        assert!(yaml_content.contains("val: images/val"));
        assert!(yaml_content.contains("names:"));
        assert!(yaml_content.contains("0: motor"));
    }
}
