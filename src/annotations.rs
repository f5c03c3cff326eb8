//! Reading the motor annotation CSV and indexing the positive slices.

use log::{debug, info, warn};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::types::{AnnotationRow, PositiveIndex, PositiveSample};
use crate::utils::slice_file_name;

/// Read every row of the annotation CSV.
///
/// A missing file or any malformed row fails the whole read.
pub fn read_annotations(csv_path: &Path) -> Result<Vec<AnnotationRow>> {
    let csv_error = |source: csv::Error| ConvertError::Csv {
        path: csv_path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(csv_path).map_err(csv_error)?;
    reader
        .deserialize::<AnnotationRow>()
        .map(|record| record.map_err(csv_error))
        .collect()
}

/// Map each annotated slice image under `data_root` to its motor point.
///
/// Rows flagged as "no motor" are skipped. When two rows resolve to the same
/// image the later row wins.
pub fn build_positive_index(
    rows: &[AnnotationRow],
    data_root: &Path,
    image_ext: &str,
) -> Result<PositiveIndex> {
    let mut index = PositiveIndex::new();

    for row in rows {
        if !row.motor_z.is_finite() {
            return Err(ConvertError::InvalidSliceIndex {
                tomo_id: row.tomo_id.clone(),
            });
        }
        let Some(slice_index) = row.slice_index() else {
            debug!("Tomogram {} has no motor, skipping", row.tomo_id);
            continue;
        };
        if row.width == 0 || row.height == 0 {
            return Err(ConvertError::InvalidImageSize {
                tomo_id: row.tomo_id.clone(),
            });
        }

        let image_path = data_root
            .join(&row.tomo_id)
            .join(slice_file_name(slice_index, image_ext));
        let sample = PositiveSample {
            x: row.motor_x,
            y: row.motor_y,
            width: row.width,
            height: row.height,
        };
        if index.insert(image_path.clone(), sample).is_some() {
            warn!(
                "Multiple motors annotated on {}, keeping the last one",
                image_path.display()
            );
        }
    }

    info!("Indexed {} positive slices.", index.len());
    Ok(index)
}
