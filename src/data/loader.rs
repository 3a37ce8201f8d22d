use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::frame::DataFrame;
use crate::error::DataError;

/// Display name for a logger file prefix.
pub fn format_prefix(prefix: &str) -> &'static str {
    match prefix {
        "imu" => "IMU",
        "camera" => "Camera",
        "body_state" => "Body",
        "fiducial" => "Fiducial",
        _ => "",
    }
}

pub struct CsvLoader;

impl CsvLoader {
    /// Read every `<prefix>*.csv` in `directories`, grouped by the numeric id
    /// at the end of the file name.
    pub fn find_and_read_data_frames<P: AsRef<Path>>(
        directories: &[P],
        prefix: &str,
    ) -> Result<BTreeMap<u32, Vec<DataFrame>>, DataError> {
        let mut frame_sets: BTreeMap<u32, Vec<DataFrame>> = BTreeMap::new();

        for directory in directories {
            let directory = directory.as_ref();
            let paths = match Self::matching_files(directory, prefix) {
                Ok(paths) => paths,
                Err(e) => {
                    log::warn!("Skipping data directory {}: {}", directory.display(), e);
                    continue;
                }
            };

            for path in paths {
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default();
                let id = Self::file_id(file_name);

                let frame = Self::read_data_frame(&path)?
                    .with_attr("prefix", format_prefix(prefix))
                    .with_attr("id", id);

                log::debug!("Loaded {} ({} rows) as {} {}", path.display(), frame.len(), prefix, id);
                frame_sets.entry(id).or_default().push(frame);
            }
        }

        Ok(frame_sets)
    }

    /// Id encoded as `_<digits>.csv` at the end of a file name, 0 if absent.
    pub fn file_id(file_name: &str) -> u32 {
        let Some(stem) = file_name.strip_suffix(".csv") else {
            return 0;
        };
        let Some((_, digits)) = stem.rsplit_once('_') else {
            return 0;
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return 0;
        }
        digits.parse().unwrap_or(0)
    }

    /// Parse one logger CSV: a header line followed by numeric rows.
    pub fn read_data_frame(path: &Path) -> Result<DataFrame, DataError> {
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| DataError::EmptyFile(path.to_path_buf()))?;
        let names: Vec<String> = header.split(',').map(|name| name.trim().to_string()).collect();

        let mut rows = Vec::new();
        for (index, line) in lines {
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() != names.len() {
                return Err(DataError::RowWidth {
                    path: path.to_path_buf(),
                    line: index + 1,
                    expected: names.len(),
                    found: cells.len(),
                });
            }

            let row = cells
                .iter()
                .map(|cell| {
                    cell.parse::<f64>().map_err(|_| DataError::Parse {
                        path: path.to_path_buf(),
                        line: index + 1,
                        value: cell.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, DataError>>()?;
            rows.push(row);
        }

        Ok(DataFrame::from_rows(names, rows))
    }

    fn matching_files(directory: &Path, prefix: &str) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut paths = Vec::new();

        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(prefix) && name.ends_with(".csv"))
                .unwrap_or(false);
            if matches && path.is_file() {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }
}
