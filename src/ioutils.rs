use std::path::{Path, PathBuf};

use crate::constants::{data_files, STDIN_INDICATOR};
use crate::error::{Error, Result};

/// Formats accepted for input data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Picks the format from the extension of a data file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if data_files::JSON.contains(&extension) {
            Ok(DataFormat::Json)
        } else if data_files::YAML.contains(&extension) {
            Ok(DataFormat::Yaml)
        } else {
            Err(Error::InvalidData(format!(
                "unsupported data file '{}', expected a .json, .yaml or .yml file",
                path.display()
            )))
        }
    }
}

/// Ensures the output directory is safe to write to.
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Writes content to a file, creating parent directories if needed.
pub fn write_file<P: AsRef<Path>>(content: &[u8], dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

/// Parses input data. Blank text yields an empty map.
pub fn parse_data(text: &str, format: DataFormat) -> Result<serde_json::Value> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    Ok(match format {
        DataFormat::Json => serde_json::from_str(text)?,
        DataFormat::Yaml => serde_yaml::from_str(text)?,
    })
}

/// Loads the input data given on the command line.
///
/// # Arguments
/// * `inline` - A JSON document, or `-` to read it from stdin
/// * `file` - A JSON or YAML file
///
/// # Returns
/// * `Result<serde_json::Value>` - The data, an empty map when neither is given
pub fn load_data(inline: Option<&str>, file: Option<&Path>) -> Result<serde_json::Value> {
    match (inline, file) {
        (Some(_), Some(_)) => Err(Error::InvalidData(
            "data can't be given both inline and as a file".to_string(),
        )),
        (Some(STDIN_INDICATOR), None) => {
            parse_data(&read_from(std::io::stdin())?, DataFormat::Json)
        }
        (Some(text), None) => parse_data(text, DataFormat::Json),
        (None, Some(path)) => {
            let format = DataFormat::from_path(path)?;
            let text = std::fs::read_to_string(path)
                .map_err(|err| Error::filesystem(path.display().to_string(), err))?;
            parse_data(&text, format)
        }
        (None, None) => parse_data("", DataFormat::Json),
    }
}
