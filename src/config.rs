use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
  /// attach code table labels to the parsed sections
  pub lookup: bool,
  pub format: OutputFormat,
  /// number of decoded values printed per message
  pub max_values: usize,
  pub decode_values: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      lookup: true,
      format: OutputFormat::Json,
      max_values: 10,
      decode_values: true,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Json,
  Yaml,
}

/// Loads the YAML config at `path`, writing the defaults there when the file does not exist.
pub fn load(path: impl AsRef<Path>) -> Result<Config> {
  let config: Config = confy::load_path(path.as_ref())?;
  debug!("Config `{}` : {:?}", path.as_ref().display(), config);
  Ok(config)
}
