//! Configuration: DeepL credentials and digest settings.
//!
//! Credentials live in a small JSON file next to the user's other configuration:
//!
//! ```json
//! { "scheme": "https", "FQDN": "api-free.deepl.com", "path": "v2/translate", "auth_key": "..." }
//! ```
//!
//! Settings are optional. [`DigestConfig::default`] reproduces the stock behavior and a JSON file
//! may override any subset of its fields.

use std::collections::BTreeMap;

use url::Url;

use super::*;

/// Name of the directory holding arxiv-today's configuration files.
const CONFIG_DIR: &str = "arxiv-today";

/// Connection details for the translation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
  /// URL scheme, usually "https"
  pub scheme:   String,
  /// Host name of the API (e.g. "api-free.deepl.com")
  #[serde(rename = "FQDN")]
  pub fqdn:     String,
  /// Path of the translate endpoint, without leading slash (e.g. "v2/translate")
  pub path:     String,
  /// DeepL authentication key
  pub auth_key: String,
}

impl Credentials {
  /// Reads credentials from a JSON file.
  ///
  /// # Errors
  ///
  /// Returns [`DigestError::ConfigRead`] if the file can't be read and [`DigestError::Json`] if
  /// it isn't valid JSON or lacks one of the four fields.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, DigestError> {
    let path = path.as_ref();
    debug!("Loading credentials from {}", path.display());
    let raw = read_config(path)?;
    Ok(serde_json::from_str(&raw)?)
  }

  /// Default credentials location, `<config dir>/arxiv-today/deepl.json`.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(CONFIG_DIR).join("deepl.json")
  }

  /// The translate endpoint, `scheme://FQDN/path`.
  pub fn endpoint(&self) -> Result<Url, DigestError> {
    Ok(Url::parse(&format!("{}://{}/{}", self.scheme, self.fqdn, self.path))?)
  }

  /// Initial request parameters: the auth key alone.
  pub fn params(&self) -> BTreeMap<String, String> {
    BTreeMap::from([("auth_key".to_string(), self.auth_key.clone())])
  }
}

/// Tunables for one digest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
  /// arXiv subject categories to fetch, in order
  pub categories:       Vec<String>,
  /// Number of listings requested per category
  pub max_results:      usize,
  /// How many kept records get their abstract translated
  pub max_translations: usize,
  /// Author names kept per record
  pub max_authors:      usize,
  /// DeepL target language code
  pub target_lang:      String,
  /// Base URL of the arXiv API
  pub listing_url:      String,
}

impl Default for DigestConfig {
  fn default() -> Self {
    Self {
      categories:       ["nucl-ex", "hep-ex", "nucl-th", "hep-th"].map(String::from).to_vec(),
      max_results:      10,
      max_translations: 20,
      max_authors:      3,
      target_lang:      "JA".to_string(),
      listing_url:      "http://export.arxiv.org/api".to_string(),
    }
  }
}

impl DigestConfig {
  /// Reads settings from a JSON file. Missing fields keep their defaults.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, DigestError> {
    let path = path.as_ref();
    debug!("Loading settings from {}", path.display());
    let raw = read_config(path)?;
    Ok(serde_json::from_str(&raw)?)
  }

  /// Default settings location, `<config dir>/arxiv-today/settings.json`.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(CONFIG_DIR).join("settings.json")
  }

  /// Loads the settings file at `path` if given, otherwise the default file if it exists,
  /// otherwise the built-in defaults.
  pub fn resolve(path: Option<&Path>) -> Result<Self, DigestError> {
    match path {
      Some(path) => Self::load(path),
      None => {
        let path = Self::default_path();
        if path.exists() {
          Self::load(path)
        } else {
          trace!("No settings file at {}, using defaults", path.display());
          Ok(Self::default())
        }
      },
    }
  }
}

/// Reads a configuration file, attaching its path to any failure.
fn read_config(path: &Path) -> Result<String, DigestError> {
  std::fs::read_to_string(path)
    .map_err(|source| DigestError::ConfigRead { path: path.to_path_buf(), source })
}
