use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding events.json and the master lists. Defaults to ~/.bookboard
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
    /// IANA zone stored times are read in; exported as UTC. Floating local times when unset
    pub timezone: Option<String>,
    #[serde(default = "default_export_file")]
    pub default_file: PathBuf,
}

fn default_delimiter() -> char {
    ','
}

fn default_calendar_name() -> String {
    "Booking Board".to_string()
}

fn default_export_file() -> PathBuf {
    PathBuf::from("bookings.ics")
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { delimiter: default_delimiter() }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            calendar_name: default_calendar_name(),
            timezone: None,
            default_file: default_export_file(),
        }
    }
}

impl ImportConfig {
    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| anyhow!("CSV delimiter must be an ASCII character, got '{}'", self.delimiter))
    }
}

impl Config {
    /// Load the config at `path`, or the default location when `None`.
    /// A missing file is created with default values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(config_path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Read a setting by dotted key, e.g. `export.timezone`.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "storage.data_dir" => {
                self.storage.data_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
            }
            "import.delimiter" => self.import.delimiter.to_string(),
            "export.calendar_name" => self.export.calendar_name.clone(),
            "export.timezone" => self.export.timezone.clone().unwrap_or_default(),
            "export.default_file" => self.export.default_file.display().to_string(),
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        };
        Ok(value)
    }

    /// Update a setting by dotted key. An empty value clears optional settings.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let optional = |v: &str| if v.is_empty() { None } else { Some(v.to_string()) };

        match key {
            "storage.data_dir" => self.storage.data_dir = optional(value).map(PathBuf::from),
            "import.delimiter" => {
                let mut chars = value.chars();
                let delimiter = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(anyhow!("Delimiter must be a single character")),
                };
                ImportConfig { delimiter }.delimiter_byte()?;
                self.import.delimiter = delimiter;
            }
            "export.calendar_name" => {
                if value.is_empty() {
                    return Err(anyhow!("Calendar name cannot be empty"));
                }
                self.export.calendar_name = value.to_string();
            }
            "export.timezone" => {
                if let Some(tz) = optional(value) {
                    tz.parse::<chrono_tz::Tz>()
                        .map_err(|_| anyhow!("Unknown timezone: {}", tz))?;
                    self.export.timezone = Some(tz);
                } else {
                    self.export.timezone = None;
                }
            }
            "export.default_file" => {
                if value.is_empty() {
                    return Err(anyhow!("Default export file cannot be empty"));
                }
                self.export.default_file = PathBuf::from(value);
            }
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        }
        Ok(())
    }

    pub const KEYS: [&'static str; 5] = [
        "storage.data_dir",
        "import.delimiter",
        "export.calendar_name",
        "export.timezone",
        "export.default_file",
    ];
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "bookboard", "bookboard")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
