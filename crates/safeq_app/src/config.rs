//! Server list loading for the exporter binary.
//!
//! The file is INI; every section is one server, processed in the order it
//! appears. Keys are matched case-insensitively and values are taken verbatim
//! (no quote or backslash processing, so Windows paths survive):
//!
//! ```ini
//! [Server1]
//! BASE_URL = http://server1.example.com
//! USERNAME = admin1
//! PASSWORD = password1
//! FILEPATH = ./downloads1
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ini::{EscapePolicy, Ini, ParseOption, Properties};
use safeq_core::ServerRecord;
use safeq_logging::{sink_error, sink_info, LogSink};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "config.ini";
pub const REQUIRED_KEYS: [&str; 4] = ["BASE_URL", "USERNAME", "PASSWORD", "FILEPATH"];
const TEMPLATE_SERVERS: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found", path.display())]
    NotFound { path: PathBuf, template_written: bool },
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] ini::ParseError),
    #[error("invalid section {section}: {message}")]
    InvalidSection { section: String, message: String },
    #[error("missing parameters in section {section}: {}", missing.join(", "))]
    MissingParameters {
        section: String,
        missing: Vec<&'static str>,
    },
}

impl ConfigError {
    /// Text shown to the operator before the process halts.
    pub fn edit_prompt(&self, path: &Path) -> String {
        match self {
            ConfigError::NotFound {
                template_written: true,
                ..
            } => format!(
                "!!! Config file [ {} ] has been created. Please edit it with your actual settings.",
                path.display()
            ),
            ConfigError::NotFound {
                template_written: false,
                ..
            } => format!(
                "!!! Config file [ {} ] could not be created. Please create it manually.",
                path.display()
            ),
            ConfigError::MissingParameters { .. } => format!(
                "\n!!! Please edit the config file [ {} ] to include all required parameters.\n",
                path.display()
            ),
            _ => format!(
                "\n!!! Please fix the config file [ {} ] and run again.\n",
                path.display()
            ),
        }
    }
}

pub struct ConfigStore {
    sink: Arc<dyn LogSink>,
}

impl ConfigStore {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Loads every server section in file order.
    ///
    /// A missing file gets a template written in its place and is still an
    /// error; callers are expected to halt on any `Err`.
    pub fn load(&self, path: &Path) -> Result<Vec<ServerRecord>, ConfigError> {
        if !path.exists() {
            sink_error!(self.sink, "Config file {} not found.", path.display());
            let template_written = self.create_template(path);
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
                template_written,
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records = parse_records(&content).inspect_err(|err| {
            if let ConfigError::MissingParameters { section, missing } = err {
                sink_error!(
                    self.sink,
                    "Missing parameters in section {}: {}",
                    section,
                    missing.join(", ")
                );
            } else {
                sink_error!(self.sink, "Invalid config file {}: {}", path.display(), err);
            }
        })?;

        sink_info!(
            self.sink,
            "Loaded {} server(s) from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    fn create_template(&self, path: &Path) -> bool {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut file = fs::File::create(path)?;
            template().write_to_policy(&mut file, EscapePolicy::Nothing)
        })();
        match result {
            Ok(()) => true,
            Err(err) => {
                sink_error!(self.sink, "Failed to create config file. Error: {}", err);
                false
            }
        }
    }
}

/// Parses server sections, preserving their order in the document.
pub fn parse_records(content: &str) -> Result<Vec<ServerRecord>, ConfigError> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options)?;

    let mut records: Vec<ServerRecord> = Vec::new();
    for (section, properties) in ini.iter() {
        let Some(name) = section else {
            // Keys above the first header have no server to belong to.
            if let Some((key, _)) = properties.iter().next() {
                return Err(ConfigError::InvalidSection {
                    section: "<none>".to_string(),
                    message: format!("key {key} appears before any [section] header"),
                });
            }
            continue;
        };
        if records.iter().any(|r| r.name.eq_ignore_ascii_case(name)) {
            return Err(ConfigError::InvalidSection {
                section: name.to_string(),
                message: "section is defined more than once".to_string(),
            });
        }
        records.push(section_to_record(name, properties)?);
    }
    Ok(records)
}

fn section_to_record(name: &str, properties: &Properties) -> Result<ServerRecord, ConfigError> {
    let values = REQUIRED_KEYS.map(|key| properties.get(key));
    match values {
        [Some(base_url), Some(username), Some(password), Some(filepath)] => Ok(
            ServerRecord::new(name, base_url, username, password, filepath),
        ),
        _ => Err(ConfigError::MissingParameters {
            section: name.to_string(),
            missing: REQUIRED_KEYS
                .iter()
                .zip(values)
                .filter(|(_, value)| value.is_none())
                .map(|(key, _)| *key)
                .collect(),
        }),
    }
}

fn template() -> Ini {
    let mut ini = Ini::new();
    for i in 1..=TEMPLATE_SERVERS {
        ini.with_section(Some(format!("Server{i}")))
            .set("BASE_URL", format!("http://server{i}.example.com"))
            .set("USERNAME", format!("admin{i}"))
            .set("PASSWORD", format!("password{i}"))
            .set("FILEPATH", format!("./downloads{i}"));
    }
    ini
}

/// `config.ini` beside the running executable, or in the working directory if that is unknown.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILENAME)
}
