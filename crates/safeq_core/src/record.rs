use std::path::PathBuf;

/// One configured server. Built once by the config store and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecord {
    pub name: String,
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub filepath: String,
}

impl ServerRecord {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        filepath: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            filepath: filepath.into(),
        }
    }

    pub fn destination_dir(&self) -> PathBuf {
        PathBuf::from(&self.filepath)
    }
}

/// Per-server outcome of a run; only used for logging and the closing summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub server_name: String,
    pub succeeded: bool,
    pub saved_file_path: Option<PathBuf>,
}

impl ExportResult {
    pub fn failed(server_name: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            succeeded: false,
            saved_file_path: None,
        }
    }
}
