use std::path::Path;
use std::sync::Arc;

use safeq_core::{ExportResult, ServerRecord};
use safeq_logging::{sink_error, sink_info, LogSink};

use crate::RequestError;

/// The per-server protocol surface the runner drives.
#[async_trait::async_trait]
pub trait UserExporter: Send {
    async fn login(&mut self, username: &str, password: &str) -> bool;

    async fn export_users(&mut self, filepath: &Path, label: &str) -> bool;

    /// Path of the file written by the last successful save, if any.
    fn saved_file(&self) -> Option<&Path> {
        None
    }
}

/// Walks server records in order, one fresh exporter per record.
pub struct Runner {
    sink: Arc<dyn LogSink>,
}

impl Runner {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Processes every record regardless of earlier failures; login always precedes export.
    pub async fn run<E, F>(&self, records: &[ServerRecord], mut make_exporter: F) -> Vec<ExportResult>
    where
        E: UserExporter,
        F: FnMut(&ServerRecord) -> Result<E, RequestError>,
    {
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            sink_info!(self.sink, "Processing server: {}", record.name);
            results.push(self.process(record, &mut make_exporter).await);
        }

        let exported = results.iter().filter(|result| result.succeeded).count();
        sink_info!(
            self.sink,
            "Finished: {}/{} servers exported",
            exported,
            results.len()
        );
        results
    }

    async fn process<E, F>(&self, record: &ServerRecord, make_exporter: &mut F) -> ExportResult
    where
        E: UserExporter,
        F: FnMut(&ServerRecord) -> Result<E, RequestError>,
    {
        let mut exporter = match make_exporter(record) {
            Ok(exporter) => exporter,
            Err(err) => {
                sink_error!(
                    self.sink,
                    "Failed to set up client for server {}. Error: {}",
                    record.name,
                    err
                );
                sink_error!(self.sink, "Failed to process server {}", record.name);
                return ExportResult::failed(&record.name);
            }
        };

        if !exporter.login(&record.username, &record.password).await {
            sink_error!(self.sink, "Failed to process server {}", record.name);
            return ExportResult::failed(&record.name);
        }

        let succeeded = exporter
            .export_users(&record.destination_dir(), &record.name)
            .await;
        ExportResult {
            server_name: record.name.clone(),
            succeeded,
            saved_file_path: exporter.saved_file().map(Path::to_path_buf),
        }
    }
}
