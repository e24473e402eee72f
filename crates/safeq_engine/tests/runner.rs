use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use safeq_core::{ExportResult, ServerRecord};
use safeq_engine::{ClientSettings, ExportClient, Runner, UserExporter};
use safeq_logging::{LogSink, MemorySink};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Login(String),
    Export { server: String, filepath: PathBuf },
}

struct ScriptedExporter {
    server: String,
    login_ok: bool,
    export_ok: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

#[async_trait::async_trait]
impl UserExporter for ScriptedExporter {
    async fn login(&mut self, username: &str, _password: &str) -> bool {
        assert_eq!(username, format!("user-{}", self.server));
        self.calls.lock().unwrap().push(Call::Login(self.server.clone()));
        self.login_ok
    }

    async fn export_users(&mut self, filepath: &Path, label: &str) -> bool {
        assert_eq!(label, self.server);
        self.calls.lock().unwrap().push(Call::Export {
            server: self.server.clone(),
            filepath: filepath.to_path_buf(),
        });
        self.export_ok
    }
}

fn record(name: &str) -> ServerRecord {
    ServerRecord::new(
        name,
        format!("http://{name}.example.com"),
        format!("user-{name}"),
        "pw",
        format!("./out/{name}"),
    )
}

#[tokio::test]
async fn logs_in_once_per_record_in_order_and_exports_only_after_success() {
    let records = vec![record("alpha"), record("beta"), record("gamma")];
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = MemorySink::new();
    let runner = Runner::new(Arc::new(sink.clone()));

    let results = runner
        .run(&records, |rec| {
            Ok(ScriptedExporter {
                server: rec.name.clone(),
                login_ok: rec.name != "beta",
                export_ok: rec.name != "gamma",
                calls: calls.clone(),
            })
        })
        .await;

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            Call::Login("alpha".into()),
            Call::Export {
                server: "alpha".into(),
                filepath: PathBuf::from("./out/alpha"),
            },
            Call::Login("beta".into()),
            Call::Login("gamma".into()),
            Call::Export {
                server: "gamma".into(),
                filepath: PathBuf::from("./out/gamma"),
            },
        ]
    );

    let outcomes: Vec<(String, bool)> = results
        .iter()
        .map(|r| (r.server_name.clone(), r.succeeded))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("alpha".to_string(), true),
            ("beta".to_string(), false),
            ("gamma".to_string(), false),
        ]
    );

    let messages: Vec<String> = sink.records().into_iter().map(|r| r.message).collect();
    assert_eq!(
        messages,
        vec![
            "Processing server: alpha".to_string(),
            "Processing server: beta".to_string(),
            "Failed to process server beta".to_string(),
            "Processing server: gamma".to_string(),
            "Finished: 1/3 servers exported".to_string(),
        ]
    );
}

#[tokio::test]
async fn factory_failure_is_scoped_to_its_record() {
    let records = vec![record("broken"), record("fine")];
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = MemorySink::new();
    let runner = Runner::new(Arc::new(sink.clone()));

    let results = runner
        .run(&records, |rec| {
            if rec.name == "broken" {
                return Err(forced_error());
            }
            Ok(ScriptedExporter {
                server: rec.name.clone(),
                login_ok: true,
                export_ok: true,
                calls: calls.clone(),
            })
        })
        .await;

    assert_eq!(results[0], ExportResult::failed("broken"));
    assert!(results[1].succeeded);
    assert!(sink.contains("Failed to set up client for server broken"));
    assert_eq!(calls.lock().unwrap().len(), 2);
}

fn forced_error() -> safeq_engine::RequestError {
    safeq_engine::RequestError {
        kind: safeq_engine::FailureKind::Request,
        message: "builder failed".into(),
    }
}

#[tokio::test]
async fn real_clients_continue_past_unreachable_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/web/Dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<meta name="_csrf" content="t">"#,
            "text/html",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/servlet/users.ExportUsersServlet"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"a;b\n".to_vec()))
        .mount(&server)
        .await;

    let out = tempfile::TempDir::new().unwrap();
    let dest = out.path().to_string_lossy().to_string();
    let records = vec![
        ServerRecord::new("down", "http://127.0.0.1:1", "u", "p", dest.clone()),
        ServerRecord::new("up", server.uri(), "u", "p", dest),
    ];

    let sink = MemorySink::new();
    let shared: Arc<dyn LogSink> = Arc::new(sink.clone());
    let runner = Runner::new(shared.clone());
    let results = runner
        .run(&records, |rec| {
            ExportClient::new(&rec.base_url, ClientSettings::default(), shared.clone())
        })
        .await;

    assert!(!results[0].succeeded);
    assert!(results[1].succeeded);
    let saved = results[1].saved_file_path.as_ref().unwrap();
    assert!(saved
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("up_exported_users_"));
    assert!(sink.contains("Failed to process server down"));
}
