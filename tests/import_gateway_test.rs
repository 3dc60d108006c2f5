use httpmock::prelude::*;
use masterdata_import::config::{DestinationConfig, ImportConfig, SourceConfig};
use masterdata_import::{App, CancelFlag, ImportError};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

// 7 export lines: 5 valid users, 1 with a wrong column count, 1 with a
// missing required phone.
const EXPORT: &[&str] = &[
    "383,anna.k,anna@example.com,+47 555 0101,1,2023-11-02",
    "384,bjorn,bjorn@example.com,+47 555 0102,1,2023-11-02",
    "broken line without enough columns",
    "385,carla,carla@example.com,+47 555 0103,0,2023-11-03",
    "386,dave,dave@example.com,,1,2023-11-03",
    "680,erik,erik@example.com,+47 555 0104,1,2023-11-04",
    "681,frida,frida@example.com,+47 555 0105,1,2023-11-04",
];

fn write_export() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in EXPORT {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn config(endpoint: String, path: &std::path::Path) -> ImportConfig {
    ImportConfig {
        destination: DestinationConfig {
            endpoint,
            database: "masterdata".to_string(),
            table: "users".to_string(),
            poll_interval_ms: 3000,
        },
        source: SourceConfig {
            path: path.to_str().unwrap().to_string(),
            framing: "delimited".to_string(),
            delimiter: ",".to_string(),
        },
        batch_size: 3,
        tags: HashMap::from([("app".to_string(), "import users".to_string())]),
    }
}

#[tokio::test]
async fn end_to_end_import_with_mixed_input() {
    let server = MockServer::start();
    let health = server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200);
    });
    let statements = server.mock(|when, then| {
        when.method(POST).path("/statements");
        then.status(200);
    });

    let file = write_export();
    let app = App::build(&config(server.base_url(), file.path()), CancelFlag::new())
        .await
        .unwrap();
    let (summary, error) = app.import().await;

    assert!(error.is_none());
    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 2);

    health.assert();
    // two flushes: one full batch of 3, one tail batch of 2
    statements.assert_hits(2);
}

#[tokio::test]
async fn rendered_statement_carries_padding_and_column_order() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200);
    });
    let first_batch = server.mock(|when, then| {
        when.method(POST)
            .path("/statements")
            .body_contains("INSERT INTO users (id, username, email, phone, status, createddate) VALUES")
            .body_contains("'00000000383'")
            .body_contains("'2023-11-02'");
        then.status(200);
    });
    let second_batch = server.mock(|when, then| {
        when.method(POST)
            .path("/statements")
            .body_contains("'00000000680'");
        then.status(200);
    });

    let file = write_export();
    let app = App::build(&config(server.base_url(), file.path()), CancelFlag::new())
        .await
        .unwrap();
    let (summary, error) = app.import().await;

    assert!(error.is_none());
    assert_eq!(summary.succeeded, 5);
    first_batch.assert();
    second_batch.assert();
}

#[tokio::test]
async fn write_error_on_second_flush_aborts_with_partial_counts() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200);
    });
    // first batch (contains user 383) succeeds, second batch (contains user
    // 680) is rejected
    let first_batch = server.mock(|when, then| {
        when.method(POST)
            .path("/statements")
            .body_contains("'00000000383'");
        then.status(200);
    });
    let second_batch = server.mock(|when, then| {
        when.method(POST)
            .path("/statements")
            .body_contains("'00000000680'");
        then.status(500).body("quota exceeded");
    });

    let file = write_export();
    let app = App::build(&config(server.base_url(), file.path()), CancelFlag::new())
        .await
        .unwrap();
    let (summary, error) = app.import().await;

    assert!(matches!(
        error,
        Some(ImportError::ExecuteError { status: 500, .. })
    ));
    // only the flushed batch is credited; the dropped tail batch is not
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 2);
    first_batch.assert();
    second_batch.assert();
}

#[tokio::test]
async fn unreachable_gateway_fails_before_the_run_starts() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(503);
    });

    let file = write_export();
    let result = App::build(&config(server.base_url(), file.path()), CancelFlag::new()).await;
    assert!(matches!(result, Err(ImportError::ConnectError { .. })));
}
