use httpmock::prelude::*;
use kino_program::{FetchOutcome, HttpFetcher, PageFetcher};

const PAGE: &str = "<!DOCTYPE html><html><body><div class=\"line\"></div></body></html>";

fn fetcher() -> HttpFetcher {
    HttpFetcher::new("kino-program-test").unwrap()
}

#[tokio::test]
async fn falls_through_to_the_next_candidate() {
    let server = MockServer::start_async().await;
    let missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/program/");
            then.status(404).body("<html>nenalezeno</html>");
        })
        .await;
    let mirror = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/mirror/program/")
                .header("user-agent", "kino-program-test");
            then.status(200).body(PAGE);
        })
        .await;

    let urls = vec![server.url("/program/"), server.url("/mirror/program/")];
    let outcome = fetcher().fetch_first(&urls).await;

    assert_eq!(
        outcome,
        FetchOutcome::Page {
            url: server.url("/mirror/program/"),
            text: PAGE.to_string(),
        }
    );
    missing.assert_async().await;
    mirror.assert_async().await;
}

#[tokio::test]
async fn soft_404_without_markup_is_skipped() {
    let server = MockServer::start_async().await;
    let soft = server
        .mock_async(|when, then| {
            when.method(GET).path("/program");
            then.status(200).body("Stránka nebyla nalezena");
        })
        .await;
    let dated = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cz/program")
                .query_param("date", "2025-09-07");
            then.status(200).body(PAGE);
        })
        .await;

    let urls = vec![
        server.url("/program"),
        server.url("/cz/program?date=2025-09-07"),
    ];
    let outcome = fetcher().fetch_first(&urls).await;

    assert!(matches!(outcome, FetchOutcome::Page { .. }));
    soft.assert_hits_async(1).await;
    dated.assert_hits_async(1).await;
}

#[tokio::test]
async fn stops_after_first_usable_page() {
    let server = MockServer::start_async().await;
    let primary = server
        .mock_async(|when, then| {
            when.method(GET).path("/a");
            then.status(200).body(PAGE);
        })
        .await;
    let mirror = server
        .mock_async(|when, then| {
            when.method(GET).path("/b");
            then.status(200).body(PAGE);
        })
        .await;

    let urls = vec![server.url("/a"), server.url("/b")];
    fetcher().fetch_first(&urls).await;

    primary.assert_hits_async(1).await;
    mirror.assert_hits_async(0).await;
}

#[tokio::test]
async fn exhaustion_reports_last_status_and_snippet() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/a");
            then.status(500).body("x".repeat(500));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/b");
            then.status(503).body("údržba");
        })
        .await;

    let urls = vec![server.url("/a"), server.url("/b")];
    let outcome = fetcher().fetch_first(&urls).await;

    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            status: Some(503),
            snippet: "údržba".to_string(),
        }
    );
}

#[tokio::test]
async fn long_bodies_are_truncated_in_snippet() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/a");
            then.status(502).body("ž".repeat(1000));
        })
        .await;

    let outcome = fetcher().fetch_first(&[server.url("/a")]).await;

    match outcome {
        FetchOutcome::Failed { status, snippet } => {
            assert_eq!(status, Some(502));
            assert_eq!(snippet.chars().count(), 200);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_errors_have_no_status() {
    let outcome = fetcher()
        .fetch_first(&["http://127.0.0.1:1/program".to_string()])
        .await;

    match outcome {
        FetchOutcome::Failed { status, snippet } => {
            assert_eq!(status, None);
            assert!(!snippet.is_empty());
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
