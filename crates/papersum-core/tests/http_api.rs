//! End-to-end tests for [`HttpApi`] against a one-shot local HTTP server.
//!
//! Each server answers exactly one request with a canned response and hands
//! the raw request text back to the test for inspection.

use std::io::ErrorKind;

use papersum_core::present::{PaperListView, ToggleLabel};
use papersum_core::{
    AnalysisController, ApiConfig, ApiError, HttpApi, Notifier, PaperApi, SearchController,
    SearchOutcome,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct OneShotServer {
    base_url: String,
    request: oneshot::Receiver<String>,
}

async fn serve_once(status: &str, body: &'static str) -> Option<OneShotServer> {
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return None,
        Err(err) => panic!("failed to bind local test listener: {err}"),
    };
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes();

    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let raw = read_request(&mut socket).await;
        let _ = socket.write_all(&response).await;
        let _ = socket.shutdown().await;
        let _ = tx.send(raw);
    });

    Some(OneShotServer {
        base_url: format!("http://{addr}"),
        request: rx,
    })
}

/// Read headers, then as many body bytes as `Content-Length` announces.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

fn api_for(server: &OneShotServer) -> HttpApi {
    HttpApi::new(ApiConfig::new(&server.base_url)).unwrap()
}

const ONE_PAPER: &str = r#"[{"id":"1","arxiv_id":"2101.0001","title":"T","authors":["A","B"],"abstract":"short","summary":"S","categories":["cs.LG"],"published_date":"2021-01-01"}]"#;

#[tokio::test]
async fn search_sends_encoded_get_and_renders_one_card() {
    let Some(server) = serve_once("200 OK", ONE_PAPER).await else {
        return;
    };
    let api = api_for(&server);
    let mut search = SearchController::new();

    let outcome = search.submit(&api, "machine learning").await.unwrap();
    assert!(matches!(outcome, SearchOutcome::Replaced(1)));

    let request = server.request.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert_eq!(
        request_line,
        "GET /api/papers/search/?query=machine%20learning HTTP/1.1"
    );

    let expansion = Default::default();
    let view = PaperListView::build(search.papers(), search.is_loading(), &expansion);
    let PaperListView::Papers(cards) = view else {
        panic!("expected cards");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].authors, "A, B");
    assert_eq!(cards[0].toggle, None::<ToggleLabel>);
}

#[tokio::test]
async fn analyze_posts_json_body() {
    let Some(server) = serve_once(
        "200 OK",
        r#"{"summary":"s","insights":["i1","i2"],"sentiment":"neutral","topics":["t"]}"#,
    )
    .await
    else {
        return;
    };
    let api = api_for(&server);
    let mut analysis = AnalysisController::new();
    let mut notifier = Notifier::default();
    analysis.set_text("hello world");

    assert!(analysis.submit(&api, &mut notifier).await);

    let request = server.request.await.unwrap();
    assert!(request.starts_with("POST /api/analyze/ HTTP/1.1"));
    assert!(
        request
            .to_ascii_lowercase()
            .contains("content-type: application/json")
    );
    assert!(request.ends_with(r#"{"text":"hello world"}"#));

    let result = analysis.result().unwrap();
    assert_eq!(result.summary, "s");
    assert_eq!(result.insights, vec!["i1", "i2"]);
    assert_eq!(notifier.latest().unwrap().title, "Analysis complete");
}

#[tokio::test]
async fn analyze_server_error_notifies_and_clears_loading() {
    let Some(server) = serve_once(
        "500 Internal Server Error",
        r#"{"error":"model unavailable"}"#,
    )
    .await
    else {
        return;
    };
    let api = api_for(&server);
    let mut analysis = AnalysisController::new();
    let mut notifier = Notifier::default();
    analysis.set_text("hello world");

    assert!(analysis.submit(&api, &mut notifier).await);
    assert!(analysis.result().is_none());
    assert!(!analysis.is_loading());
    let latest = notifier.latest().unwrap();
    assert!(latest.is_error());
    assert_eq!(latest.description, "Failed to analyze text. Please try again.");
}

#[tokio::test]
async fn search_error_status_surfaces_backend_message() {
    let Some(server) = serve_once(
        "400 Bad Request",
        r#"{"error":"Query parameter is required"}"#,
    )
    .await
    else {
        return;
    };
    let api = api_for(&server);
    let err = api.search("x").await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("Query parameter is required"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return,
        Err(err) => panic!("failed to bind local test listener: {err}"),
    };
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpApi::new(ApiConfig::new(format!("http://{addr}"))).unwrap();
    let mut search = SearchController::new();
    let outcome = search.submit(&api, "anything").await.unwrap();
    assert!(matches!(
        outcome,
        SearchOutcome::Failed(ApiError::Transport(_))
    ));
    assert!(search.papers().is_none());
    assert!(!search.is_loading());
}
