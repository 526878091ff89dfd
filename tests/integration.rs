use reqwest::Url;
use std::fs;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use topwords::config::Config;
use topwords::emit::render;
use topwords::extract::parse_page;
use topwords::model::{Outcome, WordCount};
use topwords::{HttpFetcher, Pipeline};

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e));
    // Normalize line endings for cross-platform comparison
    text.replace("\r\n", "\n")
}

type Route = (&'static str, u16, &'static str);

/// Serve fixed HTML bodies over plain HTTP on a loopback port.
async fn serve(routes: Vec<Route>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((404, "<html><body>not found</body></html>"));
                let reason = if status == 200 { "OK" } else { "Not Found" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

const HOME: &str = r#"<html><head><title>Home</title></head><body>
<p>alpha beta</p>
<iframe src="/frame"></iframe>
<iframe src="/missing"></iframe>
</body></html>"#;

const FRAME: &str = "<html><body><p>Beta gamma beta</p></body></html>";

const CANCELED: &str =
    "<html><head><title>Navigation Canceled</title></head><body>words words</body></html>";

const MANY_FRAMES: &str = r#"<html><body><p>top</p>
<iframe src="/one"></iframe>
<iframe src="/two"></iframe>
</body></html>"#;

fn routes() -> Vec<Route> {
    vec![
        ("/", 200, HOME),
        ("/frame", 200, FRAME),
        ("/canceled", 200, CANCELED),
        ("/blank", 200, "<html><body>  \n\t </body></html>"),
        ("/many", 200, MANY_FRAMES),
        ("/one", 200, "<html><body><p>first first</p></body></html>"),
        ("/two", 200, "<html><body><p>second second second</p></body></html>"),
    ]
}

#[test]
fn test_shipped_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("topwords.config.json");
    let config = Config::load(&path).unwrap();
    assert_eq!(config.limit, 5);
    assert!(config.follow_frames);
}

#[test]
fn test_sample_page_report() {
    let base = Url::parse("https://example.com/").unwrap();
    let page = parse_page(&read_fixture("sample.html"), &base);
    let report = topwords::report(&page.text, &Config::default());
    let expected = read_fixture("sample.expected");
    assert_eq!(report.replace('\r', "\n"), expected);
}

#[tokio::test]
async fn test_page_with_frames() {
    let base = serve(routes()).await;
    let pipeline = Pipeline::new(HttpFetcher::new(&Config::default()).unwrap(), Config::default());
    let outcome = pipeline.run(&base).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Ranked {
            words: vec![
                WordCount::new("beta", 3),
                WordCount::new("alpha", 1),
                WordCount::new("gamma", 1),
            ],
        }
    );
}

#[tokio::test]
async fn test_frames_disabled() {
    let base = serve(routes()).await;
    let config = Config {
        follow_frames: false,
        ..Config::default()
    };
    let pipeline = Pipeline::new(HttpFetcher::new(&config).unwrap(), config);
    let outcome = pipeline.run(&base).await.unwrap();
    assert_eq!(render(&outcome), "[WORD]: alpha [COUNT]: 1\r[WORD]: beta [COUNT]: 1\r");
}

#[tokio::test]
async fn test_navigation_canceled_page() {
    let base = serve(routes()).await;
    let pipeline = Pipeline::new(HttpFetcher::new(&Config::default()).unwrap(), Config::default());
    let outcome = pipeline.run(&base.join("/canceled").unwrap()).await.unwrap();
    assert_eq!(render(&outcome), "Navigation Canceled");
}

#[tokio::test]
async fn test_missing_page_is_error() {
    let base = serve(routes()).await;
    let pipeline = Pipeline::new(HttpFetcher::new(&Config::default()).unwrap(), Config::default());
    let outcome = pipeline.run(&base.join("/nowhere").unwrap()).await.unwrap();
    assert_eq!(render(&outcome), "ERROR");
}

#[tokio::test]
async fn test_blank_page_is_empty() {
    let base = serve(routes()).await;
    let pipeline = Pipeline::new(HttpFetcher::new(&Config::default()).unwrap(), Config::default());
    let outcome = pipeline.run(&base.join("/blank").unwrap()).await.unwrap();
    assert_eq!(render(&outcome), "EMPTY");
}

#[tokio::test]
async fn test_frame_limit() {
    let base = serve(routes()).await;
    let config = Config {
        max_frames: 1,
        ..Config::default()
    };
    let pipeline = Pipeline::new(HttpFetcher::new(&config).unwrap(), config);
    let outcome = pipeline.run(&base.join("/many").unwrap()).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Ranked {
            words: vec![WordCount::new("first", 2), WordCount::new("top", 1)],
        }
    );
}
