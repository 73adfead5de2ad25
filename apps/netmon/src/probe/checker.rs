use std::error::Error as _;
use std::time::{Duration, Instant};

use tracing::debug;

use super::types::{BodyDetail, ProbeFailure, ProbeResult, SUCCESS_STATUS};

/// Upper bound on how much of a non-success body is kept in the error text.
pub const MAX_BODY_SNIPPET: usize = 512;

const USER_AGENT: &str = concat!("netmon/", env!("CARGO_PKG_VERSION"));

/// Checker trait for reachability checks
///
/// A check never fails as a call: every outcome, including transport errors,
/// is described by the returned [`ProbeResult`]. One attempt per call.
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    async fn check(&self, url: &str) -> ProbeResult;
}

/// HTTP/HTTPS checker issuing a single `HEAD` request
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout_seconds: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, url: &str) -> ProbeResult {
        let result = ProbeResult::started(url);
        let start = Instant::now();

        let response = match self.client.head(url).send().await {
            Ok(response) => response,
            Err(error) => {
                let failure = ProbeFailure::Transport(describe_transport_error(&error));
                return result.down(&failure, elapsed_millis(start));
            }
        };

        let status = response.status();
        if status == SUCCESS_STATUS {
            // dropping the response hands the connection back to the pool
            drop(response);
            return result.up(elapsed_millis(start));
        }

        let detail = read_body_snippet(response).await;
        let duration = elapsed_millis(start);
        debug!("{url} answered {status} after {duration:.3}ms");

        result.down(&ProbeFailure::NonSuccessStatus { status, detail }, duration)
    }
}

fn elapsed_millis(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Read at most [`MAX_BODY_SNIPPET`] bytes of the body.
async fn read_body_snippet(mut response: reqwest::Response) -> BodyDetail {
    let mut buffer = Vec::new();

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let remaining = MAX_BODY_SNIPPET - buffer.len();
                buffer.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
                if buffer.len() >= MAX_BODY_SNIPPET {
                    break;
                }
            }
            Ok(None) => break,
            Err(error) => return BodyDetail::ReadFailed(error.to_string()),
        }
    }

    BodyDetail::Content(String::from_utf8_lossy(&buffer).into_owned())
}

/// reqwest's top-level message hides the cause ("error sending request"),
/// so walk the source chain to keep e.g. "Connection refused".
fn describe_transport_error(error: &reqwest::Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, HttpServer, dev::ServerHandle, web};
    use std::net::{SocketAddr, TcpListener};

    async fn spawn_target() -> anyhow::Result<(SocketAddr, ServerHandle)> {
        let server = HttpServer::new(|| {
            App::new()
                .route("/ok", web::to(|| async { HttpResponse::Ok().finish() }))
                .route("/missing", web::to(|| async { HttpResponse::NotFound().body("nothing here") }))
                .route("/broken", web::to(|| async { HttpResponse::InternalServerError().finish() }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))?;

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Ok((addr, handle))
    }

    fn closed_port() -> anyhow::Result<u16> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        drop(listener);
        Ok(port)
    }

    #[actix_web::test]
    async fn test_ok_target_is_up() -> anyhow::Result<()> {
        let (addr, handle) = spawn_target().await?;
        let checker = HttpChecker::new(5)?;

        let url = format!("http://{addr}/ok");
        let result = checker.check(&url).await;

        assert!(result.success, "expected success, got {result}");
        assert_eq!(result.status_code, 200);
        assert_eq!(result.error_text, "");
        assert!(result.duration_millis > 0.0);
        assert_eq!(result.url, url);

        handle.stop(false).await;
        Ok(())
    }

    #[actix_web::test]
    async fn test_not_found_is_down_with_reason_phrase() -> anyhow::Result<()> {
        let (addr, handle) = spawn_target().await?;
        let checker = HttpChecker::new(5)?;

        let result = checker.check(&format!("http://{addr}/missing")).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 404);
        assert!(result.error_text.contains("Not Found"), "{}", result.error_text);

        handle.stop(false).await;
        Ok(())
    }

    #[actix_web::test]
    async fn test_server_error_is_down() -> anyhow::Result<()> {
        let (addr, handle) = spawn_target().await?;
        let checker = HttpChecker::new(5)?;

        let result = checker.check(&format!("http://{addr}/broken")).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 500);
        assert!(result.error_text.starts_with("HTTP 500 Internal Server Error"));

        handle.stop(false).await;
        Ok(())
    }

    #[actix_web::test]
    async fn test_connection_refused_is_transport_failure() -> anyhow::Result<()> {
        let port = closed_port()?;
        let checker = HttpChecker::new(5)?;

        let result = checker.check(&format!("http://127.0.0.1:{port}/")).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 0);
        assert!(!result.error_text.is_empty());
        assert!(
            result.error_text.to_lowercase().contains("refused"),
            "unexpected error text: {}",
            result.error_text
        );
        Ok(())
    }

    #[actix_web::test]
    async fn test_invalid_url_is_recorded_not_raised() -> anyhow::Result<()> {
        let checker = HttpChecker::new(5)?;

        let result = checker.check("not a url").await;

        assert!(!result.success);
        assert_eq!(result.status_code, 0);
        assert!(!result.error_text.is_empty());
        Ok(())
    }
}
