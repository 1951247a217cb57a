//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use paging_relay::config::{RelayConfig, TierRole};
use paging_relay::store::RecordStore;
use paging_relay::{HttpServer, Shutdown};

/// Request targets (`path?query`) seen by a mock backend, in arrival order.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<RecordedRequest>>>);

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub target: String,
    pub request_id: Option<String>,
}

impl Recorded {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` receives the request target and returns `(status, json body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Recorded)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded = Recorded::default();
    let log = recorded.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let target = head.split_whitespace().nth(1).unwrap_or("").to_string();
                        let request_id = head
                            .lines()
                            .filter_map(|line| line.split_once(':'))
                            .find(|(name, _)| name.trim().eq_ignore_ascii_case("x-request-id"))
                            .map(|(_, value)| value.trim().to_string());
                        log.0.lock().unwrap().push(RecordedRequest {
                            target: target.clone(),
                            request_id,
                        });

                        let (status, body) = f(target).await;
                        let reason = StatusCode::from_u16(status)
                            .ok()
                            .and_then(|s| s.canonical_reason())
                            .unwrap_or("Unknown");

                        let response_str = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// Start a mock backend that always answers with the same status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> (SocketAddr, Recorded) {
    start_programmable_backend(move |_| async move { (status, body.to_string()) }).await
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = vec![0u8; 8192];
    let mut read = 0;
    loop {
        match socket.read(&mut buf[read..]).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                read += n;
                if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf[..read]).into_owned()
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Forwarding tier config pointing both record kinds at `downstream`.
pub fn forwarding_config(role: TierRole, downstream: SocketAddr) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.tier.role = role;
    config.downstream.episodes_url = format!("http://{}/api/episodes", downstream);
    config.downstream.profiles_url = format!("http://{}/api/profiles", downstream);
    config
}

/// A running tier. Dropping it shuts the server down.
pub struct RunningTier {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningTier {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

impl Drop for RunningTier {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_server(server: HttpServer) -> RunningTier {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningTier { addr, shutdown }
}

pub async fn spawn_tier(config: RelayConfig) -> RunningTier {
    spawn_server(HttpServer::new(config).unwrap()).await
}

pub async fn spawn_data_tier(store: Arc<dyn RecordStore>) -> RunningTier {
    let mut config = RelayConfig::default();
    config.tier.role = TierRole::Data;
    spawn_server(HttpServer::with_store(config, store)).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Log output captured by the test-wide subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).lines().map(str::to_string).collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install a global subscriber writing plain text into a shared buffer.
/// Every test in the binary shares it, so look for lines unique to the test.
pub fn capture_logs() -> CapturedLogs {
    static LOGS: OnceLock<CapturedLogs> = OnceLock::new();
    LOGS.get_or_init(|| {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let _ = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .try_init();
        logs
    })
    .clone()
}
