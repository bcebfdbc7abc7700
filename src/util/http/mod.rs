use std::time::{Duration, Instant};

use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, StatusCode, Url};

use crate::logging::Logger;

pub mod element;
pub mod user_agent;

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// The body of a successful response together with its status.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub status: StatusCode,
    pub body: String,
}

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
///
/// The client keeps no cookies and no idle connections, so every request is
/// independent from the previous one.
///
/// # Returns
///
/// * reqwest::Result<&'static Client>: A reference to the reqwest client instance,
///   or an error if the client cannot be created.
fn get_client() -> reqwest::Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        // 已經安裝過時會回傳 Err，可以忽略
        let _ = rustls::crypto::ring::default_provider().install_default();

        Client::builder()
            // ===== 壓縮 =====
            .brotli(true)
            .gzip(true)
            .zstd(true)
            // ===== 超時設置 =====
            .connect_timeout(Duration::from_secs(8))
            // ===== 連接池 =====
            .pool_max_idle_per_host(0)
            // ===== 重定向 =====
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .build()
    })
}

/// 等待 http logger 把排隊中的訊息寫完
pub fn flush_log() -> bool {
    LOGGER.flush()
}

/// Performs a single HTTP GET request and returns the body as text.
///
/// There is no retry: a transport fault, an expired timeout or a non-2xx
/// status is returned to the caller as is. The timeout covers connecting,
/// sending and reading the whole body.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to, query string included.
/// * `headers`: An optional set of headers to include with the request.
/// * `timeout`: The hard limit for the whole request.
///
/// # Returns
///
/// * `reqwest::Result<RawDocument>`: The response status and text, or the request error.
pub async fn get_document(
    url: Url,
    headers: Option<header::HeaderMap>,
    timeout: Duration,
) -> reqwest::Result<RawDocument> {
    let visit_log = format!("GET:{}", url);
    let client = get_client()?;
    let mut rb = client.get(url).timeout(timeout);

    if let Some(h) = headers {
        rb = rb.headers(h);
    }

    let start = Instant::now();
    let res = match rb.send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => {
            let status = response.status();
            response.text().await.map(|body| RawDocument { status, body })
        }
        Err(why) => Err(why),
    };
    let elapsed = start.elapsed().as_millis();

    match &res {
        Ok(document) => {
            LOGGER.info(format!("{} {} {} ms", visit_log, document.status, elapsed));
        }
        Err(why) => {
            LOGGER.error(format!("{} failed because {:?}. {} ms", visit_log, why, elapsed));
        }
    }

    res
}
