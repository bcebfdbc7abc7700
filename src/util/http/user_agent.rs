use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

/// 固定的桌面版 Chrome User-Agent。
/// 被判定為機器人時，搜尋結果頁的版型會不同。
pub const DESKTOP_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) \
Chrome/120.0.0.0 Safari/537.36";

/// Builds the header set sent with every search request.
///
/// An unusable user agent (e.g. one containing control characters) falls back
/// to [`DESKTOP_CHROME`].
pub fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static(DESKTOP_CHROME));
    headers.insert(USER_AGENT, value);
    headers
}
