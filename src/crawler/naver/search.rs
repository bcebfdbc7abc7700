use std::iter;

use reqwest::{StatusCode, Url};

use crate::{
    crawler::naver::Naver,
    util::http::{self, user_agent, RawDocument},
};

/// 搜尋模式與範圍，固定不變
const SEARCH_PARAMS: [(&str, &str); 3] = [
    ("where", "nexearch"),
    ("sm", "tab_hty.top"),
    ("ssc", "tab.nx.all"),
];
/// 韓文的「股價」
const STOCK_PRICE_TERM: &str = "주가";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("검색 시간 초과")]
    Timeout,
    #[error("검색 도중 에러가 났습니다: HTTP {0}")]
    Status(StatusCode),
    #[error("검색 도중 에러가 났습니다: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(why: reqwest::Error) -> Self {
        if why.is_timeout() {
            return FetchError::Timeout;
        }

        match why.status() {
            Some(status) => FetchError::Status(status),
            None => FetchError::Transport(why.to_string()),
        }
    }
}

/// Builds the search URL for a company name.
///
/// The company name is embedded verbatim, followed by the stock price term,
/// and percent-encoded together with the fixed search parameters.
pub fn search_url(endpoint: &str, company_name: &str) -> Result<Url, FetchError> {
    let query = format!("{} {}", company_name, STOCK_PRICE_TERM);
    let params = SEARCH_PARAMS
        .iter()
        .copied()
        .chain(iter::once(("query", query.as_str())));

    Url::parse_with_params(endpoint, params)
        .map_err(|why| FetchError::Transport(format!("invalid search url {}: {}", endpoint, why)))
}

/// Issues exactly one search request and returns the result page.
pub async fn fetch(naver: &Naver, company_name: &str) -> Result<RawDocument, FetchError> {
    let url = search_url(&naver.endpoint, company_name)?;
    let headers = user_agent::browser_headers(&naver.user_agent);
    let document = http::get_document(url, Some(headers), naver.timeout).await?;

    Ok(document)
}
