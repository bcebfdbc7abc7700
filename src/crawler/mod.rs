use std::time::Duration;

use async_trait::async_trait;

use crate::{
    crawler::naver::{quote::ExtractionError, search::FetchError},
    declare::{Quote, QuoteResult},
};

/// Naver 搜尋
pub mod naver;

/// 採集失敗的原因，訊息即為回傳給呼叫端的文字
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

#[async_trait]
pub trait StockQuote {
    async fn get_stock_quote(&self, company_name: &str) -> Result<Quote, QuoteError>;
}

/// 取得公司目前的指數、漲跌與漲跌幅
pub async fn fetch_stock_quote<S>(source: &S, company_name: &str) -> QuoteResult
where
    S: StockQuote + Sync,
{
    QuoteResult::from(source.get_stock_quote(company_name).await)
}

/// 同 `fetch_stock_quote`，但整個流程超過 `deadline` 就回傳逾時
pub async fn fetch_stock_quote_within<S>(
    source: &S,
    company_name: &str,
    deadline: Duration,
) -> QuoteResult
where
    S: StockQuote + Sync,
{
    match tokio::time::timeout(deadline, fetch_stock_quote(source, company_name)).await {
        Ok(result) => result,
        Err(_) => QuoteResult::Failure(FetchError::Timeout.to_string()),
    }
}
