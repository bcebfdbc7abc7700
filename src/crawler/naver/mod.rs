//! # Naver 搜尋股價採集模組
//!
//! 透過 Naver 搜尋「{公司名稱} 주가」，從搜尋結果頁的股價摘要區塊讀出目前指數、
//! 漲跌與漲跌幅。
//!
//! ## 流程
//!
//! - **搜尋 (`search`)**：組出查詢參數，以桌面瀏覽器的 User-Agent 發出單次 GET。
//! - **解析 (`quote`)**：找出摘要區塊，把文字切成 token 後取出各欄位。
//!
//! ## 站點資訊
//!
//! - 來源域名：`search.naver.com`
//! - 抓取技術：HTTP GET 搭配 CSS Selector 解析。

use std::time::Duration;

use crate::config::{self, NaverSearch};

/// 摘要區塊解析
pub mod quote;
/// 搜尋請求
pub mod search;

/// Naver 搜尋採集器
#[derive(Debug, Clone, PartialEq)]
pub struct Naver {
    endpoint: String,
    user_agent: String,
    timeout: Duration,
}

impl Naver {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Naver {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
            timeout,
        }
    }
}

impl From<&NaverSearch> for Naver {
    fn from(settings: &NaverSearch) -> Self {
        Naver::new(
            settings.url.as_str(),
            settings.user_agent.as_str(),
            settings.timeout(),
        )
    }
}

impl Default for Naver {
    fn default() -> Self {
        Naver::from(&config::SETTINGS.naver)
    }
}
