use std::{env, path::Path, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{logging, util::http::user_agent};

const CONFIG_PATH: &str = "app.json";

pub static SETTINGS: Lazy<App> = Lazy::new(App::get);

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct App {
    pub naver: NaverSearch,
    pub system: System,
}

const NAVER_SEARCH_URL: &str = "NAVER_SEARCH_URL";
const NAVER_USER_AGENT: &str = "NAVER_USER_AGENT";
const NAVER_TIMEOUT_SECS: &str = "NAVER_TIMEOUT_SECS";

/// Naver 搜尋請求設定
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NaverSearch {
    pub url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NaverSearch {
    fn default() -> Self {
        NaverSearch {
            url: "https://search.naver.com/search.naver".to_string(),
            user_agent: user_agent::DESKTOP_CHROME.to_string(),
            timeout_secs: 10,
        }
    }
}

impl NaverSearch {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

const SYSTEM_PIPELINE_TIMEOUT_SECS: &str = "SYSTEM_PIPELINE_TIMEOUT_SECS";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct System {
    /// 搜尋加上解析整體的時間上限
    pub pipeline_timeout_secs: u64,
}

impl Default for System {
    fn default() -> Self {
        System {
            pipeline_timeout_secs: 15,
        }
    }
}

impl System {
    pub fn pipeline_timeout(&self) -> Duration {
        Duration::from_secs(self.pipeline_timeout_secs)
    }
}

impl App {
    /// 有設定檔就讀取，讀不到或格式錯誤就用預設值，最後再以 env 覆蓋
    fn get() -> Self {
        let config_path = config_path();
        let app = if config_path.exists() {
            match Self::from_file(&config_path) {
                Ok(app) => app,
                Err(why) => {
                    logging::error_file_async(format!(
                        "I can't read the config context because {:?}",
                        why
                    ));
                    App::default()
                }
            }
        } else {
            App::default()
        };

        app.override_with_env()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let app = config_config::builder()
            .add_source(config_file::from(path))
            .build()?
            .try_deserialize::<App>()?;

        Ok(app)
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(self) -> Self {
        self.override_with(|key| env::var(key).ok())
    }

    fn override_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(NAVER_SEARCH_URL) {
            self.naver.url = url;
        }

        if let Some(user_agent) = lookup(NAVER_USER_AGENT) {
            self.naver.user_agent = user_agent;
        }

        if let Some(secs) = lookup(NAVER_TIMEOUT_SECS).and_then(|v| parse_secs(&v)) {
            self.naver.timeout_secs = secs;
        }

        if let Some(secs) = lookup(SYSTEM_PIPELINE_TIMEOUT_SECS).and_then(|v| parse_secs(&v)) {
            self.system.pipeline_timeout_secs = secs;
        }

        self
    }
}

/// 秒數必須是正整數，0 會讓每次查詢立即逾時
fn parse_secs(value: &str) -> Option<u64> {
    u64::from_str(value.trim()).ok().filter(|secs| *secs > 0)
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
