use serde::{Serialize, Serializer};

/// 漲跌方向
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// 上漲 (상승)
    Up,
    /// 下跌 (하락)
    #[default]
    Down,
}

/// 從搜尋結果摘要區塊讀出的報價。
///
/// 所有欄位都是畫面上顯示的原始文字，找不到的欄位保留空字串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// 指數 (지수)
    pub price: String,
    /// 與前一日相比的漲跌 (전일대비)
    pub change: String,
    /// 漲跌幅，不含括號 (例：+0.21%)
    pub change_percent: String,
    pub direction: Direction,
}

/// 回傳給呼叫端的最終結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteResult {
    Success(Quote),
    Failure(String),
}

impl QuoteResult {
    pub fn is_success(&self) -> bool {
        matches!(self, QuoteResult::Success(_))
    }
}

impl<E: std::fmt::Display> From<Result<Quote, E>> for QuoteResult {
    fn from(result: Result<Quote, E>) -> Self {
        match result {
            Ok(quote) => QuoteResult::Success(quote),
            Err(why) => QuoteResult::Failure(why.to_string()),
        }
    }
}

/// `{"success":true,"price":..,"change":..,"changePercent":..,"direction":..}`
/// 或 `{"success":false,"error":..}`，欄位攤平在同一層
impl Serialize for QuoteResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            success: bool,
            #[serde(flatten)]
            body: Body<'a>,
        }

        #[derive(Serialize)]
        #[serde(untagged)]
        enum Body<'a> {
            Quote(&'a Quote),
            Error { error: &'a str },
        }

        let envelope = match self {
            QuoteResult::Success(quote) => Envelope {
                success: true,
                body: Body::Quote(quote),
            },
            QuoteResult::Failure(error) => Envelope {
                success: false,
                body: Body::Error { error },
            },
        };

        envelope.serialize(serializer)
    }
}
