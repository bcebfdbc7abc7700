use async_trait::async_trait;
use scraper::Html;

use crate::{
    crawler::{
        naver::{search, Naver},
        QuoteError, StockQuote,
    },
    declare::{Direction, Quote},
    logging,
    util::{
        http::{element, RawDocument},
        text,
    },
};

/// 摘要區塊的樣式組合，依優先順序排列；新的版型往後加即可。
pub const SUMMARY_BLOCK_VARIANTS: &[&str] = &[".spt_con.dw", ".spt_con.up"];

/// 指數
const INDEX_MARKER: &str = "지수";
/// 上漲
const RISE_MARKER: &str = "상승";
/// 下跌
const FALL_MARKER: &str = "하락";

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("데이터를 찾지 못했습니다.")]
    NotFound,
    #[error("검색 도중 에러가 났습니다: {0}")]
    Selector(String),
}

#[async_trait]
impl StockQuote for Naver {
    async fn get_stock_quote(&self, company_name: &str) -> Result<Quote, QuoteError> {
        let document = search::fetch(self, company_name).await?;

        match extract(&document) {
            Ok(quote) => {
                logging::debug_file_async(format!("{} {:?}", company_name, quote));
                Ok(quote)
            }
            Err(why) => {
                logging::warn_file_async(format!(
                    "Failed to extract the quote of {} because {:?}",
                    company_name, why
                ));
                Err(why.into())
            }
        }
    }
}

/// Locates the summary block in a search result page and parses it.
///
/// Only a missing block (or an unusable selector list) is an error; any field
/// that cannot be found in the block is left empty.
pub fn extract(document: &RawDocument) -> Result<Quote, ExtractionError> {
    let html = Html::parse_document(&document.body);
    let block = element::select_first_of(&html, SUMMARY_BLOCK_VARIANTS)
        .map_err(|why| ExtractionError::Selector(why.to_string()))?
        .ok_or(ExtractionError::NotFound)?;

    Ok(parse_summary(&element::stripped_text(&block)))
}

/// Parses the normalized text of a summary block,
/// e.g. `지수 476 전일대비 상승 1 (+0.21%)`.
pub fn parse_summary(summary: &str) -> Quote {
    let mut quote = scan_tokens(&text::tokenize(summary));
    quote.direction = direction_of(summary);
    quote
}

/// 只要出現「상승」就是上漲，不看位置
pub fn direction_of(summary: &str) -> Direction {
    if summary.contains(RISE_MARKER) {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Scans the tokens once from left to right.
///
/// - `지수` takes the next token as the price.
/// - `상승` / `하락` take the next token as the change.
/// - a token holding both `(` and `%` is the change percent, parentheses removed.
///
/// A marker that appears again overwrites the earlier value.
fn scan_tokens(tokens: &[&str]) -> Quote {
    let mut quote = Quote::default();

    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);

        match (*token, next) {
            (INDEX_MARKER, Some(value)) => quote.price = value.to_string(),
            (RISE_MARKER | FALL_MARKER, Some(value)) => quote.change = value.to_string(),
            _ if text::contains_all(token, &['(', '%']) => {
                quote.change_percent = text::strip_chars(token, &['(', ')']).to_string();
            }
            _ => {}
        }
    }

    quote
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::{
        crawler::{fetch_stock_quote, naver::search::FetchError},
        declare::QuoteResult,
        util::http::user_agent,
    };

    const UP_PAGE: &str = r#"
        <html><body>
          <div class="api_subject_bx">
            <div class="spt_con up">
              <span class="spt_tlt">지수</span>
              <strong>476</strong>
              <span class="n_ch">
                <em class="txt">전일대비</em>
                <span class="ico">상승</span>
                <em>1</em>
                <em>(+0.21%)</em>
              </span>
            </div>
          </div>
        </body></html>
    "#;

    const DOWN_PAGE: &str = r#"
        <html><body>
          <div class="spt_con dw">
            <span class="spt_tlt">지수</span>
            <strong>2,476.35</strong>
            <span class="n_ch">
              <em class="txt">전일대비</em>
              <span class="ico">하락</span>
              <em>12.30</em>
              <em>(-0.49%)</em>
            </span>
          </div>
        </body></html>
    "#;

    fn document(body: &str) -> RawDocument {
        RawDocument {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    fn quote(price: &str, change: &str, change_percent: &str, direction: Direction) -> Quote {
        Quote {
            price: price.to_string(),
            change: change.to_string(),
            change_percent: change_percent.to_string(),
            direction,
        }
    }

    #[test]
    fn test_parse_summary() {
        assert_eq!(
            parse_summary("지수 476 전일대비 상승 1 (+0.21%)"),
            quote("476", "1", "+0.21%", Direction::Up)
        );
    }

    #[test]
    fn test_parse_summary_down() {
        assert_eq!(
            parse_summary("지수 2,476.35 전일대비 하락 12.30 (-0.49%)"),
            quote("2,476.35", "12.30", "-0.49%", Direction::Down)
        );
    }

    #[test]
    fn test_parse_summary_without_index_marker() {
        assert_eq!(
            parse_summary("476 전일대비 상승 1 (+0.21%)"),
            quote("", "1", "+0.21%", Direction::Up)
        );
    }

    #[test]
    fn test_parse_summary_last_marker_wins() {
        let parsed = parse_summary("지수 476 상승 1 (+0.21%) 하락 3 지수 480");

        assert_eq!(parsed.change, "3");
        assert_eq!(parsed.price, "480");
        assert_eq!(parsed.direction, Direction::Up);
    }

    #[test]
    fn test_parse_summary_marker_at_end() {
        assert_eq!(parse_summary("전일대비 하락"), quote("", "", "", Direction::Down));
        assert_eq!(parse_summary("476 지수"), quote("", "", "", Direction::Down));
    }

    #[test]
    fn test_parse_summary_never_fails_on_noise() {
        for summary in ["", "   ", "(", "%", "()", "지수", "(%) (%)", "상승세 ((", "\u{a0}지수\u{a0}"] {
            let parsed = parse_summary(summary);
            assert_eq!(parsed, parse_summary(summary));
        }

        assert_eq!(parse_summary("(%)").change_percent, "%");
        assert_eq!(parse_summary("").direction, Direction::Down);
    }

    #[test]
    fn test_direction_of_is_a_presence_check() {
        assert_eq!(direction_of("전일대비 상승 1"), Direction::Up);
        assert_eq!(direction_of("전일대비 하락 1"), Direction::Down);
        assert_eq!(direction_of("보합 0"), Direction::Down);
        assert_eq!(direction_of("하락 1 상승세"), Direction::Up);
    }

    #[test]
    fn test_extract_up_block() {
        assert_eq!(
            extract(&document(UP_PAGE)).unwrap(),
            quote("476", "1", "+0.21%", Direction::Up)
        );
    }

    #[test]
    fn test_extract_down_block() {
        assert_eq!(
            extract(&document(DOWN_PAGE)).unwrap(),
            quote("2,476.35", "12.30", "-0.49%", Direction::Down)
        );
    }

    #[test]
    fn test_extract_first_block_in_document_order() {
        let body = r#"
            <div class="spt_con up">지수 100 상승 2 (+2.04%)</div>
            <div class="spt_con dw">지수 90 하락 5 (-5.26%)</div>
        "#;

        assert_eq!(
            extract(&document(body)).unwrap(),
            quote("100", "2", "+2.04%", Direction::Up)
        );
    }

    #[test]
    fn test_extract_requires_both_classes() {
        let body = r#"<div class="spt_con">지수 1</div><div class="up">지수 2</div>"#;

        assert!(matches!(
            extract(&document(body)),
            Err(ExtractionError::NotFound)
        ));
    }

    #[test]
    fn test_extract_partial_block() {
        let body = r#"<div class="spt_con dw"><span>전일대비</span><span>하락</span></div>"#;

        assert_eq!(
            extract(&document(body)).unwrap(),
            quote("", "", "", Direction::Down)
        );
    }

    #[test]
    fn test_extract_not_found_message() {
        let why = extract(&document("<html><body>검색결과가 없습니다</body></html>")).unwrap_err();

        assert_eq!(why.to_string(), "데이터를 찾지 못했습니다.");
    }

    fn naver_for(server: &MockServer, timeout: Duration) -> Naver {
        Naver::new(
            format!("{}/search.naver", server.uri()),
            user_agent::DESKTOP_CHROME,
            timeout,
        )
    }

    #[tokio::test]
    async fn test_get_stock_quote() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.naver"))
            .and(query_param("query", "삼성전자 주가"))
            .respond_with(ResponseTemplate::new(200).set_body_string(UP_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let result = fetch_stock_quote(&naver_for(&server, Duration::from_secs(5)), "삼성전자").await;

        assert_eq!(
            result,
            QuoteResult::Success(quote("476", "1", "+0.21%", Direction::Up))
        );
    }

    #[tokio::test]
    async fn test_get_stock_quote_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let result = fetch_stock_quote(&naver_for(&server, Duration::from_secs(5)), "없는회사").await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({ "success": false, "error": "데이터를 찾지 못했습니다." })
        );
    }

    #[tokio::test]
    async fn test_get_stock_quote_timeout_skips_extraction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(UP_PAGE)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let naver = naver_for(&server, Duration::from_millis(300));
        let why = naver.get_stock_quote("삼성전자").await.unwrap_err();

        assert!(matches!(why, QuoteError::Fetch(FetchError::Timeout)));
        assert_eq!(
            QuoteResult::from(Err::<Quote, _>(why)),
            QuoteResult::Failure("검색 시간 초과".to_string())
        );
    }
}
