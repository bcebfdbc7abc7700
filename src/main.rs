use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

pub mod config;
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod util;

use crate::{crawler::naver::Naver, declare::QuoteResult};

#[cfg(all(target_os = "linux", target_env = "musl"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const MISSING_COMPANY: &str = "회사명을 입력해주세요.";

/// 以 Naver 搜尋查詢公司目前的股價，結果以 JSON 輸出到 stdout
#[derive(Parser, Debug)]
#[command(name = "naver_stock_quote", version)]
struct Cli {
    /// 公司名稱，例如 삼성전자
    company: Option<String>,

    /// 輸出排版過的 JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let (result, code) = match company_name(&cli) {
        Some(company) => {
            logging::info_file_async(format!("開始 fetch_stock_quote({})", company));
            let result = crawler::fetch_stock_quote_within(
                &Naver::default(),
                company,
                config::SETTINGS.system.pipeline_timeout(),
            )
            .await;
            logging::info_file_async(format!(
                "結束 fetch_stock_quote({}) success:{}",
                company,
                result.is_success()
            ));
            (result, ExitCode::SUCCESS)
        }
        None => (
            QuoteResult::Failure(MISSING_COMPANY.to_string()),
            ExitCode::FAILURE,
        ),
    };

    let code = match render(&result, cli.pretty) {
        Ok(json) => {
            println!("{}", json);
            code
        }
        Err(why) => {
            logging::error_console(format!("Failed to render the result because {:?}", why));
            ExitCode::FAILURE
        }
    };

    let flushed = [logging::flush(), util::http::flush_log()];
    if flushed.contains(&false) {
        logging::error_console("Failed to flush the log file in time".to_string());
    }

    code
}

/// 空白的公司名稱視為沒有輸入，其餘原樣送出
fn company_name(cli: &Cli) -> Option<&str> {
    cli.company
        .as_deref()
        .filter(|company| !company.trim().is_empty())
}

fn render(result: &QuoteResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    Ok(json)
}
