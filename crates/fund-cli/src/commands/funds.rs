//! 펀드 풀 조회 기능.

use anyhow::{Context, Result};
use fund_core::{AppConfig, FundProfile};
use serde::Serialize;

use super::common::{truncate, write_output, OutputFormat};

/// 설정 파일에 붙여 넣을 수 있는 `[[funds]]` 목록.
#[derive(Serialize)]
struct FundPool<'a> {
    funds: &'a [FundProfile],
}

/// 설정된 펀드 풀을 출력합니다.
pub fn list_funds(config: &AppConfig, format: OutputFormat) -> Result<usize> {
    let content = match format {
        OutputFormat::Table => format_table(config),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&config.funds).context("Failed to serialize to JSON")? + "\n"
        }
        OutputFormat::Toml => toml::to_string_pretty(&FundPool {
            funds: &config.funds,
        })
        .context("Failed to serialize to TOML")?,
    };

    write_output(&content, None)?;
    Ok(config.funds.len())
}

fn format_table(config: &AppConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<24} {:>12} {:>12} {:>6}\n",
        "NAME", "DAILY_MEAN", "DAILY_VOL", "선택"
    ));
    output.push_str(&"-".repeat(58));
    output.push('\n');

    for fund in &config.funds {
        let selected = config.portfolio.selected.contains(&fund.name);
        output.push_str(&format!(
            "{:<24} {:>11.4}% {:>11.4}% {:>6}\n",
            truncate(&fund.name, 24),
            fund.mean * 100.0,
            fund.volatility * 100.0,
            if selected { "✓" } else { "" }
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Total: {} funds ({} selected)\n",
        config.funds.len(),
        config.portfolio.selected.len()
    ));

    output
}
