//! 명령어 공통 유틸리티 (출력 형식, 인자 파싱, 출력 대상).

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use tracing::info;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Toml,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(anyhow!("Invalid format: {}. Use: table, json, toml", s)),
        }
    }
}

/// 쉼표로 구분된 펀드 목록을 파싱합니다.
///
/// 앞뒤 공백은 제거하고 빈 항목은 무시합니다.
pub fn parse_fund_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// `이름=백분율` 쌍 목록을 파싱합니다 (예: `A=60,B=40`).
pub fn parse_weights(s: &str) -> Result<Vec<(String, f64)>> {
    let mut pairs = Vec::new();

    for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (name, pct) = item
            .rsplit_once('=')
            .ok_or_else(|| anyhow!("Invalid weight: {}. Expected NAME=PERCENT", item))?;

        let name = name.trim();
        if name.is_empty() {
            bail!("Invalid weight: {}. Fund name is empty", item);
        }

        let pct: f64 = pct
            .trim()
            .parse()
            .with_context(|| format!("Invalid weight percent: {}", item))?;

        pairs.push((name.to_string(), pct));
    }

    if pairs.is_empty() {
        bail!("No weights given");
    }

    Ok(pairs)
}

/// 백분율 무위험 이자율을 소수로 변환합니다 (2.5 → 0.025).
pub fn percent_to_rate(percent: f64) -> Result<f64> {
    if !percent.is_finite() || percent < 0.0 {
        bail!("Invalid risk-free rate: {}%", percent);
    }
    Ok(percent / 100.0)
}

/// 날짜 문자열 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

/// 파일 또는 stdout에 출력합니다.
pub fn write_output(content: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file =
            File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        print!("{}", content);
    }

    Ok(())
}

/// 문자열 자르기 (UTF-8 안전).
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
