//! 시뮬레이션 가격표 생성 기능.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use fund_analytics::FundSimulator;
use fund_core::{write_price_table, AppConfig, FundProfile, PriceSeries};
use tracing::info;

use super::common::write_output;

/// 시뮬레이션 설정.
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// 시뮬레이션 기간 수 (일)
    pub days: usize,
    /// 난수 시드
    pub seed: u64,
    /// 대상 펀드 (비어 있으면 전체 풀)
    pub funds: Vec<String>,
    /// 마지막 일자 (기본: 오늘)
    pub end_date: Option<NaiveDate>,
    /// 출력 파일 경로 (지정하지 않으면 stdout)
    pub output: Option<String>,
}

/// 이름 목록을 설정된 펀드 프로파일로 변환합니다.
///
/// 목록이 비어 있으면 전체 풀을 반환합니다.
pub fn resolve_profiles(config: &AppConfig, names: &[String]) -> Result<Vec<FundProfile>> {
    if names.is_empty() {
        return Ok(config.funds.clone());
    }

    names
        .iter()
        .map(|name| {
            config.fund(name).cloned().ok_or_else(|| {
                anyhow!(
                    "Unknown fund: {}. Run `fund funds` to list the configured pool",
                    name
                )
            })
        })
        .collect()
}

/// 펀드 프로파일로 가격 시계열을 시뮬레이션합니다.
pub fn simulate_series(
    profiles: &[FundProfile],
    days: usize,
    seed: u64,
    end_date: Option<NaiveDate>,
) -> Result<Vec<PriceSeries>> {
    let mut simulator = FundSimulator::new(seed, days);
    if let Some(end_date) = end_date {
        simulator = simulator.with_end_date(end_date);
    }

    simulator
        .simulate(profiles)
        .context("Failed to simulate fund prices")
}

/// 시뮬레이션 가격표를 CSV로 기록합니다.
pub fn run_simulate(app: &AppConfig, config: SimulateConfig) -> Result<usize> {
    let profiles = resolve_profiles(app, &config.funds)?;
    let series = simulate_series(&profiles, config.days, config.seed, config.end_date)?;

    let mut buf = Vec::new();
    write_price_table(&mut buf, &series).context("Failed to write price table")?;
    let content = String::from_utf8(buf).context("Price table is not valid UTF-8")?;

    write_output(&content, config.output.as_deref())?;

    info!(
        funds = series.len(),
        days = config.days,
        seed = config.seed,
        "Simulation finished"
    );

    Ok(series.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_profiles() {
        let app = AppConfig::default();

        assert_eq!(resolve_profiles(&app, &[]).unwrap().len(), 7);

        let picked =
            resolve_profiles(&app, &["Gold ETF".to_string(), "Bond Fund A".to_string()]).unwrap();
        assert_eq!(picked[0].name, "Gold ETF");
        assert_eq!(picked[1].name, "Bond Fund A");

        assert!(resolve_profiles(&app, &["Nope".to_string()]).is_err());
    }

    #[test]
    fn test_simulate_series_uses_end_date() {
        let app = AppConfig::default();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let series = simulate_series(&app.funds[..2], 10, 42, Some(end)).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].dates().last(), Some(&end));
        assert!(simulate_series(&app.funds, 1, 42, Some(end)).is_err());
    }
}
