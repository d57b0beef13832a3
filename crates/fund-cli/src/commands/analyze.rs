//! 포트폴리오 분석 리포트 기능.
//!
//! 가격표 CSV 또는 시뮬레이션 데이터로 포트폴리오를 구성하고
//! 지표, 상관행렬, 낙폭 순위, 요약을 출력합니다.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use fund_analytics::{format_pct, FundReport, PortfolioWeights};
use fund_core::{read_price_table, AppConfig, PriceSeries};
use tracing::{info, warn};

use super::common::{truncate, write_output, OutputFormat};
use super::metrics::format_metrics_table;
use super::simulate::{resolve_profiles, simulate_series};

/// 분석 설정.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// 가격표 CSV 경로 (없으면 시뮬레이션)
    pub input: Option<String>,
    /// 포트폴리오 구성 펀드 (비어 있으면 설정의 선택 목록)
    pub funds: Vec<String>,
    /// (이름, 백분율) 비중 (없으면 설정 비중 또는 균등 배분)
    pub weights: Option<Vec<(String, f64)>>,
    /// 시뮬레이션 기간 수 (일)
    pub days: usize,
    /// 시뮬레이션 난수 시드
    pub seed: u64,
    /// 시뮬레이션 마지막 일자
    pub end_date: Option<NaiveDate>,
    /// 연간 무위험 이자율 (소수)
    pub risk_free_rate: f64,
    /// 출력 형식
    pub format: OutputFormat,
}

/// 분석 대상 펀드 이름을 결정합니다.
///
/// 명령행 목록 > 비중에 나열된 펀드 > 설정의 선택 목록 순으로 사용합니다.
pub fn resolve_selection(app: &AppConfig, config: &AnalyzeConfig) -> Vec<String> {
    if !config.funds.is_empty() {
        return config.funds.clone();
    }
    if let Some(weights) = &config.weights {
        return weights.iter().map(|(name, _)| name.clone()).collect();
    }
    app.portfolio.selected.clone()
}

/// 포트폴리오 비중을 결정합니다.
///
/// 명령행 비중 > 선택과 일치하는 설정 비중 > 균등 배분 순으로 사용합니다.
pub fn resolve_weights(
    app: &AppConfig,
    config: &AnalyzeConfig,
    selection: &[String],
) -> Result<PortfolioWeights> {
    if let Some(weights) = &config.weights {
        return PortfolioWeights::from_percentages(weights.iter().cloned())
            .context("Invalid --weights");
    }

    let configured = &app.portfolio.weights;
    if !configured.is_empty() {
        let matches_selection = configured.len() == selection.len()
            && configured.iter().all(|w| selection.contains(&w.fund));

        if matches_selection {
            return PortfolioWeights::from_percentages(
                configured.iter().map(|w| (w.fund.clone(), w.percent)),
            )
            .context("Invalid portfolio.weights in configuration");
        }
        warn!("Configured weights do not match the selected funds, using equal split");
    }

    PortfolioWeights::equal_split(selection).context("Failed to split weights")
}

/// 분석 대상 가격 시계열을 준비합니다.
fn load_series(
    app: &AppConfig,
    config: &AnalyzeConfig,
    selection: &[String],
) -> Result<Vec<PriceSeries>> {
    match &config.input {
        Some(path) => {
            let table = read_price_table(path)
                .with_context(|| format!("Failed to load price table: {}", path))?;

            selection
                .iter()
                .map(|name| {
                    table
                        .iter()
                        .find(|s| s.name() == name)
                        .cloned()
                        .with_context(|| format!("Fund not found in {}: {}", path, name))
                })
                .collect()
        }
        None => {
            let profiles = resolve_profiles(app, selection)?;
            simulate_series(&profiles, config.days, config.seed, config.end_date)
        }
    }
}

/// 분석 리포트를 생성해 출력합니다.
pub fn run_analyze(app: &AppConfig, config: AnalyzeConfig) -> Result<FundReport> {
    let selection = resolve_selection(app, &config);
    if selection.is_empty() {
        bail!("No funds selected");
    }

    let weights = resolve_weights(app, &config, &selection)?;
    let series = load_series(app, &config, &selection)?;

    let report = FundReport::build(&series, &weights, config.risk_free_rate)
        .context("Failed to build portfolio report")?;

    let content = match config.format {
        OutputFormat::Table => format_report(&report),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to serialize to JSON")? + "\n"
        }
        OutputFormat::Toml => bail!("TOML output is only supported by `fund funds`"),
    };

    write_output(&content, None)?;

    let source = config.input.as_deref().unwrap_or("simulation");
    info!(funds = selection.len(), source, "Analysis finished");

    Ok(report)
}

/// 리포트 전체를 표 형식으로 만듭니다.
pub fn format_report(report: &FundReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "무위험 이자율: {}\n\n",
        format_pct(report.risk_free_rate)
    ));

    output.push_str("[비중]\n");
    for (name, weight) in report.weights.iter() {
        output.push_str(&format!("  {:<24} {:>8}\n", truncate(name, 24), format_pct(weight)));
    }
    output.push('\n');

    output.push_str("[지표]\n");
    output.push_str(&format_metrics_table(&report.metrics));
    output.push('\n');

    if let Some(corr) = &report.correlation {
        output.push_str(&format!("[상관행렬] (기간 {})\n", corr.period));
        output.push_str(&format!("{:<16}", ""));
        for name in &corr.names {
            output.push_str(&format!(" {:>16}", truncate(name, 16)));
        }
        output.push('\n');
        for (name, row) in corr.names.iter().zip(&corr.matrix) {
            output.push_str(&format!("{:<16}", truncate(name, 16)));
            for value in row {
                output.push_str(&format!(" {:>16.2}", value));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    output.push_str("[최대 낙폭 순위]\n");
    for (rank, entry) in report.drawdowns.entries().iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<24} {:>8} {}\n",
            rank + 1,
            truncate(&entry.name, 24),
            format_pct(entry.max_drawdown),
            entry.severity.display_name()
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "Total: {} funds | 포트폴리오 누적 수익률 {} | 최대 낙폭 {}\n",
        report.summary.fund_count,
        format_pct(report.summary.cumulative_return),
        format_pct(report.summary.max_drawdown)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_core::WeightEntry;

    fn analyze_config() -> AnalyzeConfig {
        AnalyzeConfig {
            input: None,
            funds: Vec::new(),
            weights: None,
            days: 60,
            seed: 42,
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            risk_free_rate: 0.025,
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_selection_precedence() {
        let app = AppConfig::default();
        let mut config = analyze_config();

        assert_eq!(resolve_selection(&app, &config), app.portfolio.selected);

        config.weights = Some(vec![("Gold ETF".to_string(), 100.0)]);
        assert_eq!(resolve_selection(&app, &config), vec!["Gold ETF".to_string()]);

        config.funds = vec!["Nasdaq Index".to_string()];
        assert_eq!(resolve_selection(&app, &config), vec!["Nasdaq Index".to_string()]);
    }

    #[test]
    fn test_weights_precedence() {
        let mut app = AppConfig::default();
        let config = analyze_config();
        let selection = app.portfolio.selected.clone();

        let equal = resolve_weights(&app, &config, &selection).unwrap();
        assert_eq!(equal.get("Money Market Fund A"), Some(0.34));

        app.portfolio.weights = vec![
            WeightEntry {
                fund: "CSI 300 Index A".to_string(),
                percent: 50.0,
            },
            WeightEntry {
                fund: "Bond Fund A".to_string(),
                percent: 30.0,
            },
            WeightEntry {
                fund: "Money Market Fund A".to_string(),
                percent: 20.0,
            },
        ];
        let configured = resolve_weights(&app, &config, &selection).unwrap();
        assert_eq!(configured.get("CSI 300 Index A"), Some(0.5));

        // 선택과 일치하지 않으면 균등 배분
        let other = vec!["Gold ETF".to_string(), "Nasdaq Index".to_string()];
        let fallback = resolve_weights(&app, &config, &other).unwrap();
        assert_eq!(fallback.get("Gold ETF"), Some(0.5));
    }

    #[test]
    fn test_invalid_cli_weights() {
        let app = AppConfig::default();
        let mut config = analyze_config();
        config.weights = Some(vec![("A".to_string(), 40.0), ("B".to_string(), 40.0)]);

        assert!(resolve_weights(&app, &config, &["A".to_string(), "B".to_string()]).is_err());
    }

    #[test]
    fn test_simulated_report() {
        let app = AppConfig::default();
        let config = analyze_config();
        let selection = resolve_selection(&app, &config);
        let weights = resolve_weights(&app, &config, &selection).unwrap();
        let series = load_series(&app, &config, &selection).unwrap();

        let report = FundReport::build(&series, &weights, config.risk_free_rate).unwrap();
        let text = format_report(&report);

        assert!(text.contains("[지표]"));
        assert!(text.contains("[상관행렬]"));
        assert!(text.contains("Portfolio"));
        assert!(text.contains("Total: 3 funds"));
    }

    #[test]
    fn test_unknown_fund_fails() {
        let app = AppConfig::default();
        let mut config = analyze_config();
        config.funds = vec!["Unknown".to_string()];

        assert!(run_analyze(&app, config).is_err());
    }
}
