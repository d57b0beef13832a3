//! 가격표 지표 계산 기능.

use anyhow::{bail, Context, Result};
use fund_analytics::performance::metrics::METRIC_LABELS;
use fund_analytics::{MetricsResult, MetricsRow};
use fund_core::{read_price_table, PriceSeries};
use tracing::info;

use super::common::{truncate, write_output, OutputFormat};

/// 지표 계산 설정.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// 가격표 CSV 경로
    pub input: String,
    /// 연간 무위험 이자율 (소수)
    pub risk_free_rate: f64,
    /// 출력 형식
    pub format: OutputFormat,
}

/// 시계열마다 지표를 계산합니다.
pub fn compute_rows(series: &[PriceSeries], risk_free_rate: f64) -> Result<Vec<MetricsRow>> {
    series
        .iter()
        .map(|s| {
            let metrics = MetricsResult::from_series(s, risk_free_rate)
                .with_context(|| format!("Failed to compute metrics for {}", s.name()))?;
            Ok(MetricsRow {
                name: s.name().to_string(),
                metrics,
            })
        })
        .collect()
}

/// 가격표의 각 열에 대한 지표를 출력합니다.
pub fn run_metrics(config: MetricsConfig) -> Result<usize> {
    let series = read_price_table(&config.input)
        .with_context(|| format!("Failed to load price table: {}", config.input))?;

    let rows = compute_rows(&series, config.risk_free_rate)?;

    let content = match config.format {
        OutputFormat::Table => format_metrics_table(&rows),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&rows).context("Failed to serialize to JSON")? + "\n"
        }
        OutputFormat::Toml => bail!("TOML output is only supported by `fund funds`"),
    };

    write_output(&content, None)?;

    info!(series = rows.len(), input = %config.input, "Metrics computed");
    Ok(rows.len())
}

/// 지표 표 (행: 시계열, 열: 지표).
pub fn format_metrics_table(rows: &[MetricsRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<24}", "NAME"));
    for label in METRIC_LABELS {
        output.push_str(&format!(" {:>12}", label));
    }
    output.push('\n');
    output.push_str(&"-".repeat(24 + METRIC_LABELS.len() * 13));
    output.push('\n');

    for row in rows {
        output.push_str(&format!("{:<24}", truncate(&row.name, 24)));
        for (_, value) in row.metrics.display_rows() {
            output.push_str(&format!(" {:>12}", value));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(name: &str, prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<_> = (0..prices.len())
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect();
        PriceSeries::from_parts(name, &dates, prices).unwrap()
    }

    #[test]
    fn test_compute_rows() {
        let rows = compute_rows(
            &[series("A", &[1.0, 1.1, 1.21]), series("B", &[1.0, 1.2, 0.9])],
            0.0,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert!((rows[0].metrics.cumulative_return - 0.21).abs() < 1e-9);
        assert!((rows[1].metrics.max_drawdown + 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_table() {
        let rows = compute_rows(&[series("A", &[1.0, 1.1, 1.21])], 0.0).unwrap();
        let table = format_metrics_table(&rows);

        assert!(table.contains("누적 수익률"));
        assert!(table.contains("21.00%"));
        assert!(table.contains("100.00%"));
    }

    #[test]
    fn test_missing_input_fails() {
        let config = MetricsConfig {
            input: "/nonexistent/prices.csv".to_string(),
            risk_free_rate: 0.025,
            format: OutputFormat::Table,
        };
        assert!(run_metrics(config).is_err());
    }
}
