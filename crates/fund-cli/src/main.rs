//! 펀드 위험/수익 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 설정된 펀드 풀 보기
//! fund funds
//!
//! # 1년치 시뮬레이션 가격표 생성
//! fund simulate --days 252 --seed 42 --output data/prices.csv
//!
//! # 가격표의 펀드별 지표 계산 (무위험 이자율 2.5%)
//! fund metrics --input data/prices.csv --risk-free 2.5
//!
//! # 비중을 지정해 포트폴리오 분석
//! fund analyze --weights "CSI 300 Index A=60,Bond Fund A=40" --format json
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use fund_core::{init_logging, AppConfig, LogConfig, LogFormat};
use tracing::{debug, error};

use fund_cli::commands::analyze::{run_analyze, AnalyzeConfig};
use fund_cli::commands::common::{
    parse_date, parse_fund_list, parse_weights, percent_to_rate, OutputFormat,
};
use fund_cli::commands::funds::list_funds;
use fund_cli::commands::metrics::{run_metrics, MetricsConfig};
use fund_cli::commands::simulate::{run_simulate, SimulateConfig};

#[derive(Parser)]
#[command(name = "fund")]
#[command(about = "Fund analytics CLI - 펀드 위험/수익 지표 및 포트폴리오 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (없으면 기본값 사용)
    #[arg(long, global = true, default_value = "config/default.toml")]
    config: String,

    /// 로그 형식 (pretty, json, compact). 기본: LOG_FORMAT, 없으면 logging.format
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 설정된 펀드 풀 보기
    Funds {
        /// 출력 형식 (table, json, toml)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 시뮬레이션 가격표 CSV 생성
    Simulate {
        /// 시뮬레이션 기간 (일). 기본: analysis.days
        #[arg(short, long)]
        days: Option<usize>,

        /// 난수 시드. 기본: analysis.seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// 대상 펀드 (쉼표로 구분). 기본: 전체 풀
        #[arg(long)]
        funds: Option<String>,

        /// 마지막 일자 (YYYY-MM-DD). 기본: 오늘
        #[arg(long)]
        end_date: Option<String>,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 가격표 CSV의 펀드별 지표 계산
    Metrics {
        /// 가격표 CSV 경로
        #[arg(short, long)]
        input: String,

        /// 연간 무위험 이자율 (%). 기본: analysis.risk_free_rate
        #[arg(long)]
        risk_free: Option<f64>,

        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 포트폴리오 분석 리포트
    Analyze {
        /// 가격표 CSV 경로 (지정하지 않으면 시뮬레이션)
        #[arg(short, long)]
        input: Option<String>,

        /// 구성 펀드 (쉼표로 구분). 기본: portfolio.selected
        #[arg(long)]
        funds: Option<String>,

        /// 비중 (예: "A=60,B=40", 백분율)
        #[arg(short, long)]
        weights: Option<String>,

        /// 시뮬레이션 기간 (일). 기본: analysis.days
        #[arg(short, long)]
        days: Option<usize>,

        /// 난수 시드. 기본: analysis.seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// 시뮬레이션 마지막 일자 (YYYY-MM-DD). 기본: 오늘
        #[arg(long)]
        end_date: Option<String>,

        /// 연간 무위험 이자율 (%). 기본: analysis.risk_free_rate
        #[arg(long)]
        risk_free: Option<f64>,

        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let app = AppConfig::load_optional(&cli.config)
        .with_context(|| format!("Failed to load configuration: {}", cli.config))?;

    // 우선순위: --log-format > LOG_FORMAT/RUST_LOG > 설정 파일
    let mut log_config = LogConfig::new(app.logging.level.clone())
        .with_format(app.logging.format.parse::<LogFormat>().map_err(|e| anyhow!(e))?)
        .with_span_events(app.logging.span_events)
        .with_env_overrides();
    if let Some(format) = cli.log_format.as_deref() {
        log_config = log_config.with_format(format.parse::<LogFormat>().map_err(|e| anyhow!(e))?);
    }

    init_logging(log_config).map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    debug!(config = %cli.config, "Configuration loaded");

    let risk_free_rate = |percent: Option<f64>| match percent {
        Some(p) => percent_to_rate(p),
        None => Ok(app.analysis.risk_free_rate),
    };

    let result = match cli.command {
        Commands::Funds { format } => {
            list_funds(&app, OutputFormat::parse(&format)?).map(|_| ())
        }

        Commands::Simulate {
            days,
            seed,
            funds,
            end_date,
            output,
        } => {
            let config = SimulateConfig {
                days: days.unwrap_or(app.analysis.days),
                seed: seed.unwrap_or(app.analysis.seed),
                funds: funds.as_deref().map(parse_fund_list).unwrap_or_default(),
                end_date: end_date.as_deref().map(parse_date).transpose()?,
                output: output.clone(),
            };

            run_simulate(&app, config).map(|count| {
                if let Some(path) = output {
                    eprintln!("\n시뮬레이션 완료: {} 펀드", count);
                    eprintln!("저장 위치: {}", path);
                }
            })
        }

        Commands::Metrics {
            input,
            risk_free,
            format,
        } => {
            let config = MetricsConfig {
                input,
                risk_free_rate: risk_free_rate(risk_free)?,
                format: OutputFormat::parse(&format)?,
            };
            run_metrics(config).map(|_| ())
        }

        Commands::Analyze {
            input,
            funds,
            weights,
            days,
            seed,
            end_date,
            risk_free,
            format,
        } => {
            let config = AnalyzeConfig {
                input,
                funds: funds.as_deref().map(parse_fund_list).unwrap_or_default(),
                weights: weights.as_deref().map(parse_weights).transpose()?,
                days: days.unwrap_or(app.analysis.days),
                seed: seed.unwrap_or(app.analysis.seed),
                end_date: end_date.as_deref().map(parse_date).transpose()?,
                risk_free_rate: risk_free_rate(risk_free)?,
                format: OutputFormat::parse(&format)?,
            };
            run_analyze(&app, config).map(|_| ())
        }
    };

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }

    result
}
