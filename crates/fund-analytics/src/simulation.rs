//! 펀드 가격 시뮬레이터
//!
//! 일간 수익률을 정규분포 N(평균, 변동성)에서 추출해 순자산가치 경로를 생성합니다.
//! 같은 시드와 입력이면 항상 같은 결과를 냅니다.
//!
//! # 경로 생성 규칙
//!
//! - 펀드마다 `days`개의 표본을 추출합니다 (펀드 순서대로 하나의 난수 생성기 공유)
//! - 가격은 1.0에서 시작하며 첫 번째 표본은 버리고 나머지로 복리 누적합니다
//! - 따라서 각 경로의 길이는 정확히 `days`입니다
//! - 일자는 `end_date`로 끝나는 연속된 달력일입니다

use chrono::{Duration, NaiveDate, Utc};
use fund_core::{FundError, FundProfile, FundResult, PriceSeries};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

/// 기본 난수 시드
pub const DEFAULT_SEED: u64 = 42;

/// 기본 시뮬레이션 기간 (일)
pub const DEFAULT_DAYS: usize = 252;

/// 시드 기반 펀드 가격 시뮬레이터.
#[derive(Debug, Clone)]
pub struct FundSimulator {
    seed: u64,
    days: usize,
    end_date: NaiveDate,
}

impl Default for FundSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_DAYS)
    }
}

impl FundSimulator {
    /// 오늘(UTC)로 끝나는 시뮬레이터를 생성합니다.
    pub fn new(seed: u64, days: usize) -> Self {
        Self {
            seed,
            days,
            end_date: Utc::now().date_naive(),
        }
    }

    /// 마지막 일자를 지정합니다.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    /// 시뮬레이션 기간 수.
    pub fn days(&self) -> usize {
        self.days
    }

    /// 시뮬레이션 일자 목록 (오름차순).
    ///
    /// 시작 일자가 날짜 표현 범위를 벗어나면 `FundError::InvalidInput`.
    pub fn dates(&self) -> FundResult<Vec<NaiveDate>> {
        let out_of_range = || {
            FundError::invalid_input(format!(
                "시뮬레이션 기간이 날짜 범위를 벗어납니다 ({}일, 종료 {})",
                self.days, self.end_date
            ))
        };

        let span = i64::try_from(self.days.saturating_sub(1)).map_err(|_| out_of_range())?;
        let start = Duration::try_days(span)
            .and_then(|offset| self.end_date.checked_sub_signed(offset))
            .ok_or_else(out_of_range)?;

        Ok(start.iter_days().take(self.days).collect())
    }

    /// 주어진 펀드들의 가격 경로를 생성합니다.
    ///
    /// # 에러
    ///
    /// `days < 2`, 잘못된 분포 파라미터, 또는 경로 중 가격이 0 이하로
    /// 떨어지면 `FundError::InvalidInput`.
    pub fn simulate(&self, profiles: &[FundProfile]) -> FundResult<Vec<PriceSeries>> {
        if self.days < 2 {
            return Err(FundError::invalid_input(format!(
                "시뮬레이션 기간은 2일 이상이어야 합니다 (현재 {})",
                self.days
            )));
        }

        let dates = self.dates()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut result = Vec::with_capacity(profiles.len());

        for profile in profiles {
            profile.validate()?;
            let normal = Normal::new(profile.mean, profile.volatility).map_err(|e| {
                FundError::invalid_input(format!("{}: {}", profile.name, e))
            })?;

            let samples: Vec<f64> = (0..self.days).map(|_| normal.sample(&mut rng)).collect();

            let mut prices = Vec::with_capacity(self.days);
            prices.push(1.0);
            for r in &samples[1..] {
                let last = prices[prices.len() - 1];
                prices.push(last * (1.0 + r));
            }

            debug!(
                fund = %profile.name,
                last_price = prices[prices.len() - 1],
                "Simulated price path"
            );

            result.push(PriceSeries::from_parts(profile.name.as_str(), &dates, &prices)?);
        }

        info!(
            funds = result.len(),
            days = self.days,
            seed = self.seed,
            "Generated simulated fund data"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_core::default_fund_pool;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[test]
    fn test_simulate_shape() {
        let sim = FundSimulator::new(42, 30).with_end_date(end());
        let series = sim.simulate(&default_fund_pool()).unwrap();

        assert_eq!(series.len(), 7);
        for s in &series {
            assert_eq!(s.len(), 30);
            assert_eq!(s.first_price(), 1.0);
            assert_eq!(s.points().last().unwrap().date, end());
        }
        assert_eq!(series[0].name(), "CSI 300 Index A");
        assert!(series[0].is_aligned_with(&series[6]));
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let sim = FundSimulator::new(7, 50).with_end_date(end());
        let pool = default_fund_pool();

        assert_eq!(sim.simulate(&pool).unwrap(), sim.simulate(&pool).unwrap());

        let other = FundSimulator::new(8, 50).with_end_date(end());
        assert_ne!(sim.simulate(&pool).unwrap(), other.simulate(&pool).unwrap());
    }

    #[test]
    fn test_zero_volatility_compounds_mean() {
        let sim = FundSimulator::new(1, 3).with_end_date(end());
        let series = sim
            .simulate(&[FundProfile::new("Fixed", 0.01, 0.0)])
            .unwrap();

        let prices = series[0].prices();
        assert_eq!(prices[0], 1.0);
        assert!((prices[1] - 1.01).abs() < 1e-12);
        assert!((prices[2] - 1.0201).abs() < 1e-12);
    }

    #[test]
    fn test_dates_are_consecutive() {
        let sim = FundSimulator::new(1, 3).with_end_date(end());
        assert_eq!(
            sim.dates().unwrap(),
            vec![
                NaiveDate::from_ymd_opt(2024, 12, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(),
                end(),
            ]
        );
    }

    #[test]
    fn test_horizon_beyond_calendar_rejected() {
        let sim = FundSimulator::new(1, 200_000_000).with_end_date(end());

        assert!(matches!(sim.dates(), Err(FundError::InvalidInput(_))));
        assert!(matches!(sim.simulate(&[]), Err(FundError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_inputs() {
        let sim = FundSimulator::new(1, 1).with_end_date(end());
        assert!(sim.simulate(&default_fund_pool()).is_err());

        let sim = FundSimulator::new(1, 10).with_end_date(end());
        let err = sim
            .simulate(&[FundProfile::new("Bad", 0.0, -1.0)])
            .unwrap_err();
        assert!(matches!(err, FundError::InvalidInput(_)));
    }
}
