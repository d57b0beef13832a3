//! 낙폭(Drawdown) 분석
//!
//! 기간별 낙폭 곡선과 시계열 간 최대 낙폭 순위를 제공합니다.

use fund_core::PriceSeries;
use serde::{Deserialize, Serialize};

use crate::performance::metrics::max_drawdown;

/// 기간별 낙폭을 계산합니다.
///
/// `drawdown[i] = (price[i] - running_max[i]) / running_max[i]`
///
/// 결과 길이는 입력과 같고, 모든 값은 0 이하이며 첫 값은 0입니다.
pub fn drawdown_series(prices: &[f64]) -> Vec<f64> {
    let mut peak = f64::MIN;

    prices
        .iter()
        .map(|&price| {
            if price > peak {
                peak = price;
            }
            (price - peak) / peak
        })
        .collect()
}

/// 최대 낙폭 심각도 구간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawdownSeverity {
    /// -10% 초과
    Mild,
    /// -20% 초과 ~ -10% 이하
    Moderate,
    /// -20% 이하
    Severe,
}

impl DrawdownSeverity {
    /// 최대 낙폭 값에서 심각도를 판정합니다.
    pub fn from_drawdown(max_drawdown: f64) -> Self {
        if max_drawdown > -0.10 {
            DrawdownSeverity::Mild
        } else if max_drawdown > -0.20 {
            DrawdownSeverity::Moderate
        } else {
            DrawdownSeverity::Severe
        }
    }

    /// 표시 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            DrawdownSeverity::Mild => "양호",
            DrawdownSeverity::Moderate => "주의",
            DrawdownSeverity::Severe => "위험",
        }
    }
}

/// 시계열 하나의 최대 낙폭 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownEntry {
    /// 시계열 이름
    pub name: String,
    /// 최대 낙폭 (0 이하)
    pub max_drawdown: f64,
    /// 심각도
    pub severity: DrawdownSeverity,
}

/// 최대 낙폭 순위 (덜 심각한 순서)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawdownRanking {
    entries: Vec<DrawdownEntry>,
}

impl DrawdownRanking {
    /// 여러 가격 시계열의 최대 낙폭 순위를 만듭니다.
    pub fn from_series<'a>(series: impl IntoIterator<Item = &'a PriceSeries>) -> Self {
        Self::from_values(
            series
                .into_iter()
                .map(|s| (s.name().to_string(), max_drawdown(&s.prices()))),
        )
    }

    /// (이름, 최대 낙폭) 목록에서 순위를 만듭니다.
    pub fn from_values(values: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut entries: Vec<DrawdownEntry> = values
            .into_iter()
            .map(|(name, max_drawdown)| DrawdownEntry {
                name,
                max_drawdown,
                severity: DrawdownSeverity::from_drawdown(max_drawdown),
            })
            .collect();

        entries.sort_by(|a, b| b.max_drawdown.total_cmp(&a.max_drawdown));

        Self { entries }
    }

    /// 순위 항목 (덜 심각한 순서).
    pub fn entries(&self) -> &[DrawdownEntry] {
        &self.entries
    }

    /// 가장 심각한 항목.
    pub fn worst(&self) -> Option<&DrawdownEntry> {
        self.entries.last()
    }

    /// 이름으로 항목을 찾습니다.
    pub fn get(&self, name: &str) -> Option<&DrawdownEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}
