//! 가격표 CSV 입출력.
//!
//! 형식: `date,<펀드1>,<펀드2>,...` 헤더 뒤에 기간별 한 행.
//! 일자는 `YYYY-MM-DD` 형식입니다.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use super::series::PriceSeries;
use crate::error::{FundError, FundResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV 파일에서 가격표를 읽습니다.
pub fn read_price_table(path: impl AsRef<Path>) -> FundResult<Vec<PriceSeries>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| FundError::Io(format!("{}: {}", path.display(), e)))?;

    let series = parse_price_table(&content)?;
    debug!(
        path = %path.display(),
        columns = series.len(),
        "Loaded price table"
    );
    Ok(series)
}

/// CSV 문자열을 열(펀드)별 가격 시계열로 변환합니다.
pub fn parse_price_table(content: &str) -> FundResult<Vec<PriceSeries>> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| FundError::Data("빈 CSV 입니다".to_string()))?;

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    if columns.first().map(|c| c.to_lowercase()) != Some("date".to_string()) {
        return Err(FundError::Data(
            "첫 번째 열은 'date' 여야 합니다".to_string(),
        ));
    }

    let names = &columns[1..];
    if names.is_empty() {
        return Err(FundError::Data("가격 열이 없습니다".to_string()));
    }

    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() || !seen.insert(*name) {
            return Err(FundError::Data(format!("잘못되었거나 중복된 열 이름: '{}'", name)));
        }
    }

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut prices: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for (line_no, line) in lines {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() != columns.len() {
            return Err(FundError::Data(format!(
                "{} 번째 줄: 열 수가 {} 개여야 하지만 {} 개입니다",
                line_no + 1,
                columns.len(),
                parts.len()
            )));
        }

        let date = NaiveDate::parse_from_str(parts[0], DATE_FORMAT).map_err(|e| {
            FundError::Data(format!(
                "{} 번째 줄: 잘못된 일자 '{}': {}",
                line_no + 1,
                parts[0],
                e
            ))
        })?;
        dates.push(date);

        for (col, raw) in parts[1..].iter().enumerate() {
            let price = raw.parse::<f64>().map_err(|e| {
                FundError::Data(format!(
                    "{} 번째 줄: 잘못된 가격 '{}': {}",
                    line_no + 1,
                    raw,
                    e
                ))
            })?;
            prices[col].push(price);
        }
    }

    names
        .iter()
        .zip(prices)
        .map(|(name, column)| PriceSeries::from_parts(*name, &dates, &column))
        .collect()
}

/// 가격표를 CSV로 기록합니다.
///
/// 모든 시계열은 같은 기간 표시를 가져야 합니다.
pub fn write_price_table<W: Write>(writer: &mut W, series: &[PriceSeries]) -> FundResult<()> {
    let first = series
        .first()
        .ok_or_else(|| FundError::invalid_input("기록할 시계열이 없습니다"))?;

    if let Some(misaligned) = series.iter().find(|s| !first.is_aligned_with(s)) {
        return Err(FundError::invalid_input(format!(
            "{} 의 기간이 {} 과 일치하지 않습니다",
            misaligned.name(),
            first.name()
        )));
    }

    let header: Vec<&str> = series.iter().map(|s| s.name()).collect();
    writeln!(writer, "date,{}", header.join(","))?;

    for (i, point) in first.points().iter().enumerate() {
        let row: Vec<String> = series
            .iter()
            .map(|s| s.points()[i].price.to_string())
            .collect();
        writeln!(writer, "{},{}", point.date.format(DATE_FORMAT), row.join(","))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "date,A,B\n2024-01-01,1.0,2.0\n2024-01-02,1.1,2.2\n\n2024-01-03,1.21,1.8\n";

    #[test]
    fn test_parse_price_table() {
        let series = parse_price_table(SAMPLE).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name(), "A");
        assert_eq!(series[0].prices(), vec![1.0, 1.1, 1.21]);
        assert_eq!(series[1].prices(), vec![2.0, 2.2, 1.8]);
        assert!(series[0].is_aligned_with(&series[1]));
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        let err = parse_price_table("day,A\n2024-01-01,1.0\n").unwrap_err();
        assert!(matches!(err, FundError::Data(_)));

        let err = parse_price_table("date,A,A\n2024-01-01,1.0,1.0\n").unwrap_err();
        assert!(matches!(err, FundError::Data(_)));

        let err = parse_price_table("").unwrap_err();
        assert!(matches!(err, FundError::Data(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_rows() {
        let err = parse_price_table("date,A\n2024-01-01,1.0,3.0\n").unwrap_err();
        assert!(matches!(err, FundError::Data(_)));

        let err = parse_price_table("date,A\n2024/01/01,1.0\n").unwrap_err();
        assert!(matches!(err, FundError::Data(_)));

        let err = parse_price_table("date,A\n2024-01-01,abc\n").unwrap_err();
        assert!(matches!(err, FundError::Data(_)));
    }

    #[test]
    fn test_parse_rejects_non_positive_price() {
        let err = parse_price_table("date,A\n2024-01-01,1.0\n2024-01-02,-1.0\n").unwrap_err();
        assert!(matches!(err, FundError::InvalidInput(_)));
    }

    #[test]
    fn test_write_then_parse() {
        let series = parse_price_table(SAMPLE).unwrap();
        let mut buf = Vec::new();
        write_price_table(&mut buf, &series).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("date,A,B\n2024-01-01,1,2\n"));
        assert_eq!(parse_price_table(&text).unwrap(), series);
    }

    #[test]
    fn test_write_rejects_misaligned() {
        let a = parse_price_table("date,A\n2024-01-01,1.0\n2024-01-02,1.0\n").unwrap();
        let b = parse_price_table("date,B\n2024-01-01,1.0\n").unwrap();
        let all = vec![a[0].clone(), b[0].clone()];

        let mut buf = Vec::new();
        assert!(write_price_table(&mut buf, &all).is_err());
        assert!(write_price_table(&mut buf, &[]).is_err());
    }

    #[test]
    fn test_read_price_table_missing_file() {
        let err = read_price_table("/nonexistent/prices.csv").unwrap_err();
        assert!(matches!(err, FundError::Io(_)));
    }
}
