//! 도메인 타입.

pub mod price_table;
pub mod profile;
pub mod series;

pub use price_table::{parse_price_table, read_price_table, write_price_table};
pub use profile::{default_fund_pool, default_selection, FundProfile};
pub use series::{period_returns, PricePoint, PriceSeries};
