//! Typed query parameters for each endpoint.
//!
//! Every struct decodes leniently: missing fields take their default (the
//! server rejects a missing required value) and unknown fields are ignored.
//! Optional fields are left out of the query string when unset.
//!
//! Counts (`limit`, `page`, `periodLength`) are signed. Range checks belong
//! to the server, so `{"limit": -1}` is sent as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reporting period for statements, metrics and estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// First fiscal quarter
    Q1,
    /// Second fiscal quarter
    Q2,
    /// Third fiscal quarter
    Q3,
    /// Fourth fiscal quarter
    Q4,
    /// Full fiscal year (`FY`)
    #[serde(rename = "FY")]
    FiscalYear,
    /// Every annual report (`annual`)
    #[serde(rename = "annual")]
    Annual,
    /// Every quarterly report (`quarter`)
    #[serde(rename = "quarter")]
    Quarter,
}

/// Candle size for intraday and technical indicator endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// One-minute candles (`1min`)
    #[serde(rename = "1min")]
    OneMinute,
    /// Five-minute candles (`5min`)
    #[serde(rename = "5min")]
    FiveMinutes,
    /// Fifteen-minute candles (`15min`)
    #[serde(rename = "15min")]
    FifteenMinutes,
    /// Thirty-minute candles (`30min`)
    #[serde(rename = "30min")]
    ThirtyMinutes,
    /// Hourly candles (`1hour`)
    #[serde(rename = "1hour")]
    OneHour,
    /// Four-hour candles (`4hour`)
    #[serde(rename = "4hour")]
    FourHours,
    /// Daily candles (`1day`)
    #[serde(rename = "1day")]
    OneDay,
}

/// Shape of revenue segmentation responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentStructure {
    /// One flat map of segment to revenue per period (`flat`)
    #[serde(rename = "flat")]
    Flat,
}

/// For endpoints that take no parameters. Any bag decodes into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoParams {}

/// A single symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolParams {
    /// Ticker, e.g. `AAPL` or `SAI.MC`
    pub symbol: String,
}

impl SymbolParams {
    /// Creates parameters for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// A comma-separated list of symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolsParams {
    /// Tickers joined with commas
    pub symbols: String,
}

impl SymbolsParams {
    /// Joins `symbols` with commas.
    ///
    /// ```rust
    /// use fmp_lib::operations::SymbolsParams;
    ///
    /// let params = SymbolsParams::new(["AAPL", "MSFT", "7203.T"]);
    /// assert_eq!(params.symbols, "AAPL,MSFT,7203.T");
    /// ```
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self {
            symbols: symbols.join(","),
        }
    }
}

/// A symbol with an optional record limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolLimitParams {
    /// Ticker
    pub symbol: String,
    /// Maximum number of records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Annual or quarterly financial statements and derived metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementParams {
    /// Ticker
    pub symbol: String,
    /// Maximum number of periods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Reporting period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// Analyst estimates. `period` is required by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalystEstimatesParams {
    /// Ticker
    pub symbol: String,
    /// Estimate period (`annual` or `quarter`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// Zero-based page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Paged listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageParams {
    /// Zero-based page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Calendars and rate series bounded by an optional date window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRangeParams {
    /// First day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Paged news feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsParams {
    /// First day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Zero-based page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// End-of-day price history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalPriceParams {
    /// Ticker
    pub symbol: String,
    /// First day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Intraday price history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalChartParams {
    /// Ticker
    pub symbol: String,
    /// First day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Skip split and dividend adjustment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonadjusted: Option<bool>,
}

/// Most recent insider filings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsiderTradingLatestParams {
    /// Filing day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Zero-based page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Insider filings filtered by symbol, filer or transaction type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsiderTradingSearchParams {
    /// Zero-based page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Ticker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// CIK of the reporting insider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_cik: Option<String>,
    /// CIK of the issuing company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_cik: Option<String>,
    /// E.g. `S-Sale`, `P-Purchase`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
}

/// Revenue segmentation by product or geography.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Ticker
    pub symbol: String,
    /// Reporting period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// Response shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<SegmentStructure>,
}

/// Symbol and company name search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Search text
    pub query: String,
    /// Maximum number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Restrict to one exchange, e.g. `NASDAQ`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

/// Relative strength index. `timeframe` is required by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RsiParams {
    /// Ticker
    pub symbol: String,
    /// Number of candles in the RSI window
    pub period_length: i64,
    /// Candle size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
    /// First day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_required_field_defaults() {
        let params: SymbolParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.symbol, "");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let params: SymbolParams =
            serde_json::from_value(json!({"symbol": "AAPL", "colour": "blue"})).unwrap();
        assert_eq!(params, SymbolParams::new("AAPL"));
    }

    #[test]
    fn test_no_params_accepts_anything() {
        let params: NoParams = serde_json::from_value(json!({"foo": 1})).unwrap();
        assert_eq!(params, NoParams {});
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = serde_json::from_value::<StatementParams>(json!({"symbol": "AAPL", "limit": "ten"}));
        assert!(err.is_err());
    }

    #[test]
    fn test_period_wire_names() {
        let params: StatementParams =
            serde_json::from_value(json!({"symbol": "SAI.MC", "period": "FY", "limit": 1})).unwrap();
        assert_eq!(params.period, Some(Period::FiscalYear));
        assert_eq!(serde_json::to_value(Period::Quarter).unwrap(), "quarter");
        assert_eq!(serde_json::to_value(Period::Q3).unwrap(), "Q3");
    }

    #[test]
    fn test_unknown_period_rejected() {
        let err = serde_json::from_value::<StatementParams>(json!({"symbol": "X", "period": "H1"}));
        assert!(err.is_err());
    }

    #[test]
    fn test_dates_are_iso() {
        let params: DateRangeParams =
            serde_json::from_value(json!({"from": "2024-01-02", "to": "2024-03-31"})).unwrap();
        assert_eq!(params.from, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({"from": "2024-01-02", "to": "2024-03-31"})
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let value = serde_json::to_value(StatementParams {
            symbol: "AAPL".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, json!({"symbol": "AAPL"}));
    }

    #[test]
    fn test_camel_case_names() {
        let params = RsiParams {
            symbol: "AAPL".into(),
            period_length: 14,
            timeframe: Some(Timeframe::OneDay),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({"symbol": "AAPL", "periodLength": 14, "timeframe": "1day"})
        );

        let search: InsiderTradingSearchParams =
            serde_json::from_value(json!({"reportingCik": "0001", "transactionType": "S-Sale"}))
                .unwrap();
        assert_eq!(search.reporting_cik.as_deref(), Some("0001"));
        assert_eq!(search.transaction_type.as_deref(), Some("S-Sale"));
    }

    #[test]
    fn test_out_of_range_counts_left_to_server() {
        let params: PageParams = serde_json::from_value(json!({"page": -1, "limit": 0})).unwrap();
        assert_eq!(params.page, Some(-1));
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({"page": -1, "limit": 0})
        );
    }
}
