//! The closed set of FMP operations.
//!
//! One table drives everything an operation needs:
//!
//! - an [`OperationId`] variant, identified on the wire by its endpoint path
//! - an [`EndpointParameters`] variant wrapping its typed parameters
//! - a typed method on [`Client`]
//!
//! Adding an endpoint is one new table row plus, if no existing shape fits,
//! one parameter struct in [`params`].

mod params;

pub use params::*;

use std::fmt;
use std::str::FromStr;

use crate::client::Client;
use crate::context::CallContext;
use crate::error::{ApiError, ValidationError};
use crate::method::RestMethod;
use crate::response::RawResponse;

macro_rules! operations {
    ($(
        $(#[doc = $doc:literal])*
        $variant:ident {
            path: $path:literal,
            operation_id: $operation_id:literal,
            params: $params:ty,
            method: $method:ident,
        }
    )*) => {
        /// Identifier of a supported operation.
        ///
        /// Parses from, and displays as, the endpoint path (`"/profile"`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum OperationId {
            $(
                $(#[doc = $doc])*
                $variant,
            )*
        }

        impl OperationId {
            /// Every operation, in table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Endpoint path relative to the base URL.
            pub const fn path(self) -> &'static str {
                match self {
                    $(Self::$variant => $path,)*
                }
            }

            /// `operationId` of the operation in the API description.
            pub const fn operation_id(self) -> &'static str {
                match self {
                    $(Self::$variant => $operation_id,)*
                }
            }

            /// Name of the typed [`Client`] method.
            pub const fn method_name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($method),)*
                }
            }
        }

        impl FromStr for OperationId {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($path => Ok(Self::$variant),)*
                    other => Err(ApiError::unknown_operation(other)),
                }
            }
        }

        /// Typed parameters tagged with the operation they belong to.
        #[derive(Debug, Clone, PartialEq)]
        pub enum EndpointParameters {
            $($variant($params),)*
        }

        impl EndpointParameters {
            /// Decodes a JSON value into the parameter shape of `operation`.
            ///
            /// Missing fields take their defaults and unknown fields are
            /// dropped; a field of the wrong type is an error.
            ///
            /// ## Errors
            ///
            /// Returns [`ValidationError::Decode`] when `value` does not fit.
            pub fn decode(
                operation: OperationId,
                value: serde_json::Value,
            ) -> Result<Self, ValidationError> {
                let decoded = match operation {
                    $(OperationId::$variant => {
                        serde_json::from_value::<$params>(value).map(Self::$variant)
                    })*
                };
                decoded.map_err(|source| ValidationError::Decode {
                    operation: operation.path(),
                    source,
                })
            }

            /// The operation these parameters are for.
            pub fn operation(&self) -> OperationId {
                match self {
                    $(Self::$variant(_) => OperationId::$variant,)*
                }
            }

            /// Encodes the parameters back into a JSON object.
            ///
            /// ## Errors
            ///
            /// Returns [`ValidationError::Encode`] if serialization fails.
            pub fn to_value(&self) -> Result<serde_json::Value, ValidationError> {
                match self {
                    $(Self::$variant(params) => serde_json::to_value(params),)*
                }
                .map_err(ValidationError::Encode)
            }
        }

        impl Client {
            $(
                $(#[doc = $doc])*
                #[doc = ""]
                #[doc = concat!("`GET ", $path, "`")]
                pub async fn $method(
                    &self,
                    ctx: &CallContext,
                    params: &$params,
                ) -> Result<RawResponse, ApiError> {
                    self.get(ctx, OperationId::$variant, params).await
                }
            )*

            /// Invokes the endpoint matching the variant of `params`.
            pub async fn call(
                &self,
                ctx: &CallContext,
                params: &EndpointParameters,
            ) -> Result<RawResponse, ApiError> {
                match params {
                    $(EndpointParameters::$variant(p) => self.$method(ctx, p).await,)*
                }
            }
        }
    };
}

impl OperationId {
    /// Wire identifier, same as [`path`](Self::path).
    pub const fn as_str(self) -> &'static str {
        self.path()
    }

    /// HTTP method. Every supported operation is a read.
    pub const fn method(self) -> RestMethod {
        RestMethod::Get
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

operations! {
    /// Analyst revenue and earnings estimates.
    AnalystEstimates {
        path: "/analyst-estimates",
        operation_id: "AnalystEstimatesGet",
        params: AnalystEstimatesParams,
        method: analyst_estimates,
    }
    /// Balance sheet statements.
    BalanceSheetStatement {
        path: "/balance-sheet-statement",
        operation_id: "BalanceSheetStatementGet",
        params: StatementParams,
        method: balance_sheet_statement,
    }
    /// Trailing twelve months balance sheet.
    BalanceSheetStatementTtm {
        path: "/balance-sheet-statement-ttm",
        operation_id: "BalanceSheetStatementTTMGet",
        params: SymbolLimitParams,
        method: balance_sheet_statement_ttm,
    }
    /// Full quotes for several symbols.
    BatchQuote {
        path: "/batch-quote",
        operation_id: "BatchQuoteGet",
        params: SymbolsParams,
        method: batch_quote,
    }
    /// Short quotes for several symbols.
    BatchQuoteShort {
        path: "/batch-quote-short",
        operation_id: "BatchQuoteShortGet",
        params: SymbolsParams,
        method: batch_quote_short,
    }
    /// Cash flow statements.
    CashFlowStatement {
        path: "/cash-flow-statement",
        operation_id: "CashFlowStatementGet",
        params: StatementParams,
        method: cash_flow_statement,
    }
    /// Trailing twelve months cash flow.
    CashFlowStatementTtm {
        path: "/cash-flow-statement-ttm",
        operation_id: "CashFlowStatementTTMGet",
        params: SymbolLimitParams,
        method: cash_flow_statement_ttm,
    }
    /// Delisted companies.
    DelistedCompanies {
        path: "/delisted-companies",
        operation_id: "DelistedCompanies",
        params: PageParams,
        method: delisted_companies,
    }
    /// Economic data release calendar.
    EconomicCalendar {
        path: "/economic-calendar",
        operation_id: "EconomicCalendarGet",
        params: DateRangeParams,
        method: economic_calendar,
    }
    /// ESG disclosures.
    EsgDisclosures {
        path: "/esg-disclosures",
        operation_id: "EsgDisclosuresGet",
        params: SymbolParams,
        method: esg_disclosures,
    }
    /// ESG ratings.
    EsgRatings {
        path: "/esg-ratings",
        operation_id: "EsgRatingsGet",
        params: SymbolParams,
        method: esg_ratings,
    }
    /// Latest analyst grade changes.
    GradesLatestNews {
        path: "/grades-latest-news",
        operation_id: "GradesLatestNewsGet",
        params: PageParams,
        method: grades_latest_news,
    }
    /// Prices at 15 minute intervals.
    HistoricalChart15Min {
        path: "/historical-chart/15min",
        operation_id: "HistoricalChart15MinGet",
        params: HistoricalChartParams,
        method: historical_chart_15min,
    }
    /// Full end-of-day price history.
    HistoricalPriceEodFull {
        path: "/historical-price-eod/full",
        operation_id: "HistoricalPriceEodFullGet",
        params: HistoricalPriceParams,
        method: historical_price_eod_full,
    }
    /// End-of-day closing prices and volume.
    HistoricalPriceEodLight {
        path: "/historical-price-eod/light",
        operation_id: "HistoricalPriceEodLightGet",
        params: HistoricalPriceParams,
        method: historical_price_eod_light,
    }
    /// Income statements.
    IncomeStatement {
        path: "/income-statement",
        operation_id: "IncomeStatementGet",
        params: StatementParams,
        method: income_statement,
    }
    /// Trailing twelve months income statement.
    IncomeStatementTtm {
        path: "/income-statement-ttm",
        operation_id: "IncomeStatementTTMGet",
        params: SymbolLimitParams,
        method: income_statement_ttm,
    }
    /// Latest insider trades.
    InsiderTradingLatest {
        path: "/insider-trading/latest",
        operation_id: "InsiderTradingLatestGet",
        params: InsiderTradingLatestParams,
        method: insider_trading_latest,
    }
    /// Insider trades filtered by symbol, filer or transaction type.
    InsiderTradingSearch {
        path: "/insider-trading/search",
        operation_id: "InsiderTradingSearchGet",
        params: InsiderTradingSearchParams,
        method: insider_trading_search,
    }
    /// Key financial metrics.
    KeyMetrics {
        path: "/key-metrics",
        operation_id: "KeyMetricsGet",
        params: StatementParams,
        method: key_metrics,
    }
    /// Market capitalization.
    MarketCapitalization {
        path: "/market-capitalization",
        operation_id: "MarketCapitalizationGet",
        params: SymbolParams,
        method: market_capitalization,
    }
    /// Market capitalization for several symbols.
    MarketCapitalizationBatch {
        path: "/market-capitalization-batch",
        operation_id: "MarketCapitalizationBatchGet",
        params: SymbolsParams,
        method: market_capitalization_batch,
    }
    /// Latest general news.
    NewsGeneralLatest {
        path: "/news/general-latest",
        operation_id: "NewsGeneralLatestGet",
        params: NewsParams,
        method: news_general_latest,
    }
    /// Company profile.
    Profile {
        path: "/profile",
        operation_id: "ProfileGet",
        params: SymbolParams,
        method: profile,
    }
    /// Full real-time quote.
    Quote {
        path: "/quote",
        operation_id: "QuoteGet",
        params: SymbolParams,
        method: quote,
    }
    /// Price, change and volume only.
    QuoteShort {
        path: "/quote-short",
        operation_id: "QuoteShortGet",
        params: SymbolParams,
        method: quote_short,
    }
    /// Financial ratings snapshot.
    RatingsSnapshot {
        path: "/ratings-snapshot",
        operation_id: "RatingsSnapshotGet",
        params: SymbolLimitParams,
        method: ratings_snapshot,
    }
    /// Financial ratios.
    Ratios {
        path: "/ratios",
        operation_id: "RatiosGet",
        params: StatementParams,
        method: ratios,
    }
    /// Revenue broken down by region.
    RevenueGeographicSegmentation {
        path: "/revenue-geographic-segmentation",
        operation_id: "RevenueGeographicSegmentationGet",
        params: SegmentationParams,
        method: revenue_geographic_segmentation,
    }
    /// Revenue broken down by product line.
    RevenueProductSegmentation {
        path: "/revenue-product-segmentation",
        operation_id: "RevenueProductSegmentationGet",
        params: SegmentationParams,
        method: revenue_product_segmentation,
    }
    /// Search by company name.
    SearchName {
        path: "/search-name",
        operation_id: "SearchNameGet",
        params: SearchParams,
        method: search_name,
    }
    /// Search by ticker symbol.
    SearchSymbol {
        path: "/search-symbol",
        operation_id: "SearchSymbolGet",
        params: SearchParams,
        method: search_symbol,
    }
    /// Free float and outstanding shares.
    SharesFloat {
        path: "/shares-float",
        operation_id: "SharesFloatGet",
        params: SymbolParams,
        method: shares_float,
    }
    /// US treasury rates.
    TreasuryRates {
        path: "/treasury-rates",
        operation_id: "TreasuryRatesGet",
        params: DateRangeParams,
        method: treasury_rates,
    }
    /// Supported exchanges.
    AvailableExchanges {
        path: "/available-exchanges",
        operation_id: "AvailableExchangesGet",
        params: NoParams,
        method: available_exchanges,
    }
    /// Dividend history.
    Dividends {
        path: "/dividends",
        operation_id: "DividendsGet",
        params: SymbolLimitParams,
        method: dividends,
    }
    /// Upcoming and recent dividends across all symbols.
    DividendsCalendar {
        path: "/dividends-calendar",
        operation_id: "DividendsCalendarGet",
        params: DateRangeParams,
        method: dividends_calendar,
    }
    /// Earnings reports.
    Earnings {
        path: "/earnings",
        operation_id: "EarningsGet",
        params: SymbolLimitParams,
        method: earnings,
    }
    /// Earnings announcement calendar.
    EarningsCalendar {
        path: "/earnings-calendar",
        operation_id: "GetEarningsCalendar",
        params: DateRangeParams,
        method: earnings_calendar,
    }
    /// Enterprise value history.
    EnterpriseValues {
        path: "/enterprise-values",
        operation_id: "EnterpriseValueGet",
        params: StatementParams,
        method: enterprise_values,
    }
    /// Trailing twelve months key metrics.
    KeyMetricsTtm {
        path: "/key-metrics-ttm",
        operation_id: "KeyMetricsTTMGet",
        params: SymbolParams,
        method: key_metrics_ttm,
    }
    /// Trailing twelve months ratios.
    RatiosTtm {
        path: "/ratios-ttm",
        operation_id: "RatiosTTMGet",
        params: SymbolParams,
        method: ratios_ttm,
    }
    /// Stock split history.
    Splits {
        path: "/splits",
        operation_id: "GetSplits",
        params: SymbolLimitParams,
        method: splits,
    }
    /// Stock split calendar.
    SplitsCalendar {
        path: "/splits-calendar",
        operation_id: "GetSplitsCalendar",
        params: DateRangeParams,
        method: splits_calendar,
    }
    /// Every listed symbol.
    StockList {
        path: "/stock-list",
        operation_id: "StockListGet",
        params: NoParams,
        method: stock_list,
    }
    /// Latest stock news.
    NewsStockLatest {
        path: "/news/stock-latest",
        operation_id: "NewsStockLatestGet",
        params: NewsParams,
        method: news_stock_latest,
    }
    /// Relative strength index.
    TechnicalIndicatorsRsi {
        path: "/technical-indicators/rsi",
        operation_id: "TechnicalIndicatorsRsiGet",
        params: RsiParams,
        method: technical_indicators_rsi,
    }
}
