//! Dashboard view models
//!
//! Pure functions that turn analytics payloads from `rxboard-models` into
//! display-ready rows: formatted currency, percentages, chart series and risk
//! buckets. Nothing here performs I/O or touches the cache, so every view can
//! be recomputed freely whenever its source data changes.
//!
//! # Example
//!
//! ```rust
//! use rxboard_models::StatusCount;
//! use rxboard_views::{status_breakdown, format_currency};
//!
//! let slices = status_breakdown(&[
//!     StatusCount { status: "paid".into(), count: 3 },
//!     StatusCount { status: "pending".into(), count: 1 },
//! ]);
//! assert_eq!(slices[0].tooltip(), "3 (75.0%)");
//! assert_eq!(format_currency(1234.5), "$1,234.50");
//! ```

pub mod cost_summary;
pub mod format;
pub mod risk;
pub mod savings;
pub mod series;
pub mod split;
pub mod stats;
pub mod status;
pub mod top_drugs;
pub mod trends;

pub use cost_summary::{cost_summary_view, month_label, CostSummaryView, MonthRow, StatusCostRow};
pub use format::{
    currency_tick, format_count, format_currency, format_percent, ratio, thousands_tick,
};
pub use risk::{utilizer_rows, RiskLevel, UtilizerRow};
pub use savings::{savings_overview, SavingsOverview, SavingsRow};
pub use series::{ChartSeries, SplitMeasure, TopDrugSeries, TrendSeries};
pub use split::{split_generic_brand, GenericBrandSplit, SplitSlice};
pub use stats::{daily_average, stats_cards, StatCard};
pub use status::{status_breakdown, StatusSlice, StatusTone};
pub use top_drugs::{top_drugs, TopDrugRow, DEFAULT_TOP_N};
pub use trends::{format_trends, short_date, TrendPointView};
