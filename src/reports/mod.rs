//! Reports module for pocket-ledger
//!
//! Stateless filters over a loaded working set: fixed reporting periods and
//! the incremental custom search.

pub mod period;
pub mod search;

pub use period::{
    local_today, month_to_date, previous_month, previous_year, year_to_date, DateRange,
    ReportPeriod,
};
pub use search::{custom_search, parse_date, AmountQuery, CustomSearch, SearchCriterion, SearchField};
