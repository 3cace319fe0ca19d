//! Date-range reports
//!
//! Month-to-date, previous month, year-to-date and previous year, each
//! computed from an injectable `today` and applied as a closed interval.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::models::Transaction;

/// Closed date interval: both `start` and `end` are included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Records dated inside the range, in input order
    pub fn filter(&self, records: &[Transaction]) -> Vec<Transaction> {
        records
            .iter()
            .filter(|t| self.contains(t.date))
            .cloned()
            .collect()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Predefined reporting periods relative to `today`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    MonthToDate,
    PreviousMonth,
    YearToDate,
    PreviousYear,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        Self::MonthToDate,
        Self::PreviousMonth,
        Self::YearToDate,
        Self::PreviousYear,
    ];

    /// The date range this period covers for the given `today`
    pub fn range(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::MonthToDate => DateRange::new(first_of_month(today.year(), today.month()), today),
            Self::PreviousMonth => {
                let (year, month) = if today.month() == 1 {
                    (today.year() - 1, 12)
                } else {
                    (today.year(), today.month() - 1)
                };
                DateRange::new(first_of_month(year, month), last_of_month(year, month))
            }
            Self::YearToDate => DateRange::new(first_of_month(today.year(), 1), today),
            Self::PreviousYear => {
                let year = today.year() - 1;
                DateRange::new(first_of_month(year, 1), last_of_month(year, 12))
            }
        }
    }

    /// Records falling inside this period
    pub fn filter(&self, records: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        self.range(today).filter(records)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MonthToDate => "Month To Date",
            Self::PreviousMonth => "Previous Month",
            Self::YearToDate => "Year To Date",
            Self::PreviousYear => "Previous Year",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn month_to_date(records: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
    ReportPeriod::MonthToDate.filter(records, today)
}

pub fn previous_month(records: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
    ReportPeriod::PreviousMonth.filter(records, today)
}

pub fn year_to_date(records: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
    ReportPeriod::YearToDate.filter(records, today)
}

pub fn previous_year(records: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
    ReportPeriod::PreviousYear.filter(records, today)
}

/// The local current date, the default `today` for every report
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// Day 1 exists for every month chrono can represent for the years in use.
fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{Duration, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn_on(d: NaiveDate) -> Transaction {
        Transaction::new(
            d,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            "coffee payment",
            "Cafe",
            Money::from_cents(-450),
        )
    }

    fn dates(records: &[Transaction]) -> Vec<NaiveDate> {
        records.iter().map(|t| t.date).collect()
    }

    #[test]
    fn test_month_to_date_boundaries() {
        let today = date(2024, 3, 15);
        let records: Vec<_> = [
            date(2024, 2, 29),
            date(2024, 3, 1),
            date(2024, 3, 10),
            date(2024, 3, 15),
            date(2024, 3, 16),
        ]
        .into_iter()
        .map(txn_on)
        .collect();

        assert_eq!(
            dates(&month_to_date(&records, today)),
            vec![date(2024, 3, 1), date(2024, 3, 10), date(2024, 3, 15)]
        );
    }

    #[test]
    fn test_month_to_date_every_day() {
        let today = date(2023, 7, 20);
        let range = ReportPeriod::MonthToDate.range(today);
        let mut day = date(2023, 6, 1);
        while day <= date(2023, 8, 31) {
            let inside = day >= date(2023, 7, 1) && day <= today;
            assert_eq!(range.contains(day), inside, "{}", day);
            day += Duration::days(1);
        }
    }

    #[test]
    fn test_previous_month_rolls_year_back_in_january() {
        let range = ReportPeriod::PreviousMonth.range(date(2024, 1, 10));
        assert_eq!(range, DateRange::new(date(2023, 12, 1), date(2023, 12, 31)));

        let records: Vec<_> = [date(2023, 11, 30), date(2023, 12, 1), date(2023, 12, 31), date(2024, 1, 1)]
            .into_iter()
            .map(txn_on)
            .collect();
        assert_eq!(
            dates(&previous_month(&records, date(2024, 1, 10))),
            vec![date(2023, 12, 1), date(2023, 12, 31)]
        );
    }

    #[test]
    fn test_previous_month_lengths() {
        assert_eq!(
            ReportPeriod::PreviousMonth.range(date(2024, 3, 31)),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            ReportPeriod::PreviousMonth.range(date(2023, 3, 1)),
            DateRange::new(date(2023, 2, 1), date(2023, 2, 28))
        );
        assert_eq!(
            ReportPeriod::PreviousMonth.range(date(2024, 5, 31)).end,
            date(2024, 4, 30)
        );
    }

    #[test]
    fn test_year_to_date() {
        let today = date(2024, 6, 30);
        let records: Vec<_> = [date(2023, 12, 31), date(2024, 1, 1), date(2024, 6, 30), date(2024, 7, 1)]
            .into_iter()
            .map(txn_on)
            .collect();

        assert_eq!(
            dates(&year_to_date(&records, today)),
            vec![date(2024, 1, 1), date(2024, 6, 30)]
        );
    }

    #[test]
    fn test_previous_year() {
        let today = date(2024, 6, 30);
        let records: Vec<_> = [date(2022, 12, 31), date(2023, 1, 1), date(2023, 12, 31), date(2024, 1, 1)]
            .into_iter()
            .map(txn_on)
            .collect();

        assert_eq!(
            dates(&previous_year(&records, today)),
            vec![date(2023, 1, 1), date(2023, 12, 31)]
        );
    }

    #[test]
    fn test_filter_keeps_input_order() {
        let today = date(2024, 3, 15);
        let records: Vec<_> = [date(2024, 3, 9), date(2024, 3, 2), date(2024, 3, 5)]
            .into_iter()
            .map(txn_on)
            .collect();

        assert_eq!(dates(&month_to_date(&records, today)), dates(&records));
    }
}
