use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::{parse_date, DATE_FORMAT};

/// A reporting window chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    AllTime,
    Year(i32),
    /// Year and month, month in 1..=12.
    Month(i32, u32),
    /// Raw user-entered `YYYY-MM-DD` bounds, both inclusive.
    Range { start: String, end: String },
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The bounds as stored `YYYY-MM-DD` strings, for string comparison in SQL.
    pub fn bounds(&self) -> (String, String) {
        (
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }
}

impl Period {
    pub fn range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Range {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Turn the selector into a concrete range.
    ///
    /// `Ok(None)` means no restriction (all time).
    pub fn resolve(&self) -> Result<Option<DateRange>, LedgerError> {
        match self {
            Self::AllTime => Ok(None),
            Self::Year(year) => {
                let start = ymd(*year, 1, 1)?;
                let end = ymd(*year, 12, 31)?;
                Ok(Some(DateRange { start, end }))
            }
            Self::Month(year, month) => {
                if !(1..=12).contains(month) {
                    return Err(LedgerError::InvalidPeriod(format!(
                        "month must be between 1 and 12, got {month}"
                    )));
                }
                let start = ymd(*year, *month, 1)?;
                Ok(Some(DateRange {
                    start,
                    end: last_day_of_month(start),
                }))
            }
            Self::Range { start, end } => {
                let start = range_bound("start", start)?;
                let end = range_bound("end", end)?;
                if start > end {
                    return Err(LedgerError::InvalidPeriod(format!(
                        "start date {start} is after end date {end}"
                    )));
                }
                Ok(Some(DateRange { start, end }))
            }
        }
    }

    /// Short form used in export file names.
    pub fn file_stem(&self) -> String {
        match self {
            Self::AllTime => "all".into(),
            Self::Year(year) => format!("{year}"),
            Self::Month(year, month) => format!("{year}_{month:02}"),
            Self::Range { start, end } => format!("{}_to_{}", start.trim(), end.trim()),
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, LedgerError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| LedgerError::InvalidPeriod(format!("year {year} is out of range")))
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

fn range_bound(which: &str, text: &str) -> Result<NaiveDate, LedgerError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LedgerError::InvalidPeriod(format!("{which} date is empty")));
    }
    parse_date(text).ok_or_else(|| {
        LedgerError::InvalidPeriod(format!("{which} date \"{text}\" is not a YYYY-MM-DD date"))
    })
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTime => write!(f, "all time"),
            Self::Year(year) => write!(f, "{year}"),
            Self::Month(year, month) => write!(f, "{year}-{month:02}"),
            Self::Range { start, end } => write!(f, "{} to {}", start.trim(), end.trim()),
        }
    }
}

impl FromStr for Period {
    type Err = LedgerError;

    /// Accepts `all`, `YYYY`, `YYYY-MM` or `START..END`.
    ///
    /// A range with a missing side still parses; it fails on [Period::resolve].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::AllTime);
        }
        if let Some((start, end)) = s.split_once("..") {
            return Ok(Self::range(start.trim(), end.trim()));
        }

        let invalid = || LedgerError::InvalidPeriod(format!("unrecognised period \"{s}\""));
        match s.split_once('-') {
            None if s.len() == 4 => s.parse().map(Self::Year).map_err(|_| invalid()),
            Some((year, month)) if year.len() == 4 && month.len() == 2 => {
                let year = year.parse().map_err(|_| invalid())?;
                let month = month.parse().map_err(|_| invalid())?;
                Ok(Self::Month(year, month))
            }
            _ => Err(invalid()),
        }
    }
}
