// src/dates/format.rs
use crate::dates::start_year::expand_year;
use chrono::{Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

/// Known textual date layouts found in statement tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `2024-05-12`
    IsoDate,
    /// `12/05/2024`
    DayMonthYear,
    /// `12/05/24`
    DayMonthShortYear,
    /// `12 May. 2024`, `12 May 2024`
    DayAbbrMonthYear,
    /// `12 May 24`
    DayAbbrMonthAnyYear,
    /// `12-May-2024`
    DayDashAbbrMonthYear,
    /// `12/05`, no year
    DayMonth,
}

// Three-letter month abbreviations, matched case-insensitively.
const MONTH_ABBR: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

impl DateFormat {
    /// Detection order: most specific first. `DayMonth` must stay last since
    /// it also matches the leading part of every slashed date with a year.
    pub const ALL: [DateFormat; 7] = [
        DateFormat::IsoDate,
        DateFormat::DayMonthYear,
        DateFormat::DayMonthShortYear,
        DateFormat::DayAbbrMonthYear,
        DateFormat::DayAbbrMonthAnyYear,
        DateFormat::DayDashAbbrMonthYear,
        DateFormat::DayMonth,
    ];

    /// Stable identifier of the format.
    pub fn tag(self) -> &'static str {
        match self {
            DateFormat::IsoDate => "Y-m-d",
            DateFormat::DayMonthYear => "d/m/Y",
            DateFormat::DayMonthShortYear => "d/m/y",
            DateFormat::DayAbbrMonthYear => "d b. Y",
            DateFormat::DayAbbrMonthAnyYear => "d b y_or_Y",
            DateFormat::DayDashAbbrMonthYear => "d-b-Y",
            DateFormat::DayMonth => "d/m",
        }
    }

    fn pattern(self) -> String {
        match self {
            DateFormat::IsoDate => r"\b(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})\b".to_string(),
            DateFormat::DayMonthYear => r"\b(?P<d>\d{1,2})/(?P<m>\d{1,2})/(?P<y>\d{4})\b".to_string(),
            DateFormat::DayMonthShortYear => r"\b(?P<d>\d{1,2})/(?P<m>\d{1,2})/(?P<y>\d{2})\b".to_string(),
            DateFormat::DayAbbrMonthYear => {
                format!(r"(?i)\b(?P<d>\d{{1,2}})\s+(?P<m>{})\.?\s+(?P<y>\d{{4}})\b", MONTH_ABBR)
            }
            DateFormat::DayAbbrMonthAnyYear => {
                format!(r"(?i)\b(?P<d>\d{{1,2}})\s+(?P<m>{})\s+(?P<y>\d{{4}}|\d{{2}})\b", MONTH_ABBR)
            }
            DateFormat::DayDashAbbrMonthYear => {
                format!(r"(?i)\b(?P<d>\d{{1,2}})-(?P<m>{})-(?P<y>\d{{4}})\b", MONTH_ABBR)
            }
            DateFormat::DayMonth => r"\b(?P<d>\d{1,2})/(?P<m>\d{1,2})\b".to_string(),
        }
    }

    /// Returns the first format (in detection order) found anywhere in `text`.
    pub fn detect(text: &str) -> Option<DateFormat> {
        DATE_RULES
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(format, _)| *format)
    }

    /// Parses the first date of this format found in `text`.
    /// `DayMonth` never parses since it has no year.
    pub fn parse(self, text: &str) -> Option<NaiveDate> {
        if self == DateFormat::DayMonth {
            return None;
        }
        let (_, re) = DATE_RULES.iter().find(|(format, _)| *format == self)?;
        re.captures_iter(text).find_map(|caps| date_from_captures(&caps))
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

static DATE_RULES: Lazy<Vec<(DateFormat, Regex)>> = Lazy::new(|| {
    DateFormat::ALL
        .iter()
        .map(|format| {
            let re = Regex::new(&format.pattern()).expect("Failed to compile date format pattern");
            (*format, re)
        })
        .collect()
});

fn date_from_captures(caps: &Captures<'_>) -> Option<NaiveDate> {
    let day: u32 = caps.name("d")?.as_str().parse().ok()?;
    let month_text = caps.name("m")?.as_str();
    let month = match month_text.parse::<u32>() {
        Ok(n) => n,
        Err(_) => month_text.parse::<Month>().ok()?.number_from_month(),
    };
    let year = expand_year(caps.name("y")?.as_str())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Detects and parses in one step.
pub fn parse_any(text: &str) -> Option<NaiveDate> {
    DateFormat::detect(text)?.parse(text)
}
