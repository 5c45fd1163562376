// src/dates/fiscal.rs
use crate::utils::error::ConfigError;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// First day of the fiscal year, e.g. April 1 for `FiscalConfig::new(4, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalConfig {
    start_month: u32,
    start_day: u32,
}

impl FiscalConfig {
    /// Month must be 1-12 and day 1-31. Days past the end of the month
    /// (e.g. `04-31`) are kept; the boundary comparison handles them.
    pub fn new(start_month: u32, start_day: u32) -> Result<Self, ConfigError> {
        if !(1..=12).contains(&start_month) || !(1..=31).contains(&start_day) {
            return Err(ConfigError::InvalidFiscalStart(format!("{:02}-{:02}", start_month, start_day)));
        }
        Ok(Self { start_month, start_day })
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    /// Fiscal year a calendar date falls in. The start date itself opens the
    /// next fiscal year.
    pub fn fiscal_year(&self, date: NaiveDate) -> i32 {
        if (date.month(), date.day()) >= (self.start_month, self.start_day) {
            date.year() + 1
        } else {
            date.year()
        }
    }
}

impl FromStr for FiscalConfig {
    type Err = ConfigError;

    /// Parses `MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidFiscalStart(s.to_string());
        let (month, day) = s.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse().map_err(|_| invalid())?;
        let day = day.parse().map_err(|_| invalid())?;
        Self::new(month, day).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_date_opens_next_fiscal_year() {
        let config = FiscalConfig::new(4, 1).unwrap();
        assert_eq!(config.fiscal_year(ymd(2024, 4, 1)), 2025);
        assert_eq!(config.fiscal_year(ymd(2024, 3, 31)), 2024);
        assert_eq!(config.fiscal_year(ymd(2024, 12, 31)), 2025);
        assert_eq!(config.fiscal_year(ymd(2024, 1, 1)), 2024);
    }

    #[test]
    fn test_day_compared_within_start_month() {
        let config = FiscalConfig::new(7, 15).unwrap();
        assert_eq!(config.fiscal_year(ymd(2023, 7, 14)), 2023);
        assert_eq!(config.fiscal_year(ymd(2023, 7, 15)), 2024);
    }

    #[test]
    fn test_january_first_start_always_rolls_forward() {
        let config = FiscalConfig::new(1, 1).unwrap();
        assert_eq!(config.fiscal_year(ymd(2022, 1, 1)), 2023);
    }

    #[test]
    fn test_start_day_past_month_end() {
        // April 31 never occurs, so the year rolls over from May 1.
        let config = FiscalConfig::new(4, 31).unwrap();
        assert_eq!(config.fiscal_year(ymd(2024, 4, 30)), 2024);
        assert_eq!(config.fiscal_year(ymd(2024, 5, 1)), 2025);
    }

    #[test]
    fn test_parse_from_str() {
        let config: FiscalConfig = "04-01".parse().unwrap();
        assert_eq!((config.start_month(), config.start_day()), (4, 1));
        assert!("02-29".parse::<FiscalConfig>().is_ok());
        assert!("04-31".parse::<FiscalConfig>().is_ok());
        assert!("02-30".parse::<FiscalConfig>().is_ok());
        assert!("13-01".parse::<FiscalConfig>().is_err());
        assert!("00-10".parse::<FiscalConfig>().is_err());
        assert!("04-32".parse::<FiscalConfig>().is_err());
        assert!("04-00".parse::<FiscalConfig>().is_err());
        assert!("April".parse::<FiscalConfig>().is_err());
    }
}
