//! Parsing locale used by the typed cell accessors

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Format profile used to read and write typed cell values.
///
/// Cells always store text; the locale decides how that text maps to
/// numbers and date-times. The same profile is used in both directions so a
/// value written through a typed setter reads back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsingLocale {
    /// Character separating the integral and fractional part of a number
    pub decimal_separator: char,
    /// `chrono` formats tried for values carrying a time component
    pub date_time_formats: Vec<String>,
    /// `chrono` formats tried for date-only values (read as midnight)
    pub date_formats: Vec<String>,
}

impl Default for ParsingLocale {
    fn default() -> Self {
        Self::invariant()
    }
}

impl ParsingLocale {
    /// Month-first dates, `.` as decimal separator.
    pub fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            date_time_formats: vec![
                "%m/%d/%Y %H:%M:%S".into(),
                "%Y-%m-%dT%H:%M:%S".into(),
                "%Y-%m-%d %H:%M:%S".into(),
            ],
            date_formats: vec!["%m/%d/%Y".into(), "%Y-%m-%d".into()],
        }
    }

    /// Day-first dates with the given decimal separator (e.g. `','` for Italian data).
    pub fn day_first(decimal_separator: char) -> Self {
        Self {
            decimal_separator,
            date_time_formats: vec![
                "%d/%m/%Y %H:%M:%S".into(),
                "%d.%m.%Y %H:%M:%S".into(),
                "%Y-%m-%dT%H:%M:%S".into(),
            ],
            date_formats: vec!["%d/%m/%Y".into(), "%d.%m.%Y".into(), "%Y-%m-%d".into()],
        }
    }

    /// Replace the decimal separator
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Put a date-time format in front of the existing ones
    pub fn with_date_time_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_time_formats.insert(0, format.into());
        self
    }

    /// Put a date-only format in front of the existing ones
    pub fn with_date_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_formats.insert(0, format.into());
        self
    }

    pub(crate) fn parse_integer<T: std::str::FromStr>(
        &self,
        text: &str,
        expected: &'static str,
    ) -> Result<T> {
        text.trim()
            .parse::<T>()
            .map_err(|_| Error::invalid_value(expected, text))
    }

    pub(crate) fn parse_float<T: std::str::FromStr>(
        &self,
        text: &str,
        expected: &'static str,
    ) -> Result<T> {
        let trimmed = text.trim();
        let normalized = if self.decimal_separator == '.' {
            trimmed.to_string()
        } else {
            if trimmed.contains('.') {
                return Err(Error::invalid_value(expected, text));
            }
            trimmed.replace(self.decimal_separator, ".")
        };
        normalized
            .parse::<T>()
            .map_err(|_| Error::invalid_value(expected, text))
    }

    pub(crate) fn format_float<T: ToString>(&self, value: T) -> String {
        let text = value.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    pub(crate) fn parse_date_time(&self, text: &str) -> Result<NaiveDateTime> {
        let trimmed = text.trim();
        for format in &self.date_time_formats {
            if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(value);
            }
        }
        for format in &self.date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                if let Some(value) = date.and_hms_opt(0, 0, 0) {
                    return Ok(value);
                }
            }
        }
        Err(Error::invalid_value("date-time", text))
    }

    pub(crate) fn format_date_time(&self, value: &NaiveDateTime) -> String {
        match self.date_time_formats.first() {
            Some(format) => value.format(format).to_string(),
            None => value.to_string(),
        }
    }
}
