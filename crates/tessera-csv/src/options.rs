//! CSV options

use tessera_core::ParsingLocale;

use crate::error::{CsvError, CsvResult};

/// Default field separator
pub const DEFAULT_SEPARATOR: &str = ",";
/// Default line break
pub const DEFAULT_LINE_BREAK: &str = "\n";
/// Default escape (quote) character
pub const DEFAULT_ESCAPE_CHARACTER: char = '"';

/// Dialect shared by the reader and the writer.
///
/// Options are plain data; [`CsvOptions::validate`] runs when a
/// [`CsvReader`](crate::CsvReader) or [`CsvWriter`](crate::CsvWriter) is
/// built, before any text is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Field separator (default: comma)
    pub separator: String,
    /// Line break (default: LF)
    pub line_break: String,
    /// Quote character, doubled to stand for itself (default: double quote)
    pub escape_character: char,
    /// Whether the first line holds column headers (reading)
    pub first_line_is_headers: bool,
    /// Emit a header line when some column has a header (writing)
    pub write_header: bool,
    /// Locale given to parsed documents for typed access
    pub locale: ParsingLocale,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            line_break: DEFAULT_LINE_BREAK.to_string(),
            escape_character: DEFAULT_ESCAPE_CHARACTER,
            first_line_is_headers: true,
            write_header: true,
            locale: ParsingLocale::invariant(),
        }
    }
}

impl CsvOptions {
    /// Set the field separator, which may span several characters
    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the line break, which may span several characters
    pub fn with_line_break<S: Into<String>>(mut self, line_break: S) -> Self {
        self.line_break = line_break.into();
        self
    }

    /// Set the line break from one of the common terminators
    pub fn with_line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.line_break = terminator.as_str().to_string();
        self
    }

    /// Set the character used to quote fields
    pub fn with_escape_character(mut self, escape_character: char) -> Self {
        self.escape_character = escape_character;
        self
    }

    /// Read the first line as column headers instead of data
    pub fn with_first_line_as_headers(mut self, first_line_is_headers: bool) -> Self {
        self.first_line_is_headers = first_line_is_headers;
        self
    }

    /// Emit the header line when writing a document that has headers
    pub fn with_write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    /// Set the locale applied to typed values of parsed documents
    pub fn with_locale(mut self, locale: ParsingLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Check that separator, line break, and escape character can coexist.
    ///
    /// Both delimiters must be non-empty, neither may contain the other, and
    /// neither may contain the escape character.
    pub fn validate(&self) -> CsvResult<()> {
        if self.separator.is_empty() {
            return Err(CsvError::configuration("separator cannot be empty"));
        }
        if self.line_break.is_empty() {
            return Err(CsvError::configuration("line break cannot be empty"));
        }
        if self.separator == self.line_break {
            return Err(CsvError::configuration(format!(
                "separator and line break are both {:?}",
                self.separator
            )));
        }
        if self.separator.contains(self.line_break.as_str())
            || self.line_break.contains(self.separator.as_str())
        {
            return Err(CsvError::configuration(format!(
                "separator {:?} and line break {:?} overlap",
                self.separator, self.line_break
            )));
        }
        if self.separator.contains(self.escape_character) {
            return Err(CsvError::configuration(format!(
                "separator {:?} contains the escape character {:?}",
                self.separator, self.escape_character
            )));
        }
        if self.line_break.contains(self.escape_character) {
            return Err(CsvError::configuration(format!(
                "line break {:?} contains the escape character {:?}",
                self.line_break, self.escape_character
            )));
        }
        Ok(())
    }
}

/// Common line terminators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}

impl LineTerminator {
    /// The characters written for this terminator
    pub fn as_str(self) -> &'static str {
        match self {
            LineTerminator::LF => "\n",
            LineTerminator::CRLF => "\r\n",
            LineTerminator::CR => "\r",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CsvOptions::default().validate().is_ok());
        assert!(CsvOptions::default()
            .with_separator("||")
            .with_line_terminator(LineTerminator::CRLF)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_invalid_combinations() {
        let invalid = [
            CsvOptions::default().with_separator(""),
            CsvOptions::default().with_line_break(""),
            CsvOptions::default().with_separator("\n"),
            CsvOptions::default().with_separator("\r\n").with_line_break("\n"),
            CsvOptions::default().with_separator(";").with_line_break(";;"),
            CsvOptions::default().with_separator("\",\""),
            CsvOptions::default().with_line_break("\"\n"),
            CsvOptions::default().with_escape_character(','),
        ];
        for options in invalid {
            assert!(
                matches!(options.validate(), Err(CsvError::InvalidConfiguration(_))),
                "{:?} should be rejected",
                options
            );
        }
    }

    #[test]
    fn test_line_terminator() {
        let options = CsvOptions::default().with_line_terminator(LineTerminator::CR);
        assert_eq!(options.line_break, "\r");
    }

    #[test]
    fn test_builders_set_fields() {
        let options = CsvOptions::default()
            .with_separator("||")
            .with_line_break("\r\n")
            .with_escape_character('\'')
            .with_first_line_as_headers(false)
            .with_write_header(false);
        assert_eq!(options.separator, "||");
        assert_eq!(options.line_break, "\r\n");
        assert_eq!(options.escape_character, '\'');
        assert!(!options.first_line_is_headers);
        assert!(!options.write_header);
        assert!(options.validate().is_ok());
    }
}
