//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tessera_core::Document;

use crate::error::CsvResult;
use crate::options::CsvOptions;

/// Delimited-text reader
#[derive(Debug, Clone)]
pub struct CsvReader {
    options: CsvOptions,
}

impl CsvReader {
    /// Build a reader, rejecting invalid options up front
    pub fn new(options: CsvOptions) -> CsvResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Read a CSV file into a document
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> CsvResult<Document> {
        let file = File::open(path)?;
        self.read(file)
    }

    /// Read CSV from a byte stream into a document
    pub fn read<R: Read>(&self, mut reader: R) -> CsvResult<Document> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    /// Parse CSV text into a document.
    ///
    /// Single left-to-right pass with one character of lookahead. A trailing
    /// line break does not start a new row, and the last field is committed
    /// at end of input whenever the last line consumed any character.
    pub fn parse_str(&self, content: &str) -> CsvResult<Document> {
        let mut doc = Document::with_locale(self.options.locale.clone());
        let mut tokenizer = Tokenizer::new(&self.options);
        let mut line = 0usize;

        let mut chars = content.chars().peekable();
        while let Some(ch) = chars.next() {
            let next_is_escape = chars.peek() == Some(&self.options.escape_character);
            match tokenizer.feed(ch, next_is_escape) {
                Step::Continue => {}
                Step::SkipNext => {
                    chars.next();
                }
                Step::EndOfLine => {
                    self.commit_line(&mut doc, tokenizer.take_record(), line)?;
                    line += 1;
                }
            }
        }

        if tokenizer.quoted {
            log::warn!(
                "unterminated quoted field on line {}, keeping its text as-is",
                line + 1
            );
        }
        if tokenizer.line_has_content {
            tokenizer.commit_field();
            self.commit_line(&mut doc, tokenizer.take_record(), line)?;
        }

        log::debug!(
            "parsed {} rows x {} columns",
            doc.rows_count(),
            doc.columns_count()
        );
        Ok(doc)
    }

    fn commit_line(&self, doc: &mut Document, record: Vec<String>, line: usize) -> CsvResult<()> {
        if line == 0 && self.options.first_line_is_headers {
            for header in &record {
                doc.create_column(Some(header))?;
            }
        } else {
            doc.append_record(record)?;
        }
        Ok(())
    }
}

/// What the caller should do after feeding a character
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    /// The lookahead character was consumed as part of a doubled escape
    SkipNext,
    /// A line break completed the current record
    EndOfLine,
}

/// Character-level state of the parser
struct Tokenizer<'a> {
    separator: &'a str,
    line_break: &'a str,
    escape: char,
    /// Text of the field being built
    buffer: String,
    /// Leading bytes of `buffer` that came from quoted or escaped input and
    /// therefore cannot be part of a delimiter
    protected: usize,
    quoted: bool,
    record: Vec<String>,
    line_has_content: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(options: &'a CsvOptions) -> Self {
        Self {
            separator: &options.separator,
            line_break: &options.line_break,
            escape: options.escape_character,
            buffer: String::new(),
            protected: 0,
            quoted: false,
            record: Vec::new(),
            line_has_content: false,
        }
    }

    fn feed(&mut self, ch: char, next_is_escape: bool) -> Step {
        self.line_has_content = true;

        if ch == self.escape {
            if next_is_escape {
                self.buffer.push(self.escape);
                self.protected = self.buffer.len();
                return Step::SkipNext;
            }
            self.quoted = !self.quoted;
            return Step::Continue;
        }

        self.buffer.push(ch);
        if self.quoted {
            self.protected = self.buffer.len();
            return Step::Continue;
        }

        if self.strip_suffix(self.separator) {
            self.commit_field();
            Step::Continue
        } else if self.strip_suffix(self.line_break) {
            self.commit_field();
            self.line_has_content = false;
            Step::EndOfLine
        } else {
            Step::Continue
        }
    }

    /// Remove `delimiter` from the end of the buffer if it is there and
    /// lies entirely in unprotected text
    fn strip_suffix(&mut self, delimiter: &str) -> bool {
        let unprotected = &self.buffer[self.protected..];
        if unprotected.ends_with(delimiter) {
            let len = self.buffer.len() - delimiter.len();
            self.buffer.truncate(len);
            true
        } else {
            false
        }
    }

    fn commit_field(&mut self) {
        self.record.push(std::mem::take(&mut self.buffer));
        self.protected = 0;
    }

    fn take_record(&mut self) -> Vec<String> {
        std::mem::take(&mut self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;
    use pretty_assertions::assert_eq;
    use tessera_core::ParsingLocale;

    const SIMPLE: &str = "Mario,Rossi,1.76,10/22/2000\n\
                          John,Doe,1.82,08/16/1996\n\
                          Mary,Jean,1.61,10/21/1995\n\
                          Luigi,Rossi,1.76,10/22/2000";

    fn reader(options: CsvOptions) -> CsvReader {
        CsvReader::new(options).unwrap()
    }

    fn headerless() -> CsvReader {
        reader(CsvOptions::default().with_first_line_as_headers(false))
    }

    fn values(doc: &Document) -> Vec<Vec<String>> {
        doc.rows().map(|r| r.values()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let doc = headerless().parse_str(SIMPLE).unwrap();

        assert_eq!(doc.columns_count(), 4);
        assert_eq!(doc.rows_count(), 4);
        assert!(!doc.has_headers());
        assert_eq!(doc.cell_at(0, 0).unwrap().string_value(), "Mario");
        assert_eq!(doc.cell_at(1, 1).unwrap().string_value(), "Doe");
        assert_eq!(doc.cell_at(1, 2).unwrap().float_value().unwrap(), 1.82);
        assert_eq!(doc.cell_at(2, 2).unwrap().try_float_value(), Some(1.61));

        let born = doc.cell_at(3, 3).unwrap().date_time_value().unwrap();
        assert_eq!(born.format("%Y-%m-%d").to_string(), "2000-10-22");
    }

    #[test]
    fn test_parse_with_headers() {
        let doc = reader(CsvOptions::default())
            .parse_str("Name,Height\nMario,1.76")
            .unwrap();

        assert_eq!(doc.rows_count(), 1);
        assert_eq!(doc.column_headers(), vec!["Name", "Height"]);
        assert!(doc.column_named("Height").is_ok());
        assert!(matches!(
            doc.column_named("Weight"),
            Err(tessera_core::Error::UnknownHeader(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let doc = headerless().parse_str("").unwrap();
        assert_eq!(doc.rows_count(), 0);
        assert_eq!(doc.columns_count(), 0);

        let doc = reader(CsvOptions::default()).parse_str("").unwrap();
        assert_eq!(doc.columns_count(), 0);
    }

    #[test]
    fn test_trailing_line_break_is_not_a_row() {
        let doc = headerless().parse_str("a,b\nc,d\n").unwrap();
        assert_eq!(values(&doc), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_single_column_trailing_empty_row_is_dropped_on_reparse() {
        let options = CsvOptions::default().with_first_line_as_headers(false);
        let doc = reader(options.clone()).parse_str("a\n\n").unwrap();
        assert_eq!(values(&doc), vec![vec!["a"], vec![""]]);

        let text = crate::writer::CsvWriter::new(options.clone())
            .unwrap()
            .write_string(&doc);
        assert_eq!(text, "a\n");

        let reparsed = reader(options).parse_str(&text).unwrap();
        assert_eq!(values(&reparsed), vec![vec!["a"]]);
    }

    #[test]
    fn test_blank_line_is_a_row_of_empty_cells() {
        let doc = headerless().parse_str("a,b\n\nc,d").unwrap();
        assert_eq!(
            values(&doc),
            vec![vec!["a", "b"], vec!["", ""], vec!["c", "d"]]
        );
    }

    #[test]
    fn test_trailing_separator_is_an_empty_field() {
        let doc = headerless().parse_str("a,b,").unwrap();
        assert_eq!(values(&doc), vec![vec!["a", "b", ""]]);
    }

    #[test]
    fn test_ragged_lines() {
        let doc = headerless().parse_str("a,b,c\nd\ne,f,g,h").unwrap();
        assert_eq!(doc.columns_count(), 4);
        assert_eq!(
            values(&doc),
            vec![
                vec!["a", "b", "c", ""],
                vec!["d", "", "", ""],
                vec!["e", "f", "g", "h"],
            ]
        );
    }

    #[test]
    fn test_quoted_fields() {
        let doc = headerless()
            .parse_str("\"Rossi,Jr\",\"two\nlines\",plain")
            .unwrap();
        assert_eq!(values(&doc), vec![vec!["Rossi,Jr", "two\nlines", "plain"]]);
    }

    #[test]
    fn test_doubled_escape_is_literal() {
        let doc = headerless()
            .parse_str("\"say \"\"hi\"\"\",a\"\"b")
            .unwrap();
        assert_eq!(values(&doc), vec![vec!["say \"hi\"", "a\"b"]]);
    }

    #[test]
    fn test_escape_as_last_character() {
        let doc = headerless().parse_str("a,\"b\"").unwrap();
        assert_eq!(values(&doc), vec![vec!["a", "b"]]);

        let doc = headerless().parse_str("a,\"").unwrap();
        assert_eq!(values(&doc), vec![vec!["a", ""]]);
    }

    #[test]
    fn test_unterminated_quote_keeps_text() {
        let doc = headerless().parse_str("a,\"b,c\nd").unwrap();
        assert_eq!(values(&doc), vec![vec!["a", "b,c\nd"]]);
    }

    #[test]
    fn test_multi_character_delimiters() {
        let options = CsvOptions::default()
            .with_first_line_as_headers(false)
            .with_separator("<>")
            .with_line_break("\r\n");
        let doc = reader(options)
            .parse_str("a<>b<c<>d\r\ne>f<>\"g<\"<>\"h\r\"\r\n")
            .unwrap();
        assert_eq!(
            values(&doc),
            vec![vec!["a", "b<c", "d"], vec!["e>f", "g<", "h\r"]]
        );
    }

    #[test]
    fn test_quoted_text_never_completes_a_delimiter() {
        let options = CsvOptions::default()
            .with_first_line_as_headers(false)
            .with_separator(";;");
        let doc = reader(options).parse_str("\"x;\";y;;z").unwrap();
        assert_eq!(values(&doc), vec![vec!["x;;y", "z"]]);
    }

    #[test]
    fn test_locale_and_separator() {
        let content = "Name;LastName;Height;DateOfBirth\n\
                       \"Giuseppe Mario\";Rossi;1,50;31/01/1981\n\
                       Giuseppe Luigi;Rossi;1,50;31/01/1981\n\
                       \"Wario Quseppe\";Bianchi;1,55;31/01/1981";
        let options = CsvOptions::default()
            .with_separator(";")
            .with_locale(ParsingLocale::day_first(','));
        let doc = reader(options).parse_str(content).unwrap();

        assert_eq!(doc.columns_count(), 4);
        assert_eq!(doc.rows_count(), 3);
        assert_eq!(
            doc.cell_named(0, "Name").unwrap().string_value(),
            "Giuseppe Mario"
        );
        assert_eq!(
            doc.cell_named(2, "Height").unwrap().float_value().unwrap(),
            1.55
        );
        let born = doc.cell_named(1, "DateOfBirth").unwrap().date_time_value().unwrap();
        assert_eq!(born.format("%d.%m.%Y").to_string(), "31.01.1981");
    }

    #[test]
    fn test_header_only_input() {
        let doc = reader(CsvOptions::default()).parse_str("Name,Height\n").unwrap();
        assert_eq!(doc.columns_count(), 2);
        assert_eq!(doc.rows_count(), 0);
    }

    #[test]
    fn test_duplicate_header_fails() {
        let result = reader(CsvOptions::default()).parse_str("Name,Name\na,b");
        assert!(matches!(
            result,
            Err(CsvError::Core(tessera_core::Error::DuplicateHeader(_)))
        ));
    }

    #[test]
    fn test_invalid_options_rejected_before_parsing() {
        let result = CsvReader::new(CsvOptions::default().with_line_break(","));
        assert!(matches!(result, Err(CsvError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_read_from_stream() {
        let bytes = "Name,Height\nMario,1.76".as_bytes();
        let doc = reader(CsvOptions::default()).read(bytes).unwrap();
        assert_eq!(doc.cell_named(0, "Name").unwrap().string_value(), "Mario");
    }
}
