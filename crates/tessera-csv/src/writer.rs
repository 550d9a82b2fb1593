//! CSV writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tessera_core::Document;

use crate::error::CsvResult;
use crate::options::CsvOptions;

/// Delimited-text writer
#[derive(Debug, Clone)]
pub struct CsvWriter {
    options: CsvOptions,
}

impl CsvWriter {
    /// Build a writer, rejecting invalid options up front
    pub fn new(options: CsvOptions) -> CsvResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Write a document to a CSV file
    pub fn write_file<P: AsRef<Path>>(&self, doc: &Document, path: P) -> CsvResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(doc, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a document to a byte stream
    pub fn write<W: Write>(&self, doc: &Document, mut writer: W) -> CsvResult<()> {
        writer.write_all(self.write_string(doc).as_bytes())?;
        Ok(())
    }

    /// Serialize a document.
    ///
    /// Lines are joined by the line break with none after the last one. The
    /// header line is emitted only when enabled and at least one column has a
    /// header.
    pub fn write_string(&self, doc: &Document) -> String {
        let mut lines = Vec::with_capacity(doc.rows_count() + 1);

        if self.options.write_header && doc.has_headers() {
            lines.push(self.format_line(doc.columns().map(|c| c.header())));
        }
        for row in doc.rows() {
            lines.push(self.format_line(row.cells().map(|c| c.string_value())));
        }

        log::debug!(
            "serialized {} rows x {} columns into {} lines",
            doc.rows_count(),
            doc.columns_count(),
            lines.len()
        );
        lines.join(&self.options.line_break)
    }

    fn format_line<'a, I>(&self, fields: I) -> String
    where
        I: Iterator<Item = &'a str>,
    {
        let fields: Vec<String> = fields.map(|f| self.format_field(f)).collect();
        fields.join(&self.options.separator)
    }

    /// Double every escape character, then quote the field if it could be
    /// read back as more than one field
    fn format_field(&self, value: &str) -> String {
        let escape = self.options.escape_character;
        let mut field = String::with_capacity(value.len() + 2);
        for ch in value.chars() {
            field.push(ch);
            if ch == escape {
                field.push(escape);
            }
        }

        if self.needs_quotes(value) {
            field.insert(0, escape);
            field.push(escape);
        }
        field
    }

    /// Whether a delimiter starts inside the value, either on its own or
    /// completed by the delimiter written after it
    fn needs_quotes(&self, value: &str) -> bool {
        let delimiters = [
            self.options.separator.as_str(),
            self.options.line_break.as_str(),
        ];
        delimiters.iter().any(|next| {
            let text = format!("{value}{next}");
            delimiters
                .iter()
                .any(|d| text.find(d).map_or(false, |at| at < value.len()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::CsvReader;
    use pretty_assertions::assert_eq;

    fn people() -> Document {
        let mut doc = Document::new();
        doc.create_column(Some("Name")).unwrap();
        doc.create_column(Some("LastName")).unwrap();
        doc.append_record(["Mario", "Rossi,Jr"]).unwrap();
        doc.append_record(["John", "Doe"]).unwrap();
        doc
    }

    fn writer(options: CsvOptions) -> CsvWriter {
        CsvWriter::new(options).unwrap()
    }

    #[test]
    fn test_write_with_header() {
        let text = writer(CsvOptions::default()).write_string(&people());
        assert_eq!(text, "Name,LastName\nMario,\"Rossi,Jr\"\nJohn,Doe");
    }

    #[test]
    fn test_write_without_header() {
        let options = CsvOptions::default().with_write_header(false);
        let text = writer(options).write_string(&people());
        assert_eq!(text, "Mario,\"Rossi,Jr\"\nJohn,Doe");
    }

    #[test]
    fn test_header_line_needs_a_named_column() {
        let mut doc = Document::new();
        doc.append_record(["a", "b"]).unwrap();
        let text = writer(CsvOptions::default()).write_string(&doc);
        assert_eq!(text, "a,b");
    }

    #[test]
    fn test_escape_character_is_doubled() {
        let mut doc = Document::new();
        doc.append_record(["say \"hi\"", "line\nbreak", "plain"]).unwrap();
        let text = writer(CsvOptions::default()).write_string(&doc);
        assert_eq!(text, "say \"\"hi\"\",\"line\nbreak\",plain");
    }

    #[test]
    fn test_custom_delimiters() {
        let options = CsvOptions::default()
            .with_separator("||")
            .with_line_break("\r\n")
            .with_escape_character('\'');
        let text = writer(options).write_string(&people());
        assert_eq!(text, "Name||LastName\r\nMario||Rossi,Jr\r\nJohn||Doe");
    }

    #[test]
    fn test_value_completing_a_delimiter_is_quoted() {
        let options = CsvOptions::default()
            .with_separator(";;")
            .with_line_break("|\n");
        let mut doc = Document::new();
        doc.append_record(["a;", "b|", "c;d"]).unwrap();

        let text = writer(options.clone()).write_string(&doc);
        assert_eq!(text, "\"a;\";;b|;;c;d");

        let parsed = CsvReader::new(options.with_first_line_as_headers(false))
            .unwrap()
            .parse_str(&text)
            .unwrap();
        assert_eq!(parsed.row_at(0).unwrap().values(), vec!["a;", "b|", "c;d"]);
    }

    #[test]
    fn test_empty_document() {
        let text = writer(CsvOptions::default()).write_string(&Document::new());
        assert_eq!(text, "");
    }

    #[test]
    fn test_written_text_reads_back() {
        let mut doc = people();
        doc.append_record(["a \"quoted\" name", "x,y\nz"]).unwrap();
        let options = CsvOptions::default().with_separator(";");

        let text = writer(options.clone()).write_string(&doc);
        let parsed = CsvReader::new(options).unwrap().parse_str(&text).unwrap();

        assert_eq!(parsed.column_headers(), doc.column_headers());
        let expected: Vec<_> = doc.rows().map(|r| r.values()).collect();
        let actual: Vec<_> = parsed.rows().map(|r| r.values()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");

        writer(CsvOptions::default()).write_file(&people(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Name,LastName\nMario,\"Rossi,Jr\"\nJohn,Doe");

        let doc = CsvReader::new(CsvOptions::default())
            .unwrap()
            .read_file(&path)
            .unwrap();
        assert_eq!(doc.rows_count(), 2);
    }
}
