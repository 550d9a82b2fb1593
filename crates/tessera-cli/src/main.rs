//! Tessera CLI - delimited-text conversion and inspection tool

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tessera::prelude::*;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "Delimited-text conversion and inspection tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Dialect of the input file
#[derive(Args)]
struct InputDialect {
    /// Field separator of the input (may be several characters)
    #[arg(short, long, default_value = ",")]
    separator: String,

    /// Line break of the input (escapes like \n and \r are understood)
    #[arg(long, default_value = "\\n")]
    line_break: String,

    /// Quote character of the input
    #[arg(long, default_value_t = '"')]
    escape: char,

    /// Treat the first line as data instead of column headers
    #[arg(long)]
    no_headers: bool,
}

impl InputDialect {
    fn options(&self) -> CsvOptions {
        CsvOptions::default()
            .with_separator(unescape(&self.separator))
            .with_line_break(unescape(&self.line_break))
            .with_escape_character(self.escape)
            .with_first_line_as_headers(!self.no_headers)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Re-delimit a file and write it to stdout or a file
    Convert {
        /// Input file ("-" for stdin)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        dialect: InputDialect,

        /// Field separator of the output (default: same as input)
        #[arg(long)]
        to_separator: Option<String>,

        /// Line break of the output (default: same as input)
        #[arg(long)]
        to_line_break: Option<String>,

        /// Omit the header line from the output
        #[arg(long)]
        skip_header: bool,
    },

    /// Show the size and headers of a file
    Info {
        /// Input file ("-" for stdin)
        input: PathBuf,

        #[command(flatten)]
        dialect: InputDialect,
    },

    /// List the column headers of a file
    Headers {
        /// Input file ("-" for stdin)
        input: PathBuf,

        #[command(flatten)]
        dialect: InputDialect,
    },

    /// Print one cell
    Get {
        /// Input file ("-" for stdin)
        input: PathBuf,

        /// Row index (0-based, not counting the header line)
        row: usize,

        /// Column index (0-based) or header
        column: String,

        #[command(flatten)]
        dialect: InputDialect,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            dialect,
            to_separator,
            to_line_break,
            skip_header,
        } => {
            let mut output_options = dialect.options().with_write_header(!skip_header);
            if let Some(separator) = to_separator {
                output_options = output_options.with_separator(unescape(&separator));
            }
            if let Some(line_break) = to_line_break {
                output_options = output_options.with_line_break(unescape(&line_break));
            }
            convert(&input, output.as_deref(), &dialect.options(), &output_options)
        }
        Commands::Info { input, dialect } => show_info(&input, &dialect.options()),
        Commands::Headers { input, dialect } => list_headers(&input, &dialect.options()),
        Commands::Get {
            input,
            row,
            column,
            dialect,
        } => get_cell(&input, row, &column, &dialect.options()),
    }
}

fn load(input: &Path, options: &CsvOptions) -> Result<Document> {
    if input == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return CsvReader::new(options.clone())
            .context("Invalid input dialect")?
            .parse_str(&content)
            .context("Failed to parse stdin");
    }
    Document::open(input, options).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn convert(
    input: &Path,
    output: Option<&Path>,
    input_options: &CsvOptions,
    output_options: &CsvOptions,
) -> Result<()> {
    let doc = load(input, input_options)?;

    if let Some(output_path) = output {
        doc.save(output_path, output_options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote {} rows to '{}'", doc.rows_count(), output_path.display());
    } else {
        let text = doc.dump(output_options).context("Invalid output dialect")?;
        let mut stdout = io::stdout();
        stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.write_all(output_options.line_break.as_bytes()))
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn show_info(input: &Path, options: &CsvOptions) -> Result<()> {
    let doc = load(input, options)?;

    println!("File: {}", input.display());
    println!("Size: {} rows x {} columns", doc.rows_count(), doc.columns_count());
    if doc.has_headers() {
        println!("Headers: {}", doc.column_headers().join(", "));
    } else {
        println!("Headers: none");
    }

    Ok(())
}

fn list_headers(input: &Path, options: &CsvOptions) -> Result<()> {
    let doc = load(input, options)?;

    for column in doc.columns() {
        println!("{}\t{}", column.index(), column.header());
    }

    Ok(())
}

fn get_cell(input: &Path, row: usize, column: &str, options: &CsvOptions) -> Result<()> {
    let doc = load(input, options)?;

    let cell = match doc.try_column_named(column) {
        Some(found) => doc.cell_at(row, found.index()),
        None => match column.parse::<usize>() {
            Ok(index) => doc.cell_at(row, index),
            Err(_) => bail!("No column with header or index '{}'", column),
        },
    }
    .with_context(|| format!("No cell at row {}, column '{}'", row, column))?;

    println!("{}", cell.string_value());
    Ok(())
}

/// Expand the \n, \r and \t escapes typed on the command line
fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("\\r\\n"), "\r\n");
        assert_eq!(unescape(";;"), ";;");
        assert_eq!(unescape("\\t|"), "\t|");
        assert_eq!(unescape("a\\"), "a\\");
        assert_eq!(unescape("\\x"), "\\x");
    }

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "tessera",
            "convert",
            "in.csv",
            "--separator",
            ";",
            "--to-separator",
            "\\t",
            "--no-headers",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert {
                dialect,
                to_separator,
                ..
            } => {
                let options = dialect.options();
                assert_eq!(options.separator, ";");
                assert_eq!(options.line_break, "\n");
                assert!(!options.first_line_is_headers);
                assert_eq!(to_separator.as_deref(), Some("\\t"));
            }
            _ => panic!("expected convert"),
        }
    }
}
