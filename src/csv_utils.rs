use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::CsvError;

// @module: CSV input and output for single-row translation files

// Delimiters tried by the sniffer, in order of preference on ties
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

// @struct: Header and first data row of a CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDocument {
    pub header: Vec<String>,
    pub data: Vec<String>,
    pub delimiter: u8,
}

// @struct: CSV helpers
pub struct CsvFile;

impl CsvFile {
    // @detects: Field delimiter from the first lines of a sample
    // @returns: The candidate with a consistent, highest count; `,` otherwise
    pub fn sniff_delimiter(sample: &str) -> u8 {
        let lines: Vec<&str> = sample.lines().filter(|l| !l.trim().is_empty()).take(2).collect();
        let Some(first) = lines.first() else {
            return b',';
        };

        let mut best = (b',', 0usize, false);
        for &candidate in &CANDIDATE_DELIMITERS {
            let count = count_unquoted(first, candidate);
            if count == 0 {
                continue;
            }
            let consistent = lines.get(1).is_none_or(|second| count_unquoted(second, candidate) == count);
            let better = match (consistent, best.2) {
                (true, false) => true,
                (false, true) => false,
                _ => count > best.1,
            };
            if better {
                best = (candidate, count, consistent);
            }
        }

        best.0
    }

    // @parses: CSV text into header and data row
    pub fn parse(content: &str) -> Result<CsvDocument, CsvError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let delimiter = Self::sniff_delimiter(content);
        debug!("Detected CSV delimiter {:?}", delimiter as char);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(content.as_bytes());

        let mut rows: Vec<StringRecord> = Vec::with_capacity(2);
        for record in reader.records() {
            rows.push(record?);
            if rows.len() == 2 {
                break;
            }
        }

        if rows.len() < 2 {
            return Err(CsvError::NotEnoughRows { found: rows.len() });
        }

        let to_fields = |record: &StringRecord| record.iter().map(str::to_string).collect();
        Ok(CsvDocument {
            header: to_fields(&rows[0]),
            data: to_fields(&rows[1]),
            delimiter,
        })
    }

    // @reads: CSV file from disk
    pub fn read<P: AsRef<Path>>(path: P) -> Result<CsvDocument, CsvError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    // @renders: Header, original data row and translated row
    pub fn render(document: &CsvDocument, translated: &[String], quote_all: bool) -> Result<String, CsvError> {
        let mut writer = WriterBuilder::new()
            .delimiter(document.delimiter)
            .flexible(true)
            .quote_style(if quote_all { QuoteStyle::Always } else { QuoteStyle::Necessary })
            .from_writer(Vec::new());

        writer.write_record(&document.header)?;
        writer.write_record(&document.data)?;
        writer.write_record(translated)?;

        let bytes = writer
            .into_inner()
            .map_err(|e| CsvError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| CsvError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    // @writes: Translated CSV file
    pub fn write<P: AsRef<Path>>(
        path: P,
        document: &CsvDocument,
        translated: &[String],
        quote_all: bool,
    ) -> Result<(), CsvError> {
        let rendered = Self::render(document, translated, quote_all)?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, rendered)?;
        Ok(())
    }

    // @generates: `<stem>_translated_<target>.csv` next to the input
    pub fn output_path<P: AsRef<Path>>(input: P, target_language: &str) -> PathBuf {
        let input = input.as_ref();
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        input.with_file_name(format!("{}_translated_{}.csv", stem, target_language))
    }
}

// Occurrences of a delimiter outside double-quoted sections
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
