/*!
 * Tests for CSV reading, delimiter detection and rendering
 */

use std::path::Path;

use csvtrad::csv_utils::{CsvDocument, CsvFile};
use csvtrad::errors::CsvError;

use crate::common;

fn document(header: &[&str], data: &[&str]) -> CsvDocument {
    CsvDocument {
        header: header.iter().map(|s| s.to_string()).collect(),
        data: data.iter().map(|s| s.to_string()).collect(),
        delimiter: b',',
    }
}

#[test]
fn test_parse_withEachDelimiter_shouldDetectIt() {
    for (content, delimiter) in [
        ("a,b,c\n1,2,3\n", b','),
        ("a;b;c\n1;2;3\n", b';'),
        ("a\tb\tc\n1\t2\t3\n", b'\t'),
        ("a|b|c\n1|2|3\n", b'|'),
    ] {
        let doc = CsvFile::parse(content).unwrap();
        assert_eq!(doc.delimiter, delimiter);
        assert_eq!(doc.header, vec!["a", "b", "c"]);
        assert_eq!(doc.data, vec!["1", "2", "3"]);
    }
}

#[test]
fn test_parse_withQuotedFields_shouldKeepEmbeddedDelimiters() {
    let doc = CsvFile::parse("nome,descricao\n\"Café, pão\",\"Diz \"\"olá\"\"\"\n").unwrap();
    assert_eq!(doc.data, vec!["Café, pão", "Diz \"olá\""]);
}

#[test]
fn test_parse_withByteOrderMark_shouldStripIt() {
    let doc = CsvFile::parse("\u{feff}nome,preco\nPão,1\n").unwrap();
    assert_eq!(doc.header[0], "nome");
}

#[test]
fn test_parse_withHeaderOnly_shouldFail() {
    assert!(matches!(CsvFile::parse("a,b\n"), Err(CsvError::NotEnoughRows { found: 1 })));
    assert!(matches!(CsvFile::parse(""), Err(CsvError::NotEnoughRows { found: 0 })));
}

#[test]
fn test_parse_withShortDataRow_shouldAcceptIt() {
    let doc = CsvFile::parse("a,b,c\nx\nignored,row,here\n").unwrap();
    assert_eq!(doc.data, vec!["x"]);
}

#[test]
fn test_render_withMinimalQuoting_shouldQuoteOnlyWhenNeeded() {
    let doc = document(&["a", "b"], &["x, y", "z"]);
    let rendered = CsvFile::render(&doc, &["p".to_string(), "q".to_string()], false).unwrap();
    assert_eq!(rendered, "a,b\n\"x, y\",z\np,q\n");
}

#[test]
fn test_render_withQuoteAll_shouldQuoteEveryField() {
    let doc = document(&["a"], &["x"]);
    let rendered = CsvFile::render(&doc, &["y".to_string()], true).unwrap();
    assert_eq!(rendered, "\"a\"\n\"x\"\n\"y\"\n");
}

#[test]
fn test_render_shouldKeepSourceDelimiter() {
    let mut doc = document(&["a", "b"], &["1,5", "2"]);
    doc.delimiter = b';';
    let rendered = CsvFile::render(&doc, &["1,5".to_string(), "2".to_string()], false).unwrap();
    assert_eq!(rendered, "a;b\n1,5;2\n1,5;2\n");
}

#[test]
fn test_outputPath_shouldAppendTargetLanguage() {
    let output = CsvFile::output_path("/data/produtos.csv", "en");
    assert_eq!(output, Path::new("/data/produtos_translated_en.csv"));
}

#[test]
fn test_writeAndRead_shouldProduceThreeRows() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_csv(dir.path(), "produtos.csv").unwrap();
    let doc = CsvFile::read(&input).unwrap();
    assert_eq!(doc.header.len(), 4);

    let output = dir.path().join("nested").join("out.csv");
    let translated: Vec<String> = doc.data.iter().map(|f| f.to_uppercase()).collect();
    CsvFile::write(&output, &doc, &translated, false).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "nome,descricao,preco,contato");
    assert!(lines[2].starts_with("RESTAURANTE,COMIDA BOA"));
}

#[test]
fn test_read_withMissingFile_shouldReturnIoError() {
    assert!(matches!(CsvFile::read("/definitely/not/here.csv"), Err(CsvError::Io(_))));
}
