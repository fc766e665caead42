//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive; the body lives in `word/document.xml`. The
//! streaming parse below emits one line per paragraph and one line per table
//! row (cells tab-separated), preserving document order throughout.

use std::io::{BufReader, Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::ZipArchive;

use super::ExtractError;

pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| corrupt(e.to_string()))?;
    let document = archive
        .by_name("word/document.xml")
        .map_err(|e| corrupt(format!("missing word/document.xml: {e}")))?;
    parse_document_xml(document)
}

fn corrupt(reason: String) -> ExtractError {
    ExtractError::Corrupt {
        format: "DOCX",
        reason,
    }
}

fn parse_document_xml<R: Read>(source: R) -> Result<String, ExtractError> {
    // No trim_text here: spaces inside <w:t> runs are significant, and the
    // in_text gate already drops inter-element whitespace.
    let mut reader = Reader::from_reader(BufReader::new(source));

    let mut buf = Vec::with_capacity(1024);
    let mut lines: Vec<String> = Vec::new();

    let mut in_text = false;
    let mut in_cell = false;
    let mut paragraph = String::new();
    let mut cell = String::new();
    let mut row_cells: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" => paragraph.clear(),
                b"t" => in_text = true,
                b"tab" => paragraph.push('\t'),
                b"br" | b"cr" => paragraph.push('\n'),
                b"tr" => row_cells.clear(),
                b"tc" => {
                    in_cell = true;
                    cell.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    if let Ok(text) = e.unescape() {
                        paragraph.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = paragraph.trim();
                    if in_cell {
                        if !cell.is_empty() && !text.is_empty() {
                            cell.push(' ');
                        }
                        cell.push_str(text);
                    } else if !text.is_empty() {
                        lines.push(text.to_string());
                    }
                    paragraph.clear();
                }
                b"tc" => {
                    row_cells.push(cell.clone());
                    in_cell = false;
                }
                b"tr" => {
                    if row_cells.iter().any(|c| !c.is_empty()) {
                        lines.push(row_cells.join("\t"));
                    }
                    row_cells.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(corrupt(format!("malformed document XML: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(lines.join("\n"))
}
