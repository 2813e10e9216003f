//! Parser for flat knowledge documents: blocks separated by `---` lines, each
//! block made of `key: value` header lines, a blank line, then body text.
//!
//! Parsing is total. Malformed input degrades to records with empty fields,
//! type `unknown` and the raw text as body.

use std::collections::BTreeMap;

use super::{infer_identity, normalize_key, SEPARATOR};
use crate::models::KnowledgeRecord;

/// Parse a whole document into records, in document order.
pub fn parse_records(text: &str) -> Vec<KnowledgeRecord> {
    split_blocks(text)
        .into_iter()
        .map(|lines| parse_block(&lines))
        .collect()
}

/// Split on separator lines (`---` at the start of the line, trailing
/// whitespace allowed) and drop blocks that are blank. Leading and
/// trailing blank lines are trimmed from every block.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim_end() == SEPARATOR {
            push_block(&mut blocks, std::mem::take(&mut current));
        } else {
            current.push(line);
        }
    }
    push_block(&mut blocks, current);

    blocks
}

fn push_block<'a>(blocks: &mut Vec<Vec<&'a str>>, lines: Vec<&'a str>) {
    let is_blank = |l: &&str| l.trim().is_empty();
    let Some(start) = lines.iter().position(|l| !is_blank(l)) else {
        return;
    };
    // `start` exists, so a last non-blank line does too
    let end = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(start);
    blocks.push(lines[start..=end].to_vec());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    InHeader,
    InBody,
}

fn parse_block(lines: &[&str]) -> KnowledgeRecord {
    let mut fields = BTreeMap::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut state = ScanState::InHeader;

    for &line in lines {
        match state {
            ScanState::InHeader => {
                if line.trim().is_empty() {
                    // Boundary blank line is consumed
                    state = ScanState::InBody;
                } else if let Some((key, value)) = parse_header_line(line) {
                    fields.insert(key, value);
                } else {
                    state = ScanState::InBody;
                    body_lines.push(line);
                }
            }
            ScanState::InBody => body_lines.push(line),
        }
    }

    let (record_id, record_type) = infer_identity(&fields);

    KnowledgeRecord {
        record_id,
        record_type,
        fields,
        body: body_lines.join("\n").trim().to_string(),
    }
}

/// `key: value` with a non-empty key before the first colon.
fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_value) = line.split_once(':')?;
    let key = normalize_key(raw_key);
    if key.is_empty() {
        return None;
    }
    Some((key, raw_value.trim().to_string()))
}
