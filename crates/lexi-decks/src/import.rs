use anyhow::{Context, Result};
use serde::Deserialize;

use crate::WordEntry;

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    example: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordlistDocument {
    Wrapped { entries: Vec<RawEntry> },
    List(Vec<RawEntry>),
}

/// Parse an imported wordlist. `.json` files may be a plain array or a
/// `{entries: [...]}` document; anything else is treated as CSV rows of
/// `word,meaning,example` with an optional header. Rows without a word or
/// meaning are dropped, not errors.
pub fn parse_wordlist(file_name: &str, text: &str) -> Result<Vec<WordEntry>> {
    if file_name.to_lowercase().ends_with(".json") {
        parse_json(text)
    } else {
        parse_csv(text)
    }
}

fn parse_json(text: &str) -> Result<Vec<WordEntry>> {
    let document: WordlistDocument =
        serde_json::from_str(text).context("Failed to parse wordlist JSON")?;
    let raw = match document {
        WordlistDocument::Wrapped { entries } => entries,
        WordlistDocument::List(entries) => entries,
    };
    Ok(raw.into_iter().filter_map(keep_complete).collect())
}

fn parse_csv(text: &str) -> Result<Vec<WordEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.trim().as_bytes());

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.context("Failed to parse wordlist CSV")?;

        // optional header row, matched case-insensitively on "word"
        if index == 0 {
            let first = record.get(0).unwrap_or_default();
            if first.to_lowercase().contains("word") {
                continue;
            }
        }

        let entry = RawEntry {
            word: record.get(0).map(str::to_string),
            meaning: record.get(1).map(str::to_string),
            example: record.get(2).map(str::to_string),
        };
        if let Some(entry) = keep_complete(entry) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn keep_complete(raw: RawEntry) -> Option<WordEntry> {
    let word = raw.word?.trim().to_string();
    let meaning = raw.meaning?.trim().to_string();
    if word.is_empty() || meaning.is_empty() {
        return None;
    }
    let example = raw
        .example
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    Some(WordEntry {
        word,
        meaning,
        example,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array_and_wrapped_forms() {
        let array = r#"[{"word":"apple","meaning":"fruit","example":"an apple a day"}]"#;
        let entries = parse_wordlist("list.json", array).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "apple");
        assert_eq!(entries[0].example.as_deref(), Some("an apple a day"));

        let wrapped = r#"{"entries":[{"word":"pear","meaning":"fruit"}]}"#;
        let entries = parse_wordlist("list.json", wrapped).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "pear");
        assert!(entries[0].example.is_none());
    }

    #[test]
    fn json_rows_missing_fields_are_dropped() {
        let text = r#"[{"word":"apple","meaning":"fruit"},{"word":"orphan"},{"meaning":"no word"}]"#;
        let entries = parse_wordlist("list.json", text).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn csv_with_header() {
        let text = "Word,Meaning,Example\napple,fruit,an apple a day\npear,fruit,";
        let entries = parse_wordlist("list.csv", text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word, "apple");
        assert!(entries[1].example.is_none());
    }

    #[test]
    fn csv_without_header() {
        let text = "apple,fruit\npear,fruit";
        let entries = parse_wordlist("list.csv", text).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn csv_short_rows_are_dropped() {
        let text = "apple,fruit\nlonely";
        let entries = parse_wordlist("list.csv", text).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_wordlist("broken.json", "{not json").is_err());
    }
}
