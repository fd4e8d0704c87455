use anyhow::{anyhow, bail, Result};

use crate::model::draft::RecordDraft;

pub const DRAFT_KEYS: [&str; 3] = ["start", "end", "leads"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub positional: Vec<String>,
    /// `key:value` pairs in the order they were given.
    pub fields: Vec<(String, String)>,
}

/// Splits `key:value` tokens from bare words.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut positional = Vec::new();
    let mut fields = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                fields.push((key.to_string(), value.to_string()));
                continue;
            }
        }
        positional.push(arg.clone());
    }

    ParsedInput { positional, fields }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds a form draft from `start:… end:… leads:…` arguments.
///
/// Missing keys become empty inputs so that draft validation reports them.
/// A key given twice, under any prefix, is an error.
pub fn parse_draft(args: &[String]) -> Result<RecordDraft> {
    let parsed = parse_args(args);
    if let Some(word) = parsed.positional.first() {
        bail!("Unexpected argument '{}'; use key:value (keys: {})", word, DRAFT_KEYS.join(", "));
    }

    let mut draft = RecordDraft::default();
    let mut seen: Vec<String> = Vec::new();
    for (key, value) in parsed.fields {
        let full_key = expand_key(&key, &DRAFT_KEYS)?;
        if seen.contains(&full_key) {
            bail!("'{}' given more than once", full_key);
        }
        match full_key.as_str() {
            "start" => draft.start_date = value,
            "end" => draft.end_date = value,
            _ => draft.lead_count = value,
        }
        seen.push(full_key);
    }
    Ok(draft)
}
