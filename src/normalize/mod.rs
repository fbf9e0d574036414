use anyhow::{Context, Result};
use regex::Regex;

use crate::config::FormatterConfig;

mod compact;
mod emphasis;
mod merge;
mod segment;

use compact::{ListItem, compact};
use emphasis::KeywordEmphasizer;
use merge::{expand_delimiters, merge_continuations, split_colon_fields};
use segment::tokenize;

pub const LIST_BREAK: &str = "<br>";

pub struct CellNormalizer {
    line_break: Regex,
    line_break_tag: Regex,
    numbered_item: Regex,
    emphasizer: KeywordEmphasizer,
}

impl CellNormalizer {
    pub fn new(config: &FormatterConfig) -> Result<Self> {
        Ok(Self {
            line_break: Regex::new(r"(?i)<br\s*/?>|\r?\n")
                .context("failed to compile cell line-break regex")?,
            line_break_tag: Regex::new(r"(?i)<br\s*/?>")
                .context("failed to compile line-break tag regex")?,
            numbered_item: Regex::new(r"^\s*\d+\.")
                .context("failed to compile numbered item regex")?,
            emphasizer: KeywordEmphasizer::new(&config.emphasis_keywords)?,
        })
    }

    pub fn emphasizer(&self) -> &KeywordEmphasizer {
        &self.emphasizer
    }

    /// Target cells become a `<br>`-joined ordered list; every cell gets keyword emphasis.
    pub fn normalize_cell(&self, text: &str, is_target: bool) -> String {
        let raw = text.trim();
        if raw.is_empty() {
            return String::new();
        }

        if is_target {
            let items = self.list_items(raw);
            if !items.is_empty() {
                let joined = items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<String>>()
                    .join(LIST_BREAK);
                return self.emphasizer.emphasize(&joined);
            }
        }

        let normalized = self.line_break_tag.replace_all(raw, LIST_BREAK);
        self.emphasizer.emphasize(&normalized)
    }

    pub fn list_items(&self, text: &str) -> Vec<ListItem> {
        let parts = tokenize(text, &self.line_break);
        let pieces = merge_continuations(parts);
        let segments = expand_delimiters(pieces, &self.numbered_item);
        let segments = split_colon_fields(segments, &self.numbered_item);
        compact(&segments)
    }
}
