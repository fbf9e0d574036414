use std::ops::Range;

use anyhow::{Context, Result};
use regex::Regex;

const MARKER: &str = "**";

pub struct KeywordEmphasizer {
    keywords: Vec<String>,
    marker_run: Regex,
}

impl KeywordEmphasizer {
    pub fn new(keywords: &[String]) -> Result<Self> {
        let mut keywords = keywords
            .iter()
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect::<Vec<String>>();
        // Longer keywords claim their spans before any keyword they contain.
        keywords.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keywords.dedup();

        Ok(Self {
            keywords,
            marker_run: Regex::new(r"\*{3,}").context("failed to compile marker run regex")?,
        })
    }

    pub fn emphasize(&self, text: &str) -> String {
        let mut output = text.to_string();
        for keyword in &self.keywords {
            if output.contains(keyword.as_str()) {
                output = self.wrap_bare_occurrences(&output, keyword);
            }
        }
        output
    }

    /// Collapses `***`, `****`, ... into a single `**` marker.
    pub fn repair_marker_runs(&self, text: &str) -> String {
        self.marker_run.replace_all(text, MARKER).into_owned()
    }

    fn wrap_bare_occurrences(&self, text: &str, keyword: &str) -> String {
        let wrapped = self.wrapped_occurrences(text);

        let mut output = String::with_capacity(text.len() + 2 * MARKER.len());
        let mut cursor = 0;

        for (start, matched) in text.match_indices(keyword) {
            let end = start + matched.len();
            if wrapped
                .iter()
                .any(|span| start < span.end && span.start < end)
            {
                continue;
            }

            output.push_str(&text[cursor..start]);
            output.push_str(MARKER);
            output.push_str(matched);
            output.push_str(MARKER);
            cursor = end;
        }

        output.push_str(&text[cursor..]);
        output
    }

    /// Keyword occurrences sitting directly between two markers, e.g. `**keyword**`.
    fn wrapped_occurrences(&self, text: &str) -> Vec<Range<usize>> {
        self.keywords
            .iter()
            .flat_map(move |keyword| {
                text.match_indices(keyword.as_str())
                    .map(|(start, matched)| start..start + matched.len())
            })
            .filter(|span| {
                text[..span.start].ends_with(MARKER) && text[span.end..].starts_with(MARKER)
            })
            .collect()
    }
}
