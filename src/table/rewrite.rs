use std::collections::BTreeSet;

use anyhow::Result;
use tracing::debug;

use super::scan::{Block, TableBlock, TableScanner};
use crate::config::FormatterConfig;
use crate::normalize::CellNormalizer;

const CENTERED: &str = ":---:";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    pub tables: usize,
    pub rows: usize,
    pub target_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub text: String,
    pub stats: RewriteStats,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableSurvey {
    pub tables: usize,
    pub target_columns: usize,
}

pub struct TableRewriter {
    config: FormatterConfig,
    normalizer: CellNormalizer,
    scanner: TableScanner,
}

impl TableRewriter {
    pub fn new(config: &FormatterConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            normalizer: CellNormalizer::new(config)?,
            scanner: TableScanner::new()?,
        })
    }

    pub fn rewrite(&self, text: &str) -> RewriteOutput {
        let mut lines = Vec::<String>::new();
        let mut stats = RewriteStats::default();

        for block in self.scanner.scan(text) {
            match block {
                Block::Text(line) => lines.push(self.normalizer.emphasizer().emphasize(line)),
                Block::Table(table) => self.rewrite_table(&table, &mut lines, &mut stats),
            }
        }

        let mut output = lines.join("\n");
        if text.ends_with('\n') {
            output.push('\n');
        }

        RewriteOutput {
            text: output,
            stats,
        }
    }

    pub fn repair_emphasis(&self, text: &str) -> String {
        self.normalizer.emphasizer().repair_marker_runs(text)
    }

    pub fn survey(&self, text: &str) -> TableSurvey {
        let mut survey = TableSurvey::default();
        for block in self.scanner.scan(text) {
            if let Block::Table(table) = block {
                survey.tables += 1;
                survey.target_columns += self.target_columns(&table).len();
            }
        }
        survey
    }

    pub fn target_columns(&self, table: &TableBlock) -> BTreeSet<usize> {
        table
            .header
            .iter()
            .enumerate()
            .filter(|(_, name)| self.config.is_target_header(strip_emphasis(name)))
            .map(|(column, _)| column)
            .collect()
    }

    fn rewrite_table(&self, table: &TableBlock, lines: &mut Vec<String>, stats: &mut RewriteStats) {
        let column_count = table.column_count();
        let targets = self.target_columns(table);

        debug!(
            columns = column_count,
            target_columns = ?targets,
            rows = table.rows.len(),
            "rewriting table block"
        );

        lines.push(header_row(&table.header));
        lines.push(separator_row(column_count));

        for row in &table.rows {
            let cells = row
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    let normalized = self
                        .normalizer
                        .normalize_cell(cell, targets.contains(&column));
                    self.normalizer.emphasizer().emphasize(&normalized)
                })
                .collect::<Vec<String>>();

            lines.push(data_row(&cells));
            stats.rows += 1;
            stats.target_cells += targets.len();
        }

        stats.tables += 1;
    }
}

pub fn strip_emphasis(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.chars().all(|value| value == '*') {
        return "";
    }
    trimmed
        .strip_prefix("**")
        .and_then(|rest| rest.strip_suffix("**"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn header_row(header: &[String]) -> String {
    let cells = header
        .iter()
        .map(|name| strip_emphasis(name))
        .map(|name| {
            if name.is_empty() {
                String::new()
            } else {
                format!("**{name}**")
            }
        })
        .collect::<Vec<String>>();
    format!("| {} |", cells.join(" | "))
}

fn separator_row(column_count: usize) -> String {
    format!("| {} |", vec![CENTERED; column_count].join(" | "))
}

fn data_row(cells: &[String]) -> String {
    let padded = cells
        .iter()
        .map(|cell| format!(" {cell} "))
        .collect::<Vec<String>>();
    format!("|{}|", padded.join("|"))
}
