use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub header: Vec<String>,
    /// Every row holds exactly `header.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Text(&'a str),
    Table(TableBlock),
}

enum ScanState {
    Scanning,
    InHeader(Vec<String>),
    InSeparator(TableBlock),
    InRow(TableBlock),
}

pub struct TableScanner {
    separator: Regex,
}

impl TableScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            separator: Regex::new(r"^\s*\|(?:\s*:?-+:?\s*\|)+\s*$")
                .context("failed to compile table separator regex")?,
        })
    }

    pub fn is_separator(&self, line: &str) -> bool {
        self.separator.is_match(line)
    }

    pub fn scan<'a>(&self, text: &'a str) -> Vec<Block<'a>> {
        let lines = text.lines().collect::<Vec<&str>>();
        let mut blocks = Vec::<Block<'a>>::new();
        let mut state = ScanState::Scanning;

        for (index, &line) in lines.iter().enumerate() {
            state = match state {
                ScanState::Scanning => {
                    let opens_table = is_row_line(line)
                        && lines
                            .get(index + 1)
                            .is_some_and(|next| self.is_separator(next));
                    if opens_table {
                        ScanState::InHeader(split_table_row(line))
                    } else {
                        blocks.push(Block::Text(line));
                        ScanState::Scanning
                    }
                }
                // The lookahead above guarantees this line is the separator.
                ScanState::InHeader(header) => ScanState::InSeparator(TableBlock {
                    header,
                    rows: Vec::new(),
                }),
                ScanState::InSeparator(mut block) | ScanState::InRow(mut block) => {
                    if is_row_line(line) {
                        let cells = fit_to_columns(split_table_row(line), block.column_count());
                        block.rows.push(cells);
                        ScanState::InRow(block)
                    } else {
                        blocks.push(Block::Table(block));
                        // A line without a leading pipe can never open a table.
                        blocks.push(Block::Text(line));
                        ScanState::Scanning
                    }
                }
            };
        }

        match state {
            ScanState::Scanning => {}
            ScanState::InHeader(header) => blocks.push(Block::Table(TableBlock {
                header,
                rows: Vec::new(),
            })),
            ScanState::InSeparator(block) | ScanState::InRow(block) => {
                blocks.push(Block::Table(block));
            }
        }

        blocks
    }
}

pub fn is_row_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

pub fn split_table_row(row: &str) -> Vec<String> {
    let trimmed = row.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = match inner.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => inner,
    };

    let mut cells = Vec::<String>::new();
    let mut current = String::new();
    let mut escaped = false;

    for value in inner.chars() {
        if value == '|' && !escaped {
            cells.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(value);
        }
        escaped = value == '\\';
    }
    cells.push(current.trim().to_string());

    cells
}

pub fn fit_to_columns(mut cells: Vec<String>, column_count: usize) -> Vec<String> {
    cells.resize(column_count, String::new());
    cells
}
