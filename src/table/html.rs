use anyhow::{Context, Result};
use html_escape::encode_text;
use regex::Regex;

use super::scan::{Block, TableBlock, TableScanner};
use crate::normalize::LIST_BREAK;

const MIN_COLUMN_CH: usize = 14;
const MAX_COLUMN_CH: usize = 120;
const COLUMN_PADDING_CH: usize = 8;

const STYLESHEET: &str = r#"<style>
  body { font-family: "Segoe UI", Tahoma, Arial, "Microsoft Yahei", sans-serif; color: #222; }
  table { border-collapse: separate; border-spacing: 0; width: 100%; table-layout: fixed; margin-bottom: 1.5em; }
  th, td { border: 1px solid #999; padding: 10px 12px; vertical-align: top; text-align: left; box-sizing: border-box; }
  th { text-align: center; font-weight: 700; background: #f3f6fb; color: #111; }
  tbody tr:nth-child(even) td { background: #fbfbfb; }
  td { white-space: normal; word-break: break-word; }
  ol.inline-list { margin: 0; padding-left: 1.2em; white-space: nowrap; display: inline-block; }
  ol.inline-list li { display: inline; margin-right: 0.8em; }
</style>"#;

pub struct HtmlRenderer {
    scanner: TableScanner,
    numbered_prefix: Regex,
    strong: Regex,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            scanner: TableScanner::new()?,
            numbered_prefix: Regex::new(r"^\s*\d+\.\s*")
                .context("failed to compile numbered prefix regex")?,
            strong: Regex::new(r"\*\*(.+?)\*\*").context("failed to compile strong span regex")?,
        })
    }

    pub fn render(&self, markdown: &str, title: &str) -> String {
        let mut out = vec![
            "<!doctype html>".to_string(),
            "<html>".to_string(),
            "<head>".to_string(),
            "<meta charset=\"utf-8\"/>".to_string(),
            format!("<title>{}</title>", encode_text(title)),
            STYLESHEET.to_string(),
            "</head>".to_string(),
            "<body>".to_string(),
        ];

        for block in self.scanner.scan(markdown) {
            match block {
                Block::Text(line) if line.trim().is_empty() => {}
                Block::Text(line) => out.push(format!("<p>{}</p>", self.inline(line.trim()))),
                Block::Table(table) => self.render_table(&table, &mut out),
            }
        }

        out.push("</body>".to_string());
        out.push("</html>".to_string());
        out.join("\n") + "\n"
    }

    fn render_table(&self, table: &TableBlock, out: &mut Vec<String>) {
        out.push("<table>".to_string());

        let cols = column_widths(table)
            .into_iter()
            .map(|width| format!("<col style=\"width:{width}ch\"/>"))
            .collect::<String>();
        out.push(format!("<colgroup>{cols}</colgroup>"));

        let headers = table
            .header
            .iter()
            .map(|name| format!("<th>{}</th>", encode_text(&name.replace("**", ""))))
            .collect::<String>();
        out.push(format!("<thead><tr>{headers}</tr></thead>"));

        out.push("<tbody>".to_string());
        for row in &table.rows {
            let cells = row
                .iter()
                .map(|cell| format!("<td>{}</td>", self.render_cell(cell)))
                .collect::<String>();
            out.push(format!("<tr>{cells}</tr>"));
        }
        out.push("</tbody>".to_string());
        out.push("</table>".to_string());
    }

    fn render_cell(&self, cell: &str) -> String {
        let lines = cell.replace(LIST_BREAK, "\n");
        let parts = lines
            .lines()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<&str>>();

        if !parts.is_empty() && parts.iter().all(|part| self.numbered_prefix.is_match(part)) {
            let items = parts
                .iter()
                .map(|part| {
                    let content = self.numbered_prefix.replace(part, "");
                    format!("<li>{}</li>", self.inline(&content))
                })
                .collect::<String>();
            return format!("<ol class=\"inline-list\">{items}</ol>");
        }

        self.inline(&lines).replace('\n', "<br>")
    }

    fn inline(&self, text: &str) -> String {
        let escaped = encode_text(text);
        self.strong
            .replace_all(&escaped, "<strong>$1</strong>")
            .into_owned()
    }
}

pub fn column_widths(table: &TableBlock) -> Vec<usize> {
    let mut longest = vec![0_usize; table.column_count()];
    for row in &table.rows {
        for (column, cell) in row.iter().enumerate() {
            if let Some(current) = longest.get_mut(column) {
                *current = (*current).max(measured_length(cell));
            }
        }
    }
    longest.into_iter().map(column_width_ch).collect()
}

pub fn column_width_ch(longest: usize) -> usize {
    (longest + COLUMN_PADDING_CH).clamp(MIN_COLUMN_CH, MAX_COLUMN_CH)
}

// Longest `<br>`-separated item, emphasis markers excluded.
fn measured_length(cell: &str) -> usize {
    cell.split(LIST_BREAK)
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.replace("**", "").chars().count())
        .max()
        .unwrap_or(0)
}
