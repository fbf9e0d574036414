use super::html::{HtmlRenderer, column_width_ch, column_widths};
use super::rewrite::{RewriteStats, TableRewriter, strip_emphasis};
use super::scan::{Block, TableBlock, TableScanner, split_table_row};
use crate::cli::Profile;
use crate::config::FormatterConfig;

const KYLIN_STANDARD: &str = "KYJS-KS-Server-6-SHM-V1.0麒麟系统安全加固标准";

fn rewriter() -> TableRewriter {
    TableRewriter::new(&FormatterConfig::for_profile(Profile::Internet))
        .expect("rewriter should build")
}

fn audit_document() -> String {
    [
        "# 检查结果",
        "| 检查项 | 标准要求 | 当前状态 |",
        "| --- | :-- | --: |",
        "| 账户,口令 | adm,<br>已禁用<br>lp,<br>已禁用 | 密码有效期：PASS_MAX_DAYS：90天 |",
        "| 短行 |",
        "| a | b | c | extra |",
        format!("参照{KYLIN_STANDARD}执行").as_str(),
    ]
    .join("\n")
}

#[test]
fn separator_lines_accept_alignment_variants() {
    let scanner = TableScanner::new().expect("scanner should build");
    assert!(scanner.is_separator("| :---: | --- |"));
    assert!(scanner.is_separator("|---|:--|--:|"));
    assert!(scanner.is_separator("  | - |  "));
    assert!(!scanner.is_separator("| abc |"));
    assert!(!scanner.is_separator("---"));
}

#[test]
fn split_table_row_respects_escaped_pipes() {
    assert_eq!(split_table_row("| a \\| b | c |"), vec!["a \\| b", "c"]);
    assert_eq!(split_table_row("| a | b"), vec!["a", "b"]);
    assert_eq!(split_table_row("|"), vec![""]);
}

#[test]
fn scan_pads_and_truncates_rows_to_header_width() {
    let scanner = TableScanner::new().expect("scanner should build");
    let document = "intro\n| h1 | h2 |\n|---|---|\n| only |\n| x | y | z |\ntail";

    let blocks = scanner.scan(document);

    assert_eq!(
        blocks,
        vec![
            Block::Text("intro"),
            Block::Table(TableBlock {
                header: vec!["h1".to_string(), "h2".to_string()],
                rows: vec![
                    vec!["only".to_string(), String::new()],
                    vec!["x".to_string(), "y".to_string()],
                ],
            }),
            Block::Text("tail"),
        ]
    );
}

#[test]
fn pipe_line_without_separator_is_plain_text() {
    let scanner = TableScanner::new().expect("scanner should build");
    let blocks = scanner.scan("| not | a table |\nbody");
    assert_eq!(
        blocks,
        vec![Block::Text("| not | a table |"), Block::Text("body")]
    );
}

#[test]
fn table_at_end_of_input_without_rows_is_still_a_block() {
    let scanner = TableScanner::new().expect("scanner should build");
    let blocks = scanner.scan("| h |\n| --- |");
    assert_eq!(
        blocks,
        vec![Block::Table(TableBlock {
            header: vec!["h".to_string()],
            rows: Vec::new(),
        })]
    );
}

#[test]
fn rewrite_normalizes_headers_targets_and_text_lines() {
    let output = rewriter().rewrite(&audit_document());

    let expected = [
        "# 检查结果",
        "| **检查项** | **标准要求** | **当前状态** |",
        "| :---: | :---: | :---: |",
        "| 账户,口令 | 1.adm 已禁用<br>2.lp 已禁用 | 1.密码有效期：PASS_MAX_DAYS：90天 |",
        "| 短行 |  |  |",
        "| a | 1.b | 1.c |",
        format!("参照**{KYLIN_STANDARD}**执行").as_str(),
    ]
    .join("\n");

    assert_eq!(output.text, expected);
    assert_eq!(
        output.stats,
        RewriteStats {
            tables: 1,
            rows: 3,
            target_cells: 6,
        }
    );
}

#[test]
fn rewrite_is_idempotent() {
    let rewriter = rewriter();
    let once = rewriter.rewrite(&audit_document()).text;
    let twice = rewriter.rewrite(&once).text;
    assert_eq!(once, twice);
}

#[test]
fn rewrite_keeps_trailing_newline() {
    let output = rewriter().rewrite("text\n| 备注 |\n|---|\n| a;b |\n");
    assert_eq!(
        output.text,
        "text\n| **备注** |\n| :---: |\n| 1.a<br>2.b |\n"
    );
}

#[test]
fn target_headers_match_exactly_after_removing_emphasis() {
    let rewriter = rewriter();
    let table = TableBlock {
        header: vec![
            "**标准要求**".to_string(),
            "标准要求说明".to_string(),
            " 备注 ".to_string(),
        ],
        rows: Vec::new(),
    };

    let targets = rewriter.target_columns(&table);
    assert_eq!(targets.into_iter().collect::<Vec<usize>>(), vec![0, 2]);
    assert_eq!(strip_emphasis("**备注**"), "备注");
    assert_eq!(strip_emphasis("**"), "");
    assert_eq!(strip_emphasis(" **** "), "");
}

#[test]
fn marker_only_header_is_emitted_empty() {
    let rewriter = rewriter();
    let once = rewriter.rewrite("| ** | 备注 |\n|---|---|\n| x | y |").text;

    assert_eq!(once, "|  | **备注** |\n| :---: | :---: |\n| x | 1.y |");
    assert_eq!(rewriter.rewrite(&once).text, once);
}

#[test]
fn survey_counts_tables_and_target_columns() {
    let survey = rewriter().survey(&format!("{}\n\n| 备注 |\n|---|", audit_document()));
    assert_eq!(survey.tables, 2);
    assert_eq!(survey.target_columns, 3);
}

#[test]
fn column_width_is_clamped_with_padding() {
    assert_eq!(column_width_ch(0), 14);
    assert_eq!(column_width_ch(6), 14);
    assert_eq!(column_width_ch(10), 18);
    assert_eq!(column_width_ch(112), 120);
    assert_eq!(column_width_ch(500), 120);
}

#[test]
fn column_widths_measure_longest_item_without_emphasis() {
    let table = TableBlock {
        header: vec!["名称".to_string(), "说明".to_string()],
        rows: vec![vec![
            "**abcdefghij**".to_string(),
            format!("x<br>{}", "y".repeat(20)),
        ]],
    };

    assert_eq!(column_widths(&table), vec![18, 28]);
}

#[test]
fn render_emits_lists_for_numbered_cells_and_text_otherwise() {
    let rewritten = rewriter().rewrite(&audit_document()).text;
    let renderer = HtmlRenderer::new().expect("renderer should build");

    let html = renderer.render(&rewritten, "检查结果");

    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("<title>检查结果</title>"));
    assert!(html.contains("<th>标准要求</th>"));
    assert!(html.contains("<ol class=\"inline-list\"><li>adm 已禁用</li><li>lp 已禁用</li></ol>"));
    assert!(html.contains("<td>账户,口令</td>"));
    assert!(html.contains("<col style=\"width:14ch\"/>"));
    assert!(html.contains(&format!("<p>参照<strong>{KYLIN_STANDARD}</strong>执行</p>")));
    assert!(html.contains("<p># 检查结果</p>"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn render_escapes_markup_in_cells() {
    let renderer = HtmlRenderer::new().expect("renderer should build");
    let html = renderer.render("| h |\n|---|\n| a < b<br>c & d |", "t");
    assert!(html.contains("<td>a &lt; b<br>c &amp; d</td>"));
}
