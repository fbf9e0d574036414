use regex::Regex;

use super::segment::{Segment, classify};

const COMMAS: [char; 2] = [',', '，'];
const SEMICOLONS: [char; 2] = [';', '；'];
pub const FIELD_SEPARATOR: char = '：';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub text: String,
    pub continued: bool,
}

pub fn merge_continuations(parts: Vec<String>) -> Vec<Piece> {
    let mut merged = Vec::<Piece>::new();
    let mut parts = parts.into_iter();

    while let Some(part) = parts.next() {
        let mut current = part.trim_end().to_string();
        let mut continued = false;

        while let Some(stripped) = current.strip_suffix(COMMAS) {
            current = stripped.trim_end().to_string();
            let Some(next) = parts.next() else {
                current = current
                    .trim_end_matches(|value: char| COMMAS.contains(&value) || value.is_whitespace())
                    .to_string();
                break;
            };
            current.push(' ');
            current.push_str(next.trim());
            continued = true;
        }

        let text = current.trim();
        if !text.is_empty() {
            merged.push(Piece {
                text: text.to_string(),
                continued,
            });
        }
    }

    merged
}

pub fn expand_delimiters(pieces: Vec<Piece>, numbered_item: &Regex) -> Vec<Segment> {
    let mut segments = Vec::<Segment>::new();

    for piece in pieces {
        let text = piece.text.as_str();

        if numbered_item.is_match(text) {
            segments.push(Segment::Numbered(piece.text));
            continue;
        }

        if text.contains(SEMICOLONS) {
            for part in split_trimmed(text, &SEMICOLONS) {
                let part = part.trim_end_matches(COMMAS).trim_end();
                if part.is_empty() {
                    continue;
                }
                if numbered_item.is_match(part) {
                    segments.push(Segment::Numbered(part.to_string()));
                } else {
                    segments.push(Segment::Title(part.to_string()));
                }
            }
            continue;
        }

        if text.contains(COMMAS) {
            segments.extend(
                split_trimmed(text, &COMMAS)
                    .into_iter()
                    .map(|part| classify(part, numbered_item)),
            );
            continue;
        }

        if piece.continued {
            segments.push(Segment::Title(piece.text));
        } else {
            segments.push(Segment::Plain(piece.text));
        }
    }

    segments
}

pub fn split_colon_fields(segments: Vec<Segment>, numbered_item: &Regex) -> Vec<Segment> {
    let mut expanded = Vec::<Segment>::with_capacity(segments.len());

    for segment in segments {
        let Segment::Plain(text) = &segment else {
            expanded.push(segment);
            continue;
        };

        if !text.contains(FIELD_SEPARATOR) || text.contains(COMMAS) || text.contains(SEMICOLONS)
        {
            expanded.push(segment);
            continue;
        }

        let fields = split_trimmed(text, &[FIELD_SEPARATOR]);
        if fields.len() < 2 {
            expanded.push(segment);
            continue;
        }

        for field in fields {
            if numbered_item.is_match(field) {
                expanded.push(Segment::Numbered(field.to_string()));
            } else {
                expanded.push(Segment::ColonSplit(field.to_string()));
            }
        }
    }

    expanded
}

fn split_trimmed<'a>(text: &'a str, delimiters: &[char]) -> Vec<&'a str> {
    text.split(delimiters)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
