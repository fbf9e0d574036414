use std::fmt;

use super::merge::FIELD_SEPARATOR;
use super::segment::Segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// Carried over from the input with its own numbering.
    Existing(String),
    Single {
        index: usize,
        name: String,
    },
    Pair {
        index: usize,
        name: String,
        value: String,
    },
    Triple {
        index: usize,
        name: String,
        code: String,
        value: String,
    },
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(text) => f.write_str(text),
            Self::Single { index, name } => write!(f, "{index}.{name}"),
            Self::Pair { index, name, value } => {
                write!(f, "{index}.{name}{FIELD_SEPARATOR}{value}")
            }
            Self::Triple {
                index,
                name,
                code,
                value,
            } => write!(
                f,
                "{index}.{name}{FIELD_SEPARATOR}{code}{FIELD_SEPARATOR}{value}"
            ),
        }
    }
}

pub fn compact(segments: &[Segment]) -> Vec<ListItem> {
    let mut items = Vec::<ListItem>::new();
    let mut index = 1_usize;
    let mut position = 0_usize;

    while let Some(current) = segments.get(position) {
        match current {
            Segment::Numbered(text) => {
                items.push(ListItem::Existing(text.clone()));
                position += 1;
                continue;
            }
            Segment::Title(text) => {
                items.push(ListItem::Single {
                    index,
                    name: text.clone(),
                });
                position += 1;
                index += 1;
                continue;
            }
            Segment::Plain(_) | Segment::ColonSplit(_) => {}
        }

        let name = current.text().to_string();
        let next = segments.get(position + 1).filter(|segment| segment.is_field());
        let after = next.and(segments.get(position + 2).filter(|segment| segment.is_field()));

        let item = match (next, after) {
            (Some(code), Some(value)) if looks_like_code(code.text()) => {
                position += 3;
                ListItem::Triple {
                    index,
                    name,
                    code: code.text().to_string(),
                    value: value.text().to_string(),
                }
            }
            (Some(value), _) => {
                position += 2;
                ListItem::Pair {
                    index,
                    name,
                    value: value.text().to_string(),
                }
            }
            (None, _) => {
                position += 1;
                ListItem::Single { index, name }
            }
        };

        items.push(item);
        index += 1;
    }

    items
}

// Uppercase, digit or underscore present and no CJK ideograph.
pub fn looks_like_code(text: &str) -> bool {
    let has_code_char = text
        .chars()
        .any(|value| value.is_ascii_uppercase() || value.is_ascii_digit() || value == '_');
    has_code_char && !text.chars().any(is_cjk_ideograph)
}

fn is_cjk_ideograph(value: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&value)
}
