use regex::Regex;

/// One atomic piece of cell text on its way to becoming a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    /// Name-only entry; never paired with a code or value.
    Title(String),
    /// Already carries a leading `<digits>.` and is emitted verbatim.
    Numbered(String),
    /// Field surfaced by splitting a `name：code：value` line.
    ColonSplit(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text)
            | Self::Title(text)
            | Self::Numbered(text)
            | Self::ColonSplit(text) => text,
        }
    }

    /// Whether the segment may serve as the code or value of a grouped item.
    /// Titles and numbered segments are never absorbed; they end the group instead.
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Plain(_) | Self::ColonSplit(_))
    }
}

pub fn classify(text: &str, numbered_item: &Regex) -> Segment {
    if numbered_item.is_match(text) {
        Segment::Numbered(text.to_string())
    } else {
        Segment::Plain(text.to_string())
    }
}

pub fn tokenize(text: &str, line_break: &Regex) -> Vec<String> {
    line_break
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
