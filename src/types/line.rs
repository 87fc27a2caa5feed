use crate::types::Tag;

/// One line of the extract, addressed by character column.
///
/// Columns count decoded characters, so extended 8-bit text keeps the same
/// offsets it had in the source file.
#[derive(Debug, Clone)]
pub struct InputLine {
    /// 1-based line number in the source file.
    pub number: usize,
    pub tag: Tag,
    chars: Vec<char>
}

impl InputLine {
    pub fn new(number: usize, text: &str) -> Self {
        let text = text.trim_end_matches(['\r', '\n']);

        Self {
            number,
            tag: Tag::parse(text),
            chars: text.chars().collect()
        }
    }

    /// Characters in `start..end`, clamped to the line. Short lines read as blanks.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());

        if start >= end {
            return String::new();
        }

        self.chars[start..end].iter().collect()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        prefix.chars().enumerate().all(|(index, character)| self.chars.get(index) == Some(&character))
    }

    /// The last `count` characters with surrounding blanks trimmed.
    pub fn trailing(&self, count: usize) -> String {
        let trimmed_len = self.chars.iter().rposition(|character| !character.is_whitespace())
            .map_or(0, |index| index + 1);
        let start = trimmed_len.saturating_sub(count);

        self.chars[start..trimmed_len].iter().collect::<String>().trim().to_string()
    }
}
