/// A position within a [Document]: the `word`th word of the `line`th line. A cursor
/// pointing past the end of a line is equivalent to the start of the next line.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WordCursor {
    pub line: usize,
    pub word: usize,
}

impl WordCursor {
    pub fn new(line: usize, word: usize) -> WordCursor {
        WordCursor { line, word }
    }
}

/// A document is the text of one passage, split into its newline-delimited lines and
/// then into whitespace-delimited words. It is never modified once built; layout walks
/// it with a [WordCursor].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<Vec<String>>,
}

impl Document {
    /// Split text into lines on `\n`, and each line into words on whitespace. Empty
    /// lines are kept as lines with no words, so a trailing newline yields a final
    /// empty line.
    pub fn from_text(text: &str) -> Document {
        let lines = text
            .split('\n')
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect();
        Document { lines }
    }

    /// Total number of words in the document
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Number of words at or after `cursor`
    pub fn words_from(&self, cursor: WordCursor) -> usize {
        let Some(first) = self.lines.get(cursor.line) else {
            return 0;
        };
        let rest: usize = self.lines[cursor.line + 1..].iter().map(Vec::len).sum();
        first.len().saturating_sub(cursor.word) + rest
    }

    /// Iterate over every word in reading order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flatten().map(String::as_str)
    }

    /// Reassemble the document with single spaces between words and `\n` between lines
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
