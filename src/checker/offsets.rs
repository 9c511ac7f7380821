/// 1-based line and column of a character in the checked text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Maps every character offset of a text, end of text included, to its
/// position. Offsets count characters, not bytes.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    positions: Vec<Position>,
}

impl OffsetMap {
    /// Position of the character at `offset`, or `None` past the end of text.
    pub fn get(&self, offset: usize) -> Option<Position> {
        self.positions.get(offset).copied()
    }

    /// Number of mapped offsets, always one more than the character count.
    pub fn mapped_offsets(&self) -> usize {
        self.positions.len()
    }
}

pub fn build_offset_map(text: &str) -> OffsetMap {
    let mut positions = Vec::with_capacity(text.len() + 1);
    let mut line = 1;
    let mut column = 1;

    for ch in text.chars() {
        positions.push(Position { line, column });
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    // Offset right after the last character
    positions.push(Position { line, column });

    OffsetMap { positions }
}
