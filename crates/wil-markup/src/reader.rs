use crate::line::SourceLine;

/// A cursor over pre-filtered source lines.
///
/// Pure positional state: it never looks inside the lines and never fails.
/// Queries past the end return `None`.
#[derive(Debug, Clone)]
pub struct LineReader<'a, 's> {
    lines: &'a [SourceLine<'s>],
    pos: usize,
}

impl<'a, 's> LineReader<'a, 's> {
    pub fn new(lines: &'a [SourceLine<'s>]) -> Self {
        Self { lines, pos: 0 }
    }

    /// The line under the cursor.
    pub fn current(&self) -> Option<&'a SourceLine<'s>> {
        self.lines.get(self.pos)
    }

    /// The line after the cursor, without moving.
    pub fn peek_next(&self) -> Option<&'a SourceLine<'s>> {
        self.lines.get(self.pos + 1)
    }

    pub fn advance(&mut self) {
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::decompose;

    #[test]
    fn walks_and_saturates() {
        let lines = vec![decompose(1, "Box:").unwrap(), decompose(2, "  id: a").unwrap()];
        let mut reader = LineReader::new(&lines);

        assert_eq!(reader.current().map(|l| l.key), Some("Box"));
        assert_eq!(reader.peek_next().map(|l| l.key), Some("id"));

        reader.advance();
        assert_eq!(reader.current().map(|l| l.key), Some("id"));
        assert!(reader.peek_next().is_none());

        reader.advance();
        reader.advance();
        assert!(reader.current().is_none());
        assert!(reader.peek_next().is_none());
    }
}
