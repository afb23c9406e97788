//! Indentation normalization.
//!
//! Turns raw leading-space counts into contiguous nesting depths: after this
//! pass a line is never more than one level deeper than the line before it,
//! which is what lets the tree builder treat "deeper" as "exactly one level
//! deeper".

use crate::error::{Error, Result};
use crate::line::SourceLine;
use crate::options::IndentPolicy;

pub fn normalize(lines: &mut [SourceLine<'_>], policy: IndentPolicy) -> Result<()> {
    match policy {
        IndentPolicy::Uniform => uniform(lines),
        IndentPolicy::Nested => nested(lines),
    }
}

fn uniform(lines: &mut [SourceLine<'_>]) -> Result<()> {
    let Some(base) = lines.first().map(|l| l.indent) else {
        return Ok(());
    };
    let mut step: Option<usize> = None;
    let mut prev_depth = 0;

    for line in lines.iter_mut() {
        let offset = below_base(line, base)?;
        let depth = if offset == 0 {
            0
        } else {
            let step = *step.get_or_insert(offset);
            if offset % step != 0 {
                return Err(Error::syntax(
                    line.number,
                    line.text,
                    format!("indentation of {offset} is not a multiple of {step}"),
                ));
            }
            offset / step
        };
        if depth > prev_depth + 1 {
            return Err(Error::syntax(line.number, line.text, "indentation jumps more than one level"));
        }
        line.depth = depth;
        prev_depth = depth;
    }
    Ok(())
}

fn nested(lines: &mut [SourceLine<'_>]) -> Result<()> {
    let Some(base) = lines.first().map(|l| l.indent) else {
        return Ok(());
    };
    // Open indentation counts, outermost first. Never empty.
    let mut open = vec![base];

    for line in lines.iter_mut() {
        below_base(line, base)?;
        let mut dedented = false;
        while open.last().is_some_and(|&top| top > line.indent) {
            open.pop();
            dedented = true;
        }
        match open.last() {
            Some(&top) if top == line.indent => {}
            // A dedent that overshoots an open level must not reopen one.
            Some(&top) if top < line.indent && !dedented => open.push(line.indent),
            _ => {
                return Err(Error::syntax(
                    line.number,
                    line.text,
                    "dedent does not match any outer indentation level",
                ));
            }
        }
        line.depth = open.len() - 1;
    }
    Ok(())
}

fn below_base(line: &SourceLine<'_>, base: usize) -> Result<usize> {
    line.indent.checked_sub(base).ok_or_else(|| {
        Error::syntax(line.number, line.text, "line is indented less than the first line")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::decompose;

    fn depths(src: &str, policy: IndentPolicy) -> Result<Vec<usize>> {
        let mut lines = src
            .lines()
            .enumerate()
            .map(|(i, t)| decompose(i + 1, t))
            .collect::<Result<Vec<_>>>()?;
        normalize(&mut lines, policy)?;
        Ok(lines.iter().map(|l| l.depth).collect())
    }

    fn syntax_reason(result: Result<Vec<usize>>) -> (usize, String) {
        match result.unwrap_err() {
            Error::Syntax { line, reason, .. } => (line, reason),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn uniform_two_space_step() {
        let src = "Box:\n  Label:\n    text: a\n  Button:";
        assert_eq!(depths(src, IndentPolicy::Uniform).unwrap(), vec![0, 1, 2, 1]);
    }

    #[test]
    fn uniform_base_offset_is_ignored() {
        let src = "    Box:\n        id: a\n        Label:\n            text: b";
        assert_eq!(depths(src, IndentPolicy::Uniform).unwrap(), vec![0, 1, 1, 2]);
    }

    #[test]
    fn uniform_rejects_close_but_mismatched_siblings() {
        let src = "Box:\n    id: a\n     Label:";
        let (line, reason) = syntax_reason(depths(src, IndentPolicy::Uniform));
        assert_eq!(line, 3);
        assert_eq!(reason, "indentation of 5 is not a multiple of 4");
    }

    #[test]
    fn uniform_rejects_double_indent() {
        let src = "Box:\n    Box:\n            Label:";
        let (line, reason) = syntax_reason(depths(src, IndentPolicy::Uniform));
        assert_eq!(line, 3);
        assert_eq!(reason, "indentation jumps more than one level");
    }

    #[test]
    fn uniform_rejects_line_left_of_base() {
        let src = "    Box:\n  Label:";
        let (_, reason) = syntax_reason(depths(src, IndentPolicy::Uniform));
        assert_eq!(reason, "line is indented less than the first line");
    }

    #[test]
    fn nested_accepts_varying_steps() {
        let src = "Box:\n        id: main\n        Box:\n            id: inner\n        Button:";
        assert_eq!(depths(src, IndentPolicy::Nested).unwrap(), vec![0, 1, 1, 2, 1]);
    }

    #[test]
    fn nested_multi_level_dedent() {
        let src = "A:\n  B:\n      C:\n         D:\n  E:";
        assert_eq!(depths(src, IndentPolicy::Nested).unwrap(), vec![0, 1, 2, 3, 1]);
    }

    #[test]
    fn nested_rejects_dedent_between_levels() {
        let src = "Box:\n    Box:\n        Label:\n      Button:";
        let (line, reason) = syntax_reason(depths(src, IndentPolicy::Nested));
        assert_eq!(line, 4);
        assert_eq!(reason, "dedent does not match any outer indentation level");
    }
}
