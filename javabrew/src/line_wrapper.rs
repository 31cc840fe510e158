//! LineWrapper: buffered writer inserting newlines at soft-break points
//!
//! Mirrors instant-coffee's `write!`/`writeln!` calls threading straight
//! through an `io::Write`, but here the sink is `std::fmt::Write` (we render
//! to in-memory `String`/discard buffers, not files — file I/O stays an
//! external concern for callers to handle themselves).

use crate::error::Result;
use std::fmt::Write;

/// Column at which `$W`/`$Z` soft breaks fire
pub const COLUMN_LIMIT: usize = 100;

/// A pending soft break: becomes either a space or a newline + indent
struct PendingSpace {
    next_indent_levels: usize,
    zero_width: bool,
}

pub struct LineWrapper<'a, W: Write> {
    sink: &'a mut W,
    indent_unit: &'a str,
    column: usize,
    pending: Option<PendingSpace>,
}

impl<'a, W: Write> LineWrapper<'a, W> {
    pub fn new(sink: &'a mut W, indent_unit: &'a str) -> Self {
        LineWrapper { sink, indent_unit, column: 0, pending: None }
    }

    /// Write `text` verbatim; `text` must not itself contain a newline —
    /// callers split on `\n` before calling (see `CodeWriter::emit_and_indent`)
    pub fn append(&mut self, text: &str) -> Result<()> {
        debug_assert!(!text.contains('\n'));
        if text.is_empty() {
            return Ok(());
        }
        self.flush_pending_as_space_if_fits(text.chars().count())?;
        self.sink.write_str(text)?;
        self.column += text.chars().count();
        Ok(())
    }

    /// Soft break for `$W`: a space if the line still fits, else a newline
    pub fn wrapping_space(&mut self, next_indent_levels: usize) -> Result<()> {
        self.pending = Some(PendingSpace { next_indent_levels, zero_width: false });
        Ok(())
    }

    /// Soft break for `$Z`: nothing if inline, else a newline
    pub fn zero_width_space(&mut self, next_indent_levels: usize) -> Result<()> {
        self.pending = Some(PendingSpace { next_indent_levels, zero_width: true });
        Ok(())
    }

    fn flush_pending_as_space_if_fits(&mut self, upcoming_len: usize) -> Result<()> {
        let Some(pending) = self.pending.take() else { return Ok(()) };
        let space_len = if pending.zero_width { 0 } else { 1 };
        let fits = self.column + space_len + upcoming_len <= COLUMN_LIMIT;
        if fits {
            if !pending.zero_width {
                self.sink.write_char(' ')?;
                self.column += 1;
            }
        } else {
            self.sink.write_char('\n')?;
            for _ in 0..pending.next_indent_levels {
                self.sink.write_str(self.indent_unit)?;
            }
            self.column = pending.next_indent_levels * self.indent_unit.chars().count();
        }
        Ok(())
    }

    /// A hard newline from source text itself (not a `$W`/`$Z` soft break);
    /// cancels any pending soft break, which no longer matters once a real
    /// line ends.
    pub fn newline(&mut self) -> Result<()> {
        self.pending = None;
        self.sink.write_char('\n')?;
        self.column = 0;
        Ok(())
    }

    /// Any pending soft break becomes a concrete space; call at end of emission
    pub fn flush(&mut self) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            if !pending.zero_width {
                self.sink.write_char(' ')?;
                self.column += 1;
            }
        }
        Ok(())
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn indent_unit(&self) -> &str {
        self.indent_unit
    }
}

impl<'a, W: Write> Drop for LineWrapper<'a, W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_when_line_would_overflow() {
        let mut out = String::new();
        {
            let mut lw = LineWrapper::new(&mut out, "  ");
            lw.append(&"x".repeat(95)).unwrap();
            lw.wrapping_space(2).unwrap();
            lw.append("overflow").unwrap();
        }
        assert!(out.contains('\n'));
    }

    #[test]
    fn stays_inline_when_it_fits() {
        let mut out = String::new();
        {
            let mut lw = LineWrapper::new(&mut out, "  ");
            lw.append("short").unwrap();
            lw.wrapping_space(2).unwrap();
            lw.append("text").unwrap();
        }
        assert_eq!(out, "short text");
    }

    #[test]
    fn zero_width_space_emits_nothing_when_inline() {
        let mut out = String::new();
        {
            let mut lw = LineWrapper::new(&mut out, "  ");
            lw.append("a").unwrap();
            lw.zero_width_space(0).unwrap();
            lw.append("b").unwrap();
        }
        assert_eq!(out, "ab");
    }
}
