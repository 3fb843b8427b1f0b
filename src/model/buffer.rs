//! Styled text buffer
//!
//! A rope plus a flat list of style runs. Runs are sorted, never overlap and
//! always lie within the text; bytes not covered by a run use the base style.
//! All public offsets are byte offsets and are snapped back to the start of
//! the character they land in.

use std::ops::Range;

use ropey::Rope;

use crate::highlight::{StyleSurface, SurfaceError, TextStyle};

/// A styled byte range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    pub range: Range<usize>,
    pub style: TextStyle,
}

#[derive(Debug, Clone)]
pub struct StyledBuffer {
    text: Rope,
    base: TextStyle,
    runs: Vec<StyleRun>,
    cursor: usize,
    /// Selection anchor; equals `cursor` when nothing is selected
    anchor: usize,
    /// Change notifications are reported while attached
    attached: bool,
    pending_notifications: usize,
}

impl StyledBuffer {
    pub fn new(text: &str, base: TextStyle) -> Self {
        Self {
            text: Rope::from_str(text),
            base,
            runs: Vec::new(),
            cursor: 0,
            anchor: 0,
            attached: true,
            pending_notifications: 0,
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn base(&self) -> &TextStyle {
        &self.base
    }

    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    pub fn char_count(&self) -> usize {
        self.text.len_chars()
    }

    /// Selected byte range (empty when nothing is selected)
    pub fn selection(&self) -> Range<usize> {
        self.anchor.min(self.cursor)..self.anchor.max(self.cursor)
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Select `range`, leaving the cursor at its end
    pub fn select(&mut self, range: Range<usize>) {
        self.anchor = self.snap(range.start);
        self.cursor = self.snap(range.end);
    }

    pub fn notifications_attached(&self) -> bool {
        self.attached
    }

    /// Number of change notifications since the last call
    pub fn take_notifications(&mut self) -> usize {
        std::mem::take(&mut self.pending_notifications)
    }

    /// Effective style of the byte at `offset`
    pub fn style_at(&self, offset: usize) -> TextStyle {
        let idx = self.runs.partition_point(|r| r.range.end <= offset);
        match self.runs.get(idx) {
            Some(run) if run.range.start <= offset => run.style,
            _ => self.base,
        }
    }

    /// The whole text as consecutive styled segments, gaps filled with the base style
    pub fn segments(&self) -> Vec<(Range<usize>, TextStyle)> {
        let mut segments = Vec::with_capacity(self.runs.len() * 2 + 1);
        let mut pos = 0;
        for run in &self.runs {
            if run.range.start > pos {
                segments.push((pos..run.range.start, self.base));
            }
            segments.push((run.range.clone(), run.style));
            pos = run.range.end;
        }
        let len = self.text.len_bytes();
        if pos < len {
            segments.push((pos..len, self.base));
        }
        segments
    }

    /// Text of a byte range
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.text.byte_to_char(self.snap(range.start));
        let end = self.text.byte_to_char(self.snap(range.end));
        self.text.slice(start..end.max(start)).to_string()
    }

    /// Insert `text` at byte `offset`
    pub fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = self.snap(offset);
        let added = text.len();
        self.text.insert(self.text.byte_to_char(at), text);

        for run in &mut self.runs {
            if run.range.start >= at {
                run.range.start += added;
                run.range.end += added;
            } else if run.range.end > at {
                run.range.end += added;
            }
        }

        let shift = |x: usize| if x >= at { x + added } else { x };
        self.cursor = shift(self.cursor);
        self.anchor = shift(self.anchor);
        self.notify();
    }

    /// Remove a byte range
    pub fn remove(&mut self, range: Range<usize>) {
        let start = self.snap(range.start);
        let end = self.snap(range.end);
        if start >= end {
            return;
        }
        let removed = end - start;
        self.text
            .remove(self.text.byte_to_char(start)..self.text.byte_to_char(end));

        let map = |x: usize| {
            if x <= start {
                x
            } else if x >= end {
                x - removed
            } else {
                start
            }
        };
        for run in &mut self.runs {
            run.range = map(run.range.start)..map(run.range.end);
        }
        self.runs.retain(|r| !r.range.is_empty());

        self.cursor = map(self.cursor);
        self.anchor = map(self.anchor);
        self.notify();
    }

    /// Replace the whole text, dropping all styling. Identical text is a no-op.
    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text = Rope::from_str(text);
        self.runs.clear();
        self.cursor = self.snap(self.cursor);
        self.anchor = self.cursor;
        self.notify();
    }

    fn notify(&mut self) {
        if self.attached {
            self.pending_notifications += 1;
        }
    }

    /// Clamp to the text and move back to a character start
    fn snap(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len_bytes());
        self.text.char_to_byte(self.text.byte_to_char(offset))
    }

    fn is_char_boundary(&self, offset: usize) -> bool {
        self.snap(offset) == offset
    }

    /// Overwrite `range` with a single run, splitting any runs it cuts through
    fn paint(&mut self, range: Range<usize>, style: TextStyle) {
        let first = self.runs.partition_point(|r| r.range.end <= range.start);
        let last = self.runs.partition_point(|r| r.range.start < range.end);

        let mut replacement = Vec::with_capacity(3);
        if first < last {
            let head = &self.runs[first];
            if head.range.start < range.start {
                replacement.push(StyleRun {
                    range: head.range.start..range.start,
                    style: head.style,
                });
            }
        }
        replacement.push(StyleRun {
            range: range.clone(),
            style,
        });
        if first < last {
            let tail = &self.runs[last - 1];
            if tail.range.end > range.end {
                replacement.push(StyleRun {
                    range: range.end..tail.range.end,
                    style: tail.style,
                });
            }
        }

        self.runs.splice(first..last, replacement);
    }
}

impl StyleSurface for StyledBuffer {
    fn text(&self) -> String {
        self.text.to_string()
    }

    fn len(&self) -> usize {
        self.text.len_bytes()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    /// Also collapses the selection
    fn set_cursor(&mut self, offset: usize) {
        self.cursor = self.snap(offset);
        self.anchor = self.cursor;
    }

    fn reset_styles(&mut self, base: &TextStyle) {
        self.base = *base;
        self.runs.clear();
        self.notify();
    }

    fn apply_style(&mut self, range: Range<usize>, style: &TextStyle) -> Result<(), SurfaceError> {
        let len = self.text.len_bytes();
        if range.start > range.end || range.end > len {
            return Err(SurfaceError::OutOfBounds { range, len });
        }
        for offset in [range.start, range.end] {
            if !self.is_char_boundary(offset) {
                return Err(SurfaceError::NotCharBoundary { offset });
            }
        }
        if range.is_empty() {
            return Ok(());
        }

        self.paint(range, *style);
        self.notify();
        Ok(())
    }

    fn suspend_notifications(&mut self) {
        self.attached = false;
    }

    fn resume_notifications(&mut self) {
        self.attached = true;
    }
}
