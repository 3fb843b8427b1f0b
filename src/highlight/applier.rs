//! Applying spans to a styled text surface

use std::fmt;
use std::ops::Range;

use super::style::{StyleSpan, TextStyle};

/// Why a surface refused a styling call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Range reaches past the end of the text
    OutOfBounds { range: Range<usize>, len: usize },
    /// Range endpoint splits a multi-byte character
    NotCharBoundary { offset: usize },
    /// Surface-specific failure
    Rejected(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::OutOfBounds { range, len } => write!(
                f,
                "range {}..{} out of bounds for text of {} bytes",
                range.start, range.end, len
            ),
            SurfaceError::NotCharBoundary { offset } => {
                write!(f, "offset {} is not on a character boundary", offset)
            }
            SurfaceError::Rejected(msg) => write!(f, "surface rejected style: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A text container that can carry character formatting.
///
/// Offsets are UTF-8 byte offsets into [`StyleSurface::text`].
pub trait StyleSurface {
    /// Current full text
    fn text(&self) -> String;

    /// Text length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cursor byte offset
    fn cursor(&self) -> usize;

    /// Move the cursor; implementations clamp to the text length
    fn set_cursor(&mut self, offset: usize);

    /// Replace all formatting with `base`
    fn reset_styles(&mut self, base: &TextStyle);

    /// Paint `style` over `range`, replacing whatever was there
    fn apply_style(&mut self, range: Range<usize>, style: &TextStyle) -> Result<(), SurfaceError>;

    /// Stop reporting changes to observers until resumed
    fn suspend_notifications(&mut self);

    fn resume_notifications(&mut self);
}

/// Counters from one application run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub applied: usize,
    /// Empty or out-of-range spans that were never sent to the surface
    pub skipped: usize,
    /// Spans the surface refused
    pub failed: usize,
}

/// Applies spans in order, skipping ones that no longer fit the text
#[derive(Debug, Default)]
pub struct StyleApplier {
    stats: ApplyStats,
}

impl StyleApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one span. Never fails: bad spans are skipped and counted.
    pub fn apply(&mut self, surface: &mut dyn StyleSurface, span: &StyleSpan) {
        let len = surface.len();
        if span.len == 0 || span.start >= len || span.end() > len {
            tracing::debug!(
                "Skipping {} span {}..{} (text is {} bytes)",
                span.rule,
                span.start,
                span.end(),
                len
            );
            self.stats.skipped += 1;
            return;
        }

        match surface.apply_style(span.range(), &span.style) {
            Ok(()) => self.stats.applied += 1,
            Err(e) => {
                tracing::warn!("Failed to apply {} span: {}", span.rule, e);
                self.stats.failed += 1;
            }
        }
    }

    pub fn apply_all<'a>(
        &mut self,
        surface: &mut dyn StyleSurface,
        spans: impl IntoIterator<Item = &'a StyleSpan>,
    ) {
        for span in spans {
            self.apply(surface, span);
        }
    }

    pub fn stats(&self) -> ApplyStats {
        self.stats
    }
}
