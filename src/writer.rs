//! Indentation-aware text output.
//!
//! [`IndentWriter`] wraps any [`fmt::Write`] sink and prefixes each fresh
//! line with the current indentation. Text may arrive in arbitrary chunks:
//! whether the writer sits at the start of a line is carried across calls, so
//! the final output does not depend on where one `write_str` ends and the
//! next begins. A chunk that ends partway through a multi-character newline
//! marker is held back until the next write decides what it was.

use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};

use serde::Deserialize;

/// Indentation unit and line terminator used by an [`IndentWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndentStyle {
    pub indent: String,
    pub newline: String,
}

impl IndentStyle {
    pub fn new(indent: impl Into<String>, newline: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            newline: newline.into(),
        }
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::new("    ", "\n")
    }
}

pub struct IndentWriter<W> {
    sink: W,
    style: IndentStyle,
    level: usize,
    at_line_start: bool,
    /// Trailing text that may be the start of a newline marker.
    pending: String,
}

impl<W: fmt::Write> IndentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_style(sink, IndentStyle::default())
    }

    pub fn with_style(sink: W, style: IndentStyle) -> Self {
        Self {
            sink,
            style,
            level: 0,
            at_line_start: true,
            pending: String::new(),
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn style(&self) -> &IndentStyle {
        &self.style
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Returns the sink. Text held back as a possible newline marker is lost
    /// unless [`IndentWriter::flush`] is called first.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Emits any held-back partial newline marker as ordinary text.
    pub fn flush(&mut self) -> fmt::Result {
        if self.pending.is_empty() {
            return Ok(());
        }
        let held = std::mem::take(&mut self.pending);
        self.sink.write_str(&held)
    }

    /// Terminates the current line with the configured newline marker.
    pub fn end_line(&mut self) -> fmt::Result {
        self.flush()?;
        self.sink.write_str(&self.style.newline)?;
        self.at_line_start = true;
        Ok(())
    }

    /// Enters one level of indentation until the returned guard is dropped.
    ///
    /// The guard dereferences to the writer, so output keeps flowing through
    /// it. The level is restored on every exit path, including early returns
    /// through `?`.
    pub fn indent(&mut self) -> Indented<'_, W> {
        self.level += 1;
        Indented { writer: self }
    }
}

impl<W: fmt::Write> fmt::Write for IndentWriter<W> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }
        let Self {
            sink,
            style,
            level,
            at_line_start,
            pending,
        } = self;

        if style.newline.is_empty() {
            start_line(sink, style, *level, at_line_start)?;
            return sink.write_str(text);
        }

        let mut joined = std::mem::take(pending);
        joined.push_str(text);
        let held = partial_marker_len(&joined, &style.newline);
        let (complete, partial) = joined.split_at(joined.len() - held);

        let mut segments = complete.split(style.newline.as_str()).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                // Blank lines inside the text are indented like any other.
                start_line(sink, style, *level, at_line_start)?;
                sink.write_str(segment)?;
                sink.write_str(&style.newline)?;
                *at_line_start = true;
            } else if !segment.is_empty() {
                start_line(sink, style, *level, at_line_start)?;
                sink.write_str(segment)?;
            }
        }

        if !partial.is_empty() {
            // Whatever the held text turns out to be, it sits on the current
            // line, so the prefix goes out now at the current level.
            start_line(sink, style, *level, at_line_start)?;
            pending.push_str(partial);
        }
        Ok(())
    }
}

fn start_line<W: fmt::Write>(
    sink: &mut W,
    style: &IndentStyle,
    level: usize,
    at_line_start: &mut bool,
) -> fmt::Result {
    if *at_line_start {
        for _ in 0..level {
            sink.write_str(&style.indent)?;
        }
        *at_line_start = false;
    }
    Ok(())
}

/// Length of the longest proper prefix of `marker` that `text` ends with.
fn partial_marker_len(text: &str, marker: &str) -> usize {
    (1..marker.len())
        .rev()
        .filter(|&len| marker.is_char_boundary(len))
        .find(|&len| text.ends_with(&marker[..len]))
        .unwrap_or(0)
}

/// Scope guard returned by [`IndentWriter::indent`].
pub struct Indented<'a, W: fmt::Write> {
    writer: &'a mut IndentWriter<W>,
}

impl<W: fmt::Write> Deref for Indented<'_, W> {
    type Target = IndentWriter<W>;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl<W: fmt::Write> DerefMut for Indented<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

impl<W: fmt::Write> Drop for Indented<'_, W> {
    fn drop(&mut self) {
        self.writer.level -= 1;
    }
}

/// Adapts an [`io::Write`] byte sink to [`fmt::Write`].
///
/// `fmt::Error` carries no detail, so the first I/O error is kept here and
/// handed back by [`IoSink::finish`].
pub struct IoSink<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Converts the outcome of a formatting pass into the sink's own result.
    pub fn finish(mut self, result: fmt::Result) -> io::Result<W> {
        match (result, self.error.take()) {
            (_, Some(err)) => Err(err),
            (Err(fmt::Error), None) => Err(io::Error::other("formatter error")),
            (Ok(()), None) => {
                self.inner.flush()?;
                Ok(self.inner)
            }
        }
    }
}

impl<W: io::Write> fmt::Write for IoSink<W> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        if self.error.is_some() {
            return Err(fmt::Error);
        }
        self.inner.write_all(text.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}
