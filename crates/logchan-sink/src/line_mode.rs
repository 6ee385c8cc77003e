/// Controls whether a [`WriterSink`](crate::WriterSink) terminates each line it writes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline terminator unless the line already ends with one.
    #[default]
    WithNewline,
    /// Write the line exactly as received.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode terminates lines that lack a trailing newline.
    ///
    /// [`LineMode::WithNewline`] matches the behaviour of a conventional
    /// line-oriented logger, where every emitted record ends up on its own
    /// line regardless of whether the caller supplied the terminator.
    ///
    /// # Examples
    ///
    /// ```
    /// use logchan_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }

    /// Returns the terminator that must follow `line` under this mode.
    ///
    /// An empty slice is returned when the mode does not append newlines or
    /// when `line` already ends with `'\n'`.
    #[must_use]
    pub fn terminator_for(self, line: &str) -> &'static str {
        if self.append_newline() && !line.ends_with('\n') {
            "\n"
        } else {
            ""
        }
    }
}

impl From<bool> for LineMode {
    /// `true` selects [`LineMode::WithNewline`], `false` selects
    /// [`LineMode::WithoutNewline`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logchan_sink::LineMode;
    ///
    /// assert_eq!(LineMode::from(true), LineMode::WithNewline);
    /// assert_eq!(LineMode::from(false), LineMode::WithoutNewline);
    /// ```
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}

#[cfg(test)]
mod tests;
