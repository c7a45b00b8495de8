//! Configuration options for parsing.
//!
//! The grammar itself has no knobs: canonical serialization and the accepted
//! syntax are fixed. What can be configured is how much the parser reports
//! while it works.
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::{Parser, ParserOptions};
//!
//! let options = ParserOptions::new().with_trace(true);
//! let parser = Parser::with_options("a=1, b", options);
//! let dict = parser.parse_dictionary().unwrap();
//! assert_eq!(dict.len(), 2);
//! ```

/// Configuration options for [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```rust
/// use structured_fields::ParserOptions;
///
/// let options = ParserOptions::new();
/// assert!(!options.trace);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Emit a `tracing` event at `TRACE` level on entry to every grammar
    /// production, and a `DEBUG` event when parsing fails.
    pub trace: bool,
}

impl ParserOptions {
    /// Creates default options (tracing disabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables production tracing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::ParserOptions;
    ///
    /// let options = ParserOptions::new().with_trace(true);
    /// assert!(options.trace);
    /// ```
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
