//! Configuration options for literal serialization.
//!
//! [`Options`] controls two behaviors of the engine and two details of the output:
//!
//! - `reference`: track shared identities and elide repeated appearances
//! - `beautify`: indent containers across lines instead of joining them with `, `
//! - `indent`: the unit repeated once per nesting level when beautifying
//! - `binding`: the root variable name used by the module emitter
//!
//! ## Examples
//!
//! ```rust
//! use serde_jslit::{serialize_with_options, Options, Value};
//!
//! let value = Value::from(vec![Value::from(1), Value::from(2)]);
//!
//! let compact = serialize_with_options(&value, &Options::new()).unwrap();
//! assert_eq!(compact.text, "[1, 2]");
//!
//! let pretty = serialize_with_options(&value, &Options::pretty().with_indent("  ")).unwrap();
//! assert_eq!(pretty.text, "[\n  1,\n  2\n]");
//! ```

/// Configuration options for literal serialization.
///
/// # Examples
///
/// ```rust
/// use serde_jslit::Options;
///
/// // Single line, every appearance rendered in full
/// let options = Options::new();
/// assert!(!options.reference && !options.beautify);
///
/// // Defaults used for module emission
/// let options = Options::module();
/// assert!(options.reference && options.beautify);
///
/// // Custom configuration
/// let options = Options::new()
///     .with_reference(true)
///     .with_beautify(true)
///     .with_indent("    ")
///     .with_binding("config");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub reference: bool,
    pub beautify: bool,
    pub indent: String,
    pub binding: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            reference: false,
            beautify: false,
            indent: "\t".to_string(),
            binding: "m".to_string(),
        }
    }
}

impl Options {
    /// Creates default options (single line, no reference tracking, tab indent).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jslit::Options;
    ///
    /// let options = Options::new();
    /// assert_eq!(options.indent, "\t");
    /// assert_eq!(options.binding, "m");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented, multi-line output.
    #[must_use]
    pub fn pretty() -> Self {
        Options {
            beautify: true,
            ..Default::default()
        }
    }

    /// Creates the options used by [`serialize_to_module`](crate::serialize_to_module):
    /// beautified, with reference tracking.
    #[must_use]
    pub fn module() -> Self {
        Options {
            reference: true,
            beautify: true,
            ..Default::default()
        }
    }

    /// Enables or disables identity-sharing detection.
    ///
    /// When enabled, a value that appears more than once in the graph is rendered only at
    /// its first position; every later position is reported as a
    /// [`Reference`](crate::Reference) and left out of its container.
    #[must_use]
    pub fn with_reference(mut self, reference: bool) -> Self {
        self.reference = reference;
        self
    }

    /// Enables or disables indentation of containers.
    #[must_use]
    pub fn with_beautify(mut self, beautify: bool) -> Self {
        self.beautify = beautify;
        self
    }

    /// Sets the indentation unit. Only affects beautified output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jslit::Options;
    ///
    /// let options = Options::pretty().with_indent("  ");
    /// assert_eq!(options.indent, "  ");
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the root binding the module emitter assigns to and aliases through.
    #[must_use]
    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = binding.into();
        self
    }
}
