//! The literal serialization engine.
//!
//! The engine walks a value graph depth-first and builds the literal bottom-up. It owns the
//! traversal state for exactly one top-level call:
//!
//! - the current [`Path`] from the root,
//! - the ancestor stack, holding the identity of every container being rendered, and
//! - the reference registry, mapping identities to the path of their first full render.
//!
//! Most users should go through [`serialize`](crate::serialize) or
//! [`serialize_with_options`](crate::serialize_with_options).
//!
//! ## Shared references
//!
//! ```rust
//! use serde_jslit::{serialize_with_options, Object, Options, Value};
//!
//! let r = Object::new();
//! r.insert("one", true);
//!
//! let c = Object::new();
//! c.insert("d", r.clone());
//!
//! let root = Object::new();
//! root.insert("a", r.clone());
//! root.insert("b", r);
//! root.insert("c", c);
//!
//! let out = serialize_with_options(&root.into(), &Options::new().with_reference(true)).unwrap();
//! assert_eq!(out.text, "{'a': {one: true}, 'c': {}}");
//!
//! let pairs: Vec<_> = out.references.iter().map(|r| r.as_pair()).collect();
//! assert_eq!(
//!     pairs,
//!     vec![
//!         ("b".to_string(), "a".to_string()),
//!         ("c.d".to_string(), "a".to_string()),
//!     ]
//! );
//! ```

use crate::value::{Array, Identity, Object};
use crate::{syntax, Error, Options, Result, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// The location of a value, as the property names and array indices leading to it.
///
/// Displays as the dot-separated form (`c.d`, `list.0`); the root is the empty path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<String>);

impl Path {
    #[must_use]
    pub fn root() -> Self {
        Path(Vec::new())
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the path as a property-access chain starting at `root`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jslit::Path;
    ///
    /// let path: Path = ["c", "thr-ee", "0"].into_iter().collect();
    /// assert_eq!(path.to_string(), "c.thr-ee.0");
    /// assert_eq!(path.to_access("m"), "m.c['thr-ee']['0']");
    /// ```
    #[must_use]
    pub fn to_access(&self, root: &str) -> String {
        self.0.iter().fold(root.to_string(), |mut acc, segment| {
            acc.push_str(&syntax::member(segment));
            acc
        })
    }

    fn push(&mut self, segment: String) {
        self.0.push(segment);
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

/// A repeated appearance of a value: `path` holds the same object as `target`, which is
/// where it was rendered in full.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub path: Path,
    pub target: Path,
}

impl Reference {
    /// Returns `(path, target)` in dot-separated form.
    #[must_use]
    pub fn as_pair(&self) -> (String, String) {
        (self.path.to_string(), self.target.to_string())
    }
}

/// The result of one serialization: the literal text and, when reference tracking was
/// enabled, every elided repeat in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Serialized {
    pub text: String,
    pub references: Vec<Reference>,
}

#[derive(Default)]
struct Registry {
    first_seen: HashMap<Identity, Path>,
    duplicates: Vec<Reference>,
}

/// Traversal state for a single serialization.
pub(crate) struct Engine<'o> {
    options: &'o Options,
    path: Path,
    ancestors: Vec<Identity>,
    registry: Registry,
    keep_indices: bool,
}

impl<'o> Engine<'o> {
    pub(crate) fn new(options: &'o Options) -> Self {
        Engine {
            options,
            path: Path::root(),
            ancestors: Vec::new(),
            registry: Registry::default(),
            keep_indices: false,
        }
    }

    /// Renders elided array elements as `undefined` instead of dropping them, so later
    /// elements keep their indices and aliases can be assigned back into place.
    pub(crate) fn keep_indices(mut self) -> Self {
        self.keep_indices = true;
        self
    }

    /// Renders `value` as the root of the graph.
    pub(crate) fn run(mut self, value: &Value) -> Result<Serialized> {
        debug!(
            kind = value.kind_name(),
            reference = self.options.reference,
            beautify = self.options.beautify,
            "serializing value"
        );

        // The registry is empty at the root, so the root is never elided.
        let text = self.render_entry(value, 0)?.unwrap_or_default();
        let references = self.registry.duplicates;

        debug!(
            len = text.len(),
            references = references.len(),
            "serialized value"
        );
        Ok(Serialized { text, references })
    }

    /// Renders a value at the current path, applying cycle detection and reference
    /// tracking. Returns `None` when the value is a repeat that was recorded instead.
    fn render_entry(&mut self, value: &Value, depth: usize) -> Result<Option<String>> {
        let Some(id) = value.identity() else {
            return self.render(value, depth).map(Some);
        };

        if self.ancestors.contains(&id) {
            debug!(path = %self.path, "circular structure");
            return Err(Error::circular(&self.path.to_string()));
        }

        if self.options.reference {
            if let Some(first) = self.registry.first_seen.get(&id) {
                trace!(path = %self.path, target = %first, "repeated value elided");
                self.registry.duplicates.push(Reference {
                    path: self.path.clone(),
                    target: first.clone(),
                });
                return Ok(None);
            }
            self.registry.first_seen.insert(id, self.path.clone());
        }

        self.ancestors.push(id);
        let rendered = self.render(value, depth);
        self.ancestors.pop();
        rendered.map(Some)
    }

    fn render(&mut self, value: &Value, depth: usize) -> Result<String> {
        let text = match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => syntax::quote(s),
            Value::Function(f) => f.source().to_string(),
            Value::RegExp(re) => re.to_string(),
            Value::Date(instant) => format!("new Date('{}')", syntax::iso_millis(instant)),
            Value::Error(e) if e.message().is_empty() => "new Error()".to_string(),
            Value::Error(e) => format!("new Error({})", syntax::quote(e.message())),
            Value::Buffer(bytes) => format!("new Buffer('{}', 'base64')", syntax::base64(bytes)),
            Value::Array(array) => self.render_array(array, depth)?,
            Value::Object(object) => self.render_object(object, depth)?,
            Value::Foreign(name) => {
                return Err(Error::unsupported_type(&format!(
                    "{} (at `{}`)",
                    name, self.path
                )))
            }
        };
        Ok(text)
    }

    fn render_array(&mut self, array: &Array, depth: usize) -> Result<String> {
        let elements = array.borrow();
        let mut items = Vec::with_capacity(elements.len());

        for (index, element) in elements.iter().enumerate() {
            self.path.push(index.to_string());
            let rendered = self.render_entry(element, depth + 1);
            self.path.pop();

            match rendered? {
                Some(text) => items.push(text),
                None if self.keep_indices => items.push("undefined".to_string()),
                None => {}
            }
        }

        Ok(self.wrap('[', ']', &items, depth))
    }

    fn render_object(&mut self, object: &Object, depth: usize) -> Result<String> {
        let map = object.borrow();
        let mut items = Vec::with_capacity(map.len());

        for (key, value) in map.iter() {
            self.path.push(key.to_string());
            let rendered = self.render_entry(value, depth + 1);
            self.path.pop();

            if let Some(text) = rendered? {
                // Keys holding objects are always quoted.
                let key = if value.identity().is_some() {
                    syntax::quote(key)
                } else {
                    syntax::key(key)
                };
                items.push(format!("{}: {}", key, text));
            }
        }

        Ok(self.wrap('{', '}', &items, depth))
    }

    fn wrap(&self, open: char, close: char, items: &[String], depth: usize) -> String {
        if items.is_empty() {
            return format!("{}{}", open, close);
        }

        if !self.options.beautify {
            return format!("{}{}{}", open, items.join(", "), close);
        }

        let inner = self.options.indent.repeat(depth + 1);
        let outer = self.options.indent.repeat(depth);
        let separator = format!(",\n{}", inner);
        format!(
            "{}\n{}{}\n{}{}",
            open,
            inner,
            items.join(separator.as_str()),
            outer,
            close
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn run(value: &Value, options: &Options) -> Result<Serialized> {
        Engine::new(options).run(value)
    }

    #[test]
    fn test_scalars() {
        let options = Options::new();
        let cases = [
            (Value::Undefined, "undefined"),
            (Value::Null, "null"),
            (Value::from(false), "false"),
            (Value::from(-17), "-17"),
            (Value::from("a'b"), "'a\\'b'"),
            (Value::function("function () {}"), "function () {}"),
        ];
        for (value, expected) in cases {
            assert_eq!(run(&value, &options).unwrap().text, expected);
        }
    }

    #[test]
    fn test_error_message_is_quoted() {
        let text = run(&Value::error("it's bad"), &Options::new()).unwrap().text;
        assert_eq!(text, "new Error('it\\'s bad')");
    }

    #[test]
    fn test_nested_beautify_indentation() {
        let inner = Value::array([1, 2]);
        let root = Value::object([("list", inner), ("n", Value::from(3))]);
        let text = run(&root, &Options::pretty()).unwrap().text;
        assert_eq!(text, "{\n\t'list': [\n\t\t1,\n\t\t2\n\t],\n\tn: 3\n}");
    }

    #[test]
    fn test_empty_containers_stay_inline_when_beautified() {
        let root = Value::object([("a", Value::array(Vec::<Value>::new()))]);
        let text = run(&root, &Options::pretty()).unwrap().text;
        assert_eq!(text, "{\n\t'a': []\n}");
    }

    #[test]
    fn test_array_duplicates_use_index_paths() {
        let shared = Object::new();
        let root = Value::array([Value::from(shared.clone()), Value::from(shared)]);
        let out = run(&root, &Options::new().with_reference(true)).unwrap();
        assert_eq!(out.text, "[{}]");
        assert_eq!(
            out.references,
            vec![Reference {
                path: ["1"].into_iter().collect(),
                target: ["0"].into_iter().collect(),
            }]
        );
    }

    #[test]
    fn test_special_objects_are_tracked() {
        let date = Value::date(Utc.timestamp_opt(0, 0).unwrap());
        let root = Value::object([("x", date.clone()), ("y", date)]);
        let out = run(&root, &Options::new().with_reference(true)).unwrap();
        assert_eq!(out.text, "{'x': new Date('1970-01-01T00:00:00.000Z')}");
        assert_eq!(out.references[0].as_pair(), ("y".into(), "x".into()));
    }

    #[test]
    fn test_cycle_detected_before_registry_lookup() {
        let root = Object::new();
        root.insert("me", root.clone());
        let err = run(&root.into(), &Options::new().with_reference(true)).unwrap_err();
        assert_eq!(
            err,
            Error::CircularStructure {
                path: "me".to_string()
            }
        );
    }

    #[test]
    fn test_foreign_value_is_unsupported() {
        let root = Value::object([("s", Value::foreign("Symbol"))]);
        let err = run(&root, &Options::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(ref msg) if msg.contains("Symbol")));
    }
}
