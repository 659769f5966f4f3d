//! # serde_jslit
//!
//! Serialize value graphs into JavaScript source text: a single literal expression, or a
//! CommonJS module that also restores shared references.
//!
//! ## What is it for?
//!
//! Fixture files, persisted configuration modules and debug dumps where the output has to be
//! readable source rather than JSON. Unlike JSON, the output can express `undefined`,
//! regular expressions, dates, errors, binary buffers and functions, and the module form
//! can express two properties pointing at *the same* object.
//!
//! ## Key Features
//!
//! - **Literal output**: strings single-quoted with minimal escaping, keys unquoted when
//!   they are identifiers, array-index keys first in enumeration order
//! - **Identity aware**: repeated objects can be detected by identity and reported as
//!   [`Reference`]s instead of being rendered twice
//! - **Cycle safe**: circular structures are reported as [`Error::CircularStructure`],
//!   never rendered partially
//! - **Serde compatible**: any `T: Serialize` can be rendered through [`to_string`]
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_jslit::{serialize, Value};
//!
//! let value = Value::object([
//!     ("one", Value::from(true)),
//!     ("thr-ee", Value::Undefined),
//!     ("5", Value::from(3.1415)),
//! ]);
//! assert_eq!(
//!     serialize(&value).unwrap(),
//!     "{'5': 3.1415, one: true, 'thr-ee': undefined}"
//! );
//! ```
//!
//! ### Modules with shared references
//!
//! ```rust
//! use serde_jslit::{serialize_to_module_with_options, Object, Options, Value};
//!
//! let r = Object::new();
//! r.insert("one", true);
//! let c = Object::new();
//! c.insert("d", r.clone());
//! let root = Value::object([("a", r.clone()), ("b", r), ("c", c)]);
//!
//! let module = serialize_to_module_with_options(&root, &Options::new()).unwrap();
//! assert_eq!(
//!     module,
//!     "var m = module.exports = {'a': {one: true}, 'c': {}};\nm.b = m.a;\nm.c.d = m.a;"
//! );
//! ```
//!
//! ### From Rust types
//!
//! ```rust
//! use serde::Serialize;
//! use serde_jslit::to_string;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "{x: 1, y: 2}");
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Every failure is returned as an [`Error`]; no partial output
//! - Recursion depth equals the nesting depth of the input; callers rendering untrusted,
//!   very deep graphs should bound the depth first
//!
//! ## Concurrency
//!
//! Every call owns its traversal state. Value graphs are built from `Rc` handles and stay
//! on the thread that created them; separate threads can serialize separate graphs freely.

pub mod engine;
pub mod error;
pub mod macros;
pub mod map;
pub mod module;
pub mod options;
pub mod ser;
mod syntax;
pub mod value;

pub use engine::{Path, Reference, Serialized};
pub use error::{Error, Result};
pub use map::ObjectMap;
pub use options::Options;
pub use ser::{to_value, ValueSerializer};
pub use value::{Array, ErrorValue, Function, Identity, Number, Object, RegExp, Value};

use engine::Engine;
use serde::Serialize;
use std::io;

/// Serialize a value as a single-line literal expression, rendering every appearance of a
/// shared object in full.
///
/// # Examples
///
/// ```rust
/// use serde_jslit::{serialize, Value};
///
/// assert_eq!(serialize(&Value::from("string's\nnew\t line")).unwrap(), "'string\\'s\nnew\t line'");
/// assert_eq!(serialize(&Value::from(3.1415)).unwrap(), "3.1415");
/// assert_eq!(serialize(&Value::Undefined).unwrap(), "undefined");
/// ```
///
/// # Errors
///
/// Returns [`Error::CircularStructure`] if a container contains itself and
/// [`Error::UnsupportedType`] if a [`Value::Foreign`] is reached.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(value: &Value) -> Result<String> {
    serialize_with_options(value, &Options::default()).map(|out| out.text)
}

/// Serialize a value as a literal expression with custom options.
///
/// With [`Options::reference`] enabled, every repeated appearance of an object is left out
/// of its container and reported in [`Serialized::references`], in discovery order.
///
/// # Errors
///
/// See [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options(value: &Value, options: &Options) -> Result<Serialized> {
    Engine::new(options).run(value)
}

/// Serialize a value as a beautified CommonJS module that restores shared references.
///
/// # Examples
///
/// ```rust
/// use serde_jslit::{serialize_to_module, Value};
///
/// let value = Value::object([("x", 1)]);
/// assert_eq!(
///     serialize_to_module(&value).unwrap(),
///     "var m = module.exports = {\n\tx: 1\n};"
/// );
/// ```
///
/// # Errors
///
/// See [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_to_module(value: &Value) -> Result<String> {
    serialize_to_module_with_options(value, &Options::module())
}

/// Serialize a value as a CommonJS module with custom options.
///
/// Reference tracking is always enabled for modules; `beautify`, `indent` and `binding`
/// are taken from `options`. The first line assigns the literal to `module.exports`, each
/// following line is an alias statement such as `m.c.d = m.a;`.
///
/// # Errors
///
/// See [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_to_module_with_options(value: &Value, options: &Options) -> Result<String> {
    module::emit(value, options)
}

/// Serialize any `T: Serialize` as a single-line literal expression.
///
/// # Examples
///
/// ```rust
/// use serde_jslit::to_string;
///
/// assert_eq!(to_string(&vec![Some(1), None]).unwrap(), "[1, undefined]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted (e.g. a map with non-scalar keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &Options::default())
}

/// Serialize any `T: Serialize` as an indented literal expression.
///
/// # Errors
///
/// Returns an error if the value cannot be converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &Options::pretty())
}

/// Serialize any `T: Serialize` as a literal expression with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    serialize_with_options(&value, options).map(|out| out.text)
}

/// Serialize any `T: Serialize` as a beautified CommonJS module.
///
/// # Errors
///
/// Returns an error if the value cannot be converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_module<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    serialize_to_module(&value)
}

/// Serialize any `T: Serialize` as a literal expression into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_jslit::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &(1, "a")).unwrap();
/// assert_eq!(buffer, b"[1, 'a']");
/// ```
///
/// # Errors
///
/// Returns an error if conversion fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &Options::default())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if conversion fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &Options) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
