//! Dynamic value representation for JavaScript literals.
//!
//! This module provides the [`Value`] enum, a closed set of every value kind the engine
//! knows how to express as source text, together with the shared handle types that give
//! containers and special objects an identity.
//!
//! ## Identity
//!
//! Primitives (`undefined`, `null`, booleans, numbers, strings) are plain data. Containers
//! ([`Array`], [`Object`]) and special objects (regular expressions, dates, errors, buffers)
//! live behind reference-counted handles: cloning a `Value` that holds one of them clones
//! the handle, so both copies are *the same* object, exactly as assigning an object to two
//! properties does in JavaScript.
//!
//! ```rust
//! use serde_jslit::{Object, Value};
//!
//! let shared = Object::new();
//! shared.insert("one", true);
//!
//! let a = Value::from(shared.clone());
//! let b = Value::from(shared);
//! assert_eq!(a.identity(), b.identity());
//!
//! // Equal contents, different objects
//! let other = Object::new();
//! other.insert("one", true);
//! assert_ne!(a, Value::from(other));
//! ```
//!
//! Containers use interior mutability so that graphs with shared or circular edges can be
//! built after the handles exist:
//!
//! ```rust
//! use serde_jslit::{Object, Value};
//!
//! let o = Object::new();
//! let a = Object::new();
//! o.insert("a", a.clone());
//! a.insert("b", a.clone()); // o.a.b === o.a
//! ```

use crate::{syntax, Error, ObjectMap, Result};
use chrono::{DateTime, Utc};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Canonical order of the accepted regular expression flags.
const REGEXP_FLAGS: &str = "gimuys";

/// The identity of a container or special object.
///
/// Two values share an identity only when they are handles to the same allocation.
/// Identities are stable for as long as a handle to the value is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    fn of<T: ?Sized>(ptr: *const T) -> Self {
        Identity(ptr as *const () as usize)
    }
}

/// A numeric value.
///
/// Integers are kept exact; floats are printed the way JavaScript prints numbers,
/// including `NaN`, `Infinity` and exponent notation.
///
/// # Examples
///
/// ```rust
/// use serde_jslit::Number;
///
/// assert_eq!(Number::Integer(-17).to_string(), "-17");
/// assert_eq!(Number::Float(3.1415).to_string(), "3.1415");
/// assert_eq!(Number::Float(1e21).to_string(), "1e+21");
/// assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jslit::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => f.write_str(&syntax::format_f64(*fl)),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(value as i64)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Number::Integer(value as i64)
        } else {
            Number::Float(value as f64)
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// A regular expression literal: a pattern source and its flags.
///
/// Flags are validated and stored in canonical order (`g`, `i`, `m`, `u`, `y`, `s`),
/// whatever order they were supplied in.
///
/// # Examples
///
/// ```rust
/// use serde_jslit::RegExp;
///
/// let re = RegExp::new("test(?:it)?", "ig").unwrap();
/// assert_eq!(re.flags(), "gi");
/// assert_eq!(re.to_string(), "/test(?:it)?/gi");
///
/// assert!(RegExp::new("x", "gg").is_err());
/// assert!(RegExp::new("x", "q").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegExp {
    source: String,
    flags: String,
}

impl RegExp {
    /// Creates a regular expression, normalizing the flag order.
    ///
    /// An empty source is stored as `(?:)` so the literal never collapses into a comment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegExpFlags`] for an unknown or repeated flag.
    pub fn new(source: impl Into<String>, flags: &str) -> Result<Self> {
        let mut present = [false; REGEXP_FLAGS.len()];
        for flag in flags.chars() {
            let slot = REGEXP_FLAGS
                .find(flag)
                .ok_or_else(|| Error::invalid_flags(flags, &format!("unknown flag '{}'", flag)))?;
            if present[slot] {
                return Err(Error::invalid_flags(
                    flags,
                    &format!("duplicate flag '{}'", flag),
                ));
            }
            present[slot] = true;
        }

        let flags = REGEXP_FLAGS
            .chars()
            .zip(present)
            .filter_map(|(flag, on)| on.then_some(flag))
            .collect();

        let source = source.into();
        let source = if source.is_empty() {
            "(?:)".to_string()
        } else {
            source
        };

        Ok(RegExp { source, flags })
    }

    /// The pattern text between the slashes.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flags, in canonical order.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// An error object carrying an optional message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorValue {
            message: message.into(),
        }
    }

    /// The message; empty when the error was created without one.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Executable code, emitted verbatim.
///
/// The source text is trusted to be a valid expression; it is never re-indented or checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    source: String,
}

impl Function {
    pub fn new(source: impl Into<String>) -> Self {
        Function {
            source: source.into(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A shared, mutable array handle. Clones share identity.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element.
    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Replaces the element at `index`, returning the old one. Out-of-range indices are
    /// ignored and return `None`.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
        self.0
            .borrow_mut()
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    /// Returns a handle to the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrows the elements.
    ///
    /// # Panics
    ///
    /// Panics if the array is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::of(Rc::as_ptr(&self.0))
    }
}

impl From<Vec<Value>> for Array {
    fn from(elements: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(elements)))
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Contents are not printed; the graph may be circular.
        let len = self.0.try_borrow().map(|v| v.len()).ok();
        f.debug_struct("Array")
            .field("identity", &self.identity())
            .field("len", &len)
            .finish()
    }
}

/// A shared, mutable object handle. Clones share identity.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectMap>>);

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning the previous value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key, value)
    }

    /// Returns a handle to the property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrows the properties.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, ObjectMap> {
        self.0.borrow()
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::of(Rc::as_ptr(&self.0))
    }
}

impl From<ObjectMap> for Object {
    fn from(map: ObjectMap) -> Self {
        Object(Rc::new(RefCell::new(map)))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.try_borrow().map(|m| m.len()).ok();
        f.debug_struct("Object")
            .field("identity", &self.identity())
            .field("len", &len)
            .finish()
    }
}

/// Any value the engine can be asked to render.
///
/// `Foreign` stands for a host value outside the supported set (a symbol, a weak map, a
/// class instance the caller could not map). The engine rejects it with
/// [`Error::UnsupportedType`].
///
/// Equality follows JavaScript's `===`: primitives compare by value, handles by identity.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Function(Function),
    RegExp(Rc<RegExp>),
    Date(Rc<DateTime<Utc>>),
    Error(Rc<ErrorValue>),
    Buffer(Rc<Vec<u8>>),
    Array(Array),
    Object(Object),
    Foreign(String),
}

impl Value {
    /// Builds an array value from its elements.
    pub fn array<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Array::from(
            elements.into_iter().map(Into::into).collect::<Vec<_>>(),
        ))
    }

    /// Builds an object value from its entries, in insertion order.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Object::from(entries.into_iter().collect::<ObjectMap>()))
    }

    /// Builds a regular expression value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegExpFlags`] for an unknown or repeated flag.
    pub fn regexp(source: impl Into<String>, flags: &str) -> Result<Self> {
        RegExp::new(source, flags).map(|re| Value::RegExp(Rc::new(re)))
    }

    pub fn date(instant: DateTime<Utc>) -> Self {
        Value::Date(Rc::new(instant))
    }

    /// Builds an error value; an empty message renders as `new Error()`.
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(Rc::new(ErrorValue::new(message)))
    }

    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Buffer(Rc::new(bytes.into()))
    }

    pub fn function(source: impl Into<String>) -> Self {
        Value::Function(Function::new(source))
    }

    /// Builds a value of an unsupported host kind, named by `type_name`.
    pub fn foreign(type_name: impl Into<String>) -> Self {
        Value::Foreign(type_name.into())
    }

    /// Returns the identity of a container or special object; `None` for primitives and
    /// functions.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::RegExp(re) => Some(Identity::of(Rc::as_ptr(re))),
            Value::Date(d) => Some(Identity::of(Rc::as_ptr(d))),
            Value::Error(e) => Some(Identity::of(Rc::as_ptr(e))),
            Value::Buffer(b) => Some(Identity::of(Rc::as_ptr(b))),
            Value::Array(a) => Some(a.identity()),
            Value::Object(o) => Some(o.identity()),
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Function(_)
            | Value::Foreign(_) => None,
        }
    }

    /// A short name for the value's kind, as used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::RegExp(_) => "regexp",
            Value::Date(_) => "date",
            Value::Error(_) => "error",
            Value::Buffer(_) => "buffer",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Foreign(name) => name,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Foreign(a), Value::Foreign(b)) => a == b,
            _ => match (self.identity(), other.identity()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<ObjectMap> for Value {
    fn from(value: ObjectMap) -> Self {
        Value::Object(Object::from(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<RegExp> for Value {
    fn from(value: RegExp) -> Self {
        Value::RegExp(Rc::new(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::date(value)
    }
}

impl From<ErrorValue> for Value {
    fn from(value: ErrorValue) -> Self {
        Value::Error(Rc::new(value))
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}
