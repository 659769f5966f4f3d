/// Builds a [`Value`](crate::Value) from literal-like syntax.
///
/// Every `[...]` and `{...}` allocates a new container. Any other token tree is converted
/// with `Value::from`, so an existing handle can be placed in several positions to share
/// its identity; wrap non-trivial expressions in parentheses.
///
/// ```rust
/// use serde_jslit::{js, serialize, Object};
///
/// let shared = Object::new();
/// let value = js!({
///     "a": (shared.clone()),
///     "b": (shared),
///     "list": [1, "two", null, undefined]
/// });
/// assert_eq!(
///     serialize(&value).unwrap(),
///     "{'a': {}, 'b': {}, 'list': [1, 'two', null, undefined]}"
/// );
/// ```
#[macro_export]
macro_rules! js {
    (null) => {
        $crate::Value::Null
    };

    (undefined) => {
        $crate::Value::Undefined
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::from(::std::vec::Vec::<$crate::Value>::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::from(::std::vec![$($crate::js!($elem)),*])
    };

    ({}) => {
        $crate::Value::from($crate::ObjectMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ObjectMap::new();
        $(
            object.insert($key, $crate::js!($value));
        )*
        $crate::Value::from(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
