//! CommonJS module emission.
//!
//! A single expression cannot say "these two properties are the same object". The module
//! emitter renders the graph once with reference tracking on, assigns the literal to
//! `module.exports` through a root binding, and then restores every elided repeat with an
//! alias statement:
//!
//! ```text
//! var m = module.exports = {'a': {one: true}, 'c': {}};
//! m.b = m.a;
//! m.c.d = m.a;
//! ```

use crate::engine::{Engine, Reference};
use crate::{Options, Result, Value};
use tracing::debug;

/// Renders `value` as a statement sequence. Reference tracking is always on; every other
/// setting comes from `options`.
pub(crate) fn emit(value: &Value, options: &Options) -> Result<String> {
    let options = options.clone().with_reference(true);
    let serialized = Engine::new(&options).keep_indices().run(value)?;

    let binding = options.binding.as_str();
    let mut statements = Vec::with_capacity(serialized.references.len() + 1);
    statements.push(format!(
        "var {} = module.exports = {};",
        binding, serialized.text
    ));
    statements.extend(
        serialized
            .references
            .iter()
            .map(|reference| alias(binding, reference)),
    );

    debug!(aliases = statements.len() - 1, "emitted module");
    Ok(statements.join("\n"))
}

/// `m.<path> = m.<target>;`
fn alias(binding: &str, reference: &Reference) -> String {
    format!(
        "{} = {};",
        reference.path.to_access(binding),
        reference.target.to_access(binding)
    )
}
