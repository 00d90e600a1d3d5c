//! Template instantiation
//!
//! Thin wrapper over the template engine. Substitution is strict: a
//! placeholder that does not resolve to a defined value fails the render
//! instead of silently producing empty output, so missing override wiring
//! surfaces immediately.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::{Error, Result};

/// Instantiate a template against the given data.
///
/// `name` identifies the template in error reports. Fails with
/// [`Error::TemplateSyntax`] when the source does not parse and
/// [`Error::TemplateExecution`] when a referenced value is undefined or a
/// directive fails at substitution time.
pub fn instantiate<S: Serialize>(name: &str, source: &str, data: &S) -> Result<Vec<u8>> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    let template = env
        .template_from_named_str(name, source)
        .map_err(|e| Error::TemplateSyntax {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    let rendered = template.render(data).map_err(|e| Error::TemplateExecution {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    Ok(rendered.into_bytes())
}
