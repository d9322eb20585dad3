//! Jinja environment for SQL artifacts.
//!
//! Artifacts render in an empty context. Two functions are available:
//!
//! - `var(name, default=none)` reads a value from the `vars:` section of
//!   `confver.yml`
//! - `fail(msg)` aborts the render and marks the migration as failed
//!
//! ```jinja
//! {% if var("env", "dev") == "prod" %}{{ fail("not on prod") }}{% endif %}
//! INSERT INTO settings VALUES ('admin', '{{ var("admin_email") }}');
//! ```

use minijinja::{Environment, Error, ErrorKind, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Message captured from the last `fail()` call.
type FailureCapture = Arc<Mutex<Option<String>>>;

/// Outcome of a failed render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFailure {
    /// The template called `fail(msg)`
    Signalled(String),
    /// Syntax error, undefined variable, or other template error
    Template(String),
}

/// Jinja templating environment for SQL artifacts
pub struct TemplateEnvironment<'a> {
    env: Environment<'a>,
    failure: FailureCapture,
}

impl<'a> TemplateEnvironment<'a> {
    /// Create a new environment with variables from config
    pub fn new(vars: &HashMap<String, serde_yaml::Value>) -> Self {
        let mut env = Environment::new();
        let failure: FailureCapture = Arc::new(Mutex::new(None));

        let vars: HashMap<String, Value> = vars
            .iter()
            .map(|(k, v)| (k.clone(), Value::from_serialize(v)))
            .collect();
        env.add_function("var", make_var_fn(vars));
        env.add_function("fail", make_fail_fn(failure.clone()));

        Self { env, failure }
    }

    /// Render a template string with an empty context
    pub fn render(&self, template: &str) -> Result<String, RenderFailure> {
        self.reset_failure();

        match self.env.render_str(template, ()) {
            Ok(rendered) => Ok(rendered),
            Err(err) => match self.take_failure() {
                Some(message) => Err(RenderFailure::Signalled(message)),
                None => Err(RenderFailure::Template(format!("{err:#}"))),
            },
        }
    }

    fn reset_failure(&self) {
        if let Ok(mut slot) = self.failure.lock() {
            *slot = None;
        }
    }

    fn take_failure(&self) -> Option<String> {
        self.failure.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Default for TemplateEnvironment<'_> {
    fn default() -> Self {
        Self::new(&HashMap::new())
    }
}

/// Create the `var(name, default)` function.
fn make_var_fn(
    vars: HashMap<String, Value>,
) -> impl Fn(&str, Option<Value>) -> Result<Value, Error> + Send + Sync + Clone + 'static {
    move |name: &str, default: Option<Value>| {
        if let Some(value) = vars.get(name) {
            Ok(value.clone())
        } else if let Some(default_val) = default {
            Ok(default_val)
        } else {
            Err(Error::new(
                ErrorKind::UndefinedError,
                format!("Variable '{name}' is not defined and no default provided"),
            ))
        }
    }
}

/// Create the `fail(msg)` function that aborts the migration.
fn make_fail_fn(
    capture: FailureCapture,
) -> impl Fn(&str) -> Result<String, Error> + Send + Sync + Clone + 'static {
    move |msg: &str| {
        if let Ok(mut slot) = capture.lock() {
            *slot = Some(msg.to_string());
        }
        Err(Error::new(ErrorKind::InvalidOperation, msg.to_string()))
    }
}

#[cfg(test)]
#[path = "template_test.rs"]
mod tests;
