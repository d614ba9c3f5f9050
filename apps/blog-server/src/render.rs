//! HTML rendering via an embedded minijinja environment.

use minijinja::{Environment, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// The view environment. Templates are embedded at compile time; the
/// `.html` names keep minijinja's auto-escaping on.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template("show.html", include_str!("../templates/show.html"))?;
        env.add_template("new.html", include_str!("../templates/new.html"))?;
        env.add_template("edit.html", include_str!("../templates/edit.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String, RenderError> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}
