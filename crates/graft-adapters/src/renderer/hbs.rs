//! Handlebars-based renderer for parameterized template bodies.
//!
//! Strict mode is always on: a reference to a context key that is absent
//! (an unsupplied facet, a misspelt field) fails the render and names the
//! reference instead of producing an empty string in generated code.
//!
//! HTML escaping is off; bodies are source code, and Go import paths need
//! their quotes intact.
//!
//! ## Helpers
//!
//! | Helper | Example | Output |
//! |--------|---------|--------|
//! | `lower` | `{{lower resource.kind}}` | `cronjob` |
//! | `upper` | `{{upper resource.kind}}` | `CRONJOB` |
//! | `pascal` | `{{pascal project.project_name}}` | `MyOperator` |
//! | `snake` | `{{snake resource.kind}}` | `cron_job` |
//! | `kebab` | `{{kebab resource.kind}}` | `cron-job` |
//! | `hash_fnv` | `{{hash_fnv project.repo}}` | `8-hex-digit FNV-1a` |

use handlebars::{Handlebars, handlebars_helper};
use tracing::debug;

use graft_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderContext, short_hash, to_kebab_case, to_pascal_case, to_snake_case},
    error::GraftResult,
};

handlebars_helper!(lower: |s: str| s.to_lowercase());
handlebars_helper!(upper: |s: str| s.to_uppercase());
handlebars_helper!(pascal: |s: str| to_pascal_case(s));
handlebars_helper!(snake: |s: str| to_snake_case(s));
handlebars_helper!(kebab: |s: str| to_kebab_case(s));
handlebars_helper!(hash_fnv: |s: str| short_hash(s));

/// Renderer backed by a strict, non-escaping Handlebars registry.
pub struct HandlebarsRenderer {
    hbs: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.register_helper("lower", Box::new(lower));
        hbs.register_helper("upper", Box::new(upper));
        hbs.register_helper("pascal", Box::new(pascal));
        hbs.register_helper("snake", Box::new(snake));
        hbs.register_helper("kebab", Box::new(kebab));
        hbs.register_helper("hash_fnv", Box::new(hash_fnv));
        Self { hbs }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, body: &str, context: &RenderContext) -> GraftResult<String> {
        let data = serde_json::to_value(context).map_err(|e| ApplicationError::RenderingFailed {
            reason: format!("render context is not serialisable: {e}"),
        })?;
        debug!(bytes = body.len(), "Rendering template body");

        self.hbs
            .render_template(body, &data)
            .map_err(|e| ApplicationError::RenderingFailed { reason: e.to_string() }.into())
    }
}
