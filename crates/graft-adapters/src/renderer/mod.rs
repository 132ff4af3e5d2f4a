//! Template renderer adapters.

mod hbs;

pub use hbs::HandlebarsRenderer;
