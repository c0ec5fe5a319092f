//! Template-driven rendering of grouped binding records into Rust source.
//!
//! The shipped template renders a generated-file header, the group's import
//! lines, one trait of generic (`Self`-typed) method signatures with
//! `unimplemented!` default bodies, and one `impl` block per element kind
//! whose methods forward to the corresponding `cblas_sys` symbol using the
//! call-site cast expressions.
//!
//! ## Modules
//!
//! - [`data`] — the four-key template data contract
//! - [`error`] — rendering error types

pub mod data;
pub mod error;

use tera::{Context, Tera};

pub use data::{ArgSig, FunctionSig, KindSection, RenderData};
pub use error::{RenderError, Result};

/// The template registered under this name renders one output group.
const SCALAR_TEMPLATE: &str = "scalar.rs";

/// A configured template engine for binding output.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Build a renderer with the embedded template registered.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(SCALAR_TEMPLATE, include_str!("../templates/scalar.rs.tera"))?;
        Ok(Renderer { tera })
    }

    /// Render one output group to Rust source text.
    ///
    /// Rendering is deterministic: identical data produces byte-identical
    /// output.
    pub fn render(&self, trait_name: &str, doc: &str, data: &RenderData) -> Result<String> {
        let mut context = Context::from_serialize(data)?;
        context.insert("trait_name", trait_name);
        context.insert("doc", doc);
        let rendered = self.tera.render(SCALAR_TEMPLATE, &context)?;
        Ok(rendered)
    }
}
