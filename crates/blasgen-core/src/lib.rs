//! Core pipeline for generating typed Rust bindings from CBLAS declarations.
//!
//! A pure, single-pass batch transform: raw `extern "C"` declaration text in,
//! immutable per-routine records out. No I/O happens in this crate.
//!
//! ## Modules
//!
//! - [`extract`] — scanner for `extern "C"` declaration blocks
//! - [`tokenize`] — depth-aware argument-list splitting
//! - [`naming`] — CBLAS naming-convention decoder
//! - [`role`] — argument role classification
//! - [`typemap`] — generic/concrete/call-site type renderings
//! - [`record`] — record assembly and generic-projection deduplication

pub mod error;
pub mod extract;
pub mod naming;
pub mod record;
pub mod role;
pub mod tokenize;
pub mod typemap;

// Re-export key types for convenience
pub use error::{CoreError, Result};
pub use extract::{extract_declarations, Declaration};
pub use naming::{DecodedName, ElemKind};
pub use record::{ArgRecord, Corpus, FunctionRecord, GenericProjection};
pub use role::{classify, Role};
pub use tokenize::{tokenize_args, ArgumentSlot};

/// Parse declaration source text straight into an accumulated corpus.
pub fn parse_corpus(source: &str) -> Result<Corpus> {
    let decls = extract_declarations(source)?;
    Corpus::from_declarations(&decls)
}
