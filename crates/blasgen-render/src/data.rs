//! The template data contract.
//!
//! The templating collaborator receives exactly four keys per output group:
//! `imports`, `functions_generic`, `functions`, and `functions_call`. The
//! concrete and call sections are aligned index-for-index, both across kinds
//! and within each kind's function list.

use serde::Serialize;

use blasgen_core::{Corpus, ElemKind, FunctionRecord};

/// A rendered parameter: name plus whatever text goes on the right of the
/// colon (a type) or stands alone at the call site (a cast expression).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgSig {
    pub name: String,
    pub ty: String,
}

/// One function signature handed to the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSig {
    /// Bare routine name; the template derives the C symbol from it.
    pub name: String,
    /// Trait method name this signature renders under.
    pub generic_name: String,
    pub args: Vec<ArgSig>,
    /// `None` renders as no arrow at all.
    pub return_type: Option<String>,
}

/// Concrete or call-site signatures for one element kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindSection {
    /// The Rust type implementing the trait (`f32`, `Complex<f64>`, ...).
    pub kind: String,
    pub functions: Vec<FunctionSig>,
}

/// The four-key mapping consumed by the template.
#[derive(Debug, Clone, Serialize)]
pub struct RenderData {
    pub imports: Vec<String>,
    pub functions_generic: Vec<FunctionSig>,
    pub functions: Vec<KindSection>,
    pub functions_call: Vec<KindSection>,
}

impl RenderData {
    /// Assemble the template data for one output group.
    ///
    /// `operations` selects records by substring match on the bare name;
    /// `exclude` then removes exact bare names. Kind-less records never
    /// enter a group. Section order follows the fixed kind order; function
    /// order within a section is first-seen order of the corpus.
    pub fn assemble(
        corpus: &Corpus,
        imports: &[String],
        operations: &[String],
        exclude: &[String],
    ) -> Self {
        let selected: Vec<&FunctionRecord> = corpus
            .records()
            .iter()
            .filter(|r| r.element_kind.is_some())
            .filter(|r| operations.iter().any(|op| r.bare_name.contains(op.as_str())))
            .filter(|r| !exclude.iter().any(|ex| ex == &r.bare_name))
            .collect();

        // Generic section: first-seen dedup. Conflicting projections under
        // one generic name were already rejected while folding the corpus.
        let mut functions_generic: Vec<FunctionSig> = Vec::new();
        for record in &selected {
            if functions_generic.iter().any(|f| f.name == record.generic_name) {
                continue;
            }
            functions_generic.push(FunctionSig {
                name: record.generic_name.clone(),
                generic_name: record.generic_name.clone(),
                args: record
                    .args
                    .iter()
                    .map(|a| ArgSig {
                        name: a.name.clone(),
                        ty: a.generic_type.clone(),
                    })
                    .collect(),
                return_type: arrow(&record.generic_return),
            });
        }

        let mut functions = Vec::new();
        let mut functions_call = Vec::new();
        for kind in ElemKind::ALL {
            let of_kind: Vec<&&FunctionRecord> = selected
                .iter()
                .filter(|r| r.element_kind == Some(kind))
                .collect();

            functions.push(KindSection {
                kind: kind.rust_type().to_string(),
                functions: of_kind.iter().map(|r| concrete_sig(r)).collect(),
            });
            functions_call.push(KindSection {
                kind: kind.rust_type().to_string(),
                functions: of_kind.iter().map(|r| call_sig(r)).collect(),
            });
        }

        RenderData {
            imports: imports.to_vec(),
            functions_generic,
            functions,
            functions_call,
        }
    }
}

/// Unit returns render without an arrow.
fn arrow(return_type: &str) -> Option<String> {
    if return_type == "()" {
        None
    } else {
        Some(return_type.to_string())
    }
}

fn concrete_sig(record: &FunctionRecord) -> FunctionSig {
    FunctionSig {
        name: record.bare_name.clone(),
        generic_name: record.generic_name.clone(),
        args: record
            .args
            .iter()
            .map(|a| {
                // A `mut ` marker on a concrete scalar type belongs on the
                // parameter name; `mut f32` is not a type.
                match a.concrete_type.strip_prefix("mut ") {
                    Some(ty) => ArgSig {
                        name: format!("mut {}", a.name),
                        ty: ty.to_string(),
                    },
                    None => ArgSig {
                        name: a.name.clone(),
                        ty: a.concrete_type.clone(),
                    },
                }
            })
            .collect(),
        return_type: arrow(&record.concrete_return),
    }
}

fn call_sig(record: &FunctionRecord) -> FunctionSig {
    FunctionSig {
        name: record.bare_name.clone(),
        generic_name: record.generic_name.clone(),
        args: record
            .args
            .iter()
            .map(|a| ArgSig {
                name: a.name.clone(),
                ty: a.call_expr.clone(),
            })
            .collect(),
        return_type: arrow(&record.concrete_return),
    }
}
