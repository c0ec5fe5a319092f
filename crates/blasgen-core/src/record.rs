//! Function records and the corpus accumulator.
//!
//! One `FunctionRecord` is assembled per declaration by composing the
//! extractor, tokenizer, naming decoder, classifier, and type mapper. The
//! `Corpus` folds records by value and deduplicates generic projections
//! structurally: the natural case is four element-kind instantiations
//! sharing one generic signature; a conflicting projection under the same
//! generic name is a data inconsistency and fails the run.

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::extract::Declaration;
use crate::naming::{DecodedName, ElemKind};
use crate::role::{classify, Role};
use crate::tokenize::tokenize_args;
use crate::typemap;

/// One classified, type-mapped argument of a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgRecord {
    pub name: String,
    pub raw_type: String,
    pub role: Role,
    pub generic_type: String,
    pub concrete_type: String,
    pub call_expr: String,
}

/// An immutable record of one declaration, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    /// Library-facing name with the `cblas_` prefix stripped.
    pub bare_name: String,
    /// Type-erased name shared across element-kind instantiations.
    pub generic_name: String,
    /// `None` for kind-independent utility routines.
    pub element_kind: Option<ElemKind>,
    /// Decoded operation mnemonic; group selection filters on this via the
    /// bare name.
    pub operation: String,
    /// Arguments in declaration order.
    pub args: Vec<ArgRecord>,
    pub raw_return: String,
    pub generic_return: String,
    pub concrete_return: String,
}

impl FunctionRecord {
    /// Assemble a record from a raw declaration.
    ///
    /// Fails on malformed argument slots, unsupported naming, and arguments
    /// that cannot be classified.
    pub fn from_declaration(decl: &Declaration) -> Result<Self> {
        let decoded = DecodedName::decode(&decl.name)?;
        let slots = tokenize_args(&decl.raw_args)?;

        let mut args = Vec::with_capacity(slots.len());
        for slot in slots {
            let role = classify(&slot.name, &decoded.bare);
            let generic_type = typemap::generic_type(&slot.raw_type, &slot.name, &decoded.bare);
            let concrete_type = typemap::concrete_type(&slot.raw_type, &slot.name, &decoded.bare);
            // Kind-less utility routines are never rendered, so their
            // arguments never reach call-expression mapping.
            let call_expr = if decoded.kind.is_some() {
                typemap::call_expr(&slot.name, &slot.raw_type, &decoded.bare)?
            } else {
                String::new()
            };
            args.push(ArgRecord {
                name: slot.name,
                raw_type: slot.raw_type,
                role,
                generic_type,
                concrete_type,
                call_expr,
            });
        }

        Ok(FunctionRecord {
            bare_name: decoded.bare.clone(),
            generic_name: decoded.generic_name,
            element_kind: decoded.kind,
            operation: decoded.operation,
            args,
            raw_return: decl.raw_return.clone(),
            generic_return: typemap::generic_return(&decl.raw_return, &decoded.bare),
            concrete_return: typemap::concrete_return(&decl.raw_return),
        })
    }

    /// The element-kind-independent signature shape of this record.
    pub fn generic_projection(&self) -> GenericProjection {
        GenericProjection {
            generic_name: self.generic_name.clone(),
            args: self
                .args
                .iter()
                .map(|a| GenericArg {
                    name: a.name.clone(),
                    ty: a.generic_type.clone(),
                })
                .collect(),
            return_type: self.generic_return.clone(),
        }
    }
}

/// One argument of a generic projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericArg {
    pub name: String,
    pub ty: String,
}

/// The `Self`-typed signature shared by all element kinds of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericProjection {
    pub generic_name: String,
    pub args: Vec<GenericArg>,
    pub return_type: String,
}

/// Accumulated records and deduplicated generic projections, in first-seen
/// order.
#[derive(Debug, Default)]
pub struct Corpus {
    records: Vec<FunctionRecord>,
    generics: Vec<GenericProjection>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the corpus, consuming and returning it.
    ///
    /// Kind-less records never project a generic signature. Identical
    /// projections under one generic name merge; a structurally different
    /// projection under the same name is fatal.
    pub fn fold(mut self, record: FunctionRecord) -> Result<Self> {
        if record.element_kind.is_some() {
            let projection = record.generic_projection();
            match self
                .generics
                .iter()
                .find(|g| g.generic_name == projection.generic_name)
            {
                Some(existing) if *existing == projection => {}
                Some(_) => {
                    return Err(CoreError::InconsistentGenericProjection {
                        generic_name: projection.generic_name,
                        routine: record.bare_name,
                    });
                }
                None => self.generics.push(projection),
            }
        }
        self.records.push(record);
        Ok(self)
    }

    /// Assemble a corpus from declarations in source order.
    pub fn from_declarations(decls: &[Declaration]) -> Result<Self> {
        decls.iter().try_fold(Corpus::new(), |corpus, decl| {
            corpus.fold(FunctionRecord::from_declaration(decl)?)
        })
    }

    /// All records in first-seen order.
    pub fn records(&self) -> &[FunctionRecord] {
        &self.records
    }

    /// Deduplicated generic projections in first-seen order.
    pub fn generics(&self) -> &[GenericProjection] {
        &self.generics
    }

    /// Records instantiated for one element kind, in first-seen order.
    pub fn of_kind(&self, kind: ElemKind) -> impl Iterator<Item = &FunctionRecord> {
        self.records
            .iter()
            .filter(move |r| r.element_kind == Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_declarations;

    fn gemm_corpus_source() -> &'static str {
        r#"
        extern "C" {
            pub fn cblas_sgemm(layout: CBLAS_LAYOUT, transa: CBLAS_TRANSPOSE, transb: CBLAS_TRANSPOSE,
                m: c_int, n: c_int, k: c_int, alpha: c_float, a: *const c_float, lda: c_int,
                b: *const c_float, ldb: c_int, beta: c_float, c: *mut c_float, ldc: c_int);
            pub fn cblas_dgemm(layout: CBLAS_LAYOUT, transa: CBLAS_TRANSPOSE, transb: CBLAS_TRANSPOSE,
                m: c_int, n: c_int, k: c_int, alpha: c_double, a: *const c_double, lda: c_int,
                b: *const c_double, ldb: c_int, beta: c_double, c: *mut c_double, ldc: c_int);
            pub fn cblas_cgemm(layout: CBLAS_LAYOUT, transa: CBLAS_TRANSPOSE, transb: CBLAS_TRANSPOSE,
                m: c_int, n: c_int, k: c_int, alpha: *const c_float_complex, a: *const c_float_complex,
                lda: c_int, b: *const c_float_complex, ldb: c_int, beta: *const c_float_complex,
                c: *mut c_float_complex, ldc: c_int);
            pub fn cblas_zgemm(layout: CBLAS_LAYOUT, transa: CBLAS_TRANSPOSE, transb: CBLAS_TRANSPOSE,
                m: c_int, n: c_int, k: c_int, alpha: *const c_double_complex, a: *const c_double_complex,
                lda: c_int, b: *const c_double_complex, ldb: c_int, beta: *const c_double_complex,
                c: *mut c_double_complex, ldc: c_int);
        }
        "#
    }

    fn gemm_corpus() -> Corpus {
        let decls = extract_declarations(gemm_corpus_source()).unwrap();
        Corpus::from_declarations(&decls).unwrap()
    }

    #[test]
    fn positional_correspondence_is_preserved() {
        let corpus = gemm_corpus();
        let record = &corpus.records()[0];
        let names: Vec<_> = record.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            ["layout", "transa", "transb", "m", "n", "k", "alpha", "a", "lda", "b", "ldb", "beta", "c", "ldc"]
        );
    }

    #[test]
    fn four_kinds_share_one_generic_projection() {
        let corpus = gemm_corpus();
        assert_eq!(corpus.records().len(), 4);
        assert_eq!(corpus.generics().len(), 1);
        let generic = &corpus.generics()[0];
        assert_eq!(generic.generic_name, "cblas_gemm");
        assert_eq!(generic.args[6].ty, "Self");
        assert_eq!(generic.args[7].ty, "*const Self");
        assert_eq!(generic.args[12].ty, "*mut Self");
    }

    #[test]
    fn per_kind_grouping_follows_the_fixed_order() {
        let corpus = gemm_corpus();
        for kind in ElemKind::ALL {
            let of_kind: Vec<_> = corpus.of_kind(kind).collect();
            assert_eq!(of_kind.len(), 1);
            assert_eq!(of_kind[0].element_kind, Some(kind));
        }
    }

    #[test]
    fn conflicting_projection_is_fatal() {
        let mut decls = extract_declarations(gemm_corpus_source()).unwrap();
        // Same generic name, deliberately mismatched argument shape.
        decls.extend(extract_declarations(
            r#"extern "C" { pub fn cblas_sgemm(n: c_int, a: *const c_float); }"#,
        ).unwrap());
        let err = Corpus::from_declarations(&decls).unwrap_err();
        assert!(matches!(err, CoreError::InconsistentGenericProjection { .. }));
    }

    #[test]
    fn kindless_record_projects_no_generic() {
        let decls = extract_declarations(
            r#"extern "C" { pub fn cblas_xerbla(p: c_int); }"#,
        )
        .unwrap();
        let corpus = Corpus::from_declarations(&decls).unwrap();
        assert_eq!(corpus.records().len(), 1);
        assert!(corpus.generics().is_empty());
        for kind in ElemKind::ALL {
            assert_eq!(corpus.of_kind(kind).count(), 0);
        }
    }

    #[test]
    fn unclassified_argument_aborts_assembly() {
        let decls = extract_declarations(
            r#"extern "C" { pub fn cblas_sgemm(workspace: *mut c_float); }"#,
        )
        .unwrap();
        let err = Corpus::from_declarations(&decls).unwrap_err();
        assert!(matches!(err, CoreError::UnclassifiedArgument { .. }));
    }

    #[test]
    fn dot_sub_record_maps_accumulator_as_output_pointer() {
        let decls = extract_declarations(
            r#"extern "C" {
                pub fn cblas_zdotu_sub(n: c_int, x: *const c_double_complex, incx: c_int,
                    y: *const c_double_complex, incy: c_int, dotu: *mut c_double_complex);
            }"#,
        )
        .unwrap();
        let corpus = Corpus::from_declarations(&decls).unwrap();
        let record = &corpus.records()[0];
        assert_eq!(record.generic_name, "cblas_dotu_sub");
        let dotu = record.args.last().unwrap();
        assert_eq!(dotu.concrete_type, "*mut Complex<f64>");
        assert_eq!(dotu.generic_type, "*mut Self");
        assert_eq!(dotu.call_expr, "dotu as *mut _");
    }
}
