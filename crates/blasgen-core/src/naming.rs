//! CBLAS naming-convention decoder.
//!
//! Derives the element kind, bare operation, and type-erased generic name
//! from a routine name. The rules are an ordered cascade with first-match-wins
//! semantics; several trigger substrings overlap, so the order is load-bearing.

use serde::Serialize;

use crate::error::{CoreError, Result};

/// The four numeric element kinds a routine family is instantiated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElemKind {
    #[serde(rename = "f32")]
    F32,
    #[serde(rename = "f64")]
    F64,
    #[serde(rename = "Complex<f32>")]
    C32,
    #[serde(rename = "Complex<f64>")]
    C64,
}

impl ElemKind {
    /// Fixed iteration order for per-kind output groups.
    pub const ALL: [ElemKind; 4] = [ElemKind::F32, ElemKind::F64, ElemKind::C32, ElemKind::C64];

    /// Map a CBLAS kind letter (`s`/`d`/`c`/`z`) to its element kind.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            's' => Some(ElemKind::F32),
            'd' => Some(ElemKind::F64),
            'c' => Some(ElemKind::C32),
            'z' => Some(ElemKind::C64),
            _ => None,
        }
    }

    /// The concrete Rust type this kind instantiates `Self` with.
    pub fn rust_type(self) -> &'static str {
        match self {
            ElemKind::F32 => "f32",
            ElemKind::F64 => "f64",
            ElemKind::C32 => "Complex<f32>",
            ElemKind::C64 => "Complex<f64>",
        }
    }
}

impl std::fmt::Display for ElemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rust_type())
    }
}

/// Decoded pieces of a routine name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    /// Routine name with the `cblas_` prefix removed. Never rewritten; this
    /// is the C symbol suffix the generated call targets.
    pub bare: String,
    /// Element kind, `None` for kind-independent utility routines.
    pub kind: Option<ElemKind>,
    /// Bare operation mnemonic (`gemm`, `scal`, `argmax`, ...).
    pub operation: String,
    /// Type-erased name shared by all element-kind instantiations.
    pub generic_name: String,
}

impl DecodedName {
    /// Decode a routine name.
    ///
    /// Rule order: scale family, norm/sum family, extremum family, dot
    /// family, regular `<kind-letter><operation>`, then the kind-less
    /// fallback.
    pub fn decode(name: &str) -> Result<Self> {
        let bare = name.strip_prefix("cblas_").unwrap_or(name).to_string();

        // Scale family: sscal/dscal/cscal/zscal plus the mixed-precision
        // csscal/zdscal pair, which projects onto a distinct generic.
        if bare.ends_with("scal") {
            let kind = bare.chars().next().and_then(ElemKind::from_letter);
            let generic_name = if bare.len() == 6 {
                format!("cblas_r{}", &bare[2..])
            } else {
                format!("cblas_{}", &bare[1..])
            };
            return Ok(DecodedName {
                bare,
                kind,
                operation: "scal".to_string(),
                generic_name,
            });
        }

        // Norm / sum-of-magnitudes family. The two-letter prefix encodes both
        // the element kind and the result precision; an unknown prefix is an
        // unsupported naming scheme, not a silent fallback.
        if bare.ends_with("nrm2") || bare.ends_with("asum") {
            let prefix = bare[..2.min(bare.len())].to_string();
            let kind = match prefix.as_str() {
                "sn" | "sa" => ElemKind::F32,
                "dn" | "da" => ElemKind::F64,
                "sc" => ElemKind::C32,
                "dz" => ElemKind::C64,
                _ => {
                    return Err(CoreError::UnsupportedNaming {
                        name: bare,
                        prefix,
                    });
                }
            };
            let generic_name = if bare.len() == 5 {
                format!("cblas_{}", &bare[1..])
            } else {
                format!("cblas_{}", &bare[2..])
            };
            let operation = bare[bare.len() - 4..].to_string();
            return Ok(DecodedName {
                bare,
                kind: Some(kind),
                operation,
                generic_name,
            });
        }

        // Extremum-index family (isamax etc.): the kind letter sits behind
        // the index prefix. The bare name stays untouched; only the decoded
        // operation normalizes to the canonical `argmax`.
        if bare.contains("max") {
            let kind = bare.chars().nth(1).and_then(ElemKind::from_letter);
            let generic_name = format!("cblas_{}", &bare[1..]);
            return Ok(DecodedName {
                bare,
                kind,
                operation: "argmax".to_string(),
                generic_name,
            });
        }

        // Dot-product family: the whole bare name is the operation, so group
        // filters can select the family by substring.
        if bare.contains("dot") {
            let kind = bare.chars().next().and_then(ElemKind::from_letter);
            let generic_name = format!("cblas_{}", &bare[1..]);
            return Ok(DecodedName {
                bare: bare.clone(),
                kind,
                operation: bare,
                generic_name,
            });
        }

        // Regular `<kind-letter><operation>` names.
        let mut chars = bare.chars();
        if let Some(first) = chars.next() {
            let rest: &str = &bare[first.len_utf8()..];
            if let Some(kind) = ElemKind::from_letter(first) {
                if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Ok(DecodedName {
                        bare: bare.clone(),
                        kind: Some(kind),
                        operation: rest.to_string(),
                        generic_name: format!("cblas_{rest}"),
                    });
                }
            }
        }

        // Kind-independent utility routine.
        Ok(DecodedName {
            bare: bare.clone(),
            kind: None,
            operation: bare.clone(),
            generic_name: format!("cblas_{bare}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(name: &str) -> DecodedName {
        DecodedName::decode(name).unwrap()
    }

    #[test]
    fn scale_family() {
        let d = decode("cblas_sscal");
        assert_eq!(d.kind, Some(ElemKind::F32));
        assert_eq!(d.operation, "scal");
        assert_eq!(d.generic_name, "cblas_scal");

        let d = decode("cblas_zscal");
        assert_eq!(d.kind, Some(ElemKind::C64));
        assert_eq!(d.generic_name, "cblas_scal");
    }

    #[test]
    fn real_scale_of_complex_vector() {
        let d = decode("cblas_csscal");
        assert_eq!(d.kind, Some(ElemKind::C32));
        assert_eq!(d.operation, "scal");
        assert_eq!(d.generic_name, "cblas_rscal");

        let d = decode("cblas_zdscal");
        assert_eq!(d.kind, Some(ElemKind::C64));
        assert_eq!(d.generic_name, "cblas_rscal");
    }

    #[test]
    fn norm_and_sum_family() {
        let d = decode("cblas_snrm2");
        assert_eq!(d.kind, Some(ElemKind::F32));
        assert_eq!(d.operation, "nrm2");
        assert_eq!(d.generic_name, "cblas_nrm2");

        let d = decode("cblas_scnrm2");
        assert_eq!(d.kind, Some(ElemKind::C32));
        assert_eq!(d.generic_name, "cblas_nrm2");

        let d = decode("cblas_dzasum");
        assert_eq!(d.kind, Some(ElemKind::C64));
        assert_eq!(d.operation, "asum");
        assert_eq!(d.generic_name, "cblas_asum");

        let d = decode("cblas_dasum");
        assert_eq!(d.kind, Some(ElemKind::F64));
        assert_eq!(d.generic_name, "cblas_asum");
    }

    #[test]
    fn unknown_norm_prefix_is_fatal() {
        let err = DecodedName::decode("cblas_xynrm2").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedNaming { .. }));
    }

    #[test]
    fn extremum_family_keeps_bare_name() {
        let d = decode("cblas_isamax");
        assert_eq!(d.bare, "isamax");
        assert_eq!(d.kind, Some(ElemKind::F32));
        assert_eq!(d.operation, "argmax");
        assert_eq!(d.generic_name, "cblas_samax");

        let d = decode("cblas_izamax");
        assert_eq!(d.bare, "izamax");
        assert_eq!(d.kind, Some(ElemKind::C64));
        assert_eq!(d.operation, "argmax");
    }

    #[test]
    fn dot_family_operation_is_the_bare_name() {
        let d = decode("cblas_sdot");
        assert_eq!(d.kind, Some(ElemKind::F32));
        assert_eq!(d.operation, "sdot");
        assert_eq!(d.generic_name, "cblas_dot");

        let d = decode("cblas_zdotu_sub");
        assert_eq!(d.kind, Some(ElemKind::C64));
        assert_eq!(d.operation, "zdotu_sub");
        assert_eq!(d.generic_name, "cblas_dotu_sub");
    }

    #[test]
    fn regular_family() {
        let d = decode("cblas_sgemm");
        assert_eq!(d.kind, Some(ElemKind::F32));
        assert_eq!(d.operation, "gemm");
        assert_eq!(d.generic_name, "cblas_gemm");

        let d = decode("cblas_zherk");
        assert_eq!(d.kind, Some(ElemKind::C64));
        assert_eq!(d.operation, "herk");
        assert_eq!(d.generic_name, "cblas_herk");
    }

    #[test]
    fn fallback_has_no_kind() {
        let d = decode("cblas_xerbla");
        assert_eq!(d.kind, None);
        assert_eq!(d.operation, "xerbla");
        assert_eq!(d.generic_name, "cblas_xerbla");
    }

    #[test]
    fn kind_letter_order_is_fixed() {
        let kinds: Vec<&str> = ElemKind::ALL.iter().map(|k| k.rust_type()).collect();
        assert_eq!(kinds, ["f32", "f64", "Complex<f32>", "Complex<f64>"]);
    }
}
