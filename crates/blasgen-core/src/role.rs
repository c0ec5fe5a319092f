//! Argument role classification.
//!
//! `classify` is a pure function of `(argument name, routine name)`. The
//! rules are an explicit ordered table with first-match-wins semantics:
//! routine-family overrides first, rotation-family overrides next, the
//! general name sets last. The table contents preserve the CBLAS convention
//! exactly, including the rotation `c` → real-scalar entry.

use serde::Serialize;

/// Semantic role of a declaration argument, driving its type mapping and
/// call-site cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Integer,
    Array,
    ScalarOfElementType,
    RealScalar,
    EnumOption,
    Unknown,
}

/// Routine-family overrides for arguments whose role deviates from the
/// general naming convention. Keyed by routine-name substrings; evaluated
/// top to bottom, first match wins.
const FAMILY_OVERRIDES: &[(&[&str], &[(&str, Role)])] = &[
    // Hermitian rank updates: beta (and for herk/her, alpha) are real even
    // though the elements are complex.
    (
        &["her2k", "her2"],
        &[
            ("alpha", Role::ScalarOfElementType),
            ("beta", Role::RealScalar),
        ],
    ),
    (
        &["herk"],
        &[("alpha", Role::RealScalar), ("beta", Role::RealScalar)],
    ),
    (&["her"], &[("alpha", Role::RealScalar)]),
    (
        &["hemm"],
        &[
            ("alpha", Role::ScalarOfElementType),
            ("beta", Role::ScalarOfElementType),
        ],
    ),
    // Dot-product accumulators are always the element type.
    (
        &["dotu_sub", "dotc_sub", "dot"],
        &[
            ("dotu", Role::ScalarOfElementType),
            ("dotc", Role::ScalarOfElementType),
        ],
    ),
    (
        &["cdotu", "cdotc", "zdotu", "zdotc"],
        &[("pres", Role::ScalarOfElementType)],
    ),
    (
        &["cabs1"],
        &[
            ("z", Role::ScalarOfElementType),
            ("c", Role::ScalarOfElementType),
        ],
    ),
    (
        &["sdsdot", "dsdot"],
        &[("sb", Role::ScalarOfElementType)],
    ),
    // Real scale of a complex vector: alpha is real.
    (
        &["zdscal", "csscal"],
        &[("alpha", Role::RealScalar)],
    ),
    (
        &["sscal", "dscal", "cscal", "zscal"],
        &[("alpha", Role::ScalarOfElementType)],
    ),
];

const ROTATION_ROUTINES: &[&str] = &["rotg", "rotmg", "rot", "rotm"];
const ROTATION_SCALARS: &[&str] = &["a", "b", "d1", "d2", "x1", "y1", "b1", "b2", "s"];
const ROTATION_ARRAYS: &[&str] = &["param", "p"];

const INTEGERS: &[&str] = &["m", "n", "k", "lda", "ldb", "ldc", "incx", "incy", "ku", "kl"];
const ARRAYS: &[&str] = &["x", "y", "a", "b", "c", "ap", "bp", "cp"];
const SCALARS: &[&str] = &["alpha", "beta"];
const ENUM_OPTIONS: &[&str] = &["layout", "uplo", "diag", "side", "trans", "transa", "transb"];

/// Classify an argument by its name and the routine it belongs to.
///
/// Deterministic and side-effect-free; the result depends on nothing but the
/// two names. `Unknown` signals that the tables are incomplete for a new
/// routine — it becomes fatal if the argument reaches call-expression
/// mapping.
pub fn classify(argument_name: &str, routine_name: &str) -> Role {
    let arg = argument_name.to_ascii_lowercase();
    let arg = arg.as_str();
    let routine = routine_name.to_ascii_lowercase();

    for (routines, mapping) in FAMILY_OVERRIDES {
        if routines.iter().any(|r| routine.contains(r)) {
            if let Some((_, role)) = mapping.iter().find(|(name, _)| *name == arg) {
                return *role;
            }
        }
    }

    if ROTATION_ROUTINES.iter().any(|r| routine.contains(r)) {
        if ROTATION_SCALARS.contains(&arg) {
            return Role::ScalarOfElementType;
        }
        if arg == "c" {
            return Role::RealScalar;
        }
        if ROTATION_ARRAYS.contains(&arg) {
            return Role::Array;
        }
    }

    if ENUM_OPTIONS.contains(&arg) {
        return Role::EnumOption;
    }
    if INTEGERS.contains(&arg) {
        return Role::Integer;
    }
    if ARRAYS.contains(&arg) {
        return Role::Array;
    }
    if SCALARS.contains(&arg) {
        return Role::ScalarOfElementType;
    }

    Role::Unknown
}
