//! Type mapping: the three renderings derived per argument.
//!
//! For each `(role, raw type, argument name, routine name)` this module
//! produces the concrete per-element-kind type, the generic `Self`-typed
//! placeholder, and the call-site cast expression that passes a safely-typed
//! value into the fixed C ABI. Return types get their own mapping with the
//! norm/sum and real-dot special cases.

use crate::error::{CoreError, Result};
use crate::role::{classify, Role};

/// Fixed raw-type table for arguments outside the role-driven paths.
/// Unmatched raw types pass through unchanged.
const RAW_TYPE_TABLE: &[(&str, &str)] = &[
    ("c_int", "i32"),
    ("c_float", "f32"),
    ("c_double", "f64"),
    ("*const c_int", "i32"),
    ("*mut c_int", "*mut i32"),
    ("*const c_float", "*const f32"),
    ("*mut c_float", "*mut f32"),
    ("*const c_double", "*const f64"),
    ("*mut c_double", "*mut f64"),
    ("*const c_float_complex", "*const [f32; 2]"),
    ("*mut c_float_complex", "*mut Complex<f32>"),
    ("*const c_double_complex", "*const [f64; 2]"),
    ("*mut c_double_complex", "*mut Complex<f64>"),
];

fn table_lookup(raw: &str) -> String {
    RAW_TYPE_TABLE
        .iter()
        .find(|(key, _)| *key == raw)
        .map(|(_, mapped)| (*mapped).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// The element type a raw C type string names, probed by substring: the raw
/// corpus only distinguishes `float` vs `double` and complex vs real.
fn element_of(raw: &str) -> &'static str {
    match (raw.contains("complex"), raw.contains("float")) {
        (true, true) => "Complex<f32>",
        (true, false) => "Complex<f64>",
        (false, true) => "f32",
        (false, false) => "f64",
    }
}

/// Concrete Rust type for an argument.
///
/// A `ScalarOfElementType` behind a `*mut` pointer carries a leading `mut `
/// marker; the renderer moves it onto the parameter name, so `mut f32` never
/// appears as a type in output.
pub fn concrete_type(raw: &str, argument_name: &str, routine_name: &str) -> String {
    let raw = raw.trim();

    // Dot accumulators are output pointers to the complex element type.
    if argument_name.contains("dot") {
        return if raw.contains("float") {
            "*mut Complex<f32>".to_string()
        } else {
            "*mut Complex<f64>".to_string()
        };
    }

    match classify(argument_name, routine_name) {
        Role::Array if raw.contains("*const") => format!("*const {}", element_of(raw)),
        Role::Array if raw.contains("*mut") => format!("*mut {}", element_of(raw)),
        Role::ScalarOfElementType => {
            if raw.starts_with("*mut") {
                format!("mut {}", element_of(raw))
            } else {
                element_of(raw).to_string()
            }
        }
        _ => table_lookup(raw),
    }
}

/// Generic placeholder type for an argument.
pub fn generic_type(raw: &str, argument_name: &str, routine_name: &str) -> String {
    let raw = raw.trim();

    if argument_name.contains("dot") {
        return "*mut Self".to_string();
    }

    match classify(argument_name, routine_name) {
        Role::Array => {
            if raw.contains("mut") {
                "*mut Self".to_string()
            } else {
                "*const Self".to_string()
            }
        }
        Role::RealScalar => "Self::Real".to_string(),
        Role::ScalarOfElementType => "Self".to_string(),
        _ => {
            if raw.contains("c_int") {
                "i32".to_string()
            } else {
                concrete_type(raw, argument_name, routine_name)
            }
        }
    }
}

/// Concrete return type; return position uses the raw-type table only.
pub fn concrete_return(raw: &str) -> String {
    table_lookup(raw.trim())
}

/// Generic return type, with the return-position special cases: norm/sum
/// routines return the real component, the real dot products return `Self`.
/// These take precedence over the general role rules.
pub fn generic_return(raw: &str, routine_name: &str) -> String {
    if routine_name.contains("nrm2") || routine_name.contains("asum") {
        return "Self::Real".to_string();
    }
    if routine_name.contains("sdot") || routine_name.contains("ddot") {
        return "Self".to_string();
    }
    generic_type(raw, "return", routine_name)
}

/// Call-site cast expression passing a generically-typed value to the C ABI.
///
/// An `Unknown` role reaching this stage is fatal: it means the naming
/// tables are incomplete for a routine new to the corpus.
pub fn call_expr(argument_name: &str, raw: &str, routine_name: &str) -> Result<String> {
    let raw = raw.trim();
    match classify(argument_name, routine_name) {
        Role::Integer => Ok(argument_name.to_string()),
        Role::Array => {
            let ptr = if raw.contains("mut") { "*mut" } else { "*const" };
            Ok(format!("{argument_name} as {ptr} _"))
        }
        Role::ScalarOfElementType => {
            if raw.contains("complex") {
                if argument_name.contains("dot") {
                    Ok(format!("{argument_name} as *mut _"))
                } else if raw.contains("mut") {
                    Ok(format!("&mut {argument_name} as *mut _ as *mut _"))
                } else {
                    Ok(format!("&{argument_name} as *const _ as *const _"))
                }
            } else {
                Ok(argument_name.to_string())
            }
        }
        Role::RealScalar | Role::EnumOption => Ok(argument_name.to_string()),
        Role::Unknown => Err(CoreError::UnclassifiedArgument {
            argument: argument_name.to_string(),
            raw_type: raw.to_string(),
            routine: routine_name.to_string(),
        }),
    }
}
