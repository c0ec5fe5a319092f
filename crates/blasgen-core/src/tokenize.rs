//! Depth-aware splitting of raw argument-list text into named slots.

use crate::error::{CoreError, Result};

/// One positional `name: type` slot of a declaration.
///
/// Order is semantically significant and preserved through every transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSlot {
    pub name: String,
    pub raw_type: String,
}

/// Split raw argument text on commas at nesting depth zero.
///
/// Depth counts `(` `[` `<` against their closing partners, so commas inside
/// compound types (`[f32; 2]`, `Complex<f32>`, tuples) never split a field.
/// A trailing comma yields no empty field.
pub fn split_fields(raw: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    // Trailing sentinel so the final field needs no separator in the source.
    for ch in raw.chars().chain(std::iter::once(',')) {
        if ch == ',' && depth == 0 {
            let field = current.trim();
            if !field.is_empty() {
                fields.push(field.to_string());
            }
            current.clear();
        } else {
            match ch {
                '(' | '[' | '<' => depth += 1,
                ')' | ']' | '>' => depth -= 1,
                _ => {}
            }
            current.push(ch);
        }
    }
    fields
}

/// Tokenize raw argument text into ordered `(name, type)` slots.
///
/// Each field splits at its first `:`. A field without a colon is a fatal
/// grammar error: one malformed field means the declaration grammar did not
/// match and positional correspondence for the whole record is suspect.
pub fn tokenize_args(raw: &str) -> Result<Vec<ArgumentSlot>> {
    split_fields(raw)
        .into_iter()
        .map(|field| match field.split_once(':') {
            Some((name, ty)) => Ok(ArgumentSlot {
                name: name.trim().to_string(),
                raw_type: ty.trim().to_string(),
            }),
            None => Err(CoreError::Grammar {
                detail: format!("argument `{field}` has no `name: type` split"),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_fields() {
        let slots = tokenize_args("n: c_int, alpha: c_float, x: *mut c_float").unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].name, "n");
        assert_eq!(slots[2].raw_type, "*mut c_float");
    }

    #[test]
    fn nested_commas_do_not_split() {
        let slots = tokenize_args("a: *const [f32; 2], p: (c_int, c_int), g: Complex<f32>").unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].raw_type, "*const [f32; 2]");
        assert_eq!(slots[1].raw_type, "(c_int, c_int)");
        assert_eq!(slots[2].raw_type, "Complex<f32>");
    }

    #[test]
    fn deeply_nested_generic_parameters() {
        let fields = split_fields("m: Matrix<Complex<f32>, [usize; 2]>, n: c_int");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], "m: Matrix<Complex<f32>, [usize; 2]>");
    }

    #[test]
    fn trailing_comma_yields_no_empty_slot() {
        let slots = tokenize_args("n: c_int, incx: c_int,").unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn empty_argument_list_is_empty() {
        assert!(tokenize_args("").unwrap().is_empty());
        assert!(tokenize_args("   ").unwrap().is_empty());
    }

    #[test]
    fn field_without_colon_is_fatal() {
        let err = tokenize_args("n: c_int, incx").unwrap_err();
        assert!(matches!(err, CoreError::Grammar { .. }));
    }

    #[test]
    fn first_colon_is_the_split_point() {
        let slots = tokenize_args("layout: ffi::CBLAS_LAYOUT").unwrap();
        assert_eq!(slots[0].name, "layout");
        assert_eq!(slots[0].raw_type, "ffi::CBLAS_LAYOUT");
    }
}
