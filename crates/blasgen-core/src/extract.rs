//! Hand-written scanner for `extern "C"` declaration blocks.
//!
//! Handles the fixed prototype grammar `pub fn NAME(ARGS) [-> RET];` inside
//! `extern "C" { ... }` blocks. Does NOT attempt to parse arbitrary Rust;
//! anything in the source outside an extern block is ignored.

use crate::error::{CoreError, Result};

/// A raw extracted declaration.
///
/// The argument list and return type are kept verbatim (whitespace collapsed
/// to single spaces); no semantic interpretation happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared function name, e.g. `cblas_sgemm`.
    pub name: String,
    /// Raw argument-list text between the parentheses.
    pub raw_args: String,
    /// Raw return type, `()` when the declaration has no arrow.
    pub raw_return: String,
}

/// Extract every declaration from the `extern "C"` blocks of a source file.
///
/// A file with no extern blocks yields an empty vector, not an error.
pub fn extract_declarations(source: &str) -> Result<Vec<Declaration>> {
    let stripped = strip_comments(source);
    let mut decls = Vec::new();
    for block in extern_blocks(&stripped) {
        let normalized = normalize_whitespace(&block);
        parse_block(&normalized, &mut decls)?;
    }
    Ok(decls)
}

/// Remove `//` line comments and non-nesting `/* ... */` block comments.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    loop {
        let line = rest.find("//");
        let block = rest.find("/*");
        match (line, block) {
            (Some(l), b) if b.is_none() || l < b.unwrap() => {
                out.push_str(&rest[..l]);
                rest = match rest[l..].find('\n') {
                    Some(nl) => &rest[l + nl..],
                    None => "",
                };
            }
            (_, Some(b)) => {
                out.push_str(&rest[..b]);
                // Comment text still separates its neighbors.
                out.push(' ');
                rest = match rest[b + 2..].find("*/") {
                    Some(end) => &rest[b + 2 + end + 2..],
                    None => "",
                };
            }
            (None, None) => {
                out.push_str(rest);
                return out;
            }
            // `(Some(_), None)` always satisfies the first arm's guard.
            (Some(_), None) => unreachable!(),
        }
    }
}

/// Collect the body text of every `extern "C" { ... }` block.
fn extern_blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut rest = source;
    while let Some(pos) = rest.find("extern") {
        let after = rest[pos + "extern".len()..].trim_start();
        let Some(after) = after.strip_prefix("\"C\"") else {
            rest = &rest[pos + "extern".len()..];
            continue;
        };
        let after = after.trim_start();
        let Some(body_start) = after.strip_prefix('{') else {
            rest = &rest[pos + "extern".len()..];
            continue;
        };
        // Brace-match to the end of the block.
        let mut depth = 1usize;
        let mut end = None;
        for (i, ch) in body_start.char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        match end {
            Some(end) => {
                blocks.push(body_start[..end].to_string());
                rest = &body_start[end + 1..];
            }
            None => break,
        }
    }
    blocks
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Scan a whitespace-normalized block body for `pub fn` prototypes.
fn parse_block(block: &str, decls: &mut Vec<Declaration>) -> Result<()> {
    let mut rest = block;
    while let Some(pos) = rest.find("pub fn ") {
        let after = &rest[pos + "pub fn ".len()..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..name_len];
        if name.is_empty() {
            return Err(CoreError::Grammar {
                detail: format!("missing function name near `{}`", snippet(after)),
            });
        }
        let after_name = after[name_len..].trim_start();
        let Some(args_start) = after_name.strip_prefix('(') else {
            return Err(CoreError::Grammar {
                detail: format!("`{name}` has no parenthesized argument list"),
            });
        };

        // Match the closing paren at depth zero; argument types may nest.
        let mut depth = 1usize;
        let mut args_end = None;
        for (i, ch) in args_start.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        args_end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(args_end) = args_end else {
            return Err(CoreError::Grammar {
                detail: format!("`{name}` has an unterminated argument list"),
            });
        };
        let raw_args = args_start[..args_end].trim().to_string();
        let after_args = args_start[args_end + 1..].trim_start();

        let (raw_return, consumed) = if let Some(ret) = after_args.strip_prefix("->") {
            let Some(semi) = ret.find(';') else {
                return Err(CoreError::Grammar {
                    detail: format!("`{name}` is not terminated by `;`"),
                });
            };
            (ret[..semi].trim().to_string(), after_args.len() - ret.len() + semi + 1)
        } else if let Some(stripped) = after_args.strip_prefix(';') {
            ("()".to_string(), after_args.len() - stripped.len())
        } else {
            return Err(CoreError::Grammar {
                detail: format!("`{name}` is not terminated by `;`"),
            });
        };

        decls.push(Declaration {
            name: name.to_string(),
            raw_args,
            raw_return,
        });
        rest = &after_args[consumed..];
    }
    Ok(())
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(40) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
