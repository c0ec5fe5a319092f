//! Core pipeline error types.

/// Errors that can occur while parsing declarations and assembling records.
///
/// All four conditions are fatal: the run aborts with no output written,
/// because partially generated binding code would miscast pointers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A declaration or argument slot does not match the expected grammar.
    #[error("declaration grammar error: {detail}")]
    Grammar { detail: String },

    /// A norm/sum routine name carries a two-letter prefix outside the
    /// known naming table.
    #[error("unsupported naming scheme for `{name}`: unknown prefix `{prefix}`")]
    UnsupportedNaming { name: String, prefix: String },

    /// Role classification fell through to `Unknown` for an argument that
    /// reached call-expression mapping.
    #[error("cannot classify argument `{argument}: {raw_type}` of routine `{routine}`")]
    UnclassifiedArgument {
        argument: String,
        raw_type: String,
        routine: String,
    },

    /// Two instantiations of the same generic name projected structurally
    /// different generic signatures.
    #[error("routine `{routine}` projects generic `{generic_name}` with a conflicting signature")]
    InconsistentGenericProjection {
        generic_name: String,
        routine: String,
    },
}

/// Result type alias for core pipeline operations.
pub type Result<T> = std::result::Result<T, CoreError>;
