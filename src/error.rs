/// Failure to parse source text into an expression.
///
/// Returned by [`compile`](crate::compile). `offset` is the byte position of
/// the offending token in the original source string, suitable for caret
/// placement in an editor.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[error("parse error at byte {offset}: {message}")]
pub struct CompileError {
    /// Byte offset into the source where parsing failed.
    pub offset: usize,
    /// What went wrong.
    pub message: String,
}

impl CompileError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Failure while evaluating a compiled expression.
///
/// Every runtime fault comes back through this type as an ordinary return
/// value; [`Evaluator::eval`](crate::Evaluator::eval) never panics. The caller
/// owns the policy for error values (treat as zero, skip the sample, surface
/// to the user).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum EvalError {
    /// An identifier matched neither a parameter nor the math namespace.
    #[error("unresolved identifier \"{0}\"")]
    Unresolved(String),

    /// A namespace function appeared where a number was expected.
    #[error("function \"{0}\" used as a value")]
    FunctionAsValue(String),

    /// The call target is a parameter or constant, not a function.
    #[error("\"{0}\" is not callable")]
    NotCallable(String),

    /// A fixed-arity function was called with the wrong number of arguments.
    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        /// Function name as written in the source.
        name: &'static str,
        /// Number of arguments the function takes.
        expected: u8,
        /// Number of arguments the call supplied.
        got: u8,
    },

    /// The compiled program was malformed. Indicates a compiler bug rather
    /// than a user error; still returned, never panicked.
    #[error("corrupt program: {0}")]
    Internal(&'static str),
}
