use crate::error::{CompileError, EvalError};
use crate::expression::bytecode::Program;
use crate::expression::lower::lower;
use crate::expression::parser::parse_expr;
use crate::expression::vm;

/// The four inputs for one evaluation: time, index, and the two spatial
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct EvalCtx {
    /// Elapsed time, conventionally in seconds.
    pub t: f64,
    /// Element index, conventionally a whole number.
    pub i: f64,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl EvalCtx {
    /// Bundles the four inputs in declaration order.
    pub fn new(t: f64, i: f64, x: f64, y: f64) -> Self {
        Self { t, i, x, y }
    }
}

/// A compiled expression: a pure transfer function of four numeric inputs.
///
/// Holds only immutable data, so one evaluator can be shared and invoked from
/// any number of threads without locking; per-call scratch state lives on the
/// caller's stack frame. Two evaluators compiled from the same source are
/// independent values with identical behavior.
#[derive(Debug, Clone)]
pub struct Evaluator {
    program: Program,
}

impl Evaluator {
    /// Evaluates the expression for one set of inputs.
    ///
    /// Identical inputs always produce identical results. Runtime faults
    /// (unresolved identifiers, calling a non-function, wrong argument
    /// counts) come back as `Err(`[`EvalError`]`)`; this call never panics.
    pub fn eval(&self, ctx: EvalCtx) -> Result<f64, EvalError> {
        vm::run(&self.program, [ctx.t, ctx.i, ctx.x, ctx.y])
    }
}

/// Compiles a one-line math expression into an [`Evaluator`].
///
/// The expression may use the parameters `t`, `i`, `x`, `y` and the unqualified
/// math namespace (`sin`, `floor`, `hypot`, `PI`, and friends). Malformed
/// syntax yields `Err(`[`CompileError`]`)`. An identifier that resolves to
/// nothing still compiles; lookup is a call-time affair, so the fault
/// surfaces on evaluation:
///
/// ```
/// use framefn::{EvalCtx, compile};
///
/// let f = compile("sin(t) + x").unwrap();
/// assert_eq!(f.eval(EvalCtx::new(0.0, 0.0, 0.0, 0.0)), Ok(0.0));
///
/// let f = compile("undefinedName").unwrap();
/// assert!(f.eval(EvalCtx::default()).is_err());
/// ```
#[tracing::instrument(level = "trace")]
pub fn compile(source: &str) -> Result<Evaluator, CompileError> {
    let ast = parse_expr(source)?;
    let program = lower(&ast);
    Ok(Evaluator { program })
}
