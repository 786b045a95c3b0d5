//! Framefn compiles one-line math expressions into per-frame transfer
//! functions.
//!
//! A parametric generator hands over a formula such as
//! `sin(t - hypot(x - 7.5, y - 7.5))` and gets back an [`Evaluator`]: a pure
//! function of four numeric inputs (`t` time, `i` index, `x`/`y` spatial
//! coordinates) that the generator then drives once per frame, pixel, or
//! sample. The contract is failure-as-value end to end:
//!
//! - [`compile`] returns `Err(`[`CompileError`]`)` for malformed source and
//!   never panics
//! - [`Evaluator::eval`] returns `Err(`[`EvalError`]`)` for runtime faults
//!   (unresolved identifiers, calling a non-function, wrong argument counts)
//!   and never panics or unwinds
//! - an [`Evaluator`] is immutable and freely shared across threads
//!
//! Identifier lookup is two-tier: the four parameter names first, then a
//! fixed math function/constant table. Lookup happens at call time, so an
//! unknown name compiles fine and errors when evaluated.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod evaluator;
pub(crate) mod expression;

pub use crate::error::{CompileError, EvalError};
pub use crate::evaluator::{EvalCtx, Evaluator, compile};
