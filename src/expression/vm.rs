use crate::error::EvalError;
use crate::expression::bytecode::{Op, Program};
use crate::expression::namespace::{Arity, BuiltinId, Param};

/// Executes a lowered program against the four parameter values, in
/// `[t, i, x, y]` order. Every fault path returns `Err`; this function
/// never panics.
pub(crate) fn run(p: &Program, params: [f64; 4]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(16);
    let mut pc = 0usize;

    while let Some(&op) = p.ops.get(pc) {
        pc += 1;
        match op {
            Op::PushConst(idx) => {
                let v = p
                    .consts
                    .get(idx.0 as usize)
                    .copied()
                    .ok_or(EvalError::Internal("const index out of range"))?;
                stack.push(v);
            }
            Op::LoadParam(param) => stack.push(match param {
                Param::T => params[0],
                Param::I => params[1],
                Param::X => params[2],
                Param::Y => params[3],
            }),

            Op::Neg => {
                let v = pop(&mut stack)?;
                stack.push(-v);
            }
            Op::Not => {
                let v = pop(&mut stack)?;
                stack.push(if truthy(v) { 0.0 } else { 1.0 });
            }
            Op::Add => bin(&mut stack, |a, b| a + b)?,
            Op::Sub => bin(&mut stack, |a, b| a - b)?,
            Op::Mul => bin(&mut stack, |a, b| a * b)?,
            Op::Div => bin(&mut stack, |a, b| a / b)?,
            Op::Mod => bin(&mut stack, |a, b| a % b)?,
            Op::Pow => bin(&mut stack, f64::powf)?,

            Op::Eq => cmp(&mut stack, |a, b| a == b)?,
            Op::Ne => cmp(&mut stack, |a, b| a != b)?,
            Op::Lt => cmp(&mut stack, |a, b| a < b)?,
            Op::Le => cmp(&mut stack, |a, b| a <= b)?,
            Op::Gt => cmp(&mut stack, |a, b| a > b)?,
            Op::Ge => cmp(&mut stack, |a, b| a >= b)?,

            Op::Dup => {
                let v = *stack
                    .last()
                    .ok_or(EvalError::Internal("stack underflow"))?;
                stack.push(v);
            }
            Op::Pop => {
                pop(&mut stack)?;
            }
            Op::Jump(t) => pc = t.0 as usize,
            Op::JumpIfFalsy(t) => {
                if !truthy(pop(&mut stack)?) {
                    pc = t.0 as usize;
                }
            }
            Op::JumpIfTruthy(t) => {
                if truthy(pop(&mut stack)?) {
                    pc = t.0 as usize;
                }
            }

            Op::CallBuiltin { id, argc } => call_builtin(&mut stack, id, argc)?,

            Op::Fail(idx) => {
                return Err(p
                    .fails
                    .get(idx.0 as usize)
                    .cloned()
                    .unwrap_or(EvalError::Internal("fail index out of range")));
            }
        }
    }

    let result = pop(&mut stack)?;
    if !stack.is_empty() {
        return Err(EvalError::Internal("stack not settled at end of program"));
    }
    Ok(result)
}

/// Falsy is 0.0, -0.0, or NaN, per the host's numeric coercion rules.
fn truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

fn pop(stack: &mut Vec<f64>) -> Result<f64, EvalError> {
    stack.pop().ok_or(EvalError::Internal("stack underflow"))
}

fn bin(stack: &mut Vec<f64>, f: impl FnOnce(f64, f64) -> f64) -> Result<(), EvalError> {
    let b = pop(stack)?;
    let a = pop(stack)?;
    stack.push(f(a, b));
    Ok(())
}

fn cmp(stack: &mut Vec<f64>, f: impl FnOnce(f64, f64) -> bool) -> Result<(), EvalError> {
    let b = pop(stack)?;
    let a = pop(stack)?;
    stack.push(if f(a, b) { 1.0 } else { 0.0 });
    Ok(())
}

fn call_builtin(stack: &mut Vec<f64>, id: BuiltinId, argc: u8) -> Result<(), EvalError> {
    if let Arity::Exact(n) = id.arity()
        && argc != n
    {
        return Err(EvalError::Arity {
            name: id.name(),
            expected: n,
            got: argc,
        });
    }

    match id {
        BuiltinId::Abs => push1(stack, f64::abs),
        BuiltinId::Acos => push1(stack, f64::acos),
        BuiltinId::Acosh => push1(stack, f64::acosh),
        BuiltinId::Asin => push1(stack, f64::asin),
        BuiltinId::Asinh => push1(stack, f64::asinh),
        BuiltinId::Atan => push1(stack, f64::atan),
        BuiltinId::Atanh => push1(stack, f64::atanh),
        BuiltinId::Cbrt => push1(stack, f64::cbrt),
        BuiltinId::Ceil => push1(stack, f64::ceil),
        BuiltinId::Cos => push1(stack, f64::cos),
        BuiltinId::Cosh => push1(stack, f64::cosh),
        BuiltinId::Exp => push1(stack, f64::exp),
        BuiltinId::Expm1 => push1(stack, f64::exp_m1),
        BuiltinId::Floor => push1(stack, f64::floor),
        BuiltinId::Log => push1(stack, f64::ln),
        BuiltinId::Log10 => push1(stack, f64::log10),
        BuiltinId::Log1p => push1(stack, f64::ln_1p),
        BuiltinId::Log2 => push1(stack, f64::log2),
        BuiltinId::Round => push1(stack, round_half_up),
        BuiltinId::Sign => push1(stack, sign),
        BuiltinId::Sin => push1(stack, f64::sin),
        BuiltinId::Sinh => push1(stack, f64::sinh),
        BuiltinId::Sqrt => push1(stack, f64::sqrt),
        BuiltinId::Tan => push1(stack, f64::tan),
        BuiltinId::Tanh => push1(stack, f64::tanh),
        BuiltinId::Trunc => push1(stack, f64::trunc),

        BuiltinId::Atan2 => push2(stack, f64::atan2),
        BuiltinId::Pow => push2(stack, f64::powf),

        BuiltinId::Min => fold(stack, argc, f64::INFINITY, nan_min),
        BuiltinId::Max => fold(stack, argc, f64::NEG_INFINITY, nan_max),
        BuiltinId::Hypot => fold(stack, argc, 0.0, f64::hypot),
    }
}

fn push1(stack: &mut Vec<f64>, f: impl FnOnce(f64) -> f64) -> Result<(), EvalError> {
    let x = pop(stack)?;
    stack.push(f(x));
    Ok(())
}

fn push2(stack: &mut Vec<f64>, f: impl FnOnce(f64, f64) -> f64) -> Result<(), EvalError> {
    let b = pop(stack)?;
    let a = pop(stack)?;
    stack.push(f(a, b));
    Ok(())
}

/// Variadic reduction over `argc` stack values. All three variadic builtins
/// are commutative, so pop order does not matter.
fn fold(
    stack: &mut Vec<f64>,
    argc: u8,
    identity: f64,
    f: impl Fn(f64, f64) -> f64,
) -> Result<(), EvalError> {
    let mut acc = identity;
    for _ in 0..argc {
        acc = f(acc, pop(stack)?);
    }
    stack.push(acc);
    Ok(())
}

// NaN-propagating, unlike f64::min/f64::max which skip NaN operands.
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// Halfway cases round toward +inf: `round(-2.5) == -2`.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Keeps NaN and signed zero, unlike `f64::signum`.
fn sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 { x } else { x.signum() }
}
