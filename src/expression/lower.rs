use crate::error::EvalError;
use crate::expression::ast::{BinaryOp, Expr, UnaryOp};
use crate::expression::bytecode::{Op, OpIdx, Program};
use crate::expression::namespace::{self, BuiltinId, Param};

/// Lowering never fails: names that resolve to nothing become [`Op::Fail`]
/// so the error surfaces on evaluation, matching call-time lookup semantics.
pub(crate) fn lower(expr: &Expr) -> Program {
    let mut p = Program::new();
    lower_expr(expr, &mut p);
    p
}

fn lower_expr(e: &Expr, out: &mut Program) {
    match e {
        Expr::Num(v) => {
            let idx = out.push_const(*v);
            out.ops.push(Op::PushConst(idx));
        }
        Expr::Ident(name) => lower_ident(name, out),
        Expr::Unary { op, expr } => {
            lower_expr(expr, out);
            out.ops.push(match op {
                UnaryOp::Neg => Op::Neg,
                UnaryOp::Not => Op::Not,
            });
        }
        Expr::Binary {
            op: BinaryOp::And,
            left,
            right,
        } => {
            // `a && b` keeps a's value when a is falsy; b is never evaluated.
            lower_expr(left, out);
            out.ops.push(Op::Dup);
            let end = emit_jump(out, Op::JumpIfFalsy);
            out.ops.push(Op::Pop);
            lower_expr(right, out);
            patch_jump(out, end);
        }
        Expr::Binary {
            op: BinaryOp::Or,
            left,
            right,
        } => {
            lower_expr(left, out);
            out.ops.push(Op::Dup);
            let end = emit_jump(out, Op::JumpIfTruthy);
            out.ops.push(Op::Pop);
            lower_expr(right, out);
            patch_jump(out, end);
        }
        Expr::Binary { op, left, right } => {
            lower_expr(left, out);
            lower_expr(right, out);
            out.ops.push(match op {
                BinaryOp::Add => Op::Add,
                BinaryOp::Sub => Op::Sub,
                BinaryOp::Mul => Op::Mul,
                BinaryOp::Div => Op::Div,
                BinaryOp::Mod => Op::Mod,
                BinaryOp::Pow => Op::Pow,
                BinaryOp::Eq => Op::Eq,
                BinaryOp::Ne => Op::Ne,
                BinaryOp::Lt => Op::Lt,
                BinaryOp::Le => Op::Le,
                BinaryOp::Gt => Op::Gt,
                BinaryOp::Ge => Op::Ge,
                BinaryOp::And | BinaryOp::Or => return,
            });
        }
        Expr::Ternary {
            cond,
            then_branch,
            else_branch,
        } => {
            lower_expr(cond, out);
            let to_else = emit_jump(out, Op::JumpIfFalsy);
            lower_expr(then_branch, out);
            let to_end = emit_jump(out, Op::Jump);
            patch_jump(out, to_else);
            lower_expr(else_branch, out);
            patch_jump(out, to_end);
        }
        Expr::Call { func, args } => lower_call(func, args, out),
    }
}

fn lower_ident(name: &str, out: &mut Program) {
    if let Some(p) = Param::resolve(name) {
        out.ops.push(Op::LoadParam(p));
    } else if let Some(v) = namespace::constant(name) {
        let idx = out.push_const(v);
        out.ops.push(Op::PushConst(idx));
    } else if BuiltinId::resolve(name).is_some() {
        let idx = out.push_fail(EvalError::FunctionAsValue(name.to_owned()));
        out.ops.push(Op::Fail(idx));
    } else {
        let idx = out.push_fail(EvalError::Unresolved(name.to_owned()));
        out.ops.push(Op::Fail(idx));
    }
}

fn lower_call(func: &str, args: &[Expr], out: &mut Program) {
    if let Some(id) = BuiltinId::resolve(func) {
        for a in args {
            lower_expr(a, out);
        }
        out.ops.push(Op::CallBuiltin {
            id,
            argc: u8::try_from(args.len()).unwrap_or(u8::MAX),
        });
    } else if Param::resolve(func).is_some() || namespace::constant(func).is_some() {
        // Arguments still evaluate before the call target faults.
        for a in args {
            lower_expr(a, out);
        }
        let idx = out.push_fail(EvalError::NotCallable(func.to_owned()));
        out.ops.push(Op::Fail(idx));
    } else {
        let idx = out.push_fail(EvalError::Unresolved(func.to_owned()));
        out.ops.push(Op::Fail(idx));
    }
}

fn emit_jump(out: &mut Program, op: fn(OpIdx) -> Op) -> usize {
    let at = out.ops.len();
    out.ops.push(op(OpIdx(u32::MAX)));
    at
}

fn patch_jump(out: &mut Program, at: usize) {
    let target = OpIdx(out.ops.len() as u32);
    out.ops[at] = match out.ops[at] {
        Op::Jump(_) => Op::Jump(target),
        Op::JumpIfFalsy(_) => Op::JumpIfFalsy(target),
        Op::JumpIfTruthy(_) => Op::JumpIfTruthy(target),
        other => other,
    };
}
