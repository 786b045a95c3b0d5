use framefn::{EvalCtx, EvalError, Evaluator, compile};

fn at(t: f64, i: f64, x: f64, y: f64) -> EvalCtx {
    EvalCtx::new(t, i, x, y)
}

#[test]
fn valid_sources_always_compile() {
    for src in [
        "0",
        "t",
        "i + 1",
        "sin(t) + x",
        "PI * x",
        "sin(t - hypot(x - 7.5, y - 7.5))",
        "x > y ? sin(t) : cos(t)",
        "-x ** 2 + !y",
        "min(max(t, 0), 1)",
        "1e-3 * .5",
        "undefinedName",
        "notAFunction(1, 2, 3)",
    ] {
        assert!(compile(src).is_ok(), "failed to compile {src:?}");
    }
}

#[test]
fn invalid_sources_fail_with_offsets() {
    let err = compile("t+").unwrap_err();
    assert_eq!(err.offset, 2);

    for src in ["", "   ", "t +* x", "(t", "sin(", "1 2", "? :", "t ? 1", "1..2"] {
        assert!(compile(src).is_err(), "expected compile failure for {src:?}");
    }
}

#[test]
fn sin_t_plus_x_is_zero_at_origin() {
    let f = compile("sin(t)+x").unwrap();
    assert_eq!(f.eval(at(0.0, 0.0, 0.0, 0.0)), Ok(0.0));
}

#[test]
fn pi_times_x_is_two_pi() {
    let f = compile("PI*x").unwrap();
    let v = f.eval(at(0.0, 0.0, 2.0, 0.0)).unwrap();
    assert!((v - 2.0 * std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn undefined_name_compiles_then_errors() {
    let f = compile("undefinedName").unwrap();
    assert_eq!(
        f.eval(EvalCtx::default()),
        Err(EvalError::Unresolved("undefinedName".to_owned()))
    );
}

#[test]
fn runtime_faults_are_values_not_panics() {
    for (src, want_err) in [
        ("blorp", true),
        ("sin", true),
        ("t(1)", true),
        ("PI(1)", true),
        ("sin(1, 2)", true),
        ("pow(2)", true),
        ("blorp(1)", true),
        ("sin(1)", false),
    ] {
        let f = compile(src).unwrap();
        assert_eq!(
            f.eval(EvalCtx::default()).is_err(),
            want_err,
            "unexpected outcome for {src:?}"
        );
    }
}

#[test]
fn evaluation_is_deterministic() {
    let f = compile("sin(t * 3.7) - hypot(x - 7.5, y - 7.5) % (i + 1)").unwrap();
    let ctx = at(1.234, 17.0, 3.0, 9.0);
    let a = f.eval(ctx).unwrap();
    let b = f.eval(ctx).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn independent_evaluators_agree() {
    let src = "cos(t) * x - sin(t) * y";
    let f = compile(src).unwrap();
    let g = compile(src).unwrap();
    let ctx = at(0.8, 4.0, 2.0, 5.0);
    assert_eq!(
        f.eval(ctx).unwrap().to_bits(),
        g.eval(ctx).unwrap().to_bits()
    );
}

#[test]
fn clones_behave_identically() {
    let f = compile("tanh(t + i + x + y)").unwrap();
    let g = f.clone();
    let ctx = at(0.1, 0.2, 0.3, 0.4);
    assert_eq!(
        f.eval(ctx).unwrap().to_bits(),
        g.eval(ctx).unwrap().to_bits()
    );
}

#[test]
fn evaluator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Evaluator>();
}

#[test]
fn short_circuit_protects_the_untaken_side() {
    for (src, want) in [
        ("0 && undefinedName", 0.0),
        ("2 || undefinedName", 2.0),
        ("1 ? 5 : undefinedName", 5.0),
        ("0 ? undefinedName : 7", 7.0),
    ] {
        let f = compile(src).unwrap();
        assert_eq!(f.eval(EvalCtx::default()), Ok(want), "for {src:?}");
    }
}

#[test]
fn compile_error_display_is_actionable() {
    let err = compile("t $ x").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("parse error at byte 2"), "got {msg:?}");
}

#[test]
fn eval_ctx_round_trips_through_serde() {
    let ctx = at(1.0, 2.0, 3.0, 4.0);
    let json = serde_json::to_string(&ctx).unwrap();
    let back: EvalCtx = serde_json::from_str(&json).unwrap();
    assert_eq!(ctx, back);
}
