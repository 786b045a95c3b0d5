//! The two-tier symbol table: the four reserved parameter names first, then
//! the fixed math function/constant table. The table is process-wide and
//! read-only; nothing here has a lifecycle.

/// One of the four reserved evaluation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Param {
    T,
    I,
    X,
    Y,
}

impl Param {
    pub(crate) fn resolve(name: &str) -> Option<Param> {
        match name {
            "t" => Some(Param::T),
            "i" => Some(Param::I),
            "x" => Some(Param::X),
            "y" => Some(Param::Y),
            _ => None,
        }
    }
}

pub(crate) fn constant(name: &str) -> Option<f64> {
    match name {
        "PI" => Some(std::f64::consts::PI),
        "E" => Some(std::f64::consts::E),
        "LN2" => Some(std::f64::consts::LN_2),
        "LN10" => Some(std::f64::consts::LN_10),
        "LOG2E" => Some(std::f64::consts::LOG2_E),
        "LOG10E" => Some(std::f64::consts::LOG10_E),
        "SQRT2" => Some(std::f64::consts::SQRT_2),
        "SQRT1_2" => Some(std::f64::consts::FRAC_1_SQRT_2),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Exact(u8),
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuiltinId {
    Abs,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    Cbrt,
    Ceil,
    Cos,
    Cosh,
    Exp,
    Expm1,
    Floor,
    Log,
    Log10,
    Log1p,
    Log2,
    Round,
    Sign,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    Trunc,

    Atan2,
    Pow,

    Min,
    Max,
    Hypot,
}

impl BuiltinId {
    pub(crate) fn resolve(name: &str) -> Option<BuiltinId> {
        match name {
            "abs" => Some(BuiltinId::Abs),
            "acos" => Some(BuiltinId::Acos),
            "acosh" => Some(BuiltinId::Acosh),
            "asin" => Some(BuiltinId::Asin),
            "asinh" => Some(BuiltinId::Asinh),
            "atan" => Some(BuiltinId::Atan),
            "atanh" => Some(BuiltinId::Atanh),
            "cbrt" => Some(BuiltinId::Cbrt),
            "ceil" => Some(BuiltinId::Ceil),
            "cos" => Some(BuiltinId::Cos),
            "cosh" => Some(BuiltinId::Cosh),
            "exp" => Some(BuiltinId::Exp),
            "expm1" => Some(BuiltinId::Expm1),
            "floor" => Some(BuiltinId::Floor),
            "log" => Some(BuiltinId::Log),
            "log10" => Some(BuiltinId::Log10),
            "log1p" => Some(BuiltinId::Log1p),
            "log2" => Some(BuiltinId::Log2),
            "round" => Some(BuiltinId::Round),
            "sign" => Some(BuiltinId::Sign),
            "sin" => Some(BuiltinId::Sin),
            "sinh" => Some(BuiltinId::Sinh),
            "sqrt" => Some(BuiltinId::Sqrt),
            "tan" => Some(BuiltinId::Tan),
            "tanh" => Some(BuiltinId::Tanh),
            "trunc" => Some(BuiltinId::Trunc),
            "atan2" => Some(BuiltinId::Atan2),
            "pow" => Some(BuiltinId::Pow),
            "min" => Some(BuiltinId::Min),
            "max" => Some(BuiltinId::Max),
            "hypot" => Some(BuiltinId::Hypot),
            _ => None,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            BuiltinId::Abs => "abs",
            BuiltinId::Acos => "acos",
            BuiltinId::Acosh => "acosh",
            BuiltinId::Asin => "asin",
            BuiltinId::Asinh => "asinh",
            BuiltinId::Atan => "atan",
            BuiltinId::Atanh => "atanh",
            BuiltinId::Cbrt => "cbrt",
            BuiltinId::Ceil => "ceil",
            BuiltinId::Cos => "cos",
            BuiltinId::Cosh => "cosh",
            BuiltinId::Exp => "exp",
            BuiltinId::Expm1 => "expm1",
            BuiltinId::Floor => "floor",
            BuiltinId::Log => "log",
            BuiltinId::Log10 => "log10",
            BuiltinId::Log1p => "log1p",
            BuiltinId::Log2 => "log2",
            BuiltinId::Round => "round",
            BuiltinId::Sign => "sign",
            BuiltinId::Sin => "sin",
            BuiltinId::Sinh => "sinh",
            BuiltinId::Sqrt => "sqrt",
            BuiltinId::Tan => "tan",
            BuiltinId::Tanh => "tanh",
            BuiltinId::Trunc => "trunc",
            BuiltinId::Atan2 => "atan2",
            BuiltinId::Pow => "pow",
            BuiltinId::Min => "min",
            BuiltinId::Max => "max",
            BuiltinId::Hypot => "hypot",
        }
    }

    pub(crate) fn arity(self) -> Arity {
        match self {
            BuiltinId::Atan2 | BuiltinId::Pow => Arity::Exact(2),
            BuiltinId::Min | BuiltinId::Max | BuiltinId::Hypot => Arity::Variadic,
            _ => Arity::Exact(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_do_not_collide_with_the_math_table() {
        for name in ["t", "i", "x", "y"] {
            assert!(Param::resolve(name).is_some());
            assert!(constant(name).is_none());
            assert!(BuiltinId::resolve(name).is_none());
        }
    }

    #[test]
    fn resolve_and_name_round_trip() {
        for name in [
            "abs", "acos", "acosh", "asin", "asinh", "atan", "atanh", "cbrt", "ceil", "cos",
            "cosh", "exp", "expm1", "floor", "log", "log10", "log1p", "log2", "round", "sign",
            "sin", "sinh", "sqrt", "tan", "tanh", "trunc", "atan2", "pow", "min", "max", "hypot",
        ] {
            let id = BuiltinId::resolve(name).unwrap();
            assert_eq!(id.name(), name);
        }
        assert!(BuiltinId::resolve("random").is_none());
    }

    #[test]
    fn arities() {
        assert_eq!(BuiltinId::Sin.arity(), Arity::Exact(1));
        assert_eq!(BuiltinId::Pow.arity(), Arity::Exact(2));
        assert_eq!(BuiltinId::Min.arity(), Arity::Variadic);
    }

    #[test]
    fn constants_match_the_host_table() {
        assert_eq!(constant("PI"), Some(std::f64::consts::PI));
        assert_eq!(constant("SQRT1_2"), Some(std::f64::consts::FRAC_1_SQRT_2));
        assert!(constant("TAU").is_none());
    }
}
