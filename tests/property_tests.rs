//! Property-based tests for the evaluator and the base converter.

use multicalc::calculator::{ErrorKind, evaluate};
use multicalc::programmer::{Base, convert, render};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_base()(variant in 0..3u8) -> Base {
        match variant {
            0 => Base::Binary,
            1 => Base::Decimal,
            _ => Base::Hexadecimal,
        }
    }
}

prop_compose! {
    /// Small arithmetic expressions over integer literals.
    fn arithmetic_expression()(
        operands in prop::collection::vec(-1000i64..1000, 1..6),
        ops in prop::collection::vec(prop::sample::select(vec!["+", "-", "*", "/", "**"]), 5),
    ) -> String {
        let mut expression = format!("({})", operands[0]);
        for (operand, op) in operands[1..].iter().zip(ops) {
            expression.push_str(&format!(" {} ({})", op, operand));
        }
        expression
    }
}

proptest! {
    #[test]
    fn conversion_round_trips(value in any::<i64>(), from in arbitrary_base(), to in arbitrary_base()) {
        let rendered = render(value, to);
        let conversion = convert(&rendered, to).unwrap();
        prop_assert_eq!(conversion.decimal, value);

        // Converting from any base lands on the same three renderings.
        let via = convert(&render(value, from), from).unwrap();
        prop_assert_eq!(via, conversion);
    }

    #[test]
    fn prefixed_input_is_accepted(value in 0i64..=i64::MAX, base in arbitrary_base()) {
        let input = format!("{}{}", base.prefix(), render(value, base));
        prop_assert_eq!(convert(&input, base).unwrap().decimal, value);
    }

    #[test]
    fn integer_literals_evaluate_to_themselves(value in 0i64..1_000_000_000_000) {
        prop_assert_eq!(evaluate(&value.to_string()), Ok(value as f64));
        prop_assert_eq!(evaluate(&format!("-{}", value)), Ok(-(value as f64)));
    }

    #[test]
    fn addition_commutes(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        prop_assert_eq!(
            evaluate(&format!("{} + ({})", a, b)),
            evaluate(&format!("{} + ({})", b, a))
        );
    }

    #[test]
    fn evaluation_is_deterministic(expression in arithmetic_expression()) {
        let first = evaluate(&expression);
        let second = evaluate(&expression);
        match (&first, &second) {
            (Ok(a), Ok(b)) => prop_assert!(a == b || (a.is_nan() && b.is_nan())),
            _ => prop_assert_eq!(&first, &second),
        }
    }

    #[test]
    fn arbitrary_input_never_panics(input in ".{0,64}") {
        let _ = evaluate(&input);
    }

    #[test]
    fn unknown_characters_are_syntax_errors(prefix in "[0-9 ]{0,8}", bad in "[=;'\"\\[\\]{}!@#$&|<>?~`]") {
        let err = evaluate(&format!("{}{}", prefix, bad)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Syntax);
    }
}
