use flipp_core::generate_problem;
use flipp_core::model::{Operation, Range};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Sub),
        Just(Operation::Mul),
        Just(Operation::Div),
    ]
}

fn arb_range() -> impl Strategy<Value = Range> {
    (-1_000i32..=1_000, 0i32..=2_000)
        .prop_map(|(min, width)| Range::new(min, min + width).unwrap())
}

/// Re-evaluates the question text from scratch.
fn evaluate(question: &str) -> (i64, i64, i64) {
    let parts: Vec<&str> = question.split(' ').collect();
    assert_eq!(parts.len(), 3, "unexpected question shape: {question:?}");
    let left: i64 = parts[0].parse().unwrap();
    let right: i64 = parts[2].parse().unwrap();
    let value = match parts[1] {
        "+" => left + right,
        "-" => left - right,
        "×" => left * right,
        "÷" => {
            assert_eq!(left % right, 0, "inexact division in {question:?}");
            left / right
        }
        other => panic!("unknown operator {other:?}"),
    };
    (left, right, value)
}

proptest! {
    #[test]
    fn answer_matches_question(op in arb_operation(), range in arb_range(), seed in any::<u64>()) {
        let problem = generate_problem(op, range, &mut StdRng::seed_from_u64(seed));
        let (_, _, value) = evaluate(problem.question());
        prop_assert_eq!(value, problem.answer());
        prop_assert_eq!(problem.operation(), op);
    }

    #[test]
    fn division_is_exact_and_nonzero(range in arb_range(), seed in any::<u64>()) {
        let problem = generate_problem(Operation::Div, range, &mut StdRng::seed_from_u64(seed));
        let (dividend, divisor) = problem.operands();
        prop_assert_ne!(divisor, 0);
        prop_assert_eq!(problem.answer() * divisor, dividend);
    }

    #[test]
    fn non_division_operands_come_from_range(
        op in prop_oneof![Just(Operation::Add), Just(Operation::Sub), Just(Operation::Mul)],
        range in arb_range(),
        seed in any::<u64>(),
    ) {
        let problem = generate_problem(op, range, &mut StdRng::seed_from_u64(seed));
        let (left, right) = problem.operands();
        prop_assert!(range.contains(i32::try_from(left).unwrap()));
        prop_assert!(range.contains(i32::try_from(right).unwrap()));
    }
}
