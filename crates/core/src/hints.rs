//! Worked examples shown when the player asks for help.

use rand::Rng;

use crate::model::{Operation, Problem};

/// Operand bounds for add/sub examples.
const EXAMPLE_BOUND: i32 = 5;

/// Magnitude bound for mul/div examples.
const SMALL_BOUND: i32 = 4;

/// A small example problem plus plain-text steps that solve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub example: Problem,
    pub steps: Vec<String>,
}

/// Builds a fresh worked example for `operation`.
pub fn generate_hint<R: Rng + ?Sized>(operation: Operation, rng: &mut R) -> Hint {
    match operation {
        Operation::Add => {
            let a = rng.random_range(-EXAMPLE_BOUND..=EXAMPLE_BOUND);
            let b = rng.random_range(-EXAMPLE_BOUND..=EXAMPLE_BOUND);
            let example = Problem::from_draw(operation, a, b);
            let walk = if b >= 0 {
                format!("Move {b} steps to the right (adding a positive).")
            } else {
                format!(
                    "Move {} steps to the left (adding a negative is like subtracting).",
                    b.abs()
                )
            };
            let steps = vec![
                format!("Start at {a} on the number line."),
                walk,
                format!("You land on {}.", example.answer()),
            ];
            Hint { example, steps }
        }
        Operation::Sub => {
            let a = rng.random_range(-EXAMPLE_BOUND..=EXAMPLE_BOUND);
            let b = rng.random_range(-EXAMPLE_BOUND..=EXAMPLE_BOUND);
            let example = Problem::from_draw(operation, a, b);
            let mut steps = vec![format!("Start at {a}.")];
            if b >= 0 {
                steps.push(format!(
                    "Move {b} steps to the left (subtracting a positive)."
                ));
            } else {
                steps.push(format!("Move {} steps to the right.", b.abs()));
                steps.push(format!(
                    "(Subtracting a negative {b} is like adding {}!)",
                    b.abs()
                ));
            }
            steps.push(format!("You land on {}.", example.answer()));
            Hint { example, steps }
        }
        Operation::Mul => {
            let a = signed_small(rng);
            let b = signed_small(rng);
            let example = Problem::from_draw(operation, a, b);
            let steps = if a > 0 {
                vec![
                    format!("Think of this as {a} groups of {b}."),
                    format!("Add {b} together {a} times."),
                ]
            } else {
                vec![
                    "Multiplying by a negative flips the sign!".to_string(),
                    format!("First do {} × {b} = {}.", a.abs(), a.abs() * b),
                    format!("Then flip the sign to get {}.", example.answer()),
                ]
            };
            Hint { example, steps }
        }
        Operation::Div => {
            let divisor = rng.random_range(-SMALL_BOUND..=SMALL_BOUND);
            let quotient = rng.random_range(-SMALL_BOUND..=SMALL_BOUND);
            let example = Problem::from_draw(operation, divisor, quotient);
            let (dividend, divisor) = example.operands();
            let answer = example.answer();

            let sign_rule = if dividend == 0 {
                "Zero split into any number of groups is still zero.".to_string()
            } else if (dividend < 0) != (divisor < 0) {
                "Since the signs are different, the answer must be negative.".to_string()
            } else {
                "Since the signs are the same, the answer must be positive.".to_string()
            };
            let steps = vec![
                format!("Ask: \"How many {divisor}s fit into {dividend}?\""),
                sign_rule,
                format!("{} ÷ {} is {}.", dividend.abs(), divisor.abs(), answer.abs()),
                format!("So the answer is {answer}."),
            ];
            Hint { example, steps }
        }
    }
}

fn signed_small<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let magnitude = rng.random_range(1..=SMALL_BOUND);
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}
