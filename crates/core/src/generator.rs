//! Random arithmetic problem generation.

use rand::Rng;

use crate::model::{Operation, Problem, Range};

/// Draws a problem for `operation` with both operands uniform over `range`.
///
/// The two operands are drawn independently. Division never divides by
/// zero and always has an exact integer answer (see [`Problem::from_draw`]).
pub fn generate_problem<R: Rng + ?Sized>(
    operation: Operation,
    range: Range,
    rng: &mut R,
) -> Problem {
    let a = rng.random_range(range.min()..=range.max());
    let b = rng.random_range(range.min()..=range.max());
    Problem::from_draw(operation, a, b)
}

/// Same as [`generate_problem`] over [`Range::GENERATOR_DEFAULT`].
pub fn generate_problem_in_default_range<R: Rng + ?Sized>(
    operation: Operation,
    rng: &mut R,
) -> Problem {
    generate_problem(operation, Range::GENERATOR_DEFAULT, rng)
}
