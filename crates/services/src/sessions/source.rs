use std::collections::VecDeque;

use flipp_core::model::{Operation, Problem, Range};
use flipp_core::{Hint, generate_hint, generate_problem};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Where a session gets its problems and hints from.
pub trait ProblemSource: Send {
    fn next_problem(&mut self, operation: Operation, range: Range) -> Problem;

    fn hint(&mut self, operation: Operation) -> Hint {
        generate_hint(operation, &mut rand::rng())
    }
}

/// Uniformly random problems from a seedable generator.
pub struct RandomProblems {
    rng: StdRng,
}

impl RandomProblems {
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, entropy-backed otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os_rng, Self::seeded)
    }
}

impl ProblemSource for RandomProblems {
    fn next_problem(&mut self, operation: Operation, range: Range) -> Problem {
        generate_problem(operation, range, &mut self.rng)
    }

    fn hint(&mut self, operation: Operation) -> Hint {
        generate_hint(operation, &mut self.rng)
    }
}

/// Replays queued operand pairs, then falls back to random draws.
///
/// Lets tests and demos pin exact problems ("3 + 4") while keeping the
/// construction rules of the real generator.
pub struct ScriptedProblems {
    queued: VecDeque<(i32, i32)>,
    fallback: RandomProblems,
}

impl ScriptedProblems {
    #[must_use]
    pub fn new(draws: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self {
            queued: draws.into_iter().collect(),
            fallback: RandomProblems::seeded(0),
        }
    }
}

impl ProblemSource for ScriptedProblems {
    fn next_problem(&mut self, operation: Operation, range: Range) -> Problem {
        match self.queued.pop_front() {
            Some((a, b)) => Problem::from_draw(operation, a, b),
            None => self.fallback.next_problem(operation, range),
        }
    }
}
