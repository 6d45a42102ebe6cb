#![forbid(unsafe_code)]

pub mod generator;
pub mod hints;
pub mod model;
pub mod time;

pub use generator::{generate_problem, generate_problem_in_default_range};
pub use hints::{Hint, generate_hint};
pub use time::Clock;
