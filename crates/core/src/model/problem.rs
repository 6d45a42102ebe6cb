use crate::model::Operation;

/// A generated arithmetic question and its exact integer answer.
///
/// `left` and `right` are the operands exactly as they appear in the
/// question text. For division that is `dividend ÷ divisor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    operation: Operation,
    left: i64,
    right: i64,
    question: String,
    answer: i64,
}

impl Problem {
    /// Builds the problem for two drawn operands.
    ///
    /// Division treats `a` as the divisor and `b` as the quotient, so the
    /// dividend is `a * b` and the answer is always exact. A zero divisor is
    /// replaced by 1.
    #[must_use]
    pub fn from_draw(operation: Operation, a: i32, b: i32) -> Self {
        let (a, b) = (i64::from(a), i64::from(b));
        let (left, right, answer) = match operation {
            Operation::Add => (a, b, a + b),
            Operation::Sub => (a, b, a - b),
            Operation::Mul => (a, b, a * b),
            Operation::Div => {
                let divisor = if a == 0 { 1 } else { a };
                (divisor * b, divisor, b)
            }
        };

        Self {
            operation,
            left,
            right,
            question: format!("{left} {} {right}", operation.symbol()),
            answer,
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> i64 {
        self.answer
    }

    #[must_use]
    pub fn operands(&self) -> (i64, i64) {
        (self.left, self.right)
    }

    #[must_use]
    pub fn is_correct(&self, value: i64) -> bool {
        self.answer == value
    }
}
