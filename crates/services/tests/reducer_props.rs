use flipp_core::model::{Operation, Range};
use flipp_core::time::fixed_clock;
use proptest::prelude::*;
use services::sessions::{FeedbackTicket, RandomProblems, SessionState, SubmitOutcome};

#[derive(Debug, Clone)]
enum Step {
    Right,
    Wrong,
    Finish,
    Switch(Operation),
    Reset,
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Sub),
        Just(Operation::Mul),
        Just(Operation::Div),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => Just(Step::Right),
        3 => Just(Step::Wrong),
        4 => Just(Step::Finish),
        1 => arb_operation().prop_map(Step::Switch),
        1 => Just(Step::Reset),
    ]
}

fn arb_range() -> impl Strategy<Value = Range> {
    (-50i32..=50, 0i32..=60).prop_map(|(min, width)| Range::new(min, min + width).unwrap())
}

proptest! {
    #[test]
    fn scoring_rules_hold_for_any_play(
        seed in any::<u64>(),
        range in arb_range(),
        steps in prop::collection::vec(arb_step(), 1..80),
    ) {
        let mut state = SessionState::new(Box::new(RandomProblems::seeded(seed)))
            .with_clock(fixed_clock())
            .with_range(range);
        state.next_problem();
        let mut ticket: Option<FeedbackTicket> = None;

        for step in steps {
            let operation = state.operation();
            let score = state.score();
            let high_score = state.high_score();
            let streak = state.streak_for(operation);
            let archived = state.streak_history().len();
            let locked = state.is_locked();
            let answer = state.problem().unwrap().answer();

            match step {
                Step::Right | Step::Wrong => {
                    let right = matches!(step, Step::Right);
                    let raw = if right { answer } else { answer + 1 };
                    let outcome = state.submit_answer(&raw.to_string());

                    if locked {
                        prop_assert_eq!(outcome, SubmitOutcome::Locked);
                        prop_assert_eq!(state.score(), score);
                        prop_assert_eq!(state.streak_for(operation), streak);
                        continue;
                    }

                    ticket = outcome.ticket();
                    if right {
                        prop_assert!(matches!(outcome, SubmitOutcome::Correct { .. }), "expected SubmitOutcome::Correct, got {:?}", outcome);
                        prop_assert_eq!(state.score(), score + 1);
                        prop_assert_eq!(state.streak_for(operation), streak + 1);
                        prop_assert_eq!(state.streak_history().len(), archived);
                    } else {
                        let SubmitOutcome::Incorrect { flushed, .. } = outcome else {
                            return Err(TestCaseError::fail("wrong answer was not scored as a miss"));
                        };
                        prop_assert_eq!(state.score(), score.saturating_sub(1));
                        prop_assert_eq!(state.streak_for(operation), 0);
                        prop_assert_eq!(flushed.is_some(), streak > 0);
                        let expected = if streak > 0 { archived + 1 } else { archived };
                        prop_assert_eq!(state.streak_history().len(), expected.min(50));
                    }
                }
                Step::Finish => {
                    if let Some(pending) = ticket.take() {
                        state.finish_feedback(pending);
                    }
                    prop_assert!(!state.is_locked());
                }
                Step::Switch(next) => {
                    state.set_operation(next);
                    prop_assert!(!state.is_locked());
                }
                Step::Reset => {
                    let flushed = state.reset_session();
                    prop_assert!(flushed.iter().all(|record| record.value() > 0));
                    prop_assert_eq!(state.score(), 0);
                    prop_assert!(state.history().is_empty());
                }
            }

            prop_assert!(state.high_score() >= high_score);
            prop_assert!(state.high_score() >= state.score());
        }
    }
}
