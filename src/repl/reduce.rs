//! Reduction step of the REPL state machine.

use crate::repl::evaluator::{response_text, Evaluator};
use crate::repl::state::ReplState;

/// User intent emitted by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The live field now holds this text.
    InputChanged(String),
    /// Evaluate the current input.
    Submit,
}

/// Options that alter how `Submit` is reduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceOptions {
    /// Treat `Submit` with an empty input as a no-op instead of evaluating "".
    pub skip_empty_submit: bool,
}

/// Produce the next state from the current one and an action.
///
/// `Submit` calls the evaluator synchronously. A failed evaluation still
/// produces an exchange whose response is the marked error text.
pub fn reduce<E>(state: ReplState, action: Action, evaluator: &mut E) -> ReplState
where
    E: Evaluator + ?Sized,
{
    reduce_with(state, action, evaluator, ReduceOptions::default())
}

/// [`reduce`] with explicit [`ReduceOptions`].
pub fn reduce_with<E>(
    state: ReplState,
    action: Action,
    evaluator: &mut E,
    options: ReduceOptions,
) -> ReplState
where
    E: Evaluator + ?Sized,
{
    match action {
        Action::InputChanged(text) => state.with_input(text),
        Action::Submit => {
            if options.skip_empty_submit && state.input().is_empty() {
                tracing::debug!("empty submit skipped");
                return state;
            }
            let request = state.input().to_string();
            let outcome = evaluator.evaluate(&request);
            if let Err(err) = &outcome {
                tracing::warn!(error = %err, "evaluation failed");
            }
            let response = response_text(outcome);
            tracing::debug!(
                request_len = request.len(),
                response_len = response.len(),
                "exchange recorded"
            );
            state.with_exchange(request, response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::repl::evaluator::{EchoEvaluator, FnEvaluator};
    use crate::testsupport::ScriptedEvaluator;

    #[test]
    fn input_changed_replaces_input_verbatim() {
        let mut eval = EchoEvaluator;
        let state = reduce(ReplState::new(), Action::InputChanged("  x ".into()), &mut eval);
        assert_eq!(state.input(), "  x ");
        let state = reduce(state, Action::InputChanged(String::new()), &mut eval);
        assert_eq!(state.input(), "");
        assert!(state.history().is_empty());
    }

    #[test]
    fn submit_records_exchange_and_clears_input() {
        let mut eval = ScriptedEvaluator::new([("1+1", "2")]);
        let state = reduce(ReplState::new(), Action::InputChanged("1+1".into()), &mut eval);
        let state = reduce(state, Action::Submit, &mut eval);
        assert_eq!(state.input(), "");
        let latest = state.history().latest().expect("exchange");
        assert_eq!(latest.command(), "1+1");
        assert_eq!(latest.response(), "2");
        assert_eq!(eval.requests(), &["1+1".to_string()]);
    }

    #[test]
    fn empty_submit_is_evaluated_by_default() {
        let mut eval = ScriptedEvaluator::new([("", "")]);
        let state = reduce(ReplState::new(), Action::Submit, &mut eval);
        assert_eq!(state.history().len(), 1);
        assert_eq!(eval.requests(), &[String::new()]);
    }

    #[test]
    fn empty_submit_can_be_skipped() {
        let mut eval = ScriptedEvaluator::new([]);
        let options = ReduceOptions {
            skip_empty_submit: true,
        };
        let state = reduce_with(ReplState::new(), Action::Submit, &mut eval, options);
        assert!(state.history().is_empty());
        assert!(eval.requests().is_empty());

        // Whitespace is not empty.
        let state = reduce_with(state, Action::InputChanged(" ".into()), &mut eval, options);
        let state = reduce_with(state, Action::Submit, &mut eval, options);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn evaluator_failure_becomes_error_response() {
        let mut eval = FnEvaluator(|_: &str| -> Result<String, EvalError> {
            Err(EvalError::Unavailable("vm crashed".into()))
        });
        let state = reduce(ReplState::new(), Action::InputChanged("boom".into()), &mut eval);
        let state = reduce(state, Action::Submit, &mut eval);
        let latest = state.history().latest().expect("exchange");
        assert_eq!(latest.command(), "boom");
        assert_eq!(latest.response(), "error: evaluator unavailable: vm crashed");
        assert_eq!(state.input(), "");
    }

    #[test]
    fn reducer_accepts_trait_objects() {
        let mut eval: Box<dyn Evaluator> = Box::new(EchoEvaluator);
        let state = reduce(ReplState::new(), Action::InputChanged("hi".into()), eval.as_mut());
        let state = reduce(state, Action::Submit, eval.as_mut());
        assert_eq!(state.history().latest().map(|e| e.response()), Some("hi"));
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn state_with(history: &[String], input: &str) -> ReplState {
            let mut eval = EchoEvaluator;
            let mut state = ReplState::new();
            for command in history {
                state = reduce(state, Action::InputChanged(command.clone()), &mut eval);
                state = reduce(state, Action::Submit, &mut eval);
            }
            reduce(state, Action::InputChanged(input.to_string()), &mut eval)
        }

        proptest! {
            #[test]
            fn input_changed_sets_input_and_keeps_history(
                history in proptest::collection::vec("[ -~]{0,8}", 0..5),
                text in "\\PC{0,24}",
            ) {
                let before = state_with(&history, "");
                let after = reduce(before.clone(), Action::InputChanged(text.clone()), &mut EchoEvaluator);
                prop_assert_eq!(after.input(), text.as_str());
                prop_assert_eq!(after.history(), before.history());
            }

            #[test]
            fn submit_prepends_one_exchange_and_clears_input(
                history in proptest::collection::vec("[ -~]{0,8}", 0..5),
                input in "\\PC{0,24}",
            ) {
                let before = state_with(&history, &input);
                let mut eval = FnEvaluator(|request: &str| -> Result<String, EvalError> {
                    Ok(format!("={request}"))
                });
                let after = reduce(before.clone(), Action::Submit, &mut eval);

                prop_assert_eq!(after.input(), "");
                prop_assert_eq!(after.history().len(), before.history().len() + 1);
                let latest = after.history().latest().expect("exchange");
                prop_assert_eq!(latest.command(), input.as_str());
                prop_assert_eq!(latest.response(), format!("={input}"));
                prop_assert!(after.history().iter().skip(1).eq(before.history().iter()));
            }
        }
    }
}
