//! Employee hiring workflow
//!
//! ```text
//! application_received ──► interview_scheduled ──► hired
//!          │                        │
//!          └──────► not_accepted ◄──┘
//! ```
//!
//! `hired` and `not_accepted` are terminal. Setting a status to its current
//! value is not a transition and is always accepted.

use shared::models::EmployeeStatus;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid transition from {from} to {to}")]
pub struct TransitionError {
    pub from: EmployeeStatus,
    pub to: EmployeeStatus,
}

/// Statuses reachable in one step from `from`
pub fn allowed_transitions(from: EmployeeStatus) -> &'static [EmployeeStatus] {
    use EmployeeStatus::*;
    match from {
        ApplicationReceived => &[InterviewScheduled, NotAccepted],
        InterviewScheduled => &[Hired, NotAccepted],
        Hired | NotAccepted => &[],
    }
}

/// Check a status change; an unchanged status is a no-op
pub fn check_transition(from: EmployeeStatus, to: EmployeeStatus) -> Result<(), TransitionError> {
    if from == to || allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(TransitionError { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EmployeeStatus::*;

    #[test]
    fn test_full_transition_grid() {
        let allowed = [
            (ApplicationReceived, InterviewScheduled),
            (ApplicationReceived, NotAccepted),
            (InterviewScheduled, Hired),
            (InterviewScheduled, NotAccepted),
        ];

        for from in EmployeeStatus::ALL {
            for to in EmployeeStatus::ALL {
                let result = check_transition(from, to);
                if from == to || allowed.contains(&(from, to)) {
                    assert!(result.is_ok(), "{from} -> {to} should be allowed");
                } else {
                    assert_eq!(result, Err(TransitionError { from, to }));
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        assert!(allowed_transitions(Hired).is_empty());
        assert!(allowed_transitions(NotAccepted).is_empty());
    }

    #[test]
    fn test_terminal_self_transition_is_noop() {
        assert!(check_transition(Hired, Hired).is_ok());
        assert!(check_transition(NotAccepted, NotAccepted).is_ok());
    }

    #[test]
    fn test_error_message_names_both_states() {
        let err = check_transition(ApplicationReceived, Hired).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid transition from application_received to hired"
        );
    }
}
