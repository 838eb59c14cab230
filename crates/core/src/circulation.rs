//! Circulation document status constants and the step transition function.
//!
//! A circulation document moves through the ordered steps of its workflow
//! one approval at a time. The transition function here is pure; reading
//! the document and persisting the outcome belong to the callers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles;
use crate::types::DbId;

/// Document is waiting for its first approval.
pub const STATUS_PENDING: &str = "pending";

/// Document has passed at least one step and is awaiting the next.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Document passed every step (terminal).
pub const STATUS_APPROVED: &str = "approved";

/// Document was rejected at some step (terminal).
pub const STATUS_REJECTED: &str = "rejected";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_APPROVED,
    STATUS_REJECTED,
];

/// Assignee used when an approval advances a document and the caller did
/// not name the next actor. The system does not resolve the next step's
/// role-holder from the user directory; it falls back to this fixed user.
pub const DEFAULT_NEXT_ASSIGNEE: DbId = 2;

/// One approval step inside a workflow's `steps` JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// 1-based position in the sequence.
    pub order: i32,
    /// Role expected to act at this step.
    pub role: String,
    /// Human-readable description (e.g. department head).
    pub description: String,
}

/// The two actions a current assignee can take on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    Approve,
    Reject,
}

impl TransitionAction {
    /// Interpret a requested target status as an action.
    ///
    /// `approved` and `in_progress` both express approval intent (the
    /// caller cannot know server-side whether the step is the last one);
    /// `rejected` expresses rejection. Anything else is invalid.
    pub fn from_status(status: &str) -> Result<Self, CoreError> {
        match status {
            STATUS_APPROVED | STATUS_IN_PROGRESS => Ok(Self::Approve),
            STATUS_REJECTED => Ok(Self::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid target status '{other}'. Must be one of: approved, in_progress, rejected"
            ))),
        }
    }
}

/// Computed outcome of a transition: the values to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: &'static str,
    pub step: i32,
    /// `None` clears the assignee (terminal states).
    pub assigned_to: Option<DbId>,
}

/// Compute the next status/step/assignee for a document.
///
/// Approval advances `current_step` by one. When the advanced step index
/// reaches the end of the workflow's step list the document finalizes to
/// `approved` with no assignee; otherwise it becomes `in_progress`,
/// assigned to `requested_assignee` or [`DEFAULT_NEXT_ASSIGNEE`].
///
/// Rejection is terminal from any step: status `rejected`, step reset to
/// 0, assignee cleared. The pre-rejection step is not retained.
///
/// Documents without a workflow pass `step_count == 0`, so the first
/// approval finalizes immediately.
pub fn next_transition(
    action: TransitionAction,
    current_step: i32,
    step_count: usize,
    requested_assignee: Option<DbId>,
) -> Transition {
    match action {
        TransitionAction::Approve => {
            let next = current_step + 1;
            if next as usize >= step_count {
                Transition {
                    status: STATUS_APPROVED,
                    step: next,
                    assigned_to: None,
                }
            } else {
                Transition {
                    status: STATUS_IN_PROGRESS,
                    step: next,
                    assigned_to: Some(requested_assignee.unwrap_or(DEFAULT_NEXT_ASSIGNEE)),
                }
            }
        }
        TransitionAction::Reject => Transition {
            status: STATUS_REJECTED,
            step: 0,
            assigned_to: None,
        },
    }
}

/// Parse a workflow's `steps` JSON column into typed steps.
pub fn parse_steps(value: &serde_json::Value) -> Result<Vec<WorkflowStep>, CoreError> {
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Malformed workflow steps: {e}")))
}

/// Validate the shape of a step list before persisting a workflow.
///
/// Checks that the list is non-empty, every order index is positive, and
/// every role is a known role name. Contiguity of the order values is not
/// verified.
pub fn validate_steps(steps: &[WorkflowStep]) -> Result<(), CoreError> {
    if steps.is_empty() {
        return Err(CoreError::Validation(
            "A workflow must have at least one step".into(),
        ));
    }
    for step in steps {
        if step.order < 1 {
            return Err(CoreError::Validation(format!(
                "Step order must be 1 or greater, got {}",
                step.order
            )));
        }
        roles::validate_role(&step.role).map_err(CoreError::Validation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(n: usize) -> Vec<WorkflowStep> {
        (1..=n as i32)
            .map(|order| WorkflowStep {
                order,
                role: roles::ROLE_MANAGER.to_string(),
                description: format!("step {order}"),
            })
            .collect()
    }

    #[test]
    fn test_approve_advances_one_step() {
        let t = next_transition(TransitionAction::Approve, 0, 3, None);
        assert_eq!(t.status, STATUS_IN_PROGRESS);
        assert_eq!(t.step, 1);
        assert_eq!(t.assigned_to, Some(DEFAULT_NEXT_ASSIGNEE));
    }

    #[test]
    fn test_approve_keeps_requested_assignee() {
        let t = next_transition(TransitionAction::Approve, 0, 3, Some(7));
        assert_eq!(t.assigned_to, Some(7));
    }

    #[test]
    fn test_final_approval_finalizes_and_clears_assignee() {
        let t = next_transition(TransitionAction::Approve, 2, 3, Some(7));
        assert_eq!(t.status, STATUS_APPROVED);
        assert_eq!(t.step, 3);
        assert_eq!(t.assigned_to, None);
    }

    #[test]
    fn test_two_step_workflow_approves_in_two_actions() {
        let first = next_transition(TransitionAction::Approve, 0, 2, None);
        assert_eq!(first.status, STATUS_IN_PROGRESS);
        let second = next_transition(TransitionAction::Approve, first.step, 2, None);
        assert_eq!(second.status, STATUS_APPROVED);
        assert_eq!(second.step, 2);
    }

    #[test]
    fn test_reject_resets_step_from_anywhere() {
        for current in [0, 1, 5] {
            let t = next_transition(TransitionAction::Reject, current, 3, Some(7));
            assert_eq!(t.status, STATUS_REJECTED);
            assert_eq!(t.step, 0);
            assert_eq!(t.assigned_to, None);
        }
    }

    #[test]
    fn test_no_workflow_approves_immediately() {
        let t = next_transition(TransitionAction::Approve, 0, 0, None);
        assert_eq!(t.status, STATUS_APPROVED);
        assert_eq!(t.assigned_to, None);
    }

    #[test]
    fn test_action_from_status() {
        assert_eq!(
            TransitionAction::from_status(STATUS_APPROVED).unwrap(),
            TransitionAction::Approve
        );
        assert_eq!(
            TransitionAction::from_status(STATUS_IN_PROGRESS).unwrap(),
            TransitionAction::Approve
        );
        assert_eq!(
            TransitionAction::from_status(STATUS_REJECTED).unwrap(),
            TransitionAction::Reject
        );
        assert!(TransitionAction::from_status("pending").is_err());
        assert!(TransitionAction::from_status("").is_err());
    }

    #[test]
    fn test_parse_steps_roundtrip() {
        let json = serde_json::json!([
            { "order": 1, "role": "manager", "description": "department head" },
            { "order": 2, "role": "admin", "description": "personnel office" }
        ]);
        let parsed = parse_steps(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].role, "manager");
        assert_eq!(parsed[1].order, 2);
    }

    #[test]
    fn test_parse_steps_rejects_malformed() {
        let json = serde_json::json!([{ "order": "first" }]);
        assert!(parse_steps(&json).is_err());
    }

    #[test]
    fn test_validate_steps_rejects_empty_and_bad_role() {
        assert!(validate_steps(&[]).is_err());

        let mut bad = steps(1);
        bad[0].role = "director".to_string();
        assert!(validate_steps(&bad).is_err());

        assert!(validate_steps(&steps(3)).is_ok());
    }

    #[test]
    fn test_validate_steps_rejects_nonpositive_order() {
        let mut bad = steps(2);
        bad[1].order = 0;
        assert!(validate_steps(&bad).is_err());
    }
}
