//! The expense collection and how server answers are folded into it.
//!
//! Mutations are applied from the response of the call that caused them;
//! the list is never re-fetched after a create, update or delete.

use crate::api::{ApiClient, Transport};
use crate::draft::{Draft, DraftField, Submission};
use crate::error::{ApiError, ValidationError};
use crate::models::Expense;
use std::future::Future;
use std::rc::Rc;
use yew::Reducible;

/// A confirmed mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerResult {
    Created(Expense),
    Updated(Expense),
    Deleted(i64),
}

/// Folds a confirmed mutation into the collection.
///
/// Created entries are appended, updated ones replace the entry with the
/// same id in place, deleted ids are dropped. Order is otherwise preserved.
pub fn apply_server_result(mut expenses: Vec<Expense>, result: ServerResult) -> Vec<Expense> {
    match result {
        ServerResult::Created(expense) => expenses.push(expense),
        ServerResult::Updated(expense) => {
            for slot in expenses.iter_mut().filter(|slot| slot.id == expense.id) {
                *slot = expense.clone();
            }
        }
        ServerResult::Deleted(id) => expenses.retain(|expense| expense.id != id),
    }
    expenses
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workspace {
    pub expenses: Vec<Expense>,
    pub draft: Draft,
    pub loading: bool,
    /// A create or update is in flight.
    pub submitting: bool,
    pub form_error: Option<String>,
}

impl Workspace {
    pub fn fetching() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorkspaceAction {
    Loaded(Vec<Expense>),
    Edit(DraftField, String),
    BeginEdit(Expense),
    Reset,
    Rejected(String),
    SubmitStarted,
    SubmitFailed,
    Applied(ServerResult),
}

impl Reducible for Workspace {
    type Action = WorkspaceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            WorkspaceAction::Loaded(expenses) => {
                next.expenses = expenses;
                next.loading = false;
            }
            WorkspaceAction::Edit(field, value) => next.draft.set(field, value),
            WorkspaceAction::BeginEdit(expense) => {
                next.draft = Draft::from_expense(&expense);
                next.form_error = None;
            }
            WorkspaceAction::Reset => {
                next.draft = Draft::default();
                next.form_error = None;
            }
            WorkspaceAction::Rejected(message) => next.form_error = Some(message),
            WorkspaceAction::SubmitStarted => {
                next.submitting = true;
                next.form_error = None;
            }
            WorkspaceAction::SubmitFailed => next.submitting = false,
            WorkspaceAction::Applied(result) => {
                let resets_form = !matches!(result, ServerResult::Deleted(_));
                next.expenses = apply_server_result(next.expenses, result);
                if resets_form {
                    next.submitting = false;
                    next.draft = Draft::default();
                }
            }
        }
        Rc::new(next)
    }
}

// A 401 has already been reported by the client and ended the session.
fn log_failure(action: &str, err: &ApiError) {
    if !err.is_unauthorized() {
        log::error!("There was an error {}: {}", action, err);
    }
}

/// Initial load. A failure is logged and yields an empty list.
pub async fn fetch_expenses<T: Transport>(client: &ApiClient<T>) -> Vec<Expense> {
    match client.list_expenses().await {
        Ok(expenses) => expenses,
        Err(err) => {
            log_failure("fetching the expenses", &err);
            Vec::new()
        }
    }
}

/// Sends a validated draft. Exactly one POST or PUT is issued.
pub async fn submit<T: Transport>(
    client: &ApiClient<T>,
    submission: Submission,
) -> Option<ServerResult> {
    match submission {
        Submission::Create(payload) => match client.create_expense(&payload).await {
            Ok(created) => Some(ServerResult::Created(created)),
            Err(err) => {
                log_failure("submitting the expense", &err);
                None
            }
        },
        Submission::Update { id, payload } => match client.update_expense(id, &payload).await {
            Ok(updated) => Some(ServerResult::Updated(updated)),
            Err(err) => {
                log_failure(&format!("updating expense {}", id), &err);
                None
            }
        },
    }
}

/// Validates `draft` before anything leaves the client.
///
/// A rejected draft yields the error and no request is made. Otherwise the
/// returned future sends exactly one POST or PUT when awaited.
pub fn handle_submit<T: Transport>(
    client: &ApiClient<T>,
    draft: &Draft,
) -> Result<impl Future<Output = Option<ServerResult>>, ValidationError> {
    let submission = draft.plan()?;
    let client = client.clone();
    Ok(async move { submit(&client, submission).await })
}

pub async fn delete<T: Transport>(client: &ApiClient<T>, id: i64) -> Option<ServerResult> {
    match client.delete_expense(id).await {
        Ok(()) => Some(ServerResult::Deleted(id)),
        Err(err) => {
            log_failure(&format!("deleting expense {}", id), &err);
            None
        }
    }
}
