use tracing::debug;

use crate::model::{Priority, Status};
use crate::store::{NoOp, Outcome, Store};

/// Which dialog is on screen. At most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Project,
    /// Carries the column the new task lands in.
    Task(Status),
    Share,
}

impl Modal {
    /// Only the share dialog closes on a click outside it; form dialogs keep their input.
    pub fn closes_on_backdrop(self) -> bool {
        matches!(self, Modal::Share)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Project {
        name: String,
        description: String,
    },
    Task {
        title: String,
        description: String,
        priority: Priority,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalController {
    current: Modal,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Modal {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.current != Modal::Closed
    }

    /// Opens `modal` when nothing else is open. Returns whether it opened.
    pub fn open(&mut self, modal: Modal) -> bool {
        if modal == Modal::Closed || self.is_open() {
            debug!(
                current = ?self.current,
                requested = ?modal,
                "ignoring modal open request"
            );
            return false;
        }
        debug!(?modal, "opening modal");
        self.current = modal;
        true
    }

    pub fn open_project(&mut self) -> bool {
        self.open(Modal::Project)
    }

    pub fn open_task(&mut self, status: Status) -> bool {
        self.open(Modal::Task(status))
    }

    pub fn open_share(&mut self) -> bool {
        self.open(Modal::Share)
    }

    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!(modal = ?self.current, "closing modal");
        }
        self.current = Modal::Closed;
    }

    /// Handles a click on the backdrop. Returns whether the modal closed.
    pub fn dismiss(&mut self) -> bool {
        if !self.current.closes_on_backdrop() {
            debug!(modal = ?self.current, "backdrop click ignored");
            return false;
        }
        self.cancel();
        true
    }

    /// Routes a form to the store. The modal closes only when the store applied the
    /// mutation.
    pub fn submit(&mut self, store: &mut Store, form: FormSubmission) -> Outcome {
        let outcome = match (self.current, form) {
            (Modal::Project, FormSubmission::Project { name, description }) => {
                store.add_project(&name, &description, None)
            }
            (
                Modal::Task(status),
                FormSubmission::Task {
                    title,
                    description,
                    priority,
                },
            ) => store.add_task(&title, &description, priority, status),
            (current, form) => {
                debug!(?current, ?form, "form does not match open modal");
                return Outcome::Unchanged(NoOp::NothingToChange);
            }
        };

        if outcome.is_applied() {
            self.current = Modal::Closed;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppState;
    use crate::persist::MemoryStorage;

    fn store() -> Store {
        Store::with_state(AppState::default(), Box::new(MemoryStorage::new()))
    }

    #[test]
    fn only_one_modal_opens_at_a_time() {
        let mut modal = ModalController::new();
        assert!(modal.open_share());
        assert!(!modal.open_project());
        assert_eq!(modal.current(), Modal::Share);

        modal.cancel();
        assert!(!modal.is_open());
        assert!(modal.open_task(Status::Done));
        assert_eq!(modal.current(), Modal::Task(Status::Done));
        assert!(!modal.open(Modal::Closed));
    }

    #[test]
    fn backdrop_click_closes_only_the_share_dialog() {
        let mut modal = ModalController::new();
        assert!(!modal.dismiss());

        modal.open_project();
        assert!(!modal.dismiss());
        assert_eq!(modal.current(), Modal::Project);

        modal.cancel();
        modal.open_task(Status::Todo);
        assert!(!modal.dismiss());
        assert_eq!(modal.current(), Modal::Task(Status::Todo));

        modal.cancel();
        modal.open_share();
        assert!(modal.dismiss());
        assert!(!modal.is_open());
    }

    #[test]
    fn task_form_lands_in_the_target_column() {
        let mut store = store();
        let mut modal = ModalController::new();
        modal.open_task(Status::InProgress);

        let outcome = modal.submit(
            &mut store,
            FormSubmission::Task {
                title: "Grid System".to_string(),
                description: String::new(),
                priority: Priority::Low,
            },
        );
        assert!(outcome.is_applied());
        assert!(!modal.is_open());
        assert_eq!(store.state().tasks[0].status, Status::InProgress);
    }

    #[test]
    fn rejected_submission_keeps_the_modal_open() {
        let mut store = store();
        let mut modal = ModalController::new();
        modal.open_project();

        let outcome = modal.submit(
            &mut store,
            FormSubmission::Project {
                name: " ".to_string(),
                description: String::new(),
            },
        );
        assert_eq!(outcome, Outcome::Unchanged(NoOp::EmptyName));
        assert_eq!(modal.current(), Modal::Project);
    }

    #[test]
    fn mismatched_form_is_ignored() {
        let mut store = store();
        let mut modal = ModalController::new();
        modal.open_share();

        let outcome = modal.submit(
            &mut store,
            FormSubmission::Project {
                name: "Orbital".to_string(),
                description: String::new(),
            },
        );
        assert!(!outcome.is_applied());
        assert_eq!(modal.current(), Modal::Share);
        assert_eq!(store.state().projects.len(), 2);
    }
}
