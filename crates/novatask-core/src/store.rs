use std::fmt;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::model::{
    AppState, Priority, Project, Status, Task, TaskPatch, generate_id, random_color,
};
use crate::persist::{self, StateStorage};
use crate::suggest::Suggestion;

/// Why a mutation left the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOp {
    EmptyName,
    EmptyTitle,
    NoActiveProject,
    UnknownProject(String),
    UnknownTask(String),
    AlreadyActive,
    NothingToChange,
}

impl fmt::Display for NoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoOp::EmptyName => f.write_str("project name is empty"),
            NoOp::EmptyTitle => f.write_str("task title is empty"),
            NoOp::NoActiveProject => f.write_str("no active project"),
            NoOp::UnknownProject(id) => write!(f, "unknown project {id}"),
            NoOp::UnknownTask(id) => write!(f, "unknown task {id}"),
            NoOp::AlreadyActive => f.write_str("project is already active"),
            NoOp::NothingToChange => f.write_str("nothing to change"),
        }
    }
}

/// Result of a store mutation. Applied mutations were persisted and broadcast;
/// unchanged ones were not.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Applied,
    Unchanged(NoOp),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&AppState)>;

/// Owner of the application state and its only write path.
pub struct Store {
    state: AppState,
    storage: Box<dyn StateStorage>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscriber: u64,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Store {
    /// Loads the persisted state (or the seeded default) from `storage`.
    #[tracing::instrument(skip(storage))]
    pub fn open(storage: Box<dyn StateStorage>) -> anyhow::Result<Self> {
        let state = persist::load(storage.as_ref())?;
        info!(
            projects = state.projects.len(),
            tasks = state.tasks.len(),
            "opened store"
        );
        Ok(Self::with_state(state, storage))
    }

    /// Wraps an existing state without reading or writing `storage`.
    pub fn with_state(state: AppState, storage: Box<dyn StateStorage>) -> Self {
        Self {
            state,
            storage,
            subscribers: vec![],
            next_subscriber: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Appends a project and makes it active. `color` defaults to a random `#rrggbb`
    /// token.
    #[tracing::instrument(skip(self, description), fields(name_len = name.len()))]
    pub fn add_project(&mut self, name: &str, description: &str, color: Option<String>) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return unchanged(NoOp::EmptyName);
        }

        let project = Project {
            id: generate_id(),
            name: name.to_string(),
            description: description.to_string(),
            color: color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(random_color),
        };
        info!(
            project_id = %project.id,
            color = %project.color,
            "adding project"
        );
        self.state.active_project_id = Some(project.id.clone());
        self.state.projects.push(project);
        self.commit()
    }

    /// Removes a project together with every task it owns.
    #[tracing::instrument(skip(self))]
    pub fn delete_project(&mut self, id: &str) -> Outcome {
        let Some(idx) = self.state.projects.iter().position(|p| p.id == id) else {
            return unchanged(NoOp::UnknownProject(id.to_string()));
        };

        self.state.projects.remove(idx);
        let before = self.state.tasks.len();
        self.state.tasks.retain(|task| task.project_id != id);
        let removed_tasks = before - self.state.tasks.len();

        if self.state.active_project_id.as_deref() == Some(id) {
            self.state.active_project_id = self.state.projects.first().map(|p| p.id.clone());
        }

        info!(
            removed_tasks,
            active = ?self.state.active_project_id,
            "deleted project"
        );
        self.commit()
    }

    #[tracing::instrument(skip(self))]
    pub fn select_project(&mut self, id: &str) -> Outcome {
        if self.state.project(id).is_none() {
            return unchanged(NoOp::UnknownProject(id.to_string()));
        }
        if self.state.active_project_id.as_deref() == Some(id) {
            return unchanged(NoOp::AlreadyActive);
        }

        self.state.active_project_id = Some(id.to_string());
        info!("switched active project");
        self.commit()
    }

    /// Adds a task to the active project. Without an active project this is a no-op.
    #[tracing::instrument(skip(self, title, description), fields(title_len = title.len()))]
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        priority: Priority,
        status: Status,
    ) -> Outcome {
        let Some(project_id) = self.active_project_id() else {
            return unchanged(NoOp::NoActiveProject);
        };
        let title = title.trim();
        if title.is_empty() {
            return unchanged(NoOp::EmptyTitle);
        }

        let task = new_task(project_id, title, description, priority, status);
        info!(
            task_id = %task.id,
            project_id = %task.project_id,
            %status,
            %priority,
            "adding task"
        );
        self.state.tasks.push(task);
        self.commit()
    }

    /// Merges `patch` into the matching task. Unknown ids and patches that change nothing
    /// are no-ops.
    #[tracing::instrument(skip(self, patch))]
    pub fn update_task(&mut self, task_id: &str, mut patch: TaskPatch) -> Outcome {
        let Some(task) = self.state.tasks.iter_mut().find(|task| task.id == task_id) else {
            return unchanged(NoOp::UnknownTask(task_id.to_string()));
        };

        if let Some(title) = patch.title.as_mut() {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return unchanged(NoOp::EmptyTitle);
            }
            *title = trimmed.to_string();
        }

        if !patch.apply_to(task) {
            return unchanged(NoOp::NothingToChange);
        }
        info!(
            status = %task.status,
            priority = %task.priority,
            "updated task"
        );
        self.commit()
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_task(&mut self, task_id: &str) -> Outcome {
        let Some(idx) = self.state.tasks.iter().position(|task| task.id == task_id) else {
            return unchanged(NoOp::UnknownTask(task_id.to_string()));
        };

        self.state.tasks.remove(idx);
        info!("deleted task");
        self.commit()
    }

    /// Adds every suggestion as a `todo` task of the active project, in a single write.
    #[tracing::instrument(skip(self, suggestions), fields(count = suggestions.len()))]
    pub fn apply_suggestions(&mut self, suggestions: &[Suggestion]) -> Outcome {
        let Some(project_id) = self.active_project_id() else {
            return unchanged(NoOp::NoActiveProject);
        };

        let tasks: Vec<Task> = suggestions
            .iter()
            .filter(|s| !s.title.trim().is_empty())
            .map(|s| {
                new_task(
                    project_id.clone(),
                    s.title.trim(),
                    &s.description,
                    s.priority,
                    Status::Todo,
                )
            })
            .collect();
        if tasks.is_empty() {
            return unchanged(NoOp::NothingToChange);
        }

        info!(added = tasks.len(), %project_id, "applying suggested tasks");
        self.state.tasks.extend(tasks);
        self.commit()
    }

    fn active_project_id(&self) -> Option<String> {
        self.state
            .active_project_id
            .as_ref()
            .filter(|id| self.state.project(id).is_some())
            .cloned()
    }

    /// Persists the whole state, then notifies subscribers. A failed write keeps the
    /// in-memory state.
    fn commit(&mut self) -> Outcome {
        if let Err(err) = persist::save(self.storage.as_mut(), &self.state) {
            error!(error = %format!("{err:#}"), "failed persisting state");
        }
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
        Outcome::Applied
    }
}

fn new_task(
    project_id: String,
    title: &str,
    description: &str,
    priority: Priority,
    status: Status,
) -> Task {
    Task {
        id: generate_id(),
        project_id,
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority,
        created_at: Utc::now().timestamp_millis(),
    }
}

fn unchanged(reason: NoOp) -> Outcome {
    warn!(%reason, "mutation skipped");
    Outcome::Unchanged(reason)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::persist::MemoryStorage;

    #[test]
    fn subscribers_run_once_per_applied_mutation() {
        let storage = MemoryStorage::new();
        let mut store = Store::with_state(AppState::default(), Box::new(storage.clone()));
        let calls = Rc::new(Cell::new(0));
        let id = {
            let calls = calls.clone();
            store.subscribe(move |_| calls.set(calls.get() + 1))
        };

        assert!(
            store
                .add_task("Grid System", "", Priority::Medium, Status::InProgress)
                .is_applied()
        );
        assert_eq!(
            store.delete_task("missing"),
            Outcome::Unchanged(NoOp::UnknownTask("missing".to_string()))
        );
        assert_eq!(calls.get(), 1);
        assert_eq!(storage.write_count(), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        assert!(store.select_project("2").is_applied());
        assert_eq!(calls.get(), 1);
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn blank_names_and_titles_are_rejected() {
        let mut store = Store::with_state(AppState::default(), Box::new(MemoryStorage::new()));

        assert_eq!(
            store.add_project("   ", "", None),
            Outcome::Unchanged(NoOp::EmptyName)
        );
        assert_eq!(
            store.add_task("", "details", Priority::Low, Status::Todo),
            Outcome::Unchanged(NoOp::EmptyTitle)
        );
        assert_eq!(store.state().projects.len(), 2);
        assert!(store.state().tasks.is_empty());
    }

    #[test]
    fn descriptions_are_stored_as_given() {
        let mut store = Store::with_state(AppState::default(), Box::new(MemoryStorage::new()));

        let _ = store.add_project("  Orbital  ", "  launch window\n", None);
        let _ = store.add_task(" Telemetry ", "\tdecode frames ", Priority::Low, Status::Todo);

        let project = store.state().projects.last().expect("added project");
        assert_eq!(project.name, "Orbital");
        assert_eq!(project.description, "  launch window\n");
        let task = &store.state().tasks[0];
        assert_eq!(task.title, "Telemetry");
        assert_eq!(task.description, "\tdecode frames ");
    }

    #[test]
    fn selecting_the_active_project_is_a_no_op() {
        let mut store = Store::with_state(AppState::default(), Box::new(MemoryStorage::new()));
        assert_eq!(
            store.select_project("1"),
            Outcome::Unchanged(NoOp::AlreadyActive)
        );
        assert_eq!(
            store.select_project("404"),
            Outcome::Unchanged(NoOp::UnknownProject("404".to_string()))
        );
    }
}
