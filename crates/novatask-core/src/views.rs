use crate::model::{AppState, Project, Status, Task};

pub fn active_project(state: &AppState) -> Option<&Project> {
    let id = state.active_project_id.as_deref()?;
    state.project(id)
}

/// Tasks of the active project in master-list order.
pub fn project_tasks(state: &AppState) -> Vec<&Task> {
    let Some(id) = state.active_project_id.as_deref() else {
        return vec![];
    };
    state
        .tasks
        .iter()
        .filter(|task| task.project_id == id)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
}

impl Column<'_> {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn title(&self) -> &'static str {
        self.status.label()
    }
}

/// The three status columns of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    pub columns: [Column<'a>; 3],
}

impl<'a> Board<'a> {
    pub fn from_tasks(tasks: &[&'a Task]) -> Self {
        let columns = Status::ALL.map(|status| Column {
            status,
            tasks: tasks
                .iter()
                .copied()
                .filter(|task| task.status == status)
                .collect(),
        });
        Self { columns }
    }

    pub fn for_active_project(state: &'a AppState) -> Self {
        Self::from_tasks(&project_tasks(state))
    }

    pub fn column(&self, status: Status) -> &Column<'a> {
        let idx = Status::ALL
            .iter()
            .position(|s| *s == status)
            .unwrap_or_default();
        &self.columns[idx]
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(Column::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn task(id: &str, project_id: &str, status: Status) -> Task {
        Task {
            id: id.to_string(),
            project_id: project_id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            status,
            priority: Priority::Medium,
            created_at: 0,
        }
    }

    #[test]
    fn board_keeps_master_list_order_per_column() {
        let mut state = AppState::default();
        state.tasks = vec![
            task("a", "1", Status::Done),
            task("b", "1", Status::Todo),
            task("c", "2", Status::Todo),
            task("d", "1", Status::Todo),
            task("e", "1", Status::InProgress),
        ];

        let board = Board::for_active_project(&state);
        let ids = |status| {
            board
                .column(status)
                .tasks
                .iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Status::Todo), vec!["b", "d"]);
        assert_eq!(ids(Status::InProgress), vec!["e"]);
        assert_eq!(ids(Status::Done), vec!["a"]);
        assert_eq!(board.total(), 4);
        assert_eq!(board.column(Status::Todo).title(), "To Do");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let mut state = AppState::default();
        state.tasks = vec![task("a", "1", Status::Todo)];
        assert_eq!(
            Board::for_active_project(&state),
            Board::for_active_project(&state)
        );
    }

    #[test]
    fn no_active_project_means_empty_views() {
        let mut state = AppState::default();
        state.tasks = vec![task("a", "1", Status::Todo)];
        state.active_project_id = None;

        assert!(active_project(&state).is_none());
        assert!(project_tasks(&state).is_empty());
        assert_eq!(Board::for_active_project(&state).total(), 0);
    }

    #[test]
    fn active_project_resolves_by_id() {
        let state = AppState::default();
        assert_eq!(
            active_project(&state).map(|p| p.name.as_str()),
            Some("Cyberpunk Redesign")
        );
    }
}
