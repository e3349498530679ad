use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// Board column order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "todo" => Ok(Status::Todo),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(anyhow!("unknown task status: {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(anyhow!("unknown task priority: {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// Partial update merged into an existing task. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    /// Returns true when at least one field actually changed.
    pub(crate) fn apply_to(self, task: &mut Task) -> bool {
        let before = task.clone();
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        *task != before
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub active_project_id: Option<String>,
}

impl AppState {
    pub fn empty() -> Self {
        Self {
            projects: vec![],
            tasks: vec![],
            active_project_id: None,
        }
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}

/// First-run state: two example projects, the first one active.
impl Default for AppState {
    fn default() -> Self {
        let projects = vec![
            Project {
                id: "1".to_string(),
                name: "Cyberpunk Redesign".to_string(),
                description: "Interface overhaul with neon elements.".to_string(),
                color: "#06b6d4".to_string(),
            },
            Project {
                id: "2".to_string(),
                name: "System Core".to_string(),
                description: "Application kernel optimisation.".to_string(),
                color: "#a855f7".to_string(),
            },
        ];
        let active_project_id = projects.first().map(|p| p.id.clone());

        Self {
            projects,
            tasks: vec![],
            active_project_id,
        }
    }
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// A `#rrggbb` token drawn from a fresh v4 uuid.
pub fn random_color() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    format!("#{:02x}{:02x}{:02x}", bytes[0], bytes[1], bytes[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: Status, priority: Priority) -> Task {
        Task {
            id: "t1".to_string(),
            project_id: "1".to_string(),
            title: "Shader Neon".to_string(),
            description: String::new(),
            status,
            priority,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn status_serializes_with_kebab_case() {
        let json = serde_json::to_string(&Status::InProgress).expect("serialize status");
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(
            "in-progress".parse::<Status>().expect("parse status"),
            Status::InProgress
        );
    }

    #[test]
    fn priority_parse_rejects_unknown_values() {
        assert_eq!(
            " HIGH ".parse::<Priority>().expect("parse priority"),
            Priority::High
        );
        assert!("critical".parse::<Priority>().is_err());
        assert!("".parse::<Priority>().is_err());
    }

    #[test]
    fn task_uses_camel_case_field_names() {
        let task = task(Status::Todo, Priority::High);
        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(value["projectId"], "1");
        assert_eq!(value["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(value["status"], "todo");
        assert_eq!(value["priority"], "high");
    }

    #[test]
    fn patch_reports_whether_anything_changed() {
        let mut task = task(Status::Todo, Priority::Low);

        assert!(!TaskPatch::status(Status::Todo).apply_to(&mut task));
        assert!(TaskPatch::status(Status::Done).apply_to(&mut task));
        assert_eq!(task.status, Status::Done);
    }

    #[test]
    fn random_color_is_a_hex_token() {
        let color = random_color();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
