mod empty_state;
mod kanban_board;
mod kanban_card;
mod kanban_column;
mod project_header;
mod project_modal;
mod share_modal;
mod sidebar;
mod task_modal;

pub use empty_state::EmptyState;
pub use kanban_board::KanbanBoard;
pub use kanban_card::KanbanCard;
pub use kanban_column::KanbanColumn;
pub use project_header::ProjectHeader;
pub use project_modal::ProjectModal;
pub use share_modal::ShareModal;
pub use sidebar::ProjectSidebar;
pub use task_modal::TaskModal;

/// Ignores clicks that bubble out of a
/// modal body onto its backdrop.
pub(crate) fn stop_propagation()
-> yew::Callback<yew::MouseEvent> {
  yew::Callback::from(
    |e: yew::MouseEvent| {
      e.stop_propagation()
    }
  )
}
