use novatask_core::views::Board;
use novatask_core::{
  Status,
  Task,
  TaskPatch
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::KanbanColumn;

#[derive(Properties, PartialEq)]
pub struct KanbanBoardProps {
  /// Tasks of the active project, in
  /// master-list order.
  pub tasks:       Vec<Task>,
  pub on_add_task: Callback<Status>,
  pub on_update:
    Callback<(String, TaskPatch)>,
  pub on_delete:   Callback<String>
}

#[function_component(KanbanBoard)]
pub fn kanban_board(
  props: &KanbanBoardProps
) -> Html {
  let refs: Vec<&Task> =
    props.tasks.iter().collect();
  let board = Board::from_tasks(&refs);

  html! {
      <div class="kanban-board">
          {
              for board.columns.iter().map(|column| {
                  let cards: Vec<Task> = column
                      .tasks
                      .iter()
                      .map(|task| (*task).clone())
                      .collect();
                  html! {
                      <KanbanColumn
                          key={column.status.as_str()}
                          status={column.status}
                          cards={cards}
                          on_add_task={props.on_add_task.clone()}
                          on_update={props.on_update.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  }
              })
          }
      </div>
  }
}
