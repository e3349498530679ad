use novatask_core::{
  Status,
  Task,
  TaskPatch
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::KanbanCard;

#[derive(Properties, PartialEq)]
pub struct KanbanColumnProps {
  pub status:      Status,
  pub cards:       Vec<Task>,
  pub on_add_task: Callback<Status>,
  pub on_update:
    Callback<(String, TaskPatch)>,
  pub on_delete:   Callback<String>
}

#[function_component(KanbanColumn)]
pub fn kanban_column(
  props: &KanbanColumnProps
) -> Html {
  let status = props.status;
  let on_add = {
    let on_add_task =
      props.on_add_task.clone();
    Callback::from(move |_| {
      on_add_task.emit(status)
    })
  };

  html! {
      <div class={classes!("kanban-column", format!("lane-{}", status.as_str()))}>
          <div class="kanban-column-header">
              <span>{ status.label() }</span>
              <span class="badge">{ props.cards.len() }</span>
          </div>
          <div class="kanban-column-body">
              {
                  if props.cards.is_empty() {
                      html! { <div class="kanban-empty">{ "No tasks" }</div> }
                  } else {
                      html! {
                          <>
                              {
                                  for props.cards.iter().cloned().map(|task| html! {
                                      <KanbanCard
                                          key={task.id.clone()}
                                          task={task.clone()}
                                          on_update={props.on_update.clone()}
                                          on_delete={props.on_delete.clone()}
                                      />
                                  })
                              }
                          </>
                      }
                  }
              }
              <button type="button" class="btn add-task" onclick={on_add}>{ "+ New task" }</button>
          </div>
      </div>
  }
}
