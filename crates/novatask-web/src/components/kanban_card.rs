use novatask_core::{
  Priority,
  Status,
  Task,
  TaskPatch
};
use web_sys::{
  Event,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct KanbanCardProps {
  pub task:      Task,
  pub on_update:
    Callback<(String, TaskPatch)>,
  pub on_delete: Callback<String>
}

#[function_component(KanbanCard)]
pub fn kanban_card(
  props: &KanbanCardProps
) -> Html {
  let task = &props.task;

  let on_status_change = {
    let on_update = props.on_update.clone();
    let task_id = task.id.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      match select.value().parse::<Status>()
      {
        | Ok(status) => on_update.emit((
          task_id.clone(),
          TaskPatch::status(status)
        )),
        | Err(error) => {
          tracing::warn!(%error, "ignoring status selection")
        }
      }
    })
  };

  let on_priority_change = {
    let on_update = props.on_update.clone();
    let task_id = task.id.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      match select
        .value()
        .parse::<Priority>()
      {
        | Ok(priority) => on_update.emit((
          task_id.clone(),
          TaskPatch::priority(priority)
        )),
        | Err(error) => {
          tracing::warn!(%error, "ignoring priority selection")
        }
      }
    })
  };

  let on_delete = {
    let on_delete = props.on_delete.clone();
    let task_id = task.id.clone();
    Callback::from(move |_| {
      on_delete.emit(task_id.clone())
    })
  };

  html! {
      <div class="kanban-card">
          <div class="kanban-card-top">
              <span class={classes!("badge", "priority", format!("priority-{}", task.priority.as_str()))}>
                  { task.priority.label() }
              </span>
              <button type="button" class="btn icon danger" title="Delete task" onclick={on_delete}>{ "✕" }</button>
          </div>
          <div class="kanban-card-title">{ &task.title }</div>
          {
              if task.description.trim().is_empty() {
                  html! {}
              } else {
                  html! { <div class="task-subtitle">{ &task.description }</div> }
              }
          }
          <div class="kanban-card-actions">
              <select class="status-select" onchange={on_status_change}>
                  {
                      for Status::ALL.iter().map(|status| html! {
                          <option value={status.as_str()} selected={*status == task.status}>
                              { status.label() }
                          </option>
                      })
                  }
              </select>
              <select class="priority-select" onchange={on_priority_change}>
                  {
                      for Priority::ALL.iter().map(|priority| html! {
                          <option value={priority.as_str()} selected={*priority == task.priority}>
                              { priority.label() }
                          </option>
                      })
                  }
              </select>
          </div>
      </div>
  }
}
