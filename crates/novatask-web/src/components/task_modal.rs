use novatask_core::{
  Priority,
  Status
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

use super::stop_propagation;

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  /// Column the task lands in.
  pub status:    Status,
  /// `(title, description, priority)`
  pub on_submit:
    Callback<(String, String, Priority)>,
  pub on_close:    Callback<()>,
  /// Click outside the dialog.
  pub on_backdrop: Callback<()>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let title = use_state(String::new);
  let description = use_state(String::new);
  let priority = use_state(|| Priority::Low);

  let on_title_input = {
    let title = title.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      title.set(input.value());
    })
  };
  let on_description_input = {
    let description = description.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlTextAreaElement =
        e.target_unchecked_into();
      description.set(input.value());
    })
  };
  let on_priority_change = {
    let priority = priority.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      match select.value().parse() {
        | Ok(value) => priority.set(value),
        | Err(error) => {
          tracing::warn!(%error, "ignoring priority selection")
        }
      }
    })
  };
  let on_submit = {
    let on_submit = props.on_submit.clone();
    let title = title.clone();
    let description = description.clone();
    let priority = priority.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit((
        (*title).clone(),
        (*description).clone(),
        *priority
      ));
    })
  };
  let on_close = {
    let on_close = props.on_close.clone();
    Callback::from(move |_| {
      on_close.emit(())
    })
  };
  let on_backdrop = {
    let on_backdrop = props.on_backdrop.clone();
    Callback::from(move |_| {
      on_backdrop.emit(())
    })
  };

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <div class="modal" onclick={stop_propagation()}>
              <div class="header">{ format!("New Task · {}", props.status.label()) }</div>
              <form class="content" onsubmit={on_submit}>
                  <div class="field">
                      <label>{ "Title" }</label>
                      <input
                          name="title"
                          required=true
                          autofocus=true
                          value={(*title).clone()}
                          oninput={on_title_input}
                          placeholder="Task name"
                      />
                  </div>
                  <div class="field">
                      <label>{ "Description" }</label>
                      <textarea
                          name="description"
                          rows="3"
                          value={(*description).clone()}
                          oninput={on_description_input}
                          placeholder="Technical details..."
                      />
                  </div>
                  <div class="field">
                      <label>{ "Priority" }</label>
                      <select name="priority" onchange={on_priority_change}>
                          {
                              for Priority::ALL.iter().map(|p| html! {
                                  <option value={p.as_str()} selected={*p == *priority}>
                                      { p.label() }
                                  </option>
                              })
                          }
                      </select>
                  </div>
                  <div class="footer">
                      <button type="button" class="btn" onclick={on_close}>{ "Cancel" }</button>
                      <button
                          type="submit"
                          class="btn accent"
                          disabled={title.trim().is_empty()}
                      >
                          { "Create" }
                      </button>
                  </div>
              </form>
          </div>
      </div>
  }
}
