use web_sys::{
  HtmlInputElement,
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
pub struct ProjectModalProps {
  /// `(name, description)`
  pub on_submit:
    Callback<(String, String)>,
  pub on_close:    Callback<()>,
  /// Click outside the dialog.
  pub on_backdrop: Callback<()>
}

#[function_component(ProjectModal)]
pub fn project_modal(
  props: &ProjectModalProps
) -> Html {
  let name = use_state(String::new);
  let description = use_state(String::new);

  let on_name_input = {
    let name = name.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      name.set(input.value());
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
  let on_submit = {
    let on_submit = props.on_submit.clone();
    let name = name.clone();
    let description = description.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit((
        (*name).clone(),
        (*description).clone()
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
              <div class="header">{ "New Project" }</div>
              <form class="content" onsubmit={on_submit}>
                  <div class="field">
                      <label>{ "Name" }</label>
                      <input
                          name="name"
                          required=true
                          autofocus=true
                          value={(*name).clone()}
                          oninput={on_name_input}
                          placeholder="e.g. Orbital Redesign"
                      />
                  </div>
                  <div class="field">
                      <label>{ "Description" }</label>
                      <textarea
                          name="description"
                          rows="3"
                          value={(*description).clone()}
                          oninput={on_description_input}
                          placeholder="Project goals..."
                      />
                  </div>
                  <div class="footer">
                      <button type="button" class="btn" onclick={on_close}>{ "Cancel" }</button>
                      <button
                          type="submit"
                          class="btn accent"
                          disabled={name.trim().is_empty()}
                      >
                          { "Create" }
                      </button>
                  </div>
              </form>
          </div>
      </div>
  }
}
