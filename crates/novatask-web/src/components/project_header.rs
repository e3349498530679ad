use novatask_core::Project;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProjectHeaderProps {
  pub project:     Project,
  pub can_suggest: bool,
  pub suggesting:  bool,
  pub on_suggest:  Callback<()>,
  pub on_share:    Callback<()>
}

#[function_component(ProjectHeader)]
pub fn project_header(
  props: &ProjectHeaderProps
) -> Html {
  let on_suggest = {
    let on_suggest =
      props.on_suggest.clone();
    Callback::from(move |_| {
      on_suggest.emit(())
    })
  };
  let on_share = {
    let on_share = props.on_share.clone();
    Callback::from(move |_| {
      on_share.emit(())
    })
  };
  let suggest_label = if props.suggesting {
    "Suggesting…"
  } else {
    "Suggest tasks"
  };

  html! {
      <header class="project-header">
          <div>
              <h2>{ &props.project.name }</h2>
              <p class="project-description">{ &props.project.description }</p>
          </div>
          <div class="header-actions">
              <button
                  type="button"
                  class="btn"
                  onclick={on_suggest}
                  disabled={!props.can_suggest || props.suggesting}
              >
                  { suggest_label }
              </button>
              <button type="button" class="btn accent" onclick={on_share}>{ "Share" }</button>
          </div>
      </header>
  }
}
