use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
  pub on_create: Callback<()>
}

#[function_component(EmptyState)]
pub fn empty_state(
  props: &EmptyStateProps
) -> Html {
  let onclick = {
    let on_create = props.on_create.clone();
    Callback::from(move |_| {
      on_create.emit(())
    })
  };

  html! {
      <div class="empty-state">
          <p>{ "SELECT A PROJECT" }</p>
          <button type="button" class="btn accent" {onclick}>{ "Create a new project" }</button>
      </div>
  }
}
