use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::stop_propagation;

#[derive(Properties, PartialEq)]
pub struct ShareModalProps {
  pub project_name: String,
  pub on_close:     Callback<()>,
  /// Click outside the dialog.
  pub on_backdrop:  Callback<()>
}

/// Cosmetic: no link is generated and
/// nothing leaves the browser.
#[function_component(ShareModal)]
pub fn share_modal(
  props: &ShareModalProps
) -> Html {
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
          <div class="modal modal-sm" onclick={stop_propagation()}>
              <div class="header">{ format!("Share {}", props.project_name) }</div>
              <div class="content">
                  <p>{ "An encrypted access link has been generated for your collaborators." }</p>
                  <div class="footer">
                      <button type="button" class="btn accent" onclick={on_close}>{ "Close" }</button>
                  </div>
              </div>
          </div>
      </div>
  }
}
