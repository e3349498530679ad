use novatask_core::Project;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProjectSidebarProps {
  pub projects:          Vec<Project>,
  pub active_project_id: Option<String>,
  pub on_select:         Callback<String>,
  pub on_add:            Callback<()>,
  pub on_delete:         Callback<String>
}

#[function_component(ProjectSidebar)]
pub fn project_sidebar(
  props: &ProjectSidebarProps
) -> Html {
  let on_add = {
    let on_add = props.on_add.clone();
    Callback::from(move |_| {
      on_add.emit(())
    })
  };

  html! {
      <aside class="panel sidebar">
          <div class="brand">
              <h1>{ "NOVATASK" }</h1>
              <p class="tagline">{ "Task management protocol" }</p>
          </div>
          <div class="sidebar-section">
              <div class="sidebar-section-header">
                  <span>{ "Projects" }</span>
                  <button type="button" class="btn icon" title="New project" onclick={on_add}>{ "+" }</button>
              </div>
              {
                  for props.projects.iter().map(|project| {
                      let active = props.active_project_id.as_deref() == Some(project.id.as_str());
                      let onclick = {
                          let on_select = props.on_select.clone();
                          let id = project.id.clone();
                          Callback::from(move |_| on_select.emit(id.clone()))
                      };
                      let ondelete = {
                          let on_delete = props.on_delete.clone();
                          let id = project.id.clone();
                          Callback::from(move |e: MouseEvent| {
                              e.stop_propagation();
                              on_delete.emit(id.clone());
                          })
                      };
                      let dot_style = format!(
                          "color:{0};background-color:{0};",
                          project.color
                      );
                      html! {
                          <div key={project.id.clone()} class={classes!("project-item", active.then_some("active"))} {onclick}>
                              <div class="project-label">
                                  <span class="project-dot" style={dot_style}></span>
                                  <span>{ &project.name }</span>
                              </div>
                              <button type="button" class="btn icon danger" title="Delete project" onclick={ondelete}>{ "✕" }</button>
                          </div>
                      }
                  })
              }
              {
                  if props.projects.is_empty() {
                      html! { <div class="sidebar-empty">{ "No active project" }</div> }
                  } else {
                      html! {}
                  }
              }
          </div>
          <div class="sidebar-footer">
              <span class="pulse"></span>
              <span>{ "SYSTEM ONLINE" }</span>
          </div>
      </aside>
  }
}
