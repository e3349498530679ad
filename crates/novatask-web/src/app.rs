use novatask_core::views::{
  active_project,
  project_tasks
};
use novatask_core::{
  AppState,
  Config,
  FormSubmission,
  Modal,
  ModalController,
  Outcome,
  Priority,
  Status,
  Store,
  SuggestionClient,
  Task,
  TaskPatch
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_mut_ref,
  use_state
};

use crate::components::{
  EmptyState,
  KanbanBoard,
  ProjectHeader,
  ProjectModal,
  ProjectSidebar,
  ShareModal,
  TaskModal
};
use crate::storage::LocalStorage;

const CONFIG_TOML: &str =
  include_str!("../assets/novatask.toml");

fn load_config() -> Config {
  let cfg =
    match Config::from_toml_str(CONFIG_TOML) {
      | Ok(cfg) => cfg,
      | Err(error) => {
        tracing::error!(
          error = %format!("{error:#}"),
          "failed parsing bundled config; \
           using defaults"
        );
        Config::default()
      }
    };
  cfg.with_api_key(option_env!("API_KEY"))
}

fn open_store(key: &str) -> Store {
  match Store::open(Box::new(
    LocalStorage::new(key)
  )) {
    | Ok(store) => store,
    | Err(error) => {
      tracing::error!(
        error = %format!("{error:#}"),
        key,
        "stored state unreadable; \
         starting from defaults"
      );
      Store::with_state(
        AppState::default(),
        Box::new(LocalStorage::new(key))
      )
    }
  }
}

fn log_outcome(
  action: &str,
  outcome: &Outcome
) {
  match outcome {
    | Outcome::Applied => {
      tracing::debug!(action, "mutation applied")
    }
    | Outcome::Unchanged(reason) => {
      tracing::debug!(action, %reason, "mutation left state unchanged")
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| load_config());
  let store = {
    let key = config.storage.key.clone();
    use_mut_ref(move || open_store(&key))
  };
  let client = {
    let settings = config.suggestions.clone();
    use_memo((), move |_| {
      SuggestionClient::new(settings)
    })
  };
  let snapshot = {
    let store = store.clone();
    use_state(move || {
      store.borrow().state().clone()
    })
  };
  let modal = use_state(ModalController::new);
  let suggesting = use_state(|| false);

  {
    let store = store.clone();
    let snapshot = snapshot.clone();
    use_effect_with((), move |_| {
      let id = store.borrow_mut().subscribe(
        move |state: &AppState| {
          snapshot.set(state.clone())
        }
      );
      tracing::debug!(?id, "subscribed to store");
      move || {
        let _ = store
          .borrow_mut()
          .unsubscribe(id);
      }
    });
  }

  let on_select_project = {
    let store = store.clone();
    Callback::from(move |id: String| {
      let outcome =
        store.borrow_mut().select_project(&id);
      log_outcome("select_project", &outcome);
    })
  };

  let on_delete_project = {
    let store = store.clone();
    Callback::from(move |id: String| {
      let outcome =
        store.borrow_mut().delete_project(&id);
      log_outcome("delete_project", &outcome);
    })
  };

  let open_modal = {
    let modal = modal.clone();
    Callback::from(move |target: Modal| {
      let mut next = (*modal).clone();
      if next.open(target) {
        modal.set(next);
      }
    })
  };

  let on_close_modal = {
    let modal = modal.clone();
    Callback::from(move |_: ()| {
      let mut next = (*modal).clone();
      next.cancel();
      modal.set(next);
    })
  };

  let on_backdrop = {
    let modal = modal.clone();
    Callback::from(move |_: ()| {
      let mut next = (*modal).clone();
      if next.dismiss() {
        modal.set(next);
      }
    })
  };

  let submit_form = {
    let store = store.clone();
    let modal = modal.clone();
    Callback::from(
      move |form: FormSubmission| {
        let mut next = (*modal).clone();
        let outcome = next.submit(
          &mut store.borrow_mut(),
          form
        );
        log_outcome("submit_form", &outcome);
        modal.set(next);
      }
    )
  };

  let on_submit_project = {
    let submit_form = submit_form.clone();
    Callback::from(
      move |(name, description): (
        String,
        String
      )| {
        submit_form.emit(
          FormSubmission::Project {
            name,
            description
          }
        )
      }
    )
  };

  let on_submit_task = {
    let submit_form = submit_form.clone();
    Callback::from(
      move |(title, description, priority): (
        String,
        String,
        Priority
      )| {
        submit_form.emit(
          FormSubmission::Task {
            title,
            description,
            priority
          }
        )
      }
    )
  };

  let on_update_task = {
    let store = store.clone();
    Callback::from(
      move |(task_id, patch): (
        String,
        TaskPatch
      )| {
        let outcome = store
          .borrow_mut()
          .update_task(&task_id, patch);
        log_outcome("update_task", &outcome);
      }
    )
  };

  let on_delete_task = {
    let store = store.clone();
    Callback::from(move |task_id: String| {
      let outcome =
        store.borrow_mut().delete_task(&task_id);
      log_outcome("delete_task", &outcome);
    })
  };

  let on_suggest = {
    let store = store.clone();
    let client = client.clone();
    let suggesting = suggesting.clone();
    Callback::from(move |_: ()| {
      if *suggesting {
        return;
      }
      let Some(project) =
        active_project(store.borrow().state())
          .cloned()
      else {
        return;
      };

      suggesting.set(true);
      let store = store.clone();
      let client = client.clone();
      let suggesting = suggesting.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match client
            .suggest(
              &project.name,
              &project.description
            )
            .await
          {
            | Some(suggestions) => {
              let mut store = store.borrow_mut();
              if store
                .state()
                .active_project_id
                .as_deref()
                == Some(project.id.as_str())
              {
                let outcome = store
                  .apply_suggestions(&suggestions);
                log_outcome(
                  "apply_suggestions",
                  &outcome
                );
              } else {
                tracing::warn!(
                  project_id = %project.id,
                  "active project changed while \
                   suggesting; discarding"
                );
              }
            }
            | None => {
              tracing::info!(
                "no task suggestions available"
              )
            }
          }
          suggesting.set(false);
        }
      );
    })
  };

  let state = &*snapshot;
  let active = active_project(state).cloned();
  let tasks: Vec<Task> = project_tasks(state)
    .into_iter()
    .cloned()
    .collect();

  let on_add_project = {
    let open_modal = open_modal.clone();
    Callback::from(move |_: ()| {
      open_modal.emit(Modal::Project)
    })
  };
  let on_add_task = {
    let open_modal = open_modal.clone();
    Callback::from(move |status: Status| {
      open_modal.emit(Modal::Task(status))
    })
  };
  let on_share = {
    let open_modal = open_modal.clone();
    Callback::from(move |_: ()| {
      open_modal.emit(Modal::Share)
    })
  };

  html! {
      <div class="app-shell">
          <ProjectSidebar
              projects={state.projects.clone()}
              active_project_id={state.active_project_id.clone()}
              on_select={on_select_project}
              on_add={on_add_project.clone()}
              on_delete={on_delete_project}
          />
          <main class="workspace">
              {
                  match active.as_ref() {
                      Some(project) => html! {
                          <>
                              <ProjectHeader
                                  project={project.clone()}
                                  can_suggest={client.is_configured()}
                                  suggesting={*suggesting}
                                  on_suggest={on_suggest}
                                  on_share={on_share}
                              />
                              <KanbanBoard
                                  tasks={tasks}
                                  on_add_task={on_add_task}
                                  on_update={on_update_task}
                                  on_delete={on_delete_task}
                              />
                          </>
                      },
                      None => html! { <EmptyState on_create={on_add_project} /> },
                  }
              }
          </main>
          {
              match modal.current() {
                  Modal::Closed => html! {},
                  Modal::Project => html! {
                      <ProjectModal on_submit={on_submit_project} on_close={on_close_modal} on_backdrop={on_backdrop} />
                  },
                  Modal::Task(status) => html! {
                      <TaskModal status={status} on_submit={on_submit_task} on_close={on_close_modal} on_backdrop={on_backdrop} />
                  },
                  Modal::Share => html! {
                      <ShareModal
                          project_name={active.as_ref().map(|p| p.name.clone()).unwrap_or_default()}
                          on_close={on_close_modal}
                          on_backdrop={on_backdrop}
                      />
                  },
              }
          }
      </div>
  }
}
