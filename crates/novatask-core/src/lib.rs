pub mod config;
pub mod modal;
pub mod model;
pub mod persist;
pub mod store;
pub mod suggest;
pub mod views;

pub use config::Config;
pub use modal::{FormSubmission, Modal, ModalController};
pub use model::{AppState, Priority, Project, Status, Task, TaskPatch};
pub use persist::{MemoryStorage, STATE_STORAGE_KEY, StateStorage};
pub use store::{NoOp, Outcome, Store, SubscriptionId};
pub use suggest::{Suggestion, SuggestionClient};
pub use views::Board;
