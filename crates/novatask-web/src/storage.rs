use anyhow::anyhow;
use novatask_core::StateStorage;

/// `window.localStorage` slot holding
/// the serialized app state.
pub struct LocalStorage {
  key: String
}

impl LocalStorage {
  pub fn new(key: impl Into<String>) -> Self {
    Self { key: key.into() }
  }
}

fn browser_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .ok_or_else(|| anyhow!("no window"))?
    .local_storage()
    .map_err(|err| {
      anyhow!(
        "local storage unavailable: \
         {err:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!("local storage disabled")
    })
}

impl StateStorage for LocalStorage {
  fn read(
    &self
  ) -> anyhow::Result<Option<String>> {
    browser_storage()?
      .get_item(&self.key)
      .map_err(|err| {
        anyhow!(
          "failed reading {}: {err:?}",
          self.key
        )
      })
  }

  fn write(
    &mut self,
    payload: &str
  ) -> anyhow::Result<()> {
    browser_storage()?
      .set_item(&self.key, payload)
      .map_err(|err| {
        anyhow!(
          "failed writing {}: {err:?}",
          self.key
        )
      })
  }
}
