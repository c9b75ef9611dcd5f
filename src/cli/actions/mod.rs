pub mod api;
pub mod front;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

#[derive(Debug)]
pub enum Action {
    Front(front::Args),
    Api(api::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the selected service fails to start.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
