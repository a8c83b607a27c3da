pub mod check;
pub mod create;

mod prompt;
mod run;

#[derive(Debug)]
pub enum Action {
    Create(create::Args),
    Check(check::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
