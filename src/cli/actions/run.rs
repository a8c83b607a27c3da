use crate::cli::actions::{check, create, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Create(args) => create::execute(args).await,
        Action::Check(args) => check::execute(&args),
    }
}
