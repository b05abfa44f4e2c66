//! Favorite command handlers
//!
//! Failures on these calls never reach the notifier, so they are reported
//! here instead.

use crate::cli::FavoriteCommand;
use crate::error::Result;
use crate::output::OutputWriter;
use qbank_core::ApiClients;
use tracing::instrument;

const FAVORITE_COLUMNS: &[&str] = &["question_id", "bank_id", "question_type", "note"];

#[instrument(skip(clients, output))]
pub async fn handle_favorites(
    command: FavoriteCommand,
    clients: &ApiClients,
    output: &mut OutputWriter,
) -> Result<()> {
    let favorites = clients.favorites();

    match command {
        FavoriteCommand::List => {
            let payload = favorites.get_all().await?;
            output.records(&payload, FAVORITE_COLUMNS)
        }
        FavoriteCommand::Stats => {
            let payload = favorites.get_statistics().await?;
            output.data(&payload)
        }
        FavoriteCommand::Add {
            bank_id,
            question_id,
        } => {
            favorites.add(&bank_id, &question_id).await?;
            output.success(&format!("✓ Added question {} to favorites", question_id))
        }
        FavoriteCommand::Remove { question_id } => {
            favorites.remove(&question_id).await?;
            output.success(&format!("✓ Removed question {} from favorites", question_id))
        }
    }
}
