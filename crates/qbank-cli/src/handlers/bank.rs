//! Bank command handlers

use crate::cli::BankCommand;
use crate::error::Result;
use crate::handlers::with_spinner;
use crate::output::OutputWriter;
use qbank_core::ApiClients;
use tracing::instrument;

const BANK_COLUMNS: &[&str] = &["id", "name", "subject", "question_count"];
const QUESTION_COLUMNS: &[&str] = &["id", "type", "question", "difficulty"];

/// Handle the banks command
#[instrument(skip(clients, output))]
pub async fn handle_banks(
    command: BankCommand,
    clients: &ApiClients,
    output: &mut OutputWriter,
) -> Result<()> {
    let banks = clients.banks();

    match command {
        BankCommand::List => {
            let payload = with_spinner(output, "Loading banks...", banks.get_all()).await?;
            output.records(&payload, BANK_COLUMNS)
        }
        BankCommand::Show { id } => {
            let payload = with_spinner(output, "Loading bank...", banks.get(&id)).await?;
            output.data(&payload)
        }
        BankCommand::Chapters { id } => {
            let payload = banks.get_chapters(&id).await?;
            output.data(&payload)
        }
        BankCommand::DeleteChapter { id, name } => {
            banks.delete_chapter(&id, &name).await?;
            output.success(&format!("✓ Deleted chapter '{}' from bank {}", name, id))
        }
        BankCommand::Questions { id } => {
            let payload =
                with_spinner(output, "Loading questions...", banks.get_questions(&id)).await?;
            output.records(&payload, QUESTION_COLUMNS)
        }
    }
}
