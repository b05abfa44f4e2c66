//! Paper and result command handlers

use crate::cli::{PaperCommand, ResultCommand};
use crate::error::Result;
use crate::output::OutputWriter;
use qbank_core::ApiClients;
use tracing::instrument;

const PAPER_COLUMNS: &[&str] = &["id", "title", "question_count", "total_score", "time_limit"];
const RESULT_COLUMNS: &[&str] = &["id", "paper_title", "user_score", "total_score", "status"];

#[instrument(skip(clients, output))]
pub async fn handle_papers(
    command: PaperCommand,
    clients: &ApiClients,
    output: &mut OutputWriter,
) -> Result<()> {
    match command {
        PaperCommand::List => {
            let payload = clients.papers().get_all().await?;
            output.records(&payload, PAPER_COLUMNS)
        }
        PaperCommand::Show { id } => {
            let payload = clients.papers().get(&id).await?;
            output.data(&payload)
        }
    }
}

#[instrument(skip(clients, output))]
pub async fn handle_results(
    command: ResultCommand,
    clients: &ApiClients,
    output: &mut OutputWriter,
) -> Result<()> {
    match command {
        ResultCommand::List => {
            let payload = clients.results().get_all().await?;
            output.records(&payload, RESULT_COLUMNS)
        }
    }
}
