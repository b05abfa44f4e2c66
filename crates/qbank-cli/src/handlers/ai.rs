//! AI command handlers

use crate::cli::AiCommand;
use crate::error::{Error, Result};
use crate::handlers::with_spinner;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use qbank_core::{ApiClients, FilePart};
use tracing::{info, instrument};

const PARSED_COLUMNS: &[&str] = &["type", "question", "answer"];

#[instrument(skip(clients, output))]
pub async fn handle_ai(
    command: AiCommand,
    clients: &ApiClients,
    output: &mut OutputWriter,
) -> Result<()> {
    match command {
        AiCommand::ParseFile { path } => {
            if !path.exists() {
                return Err(Error::FileNotFound { path });
            }
            let _timer = Timer::with_details("ai_parse_file", &path.display().to_string());

            let file = FilePart::from_path(&path).await?;
            info!(file = %file.file_name, bytes = file.bytes.len(), "Uploading file for parsing");

            let payload =
                with_spinner(output, "Parsing questions...", clients.ai().parse_file(file)).await?;
            let questions = super::list_in(&payload, &["questions"]);

            let count = questions.as_array().map(Vec::len).unwrap_or(0);
            output.success(&format!("✓ Parsed {} question(s)", count))?;
            output.records(questions, PARSED_COLUMNS)
        }
        AiCommand::Types => {
            let payload = clients.ai().get_supported_types().await?;
            output.data(&payload)
        }
    }
}
