//! System command handlers

use crate::cli::SystemCommand;
use crate::error::Result;
use crate::output::OutputWriter;
use qbank_core::ApiClients;

pub async fn handle_system(
    command: SystemCommand,
    clients: &ApiClients,
    output: &mut OutputWriter,
) -> Result<()> {
    let payload = match command {
        SystemCommand::Version => clients.system().get_version().await?,
        SystemCommand::CheckUpdate => clients.system().check_update().await?,
    };
    output.data(&payload)
}
