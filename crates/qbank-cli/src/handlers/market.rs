//! Marketplace command handlers
//!
//! Market failures come back raw and unreported; the handler wraps them in
//! [`Error::Market`] so they print with the marketplace path.

use crate::cli::MarketCommand;
use crate::error::{Error, Result};
use crate::handlers::{list_in, with_spinner};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use qbank_core::models::MarketQuery;
use qbank_core::{ApiClients, FilePart};
use std::fs;
use tracing::{info, instrument};

const MARKET_COLUMNS: &[&str] = &["id", "name", "subject", "category", "question_count"];
const LIST_KEYS: &[&str] = &["banks", "items", "results", "data"];

fn filters(category: Option<String>, subject: Option<String>) -> MarketQuery {
    let mut query = MarketQuery::new();
    if let Some(category) = category {
        query = query.category(category);
    }
    if let Some(subject) = subject {
        query = query.subject(subject);
    }
    query
}

#[instrument(skip(clients, output))]
pub async fn handle_market(
    command: MarketCommand,
    clients: &ApiClients,
    output: &mut OutputWriter,
) -> Result<()> {
    if clients.config().market_is_placeholder() {
        output.warning("⚠ Marketplace address is not configured; set QBANK_MARKET_API_URL")?;
    }
    let market = clients.market();

    match command {
        MarketCommand::List {
            category,
            subject,
            page,
        } => {
            let mut query = filters(category, subject);
            if let Some(page) = page {
                query = query.page(page);
            }
            let payload = with_spinner(output, "Loading marketplace...", market.get_banks(&query))
                    .await
                    .map_err(Error::market)?;
            output.records(list_in(&payload, LIST_KEYS), MARKET_COLUMNS)
        }
        MarketCommand::Show { id } => {
            let payload = market.get_bank(&id).await.map_err(Error::market)?;
            output.data(&payload)
        }
        MarketCommand::Preview { id, limit } => {
            let payload = market.preview_bank(&id, limit).await.map_err(Error::market)?;
            output.data(&payload)
        }
        MarketCommand::Search {
            query,
            category,
            subject,
        } => {
            let payload = market
                .search(&query, &filters(category, subject))
                .await
                .map_err(Error::market)?;
            output.records(list_in(&payload, LIST_KEYS), MARKET_COLUMNS)
        }
        MarketCommand::Categories => {
            let payload = market.get_categories().await.map_err(Error::market)?;
            output.data(&payload)
        }
        MarketCommand::Subjects => {
            let payload = market.get_subjects().await.map_err(Error::market)?;
            output.data(&payload)
        }
        MarketCommand::Download { id, save_to } => {
            let _timer = Timer::with_details("market_download", &id);
            let bytes = with_spinner(output, "Downloading bank...", market.download_bank(&id))
                .await
                .map_err(Error::market)?;

            if let Some(parent) = save_to.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&save_to, &bytes)?;
            info!(bytes = bytes.len(), path = %save_to.display(), "Bank downloaded");
            output.success(&format!(
                "✓ Saved {} bytes to {}",
                bytes.len(),
                save_to.display()
            ))
        }
        MarketCommand::Upload { path } => {
            if !path.exists() {
                return Err(Error::FileNotFound { path });
            }
            let file = FilePart::from_path(&path).await?;
            let payload = with_spinner(output, "Uploading bank...", market.upload_bank(file))
                .await
                .map_err(Error::market)?;
            output.success(&format!("✓ Uploaded {}", path.display()))?;
            output.data(&payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters() {
        let query = filters(Some("考研".to_string()), None);
        assert_eq!(
            query.to_query(),
            vec![("category".to_string(), "考研".to_string())]
        );
        assert!(filters(None, None).is_empty());
    }
}
