//! Command handlers for CLI subcommands
//!
//! Each handler drives one facade through [`ApiClients`] and writes the
//! payload with the [`OutputWriter`].

mod ai;
mod bank;
mod completions;
mod config;
mod favorite;
mod market;
mod study;
mod system;

pub use ai::handle_ai;
pub use bank::handle_banks;
pub use completions::handle_completions;
pub use config::handle_config;
pub use favorite::handle_favorites;
pub use market::handle_market;
pub use study::{handle_papers, handle_results};
pub use system::handle_system;

use crate::output::OutputWriter;
use serde_json::Value;
use std::future::Future;

/// Await `call` behind a spinner when progress output is enabled
pub(crate) async fn with_spinner<T, F>(output: &OutputWriter, message: &str, call: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = output.spinner(message);
    let result = call.await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

/// The list inside a payload: the payload itself, or the first array found
/// under one of `keys`
pub(crate) fn list_in<'a>(payload: &'a Value, keys: &[&str]) -> &'a Value {
    if payload.is_array() {
        return payload;
    }
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .find(|value| value.is_array())
        .unwrap_or(payload)
}
