//! Domain facades
//!
//! Each facade maps named operations onto exactly one HTTP call. Facades for
//! the local server hold a [`LocalClient`](crate::LocalClient); the marketplace
//! facade holds a [`MarketClient`](crate::MarketClient).

pub mod ai;
pub mod bank;
pub mod config;
pub mod data;
pub mod exam;
pub mod favorite;
pub mod market;
pub mod paper;
pub mod result;
pub mod system;

pub use ai::AiApi;
pub use bank::BankApi;
pub use config::ConfigApi;
pub use data::DataApi;
pub use exam::ExamApi;
pub use favorite::FavoriteApi;
pub use market::{MarketApi, DEFAULT_PREVIEW_LIMIT};
pub use paper::PaperApi;
pub use result::ResultApi;
pub use system::SystemApi;

use std::fmt::Display;

use crate::transport::encode_path_segment;

/// Render an identifier as one encoded path segment
pub(crate) fn segment(id: impl Display) -> String {
    encode_path_segment(&id.to_string())
}
