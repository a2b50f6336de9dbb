pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::LocalFileStorage;
pub use app::menu::{MenuChoice, MenuState, SessionOutcome, StockApp};
pub use app::render::Palette;
pub use crate::core::{operations, Store};
pub use domain::model::{LoadOutcome, MalformedLinePolicy, RecordDraft, StockRecord};
pub use domain::ports::{ConfigProvider, Storage};
pub use utils::error::{Result, StockError};
