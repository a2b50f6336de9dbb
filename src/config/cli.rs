use crate::config::{TomlConfig, DEFAULT_BACKING_FILE};
use crate::core::{ConfigProvider, MalformedLinePolicy};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "stock-tracker")]
#[command(about = "Interactive stock tracker backed by a flat comma-separated file")]
pub struct CliConfig {
    /// Path to the backing stock file (default: inventory.txt)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Skip malformed lines instead of stopping the load at the first one
    #[arg(long)]
    pub skip_malformed: bool,

    /// Disable ANSI colours in the menu
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Flags given on the command line win over the configuration file.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(file) = &self.file {
            config.store.backing_file_path = file.clone();
            tracing::info!("Backing file overridden to: {}", file);
        }
        if self.skip_malformed {
            config.store.on_malformed_line = Some(MalformedLinePolicy::Skip);
        }
        if self.no_color {
            config.display.color = Some(false);
        }
    }
}

impl ConfigProvider for CliConfig {
    fn backing_file_path(&self) -> &str {
        self.file.as_deref().unwrap_or(DEFAULT_BACKING_FILE)
    }

    fn malformed_line_policy(&self) -> MalformedLinePolicy {
        if self.skip_malformed {
            MalformedLinePolicy::Skip
        } else {
            MalformedLinePolicy::Abort
        }
    }

    fn color_enabled(&self) -> bool {
        !self.no_color
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("file", self.backing_file_path())
    }
}
