use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use tracing_subscriber::EnvFilter;

use karuta::{Config, PdfSurface, SequencePlanner, Variant, render_sheet};

#[derive(Parser)]
#[command(name = "karuta")]
#[command(author, version, about = "Print double-sided byte-value card sheets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the PDF sheet
    Render {
        #[command(flatten)]
        sheet: SheetArgs,

        /// Output PDF path (defaults to karuta-<variant>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the planned cards as JSON
    Plan {
        #[command(flatten)]
        sheet: SheetArgs,
    },
}

#[derive(Args)]
struct SheetArgs {
    /// TOML run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Card design, overrides the config file
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Deck file with the card order, overrides the config file
    #[arg(long)]
    deck: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Ascii,
    Hex,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Ascii => Variant::Ascii,
            VariantArg::Hex => Variant::Hex,
        }
    }
}

impl SheetArgs {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).with_context(|| format!("reading {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(variant) = self.variant {
            config.variant = variant.into();
        }
        if let Some(deck) = &self.deck {
            config.values = None;
            config.deck = Some(deck.clone());
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { sheet, output } => {
            let mut config = sheet.config()?;
            if output.is_some() {
                config.output = output;
            }
            let layout = config.layout();
            let sequence = config.sequence().context("loading card order")?;
            let path = config.output();
            info!("{} sheet: {} cards -> {}", config.variant.name(), sequence.len(), path.display());

            render_sheet(&layout, config.variant, &sequence, PdfSurface::new(layout.page, &path))
                .with_context(|| format!("rendering {}", path.display()))?;
            Ok(())
        }
        Commands::Plan { sheet } => {
            let config = sheet.config()?;
            let layout = config.layout();
            let sequence = config.sequence().context("loading card order")?;
            let cards = SequencePlanner::new(&layout, config.variant).plan(&sequence)?;
            println!("{}", serde_json::to_string_pretty(&cards)?);
            Ok(())
        }
    }
}
