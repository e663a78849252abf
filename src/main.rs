//! # nametag CLI
//!
//! Command-line interface for name label printing.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP server
//! nametag serve --listen 0.0.0.0:5000
//!
//! # Save a label as PNG instead of printing
//! nametag preview Jane Doe --png jane.png
//!
//! # Print one label
//! nametag print Jane Doe --printer /dev/usb/lp0
//!
//! # List supported printer models
//! nametag models
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use nametag::{
    Dispatch, NametagError, PrintDispatcher, PrinterSettings,
    dispatch::{DEFAULT_MODEL, DEFAULT_PRINTER},
    printer::{ModelSource, query::DEFAULT_MODELS_COMMAND},
    render::{FontFile, LabelRenderer},
    server::{self, DEFAULT_FONT, DEFAULT_LISTEN_ADDR, ServerConfig},
};

/// nametag - Name label printing for Brother QL printers
#[derive(Parser, Debug)]
#[command(name = "nametag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "NAMETAG_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,

        /// Origin allowed to call the API (repeatable, default: any)
        #[arg(long = "allow-origin", value_name = "ORIGIN")]
        allow_origins: Vec<String>,

        #[command(flatten)]
        printer: PrinterArgs,

        #[command(flatten)]
        font: FontArgs,
    },

    /// Render a label to PNG without printing
    Preview {
        first_name: String,
        last_name: String,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,

        #[command(flatten)]
        font: FontArgs,
    },

    /// Render and print one label
    Print {
        first_name: String,
        last_name: String,

        #[command(flatten)]
        printer: PrinterArgs,

        #[command(flatten)]
        font: FontArgs,
    },

    /// List supported printer models
    Models {
        #[command(flatten)]
        source: ModelsArgs,
    },
}

#[derive(Args, Debug)]
struct PrinterArgs {
    /// Printer identifier (usb://VID:PID[/SERIAL], /dev/usb/lp0, tcp://HOST[:PORT])
    #[arg(long, env = "NAMETAG_PRINTER", default_value = DEFAULT_PRINTER)]
    printer: String,

    /// Printer model
    #[arg(long, env = "NAMETAG_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[command(flatten)]
    models: ModelsArgs,
}

#[derive(Args, Debug)]
struct ModelsArgs {
    /// Command printing the supported model listing, or "builtin" for the built-in table
    #[arg(long, env = "NAMETAG_MODELS_COMMAND", default_value = DEFAULT_MODELS_COMMAND)]
    models_command: String,
}

#[derive(Args, Debug)]
struct FontArgs {
    /// TrueType font file, or a file name to look up in the system font database
    #[arg(long, env = "NAMETAG_FONT", default_value = DEFAULT_FONT)]
    font: PathBuf,
}

impl PrinterArgs {
    fn settings(&self) -> PrinterSettings {
        PrinterSettings {
            identifier: self.printer.clone(),
            model: self.model.clone(),
            ..Default::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), NametagError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            allow_origins,
            printer,
            font,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                allowed_origins: allow_origins,
                printer: printer.settings(),
                font_path: font.font,
                models_command: printer.models.models_command,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))
        }

        Commands::Preview {
            first_name,
            last_name,
            png,
            font,
        } => {
            let renderer = LabelRenderer::new(Arc::new(FontFile::new(font.font)));
            let label = renderer.render(&first_name, &last_name)?;
            std::fs::write(&png, label.to_png()?)?;
            println!(
                "Saved {}x{} label to {} (font size {})",
                label.width(),
                label.height(),
                png.display(),
                label.font_size()
            );
            Ok(())
        }

        Commands::Print {
            first_name,
            last_name,
            printer,
            font,
        } => {
            let config = ServerConfig {
                printer: printer.settings(),
                models_command: printer.models.models_command,
                ..Default::default()
            };
            let renderer = LabelRenderer::new(Arc::new(FontFile::new(font.font)));
            let dispatcher = PrintDispatcher::new(config.printer.clone(), config.model_query());

            let label = renderer.render(&first_name, &last_name)?;
            dispatcher.dispatch(&label)?;
            println!(
                "Label printed successfully on {}",
                dispatcher.settings().identifier
            );
            Ok(())
        }

        Commands::Models { source } => {
            let listing = ModelSource::parse(&source.models_command)
                .into_query()
                .supported_models()?;
            print!("{}", listing);
            Ok(())
        }
    }
}
