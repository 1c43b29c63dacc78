//! Outreach CLI
//!
//! Browse clients and products, and drive the message-generation workflow
//! from the terminal against the sales assistant service.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;

use anyhow::Context;
use application::{ApplicationError, WorkflowController};
use clap::{Parser, Subcommand};
use domain::{EntityId, MessageType, Tone};
use infrastructure::{AppConfig, AppServices, init_tracing};
use tracing::debug;

/// Outreach CLI
#[derive(Parser)]
#[command(name = "outreach-cli")]
#[command(author, version, about = "Sales outreach message assistant", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml if present)
    #[arg(short, long, env = "OUTREACH_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List clients
    Clients,

    /// List products and their per-role benefits
    Products,

    /// Show previous messages for a client, newest first
    History {
        /// Client identifier
        #[arg(short, long)]
        client: EntityId,
    },

    /// Check that the sales assistant service is reachable
    Health,

    /// Generate a draft, optionally edit it, and save it
    ///
    /// Example: outreach-cli generate --client c1 --product p1 --type email --save
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Client identifier
    #[arg(short, long)]
    client: EntityId,

    /// Product identifier
    #[arg(short, long)]
    product: EntityId,

    /// Message type: email or linkedin
    #[arg(short = 't', long = "type", default_value = "email")]
    message_type: MessageType,

    /// Tone: professional, technical or formal
    #[arg(long, default_value = "professional")]
    tone: Tone,

    /// Extra instructions for the generator
    #[arg(short, long)]
    instructions: Option<String>,

    /// Generate a follow-up to this previous message
    #[arg(long, value_name = "MESSAGE_ID")]
    follow_up: Option<EntityId>,

    /// Replace the generated subject (email only)
    #[arg(long)]
    subject: Option<String>,

    /// Replace the generated content with the contents of this file
    #[arg(long)]
    content_file: Option<PathBuf>,

    /// Discard the draft and generate again this many times
    #[arg(long, default_value_t = 0)]
    regenerate: u8,

    /// Save the reviewed draft
    #[arg(long)]
    save: bool,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Operator-facing failure, without internal causes
fn operator_error(err: &ApplicationError) -> anyhow::Error {
    debug!(error = %err, "Workflow action failed");
    anyhow::anyhow!(err.user_message())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run one workflow instance from selection to an optional save
async fn run_generate(
    controller: &WorkflowController,
    args: GenerateArgs,
    json: bool,
) -> Result<(), anyhow::Error> {
    let GenerateArgs {
        client,
        product,
        message_type,
        tone,
        instructions,
        follow_up,
        subject,
        content_file,
        regenerate,
        save,
    } = args;

    controller
        .edit_form(|form| {
            form.set_client(client).set_product(product);
        })
        .map_err(|e| operator_error(&e))?;
    controller.advance().await.map_err(|e| operator_error(&e))?;

    controller
        .edit_form(|form| {
            form.set_message_type(message_type)
                .set_tone(tone)
                .set_instructions(instructions.unwrap_or_default())
                .set_follow_up(follow_up.is_some())
                .set_previous_message(follow_up);
        })
        .map_err(|e| operator_error(&e))?;

    let mut draft = controller.generate().await.map_err(|e| operator_error(&e))?;
    for _ in 0..regenerate {
        draft = controller
            .regenerate()
            .await
            .map_err(|e| operator_error(&e))?;
    }

    if let Some(subject) = subject {
        controller
            .edit_subject(subject)
            .map_err(|e| operator_error(&e))?;
    }
    if let Some(path) = content_file {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        controller
            .edit_content(content)
            .map_err(|e| operator_error(&e))?;
    }

    if !save {
        let buffers = controller.view().buffers;
        draft.subject = buffers.subject;
        draft.content = buffers.content;
        if json {
            print_json(&draft)?;
        } else {
            print!("{}", render::draft(&draft));
            println!();
            println!("Draft {} left unsaved (pass --save to keep the edits)", draft.id);
        }
        return Ok(());
    }

    let saved = controller.save().await.map_err(|e| operator_error(&e))?;
    if json {
        print_json(&saved)?;
    } else {
        print!("{}", render::committed(&saved));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())
        .context("loading configuration")?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_tracing(&config.telemetry)?;

    let services = AppServices::from_config(&config).map_err(|e| operator_error(&e))?;
    let catalogs = &services.dependencies.catalogs;

    match cli.command {
        Commands::Clients => {
            let clients = catalogs.clients().await.map_err(|e| operator_error(&e))?;
            if cli.json {
                print_json(&clients)?;
            } else {
                print!("{}", render::clients(&clients));
            }
        },

        Commands::Products => {
            let products = catalogs.products().await.map_err(|e| operator_error(&e))?;
            if cli.json {
                print_json(&products)?;
            } else {
                print!("{}", render::products(&products));
            }
        },

        Commands::History { client } => {
            let messages = services
                .dependencies
                .client_history(&client)
                .await
                .map_err(|e| operator_error(&e))?;
            if cli.json {
                print_json(&messages)?;
            } else {
                print!("{}", render::history(&messages));
            }
        },

        Commands::Health => {
            if services.api.is_available().await {
                println!("Healthy");
            } else {
                println!("Unhealthy: {}", config.api.base_url);
                std::process::exit(1);
            }
        },

        Commands::Generate(args) => {
            let host = services.workflow_host();
            let controller = host.start();
            let outcome = run_generate(&controller, args, cli.json).await;
            if outcome.is_err() {
                host.abandon_active();
            }
            services.catalog_cache_stats();
            outcome?;
        },
    }

    Ok(())
}
