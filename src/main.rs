use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use formwork::config::Config;
use formwork::customer::{CustomerForm, EMAIL_PATH};
use formwork::logging;

#[derive(Parser)]
#[command(name = "formwork", about = "Customer form demo: validation, conditional rules, debounced messages")]
struct Cli {
    /// Path to a TOML config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the debounce quiet period in milliseconds.
    #[arg(long)]
    debounce_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the form through its validation scenarios.
    Demo,
    /// Apply the fixed test data set and save the form.
    Populate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path).context("loading config")?,
        None => Config::load().context("loading config")?,
    };
    if let Some(ms) = cli.debounce_ms {
        config.debounce_quiet_ms = ms;
        config.validate().context("invalid --debounce-ms")?;
    }

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&config).await,
        Command::Populate => run_populate(&config),
    }
}

/// The scenario walk: conditional phone requirement, address append, and the
/// debounced email message.
async fn run_demo(config: &Config) -> anyhow::Result<()> {
    let form = CustomerForm::new(config);
    let watcher = form.spawn_message_watcher();
    let mut message = form.message();

    tracing::info!(valid = form.is_valid(), "initial state");

    form.set_notification("email")?;
    tracing::info!(valid = form.is_valid(), "notification via email, empty phone is fine");

    form.set_notification("text")?;
    tracing::info!(
        phone_valid = form.field_is_valid("phone"),
        "notification via text makes the phone required"
    );

    form.set_value("phone", "0491230412")?;
    tracing::info!(phone_valid = form.field_is_valid("phone"), "phone filled in");

    let count = form.append_address()?;
    tracing::info!(addresses = count, "address entry appended");

    // Rapid typing into the email field; only the last value survives the
    // quiet period and produces a message.
    form.mark_touched(EMAIL_PATH)?;
    for partial in ["t", "te", "test", "test@", "not-an-email"] {
        form.set_value(EMAIL_PATH, partial)?;
        tokio::time::sleep(Duration::from_millis(config.debounce_quiet_ms / 10)).await;
    }
    message
        .changed()
        .await
        .context("message watcher stopped early")?;
    tracing::info!(message = %*message.borrow(), "derived email message");

    form.set_value(EMAIL_PATH, "jack@torchwood.example")?;
    form.set_value("emailGroup.confirmEmail", "jack@torchwood.example")?;
    message
        .changed()
        .await
        .context("message watcher stopped early")?;
    tracing::info!(message = %*message.borrow(), valid = form.is_valid(), "email corrected");

    watcher.abort();
    Ok(())
}

fn run_populate(config: &Config) -> anyhow::Result<()> {
    let form = CustomerForm::new(config);
    form.populate_test_data()
        .context("applying test data")?;
    let json = form.save();
    println!("{json}");
    Ok(())
}
