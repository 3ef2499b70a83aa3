//! # CLI Layer
//!
//! One possible UI client for filedict. This is the **only** place that:
//! - Parses arguments (clap)
//! - Installs the log subscriber
//! - Writes to stdout/stderr
//!
//! Each `handle_*` calls the API and hands the `CmdResult` to `render`.
//! Interactive subcommands (`menu`, `select`, `delete` without a name) drive a
//! `DictionaryCli` over stdin/stdout.

use super::render::{print_config, print_dictionaries, print_messages, print_records};
use super::setup::{Cli, Commands};
use clap::Parser;
use filedict::api::{CmdResult, ConfigAction, FiledictApi};
use filedict::error::Result;
use filedict::init::initialize;
use filedict::interactive::{Prompter, TerminalPrompter};
use serde_json::Value;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct AppContext {
    api: FiledictApi<Value>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("filedict=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.dir.as_deref())?;
    let mut ctx = AppContext { api: ctx.api };

    match cli.command {
        None | Some(Commands::Menu) => handle_menu(&mut ctx),
        Some(Commands::Create { name }) => handle_create(&mut ctx, &name),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Select) => handle_select(&mut ctx),
        Some(Commands::Delete { name, yes }) => handle_delete(&mut ctx, name, yes),
        Some(Commands::Show { name }) => handle_show(&ctx, &name),
        Some(Commands::Get { name, key }) => handle_get(&ctx, &name, &key),
        Some(Commands::Add { name, key, value }) => {
            let result = ctx.api.add_record(&name, &key, &value)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Update { name, key, value }) => {
            let result = ctx.api.update_record(&name, &key, &value)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Remove { name, key }) => {
            let result = ctx.api.remove_record(&name, &key)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    let mut picker = ctx.api.picker(TerminalPrompter::stdio());
    picker.run_menu()
}

fn handle_create(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.create_dictionary(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_dictionaries()?;
    print_dictionaries(&result.dictionaries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_select(ctx: &mut AppContext) -> Result<()> {
    let picked = ctx
        .api
        .picker(TerminalPrompter::stdio())
        .user_pick()?
        .map(|dict| dict.name().to_string());
    match picked {
        Some(name) => {
            println!("Selected dictionary: {}", name);
            handle_show(ctx, &name)
        }
        None => Ok(()),
    }
}

fn handle_delete(ctx: &mut AppContext, name: Option<String>, yes: bool) -> Result<()> {
    let Some(name) = name else {
        ctx.api.picker(TerminalPrompter::stdio()).delete_dictionary()?;
        return Ok(());
    };

    let confirmed = yes
        || TerminalPrompter::stdio().confirm(
            &format!("Are you sure you want to delete the dictionary '{}'?", name),
            false,
        )?;
    let result = ctx.api.delete_dictionary(&name, confirmed)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, name: &str) -> Result<()> {
    print_result(ctx.api.show(name)?);
    Ok(())
}

fn handle_get(ctx: &AppContext, name: &str, key: &str) -> Result<()> {
    let result = ctx.api.get_record(name, key)?;
    // Bare value so the output can be piped into jq
    for (_, value) in &result.records {
        println!("{}", value);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_result(result: CmdResult) {
    print_records(&result.records);
    print_messages(&result.messages);
}
