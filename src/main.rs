// src/main.rs

mod cli;

use anyhow::{anyhow, Context};
use clap::Parser;
use cli::{ApiCommand, Command, CommandLineInput};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_sdk::{
    extract_select_options, resolve, simplify_page, ClientConfig, DatabaseQuery, Document,
    KeyPath, NotionApi, NotionHttpClient, NotionId, ObjectType, PageArgs, PaginatedResponse,
};
use serde::Serialize;
use std::fs;

/// Sets up logging configuration.
///
/// Console output goes to stderr so stdout stays clean JSON.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_sdk.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_id(input: &str) -> anyhow::Result<NotionId> {
    NotionId::parse(input).with_context(|| format!("'{}' is not a Notion ID or URL", input))
}

fn parse_json_arg(name: &str, raw: Option<String>) -> anyhow::Result<Option<Document>> {
    raw.map(|text| {
        serde_json::from_str(&text).with_context(|| format!("--{} must be a JSON object", name))
    })
    .transpose()
}

/// Logs the cursor for the next page of a list response, if there is one.
fn report_continuation(document: &Document) {
    if let Ok(page) = PaginatedResponse::from_document(document.clone()) {
        if let Some(cursor) = page.continuation() {
            log::info!("More results available: --start-cursor {}", cursor);
        }
    }
}

/// Prints the value at a key path of a JSON file on disk.
fn lookup(file: &std::path::Path, path: &str) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let document: Document =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", file.display()))?;
    let key_path: KeyPath = path.parse()?;

    match resolve(&key_path, &document) {
        Some(value) => print_json(value),
        None => Err(anyhow!("'{}' not found in {}", key_path, file.display())),
    }
}

/// Runs one API command and prints its result.
async fn execute(client: &dyn NotionApi, command: ApiCommand) -> anyhow::Result<()> {
    match command {
        ApiCommand::User { id } => print_json(&client.retrieve_user(&parse_id(&id)?).await?),
        ApiCommand::Users => {
            let users = client.list_users().await?;
            report_continuation(&users);
            print_json(&users)
        }
        ApiCommand::Database { id } => {
            print_json(&client.retrieve_database(&parse_id(&id)?).await?)
        }
        ApiCommand::Children {
            id,
            start_cursor,
            page_size,
        } => {
            let args = PageArgs {
                start_cursor,
                page_size,
            };
            let children = client
                .retrieve_block_children(&parse_id(&id)?, &args)
                .await?;
            report_continuation(&children);
            print_json(&children)
        }
        ApiCommand::Query {
            id,
            sort,
            filter,
            start_cursor,
            page_size,
        } => {
            let query = DatabaseQuery {
                sort: parse_json_arg("sort", sort)?,
                filter: parse_json_arg("filter", filter)?,
                start_cursor,
                page_size,
            };
            let rows = client.query_database(&parse_id(&id)?, &query).await?;
            report_continuation(&rows);
            print_json(&rows)
        }
        ApiCommand::Page { id, simplify } => {
            let page = client.retrieve_page(&parse_id(&id)?).await?;
            if simplify {
                let simplified = simplify_page(&page)?;
                if !simplified.has_cover() {
                    log::info!("Page {} has no cover image", simplified.page_id);
                }
                print_json(&simplified)
            } else {
                print_json(&page)
            }
        }
        ApiCommand::Search { query, object_type } => {
            let object_type = ObjectType::parse_optional(object_type.as_deref())?;
            let results = client.search(&query, object_type).await?;
            report_continuation(&results);
            print_json(&results)
        }
        ApiCommand::FindDatabase { title } => {
            match client.search_database_by_title(&title).await? {
                Some(database) => print_json(&database),
                None => Err(anyhow!("No database titled '{}'", title)),
            }
        }
        ApiCommand::Options {
            database_id,
            property,
        } => {
            let database = client.retrieve_database(&parse_id(&database_id)?).await?;
            print_json(&extract_select_options(&database, &property)?)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| anyhow!("failed to initialise logging: {}", e))?;

    let overrides = cli.config_overrides();
    let command = match cli.command {
        Command::Lookup { file, path } => return lookup(&file, &path),
        Command::Api(command) => command,
    };

    let config = ClientConfig::resolve(overrides)?;
    log::debug!(
        "Using {} (Notion-Version {}, token {})",
        config.base_url,
        config.notion_version,
        config.api_key
    );
    let client = NotionHttpClient::new(&config)?;

    execute(&client, command).await
}
