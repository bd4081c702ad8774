// src/cli.rs
//! Command-line surface of the `notion-sdk` binary.

use clap::{Parser, Subcommand};
use notion_sdk::ConfigOverrides;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion integration token (defaults to $API_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Notion-Version header, e.g. 2022-06-28 (defaults to $NOTION_VERSION)
    #[arg(long, global = true)]
    pub notion_version: Option<String>,

    /// API base URL, e.g. https://api.notion.com/v1 (defaults to $NOTION_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Api(ApiCommand),

    /// Print the value at a dotted key path of a saved JSON document
    Lookup { file: PathBuf, path: String },
}

/// Commands that call the Notion API.
#[derive(Subcommand, Debug)]
pub enum ApiCommand {
    /// Retrieve a user by ID
    User { id: String },

    /// List all users in the workspace
    Users,

    /// Retrieve a database (its schema) by ID or URL
    Database { id: String },

    /// List the child blocks of a page or block
    Children {
        id: String,
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Query the rows of a database
    Query {
        id: String,
        /// Sort object as JSON (defaults to last edited, newest first)
        #[arg(long)]
        sort: Option<String>,
        /// Filter object as JSON
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        start_cursor: Option<String>,
        /// Rows per page (defaults to 10)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Retrieve a page by ID or URL
    Page {
        id: String,
        /// Print only id, cover, title and created time
        #[arg(long, default_value_t = false)]
        simplify: bool,
    },

    /// Search pages and databases by text
    Search {
        query: String,
        /// Restrict results to "page" or "database"
        #[arg(long)]
        object_type: Option<String>,
    },

    /// Find a database whose title matches exactly
    FindDatabase { title: String },

    /// List the options of a select or multi-select property of a database
    Options { database_id: String, property: String },
}

impl CommandLineInput {
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_token: self.token.clone(),
            notion_version: self.notion_version.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_with_global_options_after_subcommand() {
        let cli = CommandLineInput::try_parse_from([
            "notion-sdk",
            "query",
            "8e2c2b769e1d47d287b9ed3035d607ae",
            "--page-size",
            "5",
            "--notion-version",
            "2022-06-28",
        ])
        .unwrap();

        assert_eq!(cli.notion_version.as_deref(), Some("2022-06-28"));
        match cli.command {
            Command::Api(ApiCommand::Query { page_size, sort, .. }) => {
                assert_eq!(page_size, Some(5));
                assert!(sort.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lookup_is_its_own_command() {
        let cli = CommandLineInput::try_parse_from([
            "notion-sdk",
            "lookup",
            "page.json",
            "cover.external.url",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Lookup { .. }));
    }

    #[test]
    fn find_database_uses_kebab_case() {
        let cli = CommandLineInput::try_parse_from(["notion-sdk", "find-database", "Media"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Api(ApiCommand::FindDatabase { ref title }) if title == "Media"
        ));
    }
}
