//! Command-line interface definitions for `studio-content`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};
use studio_content::ConfigLayer;

/// Parsed CLI arguments for `studio-content`.
#[derive(Debug, Parser)]
#[command(name = "studio-content")]
#[command(about = "Fetch and resolve studio site content from the document store")]
#[command(version)]
pub struct Args {
    /// Configuration file to read instead of `studio-content.toml`.
    #[arg(long, value_name = "path", global = true)]
    pub config: Option<Utf8PathBuf>,
    /// Store connection overrides.
    #[command(flatten)]
    pub store: StoreArgs,
    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Flags that override configuration file and environment values.
#[derive(Debug, Default, ClapArgs)]
pub struct StoreArgs {
    /// Cloud project hosting the database.
    #[arg(long, value_name = "id", global = true)]
    pub project_id: Option<String>,
    /// Database id within the project.
    #[arg(long, value_name = "id", global = true)]
    pub database: Option<String>,
    /// REST API root URL.
    #[arg(long, value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// Web API key sent with every request.
    #[arg(long, value_name = "key", global = true)]
    pub api_key: Option<String>,
    /// Collection holding one document per content key.
    #[arg(long, value_name = "name", global = true)]
    pub collection: Option<String>,
    /// JSON file mapping content keys to Default Records.
    #[arg(long, value_name = "path", global = true)]
    pub defaults: Option<Utf8PathBuf>,
}

impl StoreArgs {
    /// Convert the flags into a configuration layer; unset flags stay unset.
    pub fn into_layer(self) -> ConfigLayer {
        ConfigLayer {
            project_id: self.project_id,
            database: self.database,
            base_url: self.base_url,
            api_key: self.api_key,
            content_collection: self.collection,
            defaults_path: self.defaults,
            ..ConfigLayer::default()
        }
    }
}

/// Operations supported by `studio-content`.
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Resolve a content key against its Default Record.
    Resolve {
        /// Content key, e.g. `heroContent`.
        key: String,
    },
    /// Fetch and map one document without merging defaults.
    Get {
        /// Document path relative to the database root.
        path: String,
    },
    /// Fetch and map every document of a collection.
    List {
        /// Collection path relative to the database root.
        collection: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&["studio-content", "resolve", "heroContent"], Command::Resolve { key: "heroContent".into() })]
    #[case(&["studio-content", "get", "content/faqContent"], Command::Get { path: "content/faqContent".into() })]
    #[case(&["studio-content", "list", "projects"], Command::List { collection: "projects".into() })]
    fn parses_subcommands(#[case] argv: &[&str], #[case] expected: Command) {
        let args = Args::try_parse_from(argv).expect("arguments parse");
        assert_eq!(args.command, expected);
    }

    #[test]
    fn flags_become_an_override_layer() {
        let args = Args::try_parse_from([
            "studio-content",
            "-vv",
            "resolve",
            "heroContent",
            "--project-id",
            "homepage",
            "--collection",
            "siteContent",
        ])
        .expect("arguments parse");
        assert_eq!(args.verbose, 2);

        let layer = args.store.into_layer();
        assert_eq!(layer.project_id.as_deref(), Some("homepage"));
        assert_eq!(layer.content_collection.as_deref(), Some("siteContent"));
        assert!(layer.database.is_none());
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Args::try_parse_from(["studio-content"]).is_err());
    }
}
