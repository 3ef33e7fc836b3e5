//! Command-line interface definitions.

use clap::{Args, ColorChoice, Parser, Subcommand};
use linkable::Params;
use serde_json::Value;
use std::path::PathBuf;

/// Build entity routes and hotlinks from linkable.toml
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short = 'C', long, global = true, default_value = linkable::config::CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the url route of an entity
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render the hotlink of an entity
    #[command(visible_alias = "l")]
    Link {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        html: HtmlArgs,
    },

    /// Print the cross-link route from an entity to a target entity
    #[command(visible_alias = "rt")]
    RouteTo {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render the cross-link hotlink from an entity to a target entity
    #[command(visible_alias = "lt")]
    LinkTo {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        params: ParamArgs,

        #[command(flatten)]
        html: HtmlArgs,
    },

    /// List configured entities and their routes
    #[command(visible_alias = "ls")]
    List,
}

/// Source entity arguments
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Entity name as configured in `[entity.<NAME>]`
    pub entity: String,

    /// Action (defaults to the entity's default action)
    #[arg(short, long)]
    pub action: Option<String>,

    /// Entity attribute, KEY=VALUE (VALUE parsed as JSON when possible)
    #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub attrs: Vec<(String, Value)>,
}

/// Cross-link target arguments
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Target entity name
    pub target: String,

    /// Target attribute, KEY=VALUE
    #[arg(long = "target-attr", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub target_attrs: Vec<(String, Value)>,
}

/// Extra route params
#[derive(Args, Debug, Clone)]
pub struct ParamArgs {
    /// Extra route parameter, KEY=VALUE
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub params: Vec<(String, Value)>,
}

/// Route output arguments
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Print the route value as JSON instead of a url
    #[arg(long)]
    pub json: bool,

    /// Print an absolute url (requires `[url] base`)
    #[arg(long)]
    pub absolute: bool,
}

/// Hotlink markup arguments
#[derive(Args, Debug, Clone)]
pub struct HtmlArgs {
    /// HTML attribute for the rendered element, NAME=VALUE
    #[arg(long = "html", value_name = "NAME=VALUE", value_parser = parse_text_pair)]
    pub html: Vec<(String, String)>,
}

impl HtmlArgs {
    pub fn attributes(&self) -> Vec<(&str, &str)> {
        self.html
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

/// Collect KEY=VALUE pairs into params, later keys winning.
pub fn to_params(pairs: &[(String, Value)]) -> Params {
    pairs.iter().cloned().collect()
}

/// Parse `KEY=VALUE`, reading VALUE as JSON and falling back to a string.
fn parse_pair(s: &str) -> Result<(String, Value), String> {
    let (key, value) = parse_text_pair(s)?;
    let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
    Ok((key, value))
}

fn parse_text_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
