//! Linkable - print entity routes and hotlinks from `linkable.toml`.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, OutputArgs, SourceArgs, TargetArgs, to_params};
use linkable::{LinkableConfig, Params, Record, Registry, RouteValue, UrlGenerator, log};

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    linkable::logger::set_verbose(cli.verbose);

    if let Err(err) = run(&cli) {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = LinkableConfig::from_path(&cli.config)
        .with_context(|| format!("failed to load `{}`", cli.config.display()))?;
    let registry = Registry::from_config(&config)?;

    match &cli.command {
        Commands::Route {
            source,
            params,
            output,
        } => {
            let record = source_record(&registry, source)?;
            let route = registry
                .bind(&source.entity, &record)?
                .url_route(source.action.as_deref(), to_params(&params.params))?;
            print_route(&registry, &route, output)
        }
        Commands::Link {
            source,
            params,
            html,
        } => {
            let record = source_record(&registry, source)?;
            let markup = registry.bind(&source.entity, &record)?.hotlink(
                registry.urls(),
                source.action.as_deref(),
                to_params(&params.params),
                &html.attributes(),
            )?;
            println!("{markup}");
            Ok(())
        }
        Commands::RouteTo {
            source,
            target,
            output,
        } => {
            let record = source_record(&registry, source)?;
            let target_record = target_record(&registry, target)?;
            let route = registry.bind(&source.entity, &record)?.url_route_to(
                &registry.bind(&target.target, &target_record)?,
                source.action.as_deref(),
            )?;
            print_route(&registry, &route, output)
        }
        Commands::LinkTo {
            source,
            target,
            params,
            html,
        } => {
            let record = source_record(&registry, source)?;
            let target_record = target_record(&registry, target)?;
            let markup = registry.bind(&source.entity, &record)?.hotlink_to(
                registry.urls(),
                &registry.bind(&target.target, &target_record)?,
                source.action.as_deref(),
                to_params(&params.params),
                &html.attributes(),
            )?;
            println!("{markup}");
            Ok(())
        }
        Commands::List => list_entities(&registry),
    }
}

fn source_record(registry: &Registry, source: &SourceArgs) -> Result<Record> {
    Ok(registry.record(&source.entity, to_params(&source.attrs))?)
}

fn target_record(registry: &Registry, target: &TargetArgs) -> Result<Record> {
    Ok(registry.record(&target.target, to_params(&target.target_attrs))?)
}

fn print_route(registry: &Registry, route: &RouteValue, output: &OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(route)?);
    } else {
        println!("{}", registry.urls().to(route, output.absolute)?);
    }
    Ok(())
}

/// Print `name  route/default_action` for every configured entity.
fn list_entities(registry: &Registry) -> Result<()> {
    let names = registry.names();
    if names.is_empty() {
        log!("config"; "no entities configured");
        return Ok(());
    }

    let width = names.iter().map(|name| name.len()).max().unwrap_or_default();
    for name in names {
        let record = registry.record(name, Params::new())?;
        let linked = registry.bind(name, &record)?;
        println!(
            "{name:<width$}  {}/{}",
            linked.route(),
            linked.default_action()
        );
    }
    Ok(())
}
