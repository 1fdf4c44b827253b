use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::request::RequestContext;
use crate::router::RouteResolver;
use crate::routes::RouteTable;
use crate::runtime_config::DEFAULT_ROUTES_FILE;

#[derive(Parser, Debug)]
#[command(name = "brrtdispatch")]
#[command(about = "Inspect route sources and resolve requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List declared routes and controller aliases
    Routes {
        #[arg(short, long, env = "BRRTD_ROUTES_FILE", default_value = DEFAULT_ROUTES_FILE)]
        routes: PathBuf,
    },
    /// Resolve a command-line request and print the target as JSON
    Resolve {
        #[arg(short, long, env = "BRRTD_ROUTES_FILE", default_value = DEFAULT_ROUTES_FILE)]
        routes: PathBuf,

        /// Request method (DELETE, GET, HEAD, OPTIONS, POST, PUT)
        method: String,

        /// Request path, e.g. `/users/5.json`
        path: String,

        /// Forced response format
        format: Option<String>,

        /// Query string merged into the payload, e.g. `page=2&sort=name`
        query: Option<String>,
    },
}

/// Parse the process arguments and run the selected command on stdout.
///
/// # Errors
///
/// Fails when the route source cannot be loaded or output cannot be written.
pub fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Ok(if run_cli_with(cli, &mut out)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run a parsed command, writing its output to `out`. Returns `false` when
/// `resolve` finds no route.
///
/// # Errors
///
/// See [`run_cli`]. An unsupported method is reported as an error too.
pub fn run_cli_with(cli: Cli, out: &mut dyn Write) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Routes { routes } => {
            let table = RouteTable::load(&routes)?;
            list_routes(&table, out)?;
            Ok(true)
        }
        Commands::Resolve {
            routes,
            method,
            path,
            format,
            query,
        } => {
            let table = RouteTable::load(&routes)?;
            let mut args = vec![method, path];
            args.extend(format.or_else(|| query.as_ref().map(|_| String::new())));
            args.extend(query);

            let mut ctx = RequestContext::from_cli(args).context("invalid request")?;
            let extension = ctx.extension().map(str::to_string);
            let negotiated = ctx.negotiated_format();
            let target = RouteResolver::new(table.into_shared()).resolve(&ctx);

            let report = json!({
                "request_id": ctx.request_id().to_string(),
                "method": ctx.method().as_str(),
                "path": ctx.path(),
                "extension": extension,
                "format": negotiated,
                "target": target,
            });
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;

            Ok(target.is_some())
        }
    }
}

fn list_routes(table: &RouteTable, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "[routes] count={}", table.len())?;
    for (name, route) in table.declared_routes() {
        let method = route.method.map_or("ANY", |m| m.as_str());
        write!(out, "[route] {name}: {method} {} -> {}", route.route, route.target)?;
        if !route.arguments.is_empty() {
            write!(out, " {:?}", route.arguments)?;
        }
        writeln!(out)?;
    }

    let mut aliases: Vec<_> = table.controller_aliases().iter().collect();
    aliases.sort();
    writeln!(out, "[controllers] count={}", aliases.len())?;
    for (token, controller) in aliases {
        writeln!(out, "[alias] {token} -> {controller}")?;
    }
    Ok(())
}
