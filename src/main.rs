// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use process_chain::config::{load_and_validate_config, Config, TranslationRuntime};
use serde_json::Value;
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: process-chain [--config FILE] [--param NAME=VALUE]... <graph.json>
       process-chain [--config FILE] --list-processes";

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    params: Vec<(String, Value)>,
    list_processes: bool,
    graph: Option<String>,
}

/// `NAME=VALUE`; the value is read as JSON and taken as a plain string otherwise.
fn parse_param(text: &str) -> Result<(String, Value)> {
    let (name, raw) = text
        .split_once('=')
        .with_context(|| format!("parameter '{}' is not of the form NAME=VALUE", text))?;
    if name.is_empty() {
        bail!("parameter '{}' has an empty name", text);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().context("--config needs a file")?),
            "--param" => {
                let param = args.next().context("--param needs NAME=VALUE")?;
                parsed.params.push(parse_param(&param)?);
            }
            "--list-processes" => parsed.list_processes = true,
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, USAGE),
            _ if parsed.graph.is_some() => bail!("only one graph file may be given\n{}", USAGE),
            _ => parsed.graph = Some(arg),
        }
    }

    Ok(parsed)
}

fn run(args: Args) -> Result<()> {
    let cfg = match &args.config {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("failed to load config {}", path))?,
        None => Config::default(),
    };

    let mut runtime = TranslationRuntime::from_config(&cfg);

    if args.list_processes {
        for (process_id, description) in runtime.registry().descriptions() {
            println!("{:<24} {}", process_id, description);
        }
        return Ok(());
    }

    let Some(graph_path) = args.graph else {
        bail!("{}", USAGE);
    };

    for (name, value) in args.params {
        runtime.bind_parameter(name, value);
    }

    let text = fs::read_to_string(&graph_path)
        .with_context(|| format!("failed to read {}", graph_path))?;
    let description: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", graph_path))?;

    let chain = runtime
        .translate(&description)
        .with_context(|| format!("failed to translate {}", graph_path))?;

    println!("{}", serde_json::to_string_pretty(&chain.to_document())?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = parse_args(env::args().skip(1)).and_then(run);
    if let Err(e) = result {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
