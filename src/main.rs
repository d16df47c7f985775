// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use the_sieve::config::{load_options, load_schema, load_value, Options};
use the_sieve::engine::Compiler;
use the_sieve::errors::Error;

const USAGE: &str = "Usage: the-sieve <schema-file> <document-file> [document-file ...] [--options <options-file>]";

/// Parsed command line
struct Invocation {
    schema: String,
    options: Option<String>,
    documents: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut options = None;
    let mut positional = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--options" {
            let path = iter.next().context("--options needs a file")?;
            options = Some(path.clone());
        } else {
            positional.push(arg.clone());
        }
    }

    if positional.len() < 2 {
        anyhow::bail!("expected a schema file and at least one document file");
    }
    let schema = positional.remove(0);
    Ok(Invocation {
        schema,
        options,
        documents: positional,
    })
}

fn report(error: &Error) {
    match error.as_full() {
        Some(aggregate) => {
            eprintln!("❌ {}", aggregate);
            for (path, message) in aggregate.path_error_messages() {
                eprintln!("   • {}: {}", path, message);
            }
        }
        None => match error.as_expectation() {
            Some(expectation) => eprintln!("❌ {}", expectation.display_message()),
            None => eprintln!("❌ {}", error),
        },
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            eprintln!("Example: the-sieve configs/person.schema.yaml configs/person.yaml --options configs/strict.options.toml");
            return Ok(ExitCode::FAILURE);
        }
    };

    let start_time = Instant::now();
    let schema = load_schema(&invocation.schema)
        .with_context(|| format!("loading schema {}", invocation.schema))?;
    let options = match &invocation.options {
        Some(path) => load_options(path).with_context(|| format!("loading options {}", path))?,
        None => Options::new(),
    };

    let validator = match Compiler::standard().compile(&schema, &options) {
        Ok(validator) => validator,
        Err(error) => {
            eprintln!("Schema {} does not compile:", invocation.schema);
            report(&error);
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::info!(elapsed = ?start_time.elapsed(), "schema compiled");

    let mut failures = 0;
    for path in &invocation.documents {
        let document = load_value(path).with_context(|| format!("loading document {}", path))?;

        match validator.validate(document).await {
            Ok(value) => {
                println!("✅ {}", path);
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            Err(error) => {
                failures += 1;
                eprintln!("{}:", path);
                report(&error);
            }
        }
    }

    tracing::info!(elapsed = ?start_time.elapsed(), documents = invocation.documents.len(), failures, "validation finished");

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
