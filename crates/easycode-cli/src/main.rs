// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! EasyCode command-line interface.
//!
//! This is the main entry point for the `easycode` command. It drives
//! the front end over a single `.ec` source file: lexing to a token
//! table, or lexing and parsing to an AST with rendered diagnostics.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use easycode_core::ast::TreePrinter;
use easycode_core::source_analysis::{Severity, SourceMap, lex_with_eof, parse};
use miette::{IntoDiagnostic, Result, WrapErr, miette};

mod diagnostic;

use diagnostic::ReportDiagnostic;

/// EasyCode: a front end for a small imperative teaching language
#[derive(Debug, Parser)]
#[command(name = "easycode")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lex a source file and print the token table
    Tokens {
        /// Source file to lex (must have the .ec extension)
        path: Utf8PathBuf,
    },

    /// Lex and parse a source file, reporting every diagnostic
    Check {
        /// Source file to check (must have the .ec extension)
        path: Utf8PathBuf,
    },

    /// Lex and parse a source file, then print the syntax tree
    Parse {
        /// Source file to parse (must have the .ec extension)
        path: Utf8PathBuf,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let clean = match cli.command {
        Command::Tokens { path } => tokens(&path)?,
        Command::Check { path } => check(&path, false)?,
        Command::Parse { path } => check(&path, true)?,
    };

    if clean {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

/// Reads a source file, enforcing the `.ec` extension.
fn read_source(path: &Utf8PathBuf) -> Result<String> {
    if path.extension() != Some("ec") {
        return Err(miette!(
            "'{path}' must have the .ec extension (e.g. sample.ec)"
        ));
    }
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read '{path}'"))
}

/// Lexes a file and prints the lexeme/token table.
///
/// Returns `true` when no lexical errors were found.
fn tokens(path: &Utf8PathBuf) -> Result<bool> {
    let source = read_source(path)?;
    let map = SourceMap::new(&source);
    let (tokens, errors) = lex_with_eof(&source);

    println!("{:-^58}", "");
    println!("| {:<8} | {:<24} | {:<16} |", "Location", "Lexeme", "Token");
    println!("{:-^58}", "");
    for token in &tokens {
        let location = map.position_of(token.span()).to_string();
        println!(
            "| {:<8} | {:<24} | {:<16} |",
            location,
            token.kind().to_string(),
            token.kind().name(),
        );
    }
    println!("{:-^58}", "");
    println!("{} tokens", tokens.len());

    for error in &errors {
        let report = ReportDiagnostic::from_lex_error(error, path.as_str(), &source);
        eprintln!("{:?}", miette::Report::new(report));
    }

    Ok(errors.is_empty())
}

/// Lexes and parses a file, rendering every diagnostic.
///
/// When `print_tree` is set, the syntax tree is printed as well.
/// Returns `true` when no errors were found.
fn check(path: &Utf8PathBuf, print_tree: bool) -> Result<bool> {
    let source = read_source(path)?;
    let (tokens, lex_errors) = lex_with_eof(&source);
    let (program, diagnostics) = parse(tokens);

    for error in &lex_errors {
        let report = ReportDiagnostic::from_lex_error(error, path.as_str(), &source);
        eprintln!("{:?}", miette::Report::new(report));
    }
    for diagnostic in &diagnostics {
        let report = ReportDiagnostic::from_parse_diagnostic(diagnostic, path.as_str(), &source);
        eprintln!("{:?}", miette::Report::new(report));
    }

    if print_tree {
        let map = SourceMap::new(&source);
        print!("{}", TreePrinter::new(&map).print(&program));
    }

    let error_count = lex_errors.len()
        + diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();

    if error_count == 0 {
        println!("{path}: ok");
        Ok(true)
    } else {
        println!("{path}: {error_count} error(s)");
        Ok(false)
    }
}
