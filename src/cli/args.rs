// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for routeview

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use super::config::EngineKind;

#[derive(Parser)]
#[command(name = "routeview")]
#[command(about = "Render named templates and serve them over HTTP routes")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

/// Template source options shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    #[arg(short, long, help = "Template directory (overrides configuration)")]
    pub templates: Option<PathBuf>,

    #[arg(short, long, value_enum, help = "Template engine (overrides configuration)")]
    pub engine: Option<EngineKind>,

    #[arg(long, help = "Fail on missing template variables")]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template and print the output
    Render {
        #[arg(help = "Template name, relative to the template directory")]
        name: String,

        #[arg(long = "var", help = "Template variables (key=value)")]
        vars: Vec<String>,

        #[arg(short, long, help = "Write output to a file instead of stdout")]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: TemplateArgs,
    },

    /// Load every template and report compile errors
    Check {
        #[command(flatten)]
        source: TemplateArgs,
    },

    /// Serve templates at /preview/<name> with query parameters as context
    Serve {
        #[arg(long, help = "Address to bind")]
        host: Option<String>,

        #[arg(short, long, help = "Port to listen on")]
        port: Option<u16>,

        #[command(flatten)]
        source: TemplateArgs,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                if key.is_empty() {
                    return Err(anyhow::anyhow!(
                        "Invalid variable '{}'. Key must not be empty",
                        var
                    ));
                }
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
