//! Offline gather example: parse saved Dell OS9 command output
//!
//! This example runs a full fact gathering pass against command output
//! saved to files instead of a live switch, and prints the resulting facts
//! as namespaced JSON.
//!
//! Each command is read from `<dir>/<file name>`, where the file name is the
//! command with spaces replaced by `_` and `/` replaced by `7`
//! (`show running-config` -> `show_running-config`).
//!
//! # Usage
//!
//! ```bash
//! cargo run --example gather_files -- --dir os9facts/tests/fixtures
//! ```
//!
//! Only routing and LLDP facts, without the raw config:
//! ```bash
//! cargo run --example gather_files -- --dir os9facts/tests/fixtures --subset routing --subset lldp --no-config
//! ```

use std::env;
use std::path::PathBuf;

use log::info;
use os9facts::error::TransportError;
use os9facts::facts::DEFAULT_NAMESPACE;
use os9facts::{CommandExecutor, GatherOptions, gather};

/// Command executor that answers from saved output files.
struct FileExecutor {
    dir: PathBuf,
}

impl FileExecutor {
    fn path_for(&self, command: &str) -> PathBuf {
        let name = command.replace('|', "").replace(' ', "_").replace('/', "7");
        self.dir.join(name)
    }
}

impl CommandExecutor for FileExecutor {
    async fn execute(&mut self, command: &str) -> os9facts::Result<String> {
        let path = self.path_for(command);
        info!("Reading '{}' from {}", command, path.display());
        let output = tokio::fs::read_to_string(&path)
            .await
            .map_err(TransportError::from)?;
        Ok(output)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut options = GatherOptions::new().include_config(args.include_config);
    if !args.subsets.is_empty() {
        options = options.gather_subset(args.subsets);
    }

    let mut executor = FileExecutor { dir: args.dir };
    let facts = gather(&mut executor, &options).await?;

    let json = facts.namespaced(&args.namespace)?;
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}

/// Simple argument parser
struct Args {
    dir: PathBuf,
    subsets: Vec<String>,
    include_config: bool,
    namespace: String,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut dir = PathBuf::from("os9facts/tests/fixtures");
        let mut subsets = Vec::new();
        let mut include_config = true;
        let mut namespace = DEFAULT_NAMESPACE.to_string();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--dir" | "-d" => {
                    i += 1;
                    if i < args.len() {
                        dir = PathBuf::from(&args[i]);
                    }
                }
                "--subset" | "-s" => {
                    i += 1;
                    if i < args.len() {
                        subsets.push(args[i].clone());
                    }
                }
                "--namespace" | "-n" => {
                    i += 1;
                    if i < args.len() {
                        namespace = args[i].clone();
                    }
                }
                "--no-config" => include_config = false,
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Self {
            dir,
            subsets,
            include_config,
            namespace,
        }
    }

    fn print_help() {
        println!(
            r#"os9facts gather_files example

USAGE:
    cargo run --example gather_files -- [OPTIONS]

OPTIONS:
    -d, --dir <DIR>            Directory with saved command output [default: os9facts/tests/fixtures]
    -s, --subset <SUBSET>      Subset to gather, repeatable (default, routing, lldp, all, !name) [default: all]
    -n, --namespace <PREFIX>   Prefix for top-level fact keys [default: ansible_net_]
    --no-config                Leave the raw running config out of the facts
    --help                     Print this help message
"#
        );
    }
}
