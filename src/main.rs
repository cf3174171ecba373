//! inlay - Inline formatting for HTML from the command line

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;

use inlay::html::{
    SelectionOffsets, apply_style_in_html, clear_formatting_in_html, remove_style_in_html,
    simplify_html, toggle_format_in_html, wrap_selection_in_html,
};
use inlay::{FormatConfig, decode_text, extract_meta_charset};

#[derive(Parser)]
#[command(name = "inlay")]
#[command(version, about = "Selection-aware inline formatting for HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    inlay wrap --start 8 --end 17 --tag strong page.html
    echo '<b>a</b><b>b</b>' | inlay simplify --tags b
    inlay style --start 0 --end 4 --set color=red --remove font-weight page.html")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON formatting configuration
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Args)]
struct SelectionArgs {
    /// Start offset in the visible text
    #[arg(long)]
    start: usize,

    /// End offset in the visible text
    #[arg(long)]
    end: usize,

    /// Input HTML file (stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

impl SelectionArgs {
    fn offsets(&self) -> SelectionOffsets {
        SelectionOffsets::new(self.start, self.end)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Wrap the selection in a tag, merging with existing ones
    Wrap {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long)]
        tag: String,
    },
    /// Add or remove a tag around the selection
    Toggle {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long)]
        tag: String,
    },
    /// Remove all formatting from the selection
    Clear {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Edit inline styles of the selected nodes
    Style {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Declaration to set, as property=value
        #[arg(long = "set", value_name = "PROP=VALUE")]
        set: Vec<String>,
        /// Property to remove
        #[arg(long = "remove", value_name = "PROP")]
        remove: Vec<String>,
    },
    /// Merge nested and adjacent formatting tags
    Simplify {
        /// Tags to simplify (default: configured formatting tags)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Input HTML file (stdin when omitted)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, String> {
    let config = match &cli.config {
        Some(path) => FormatConfig::load(path).map_err(|e| e.to_string())?,
        None => FormatConfig::default(),
    };

    match cli.command {
        Command::Wrap { selection, tag } => {
            let html = read_input(selection.input.as_deref())?;
            wrap_selection_in_html(&html, selection.offsets(), &tag).map_err(|e| e.to_string())
        }
        Command::Toggle { selection, tag } => {
            let html = read_input(selection.input.as_deref())?;
            toggle_format_in_html(&html, selection.offsets(), &tag).map_err(|e| e.to_string())
        }
        Command::Clear { selection } => {
            let html = read_input(selection.input.as_deref())?;
            Ok(clear_formatting_in_html(&html, selection.offsets()))
        }
        Command::Style {
            selection,
            set,
            remove,
        } => {
            if set.is_empty() && remove.is_empty() {
                return Err("nothing to do: pass --set or --remove".to_string());
            }
            let declarations = set
                .iter()
                .map(|decl| {
                    decl.split_once('=')
                        .map(|(prop, value)| (prop.trim(), value.trim()))
                        .ok_or_else(|| format!("expected property=value, got {decl:?}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let properties: Vec<&str> = remove.iter().map(String::as_str).collect();

            let mut html = read_input(selection.input.as_deref())?;
            if !declarations.is_empty() {
                html = apply_style_in_html(&html, selection.offsets(), &declarations);
            }
            if !properties.is_empty() {
                html = remove_style_in_html(&html, selection.offsets(), &properties);
            }
            Ok(html)
        }
        Command::Simplify { tags, input } => {
            let html = read_input(input.as_deref())?;
            let tags: Vec<&str> = if tags.is_empty() {
                config.tags()
            } else {
                tags.iter().map(String::as_str).collect()
            };
            Ok(simplify_html(&html, &tags))
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    let bytes = match path {
        Some(path) => fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("stdin: {e}"))?;
            buf
        }
    };
    Ok(decode_text(&bytes, extract_meta_charset(&bytes)).into_owned())
}
