mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{exit_code_for, Source};
use mediawall_core::Layout;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "mediawall",
    version,
    about = "Remote media manifest gallery client"
)]
struct Cli {
    /// URL of the JSON manifest document (overrides the config file).
    #[arg(long, global = true)]
    manifest_url: Option<String>,

    /// Read the manifest from a local file instead of fetching.
    #[arg(long, global = true, conflicts_with = "manifest_url")]
    manifest_file: Option<PathBuf>,

    /// Base URL prepended to relative paths in legacy path-array manifests.
    #[arg(long, global = true)]
    image_base: Option<String>,

    /// Append a time-based query parameter to the manifest fetch.
    #[arg(long, default_value_t = false, global = true)]
    cache_bust: bool,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the manifest and render an HTML gallery.
    Render {
        /// Write the document here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// HTML shell document to splice the gallery into.
        #[arg(long, requires = "target")]
        page: Option<PathBuf>,
        /// Element id of the attachment target inside the shell document.
        #[arg(long)]
        target: Option<String>,
        /// Gallery layout: flat or grid.
        #[arg(long, default_value = "flat")]
        layout: Layout,
        /// Disable the lazy-load hint on rendered images.
        #[arg(long, default_value_t = false)]
        no_lazy: bool,
        /// Emit the plain-text debug dump instead of HTML.
        #[arg(long, default_value_t = false, conflicts_with_all = ["page", "target", "layout"])]
        text: bool,
    },
    /// Fetch the manifest and list the flattened media entries.
    List,
    /// Copy an entry's original URL to the clipboard.
    Copy {
        /// Zero-based index, or a unique entry name/filename.
        selector: String,
    },
    /// Launch the terminal gallery browser.
    Tui,
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MEDIAWALL_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let json_output = cli.json;
    let needs_manifest = matches!(
        cli.command,
        Commands::Render { .. } | Commands::List | Commands::Copy { .. } | Commands::Tui
    );
    let source = match Source::resolve(
        cli.manifest_url.as_deref(),
        cli.manifest_file.clone(),
        cli.image_base.as_deref(),
        cli.cache_bust,
        needs_manifest,
    ) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::from(exit_code_for(&msg));
        }
    };

    let result = match cli.command {
        Commands::Render {
            out,
            page,
            target,
            layout,
            no_lazy,
            text,
        } => commands::render::run(
            &source,
            out.as_deref(),
            page.as_deref(),
            target.as_deref(),
            layout,
            !no_lazy,
            text,
            json_output,
        ),
        Commands::List => commands::list::run(&source, json_output),
        Commands::Copy { selector } => commands::copy::run(&source, &selector, json_output),
        Commands::Tui => commands::tui::run(source, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(exit_code_for(&msg))
        }
    }
}
