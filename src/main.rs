//! cuebuild - rebuild presentations from lyric payloads

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cuebuild::container::index;
use cuebuild::payload::{TransitionPayload, parse_song, parse_transition};
use cuebuild::util::UserPaths;
use cuebuild::{Assembler, AssemblyOptions, Rebuilder, Result};

#[derive(Parser)]
#[command(name = "cuebuild")]
#[command(version, about = "Rebuild presentations from lyric payloads", long_about = None)]
#[command(after_help = "EXAMPLES:
    cuebuild song Song.pro '{\"sections\": [...]}'     Rebuild a song
    cuebuild song Song.pro --payload-file song.json    Payload from a file
    cuebuild transition Walk-In.pro '{\"topics\": []}'  Rebuild a transition
    cuebuild notes Song.pro \"Key of G\"                 Overwrite operator notes
    cuebuild index ~/Documents/Library                 List presentations as JSON")]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace a presentation's content with a song
    Song {
        /// Presentation file or bundle directory
        path: PathBuf,

        /// Song payload as JSON
        #[arg(required_unless_present = "payload_file")]
        payload: Option<String>,

        /// Read the payload from a file instead
        #[arg(long, conflicts_with = "payload")]
        payload_file: Option<PathBuf>,

        /// Directory searched for the payload's preferred background file
        #[arg(long)]
        background_dir: Option<PathBuf>,

        /// Skip the Background & Lights group
        #[arg(long)]
        no_background: bool,
    },

    /// Replace a presentation's cues with a transition
    Transition {
        /// Presentation file or bundle directory
        path: PathBuf,

        /// Transition payload as JSON (defaults apply when omitted)
        payload: Option<String>,

        /// Read the payload from a file instead
        #[arg(long, conflicts_with = "payload")]
        payload_file: Option<PathBuf>,
    },

    /// Overwrite a presentation's operator notes
    Notes {
        /// Presentation file or bundle directory
        path: PathBuf,

        /// Notes text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        notes: Vec<String>,

        /// Also rebuild the transition layout with default settings
        #[arg(long)]
        transition: bool,
    },

    /// Print one JSON line per presentation under a library folder
    Index {
        /// Library root
        root: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(command: Command) -> Result<()> {
    let paths = UserPaths::detect();
    let expand = |path: PathBuf| match &paths {
        Some(paths) => path
            .to_str()
            .map_or_else(|| path.clone(), |raw| paths.expand_tilde(raw)),
        None => path,
    };

    match command {
        Command::Song {
            path,
            payload,
            payload_file,
            background_dir,
            no_background,
        } => {
            let payload = parse_song(&payload_text(payload, payload_file)?)?;
            let mut options = AssemblyOptions::default();
            if let Some(dir) = background_dir {
                options = options.with_background_dir(expand(dir));
            }
            options.include_background_group = !no_background;

            let mut rebuilder = Rebuilder::with_assembler(Assembler::new().with_options(options));
            let report = rebuilder.song(&expand(path), &payload)?;
            for line in report.assembly.summary_lines() {
                println!("{line}");
            }
            println!("unmatched:{}", report.assembly.report.unmatched().count());
            println!("groups_written:{}", report.assembly.groups_written);
            println!("cues_written:{}", report.cues_written());
        }
        Command::Transition {
            path,
            payload,
            payload_file,
        } => {
            let payload = match (payload, payload_file) {
                (None, None) => TransitionPayload::default(),
                (inline, file) => parse_transition(&payload_text(inline, file)?)?,
            };
            let report = Rebuilder::new().transition(&expand(path), &payload)?;
            println!("cues_written:{}", report.cues_written());
        }
        Command::Notes {
            path,
            notes,
            transition,
        } => {
            let defaults = TransitionPayload::default();
            let transition = transition.then_some(&defaults);
            let report = Rebuilder::new().notes(&expand(path), &notes.join(" "), transition)?;
            println!("Current operator notes: {:?}", report.previous);
            println!("Wrote operator notes to: {}", report.path.display());
            if let Some(assembly) = report.transition {
                println!("cues_written:{}", assembly.cues_written);
            }
        }
        Command::Index { root } => {
            let scan = index::scan(&expand(root))?;
            for line in scan.json_lines()? {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn payload_text(inline: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(file) => Ok(fs::read_to_string(file)?),
        None => Ok(inline.unwrap_or_default()),
    }
}
