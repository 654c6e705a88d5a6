mod term;

use clap::{Parser, Subcommand};
use stave_core::play_sheet;
use stave_domain_sheet::decode_sheet;
use stave_infra_audio_cpal::CpalToneSink;
use stave_infra_storage_fs::FsSheetStorage;
use stave_ports::storage::StoragePort;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stave", about = "Five-line staff editor with square-wave playback")]
struct Args {
    /// Sheet directory (defaults to the per-user data dir)
    #[arg(long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive editor (the default)
    Edit,
    /// List saved sheets
    List,
    /// Play a saved sheet and exit
    Play { name: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let base_dir = match args.dir {
        Some(dir) => dir,
        None => FsSheetStorage::default_base_dir()?,
    };
    let storage = FsSheetStorage::new(base_dir);

    match args.command.unwrap_or(Command::Edit) {
        Command::Edit => term::run_editor(storage),
        Command::List => {
            for entry in storage.list_sheets()? {
                println!("{}\t{} bytes", entry.name, entry.size);
            }
            Ok(())
        }
        Command::Play { name } => {
            let sheet = decode_sheet(&storage.read_sheet(&name)?)?;
            let sink = CpalToneSink::new()?;
            play_sheet(&sheet, &sink)?;
            Ok(())
        }
    }
}
