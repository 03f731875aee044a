//! Command line export: render a saved board to an image file.
//!
//! Usage: easel-export <board-name> <output.png|jpg> [fonts-dir]

use easel_core::{FileStorage, FontRegistry};
use easel_export::FontDir;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(board), Some(output)) = (args.first(), args.get(1)) else {
        eprintln!("usage: easel-export <board-name> <output.png|jpg> [fonts-dir]");
        return ExitCode::from(2);
    };
    let fonts_dir = args.get(2).map(String::as_str).unwrap_or("fonts");

    let registry = FontRegistry::with_fallback();
    let storage = FileStorage::default();
    let store = match storage.load(board, &registry) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to load board {board}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let fonts = FontDir::new(fonts_dir);
    if let Err(err) = easel_export::export_board(&store, Path::new(output), &fonts) {
        eprintln!("export failed: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
