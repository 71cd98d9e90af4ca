use std::{path::Path, process::ExitCode};

use charcard::{card, png::RawChunkReader, read_card, CardError};

const USAGE: &str = "\
usage:
  charcard read <image>...             print the card stored in each image
  charcard write <png> <json> <out>    store the JSON file's text as the card
  charcard chunks <png>...             list the PNG chunks of each file";

fn main() -> ExitCode {
  tracing_subscriber::fmt().with_writer(std::io::stderr).init();

  let args: Vec<String> = std::env::args().skip(1).collect();
  ExitCode::from(run(&args))
}

/// Runs one command line, giving the exit status: 0 if everything worked, 1
/// if any file failed, 2 for a usage error.
fn run(args: &[String]) -> u8 {
  let failures = match args.split_first() {
    Some((cmd, files)) if cmd == "read" && !files.is_empty() => for_each_file(files, read_one),
    Some((cmd, files)) if cmd == "chunks" && !files.is_empty() => for_each_file(files, list_chunks),
    Some((cmd, [png, json, out])) if cmd == "write" => match write_one(png, json, out) {
      Ok(()) => 0,
      Err(e) => {
        tracing::error!("{png}: {e}");
        1
      }
    },
    _ => {
      eprintln!("{USAGE}");
      return 2;
    }
  };
  u8::from(failures != 0)
}

#[derive(Debug, thiserror::Error)]
enum CliError {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Card(#[from] CardError),
}

/// Runs `op` on each file, logging failures and carrying on. Gives the number
/// of failures.
fn for_each_file(files: &[String], mut op: impl FnMut(&Path) -> Result<(), CliError>) -> usize {
  let mut failures = 0;
  for file in files {
    let path = Path::new(file);
    if let Err(e) = op(path) {
      tracing::error!("{}: {e}", path.display());
      failures += 1;
    }
  }
  failures
}

fn read_one(path: &Path) -> Result<(), CliError> {
  let bytes = std::fs::read(path)?;
  tracing::info!("read {} bytes from {}", bytes.len(), path.display());
  let payload = read_card(&bytes)?;
  println!("{payload}");
  Ok(())
}

fn write_one(png: &str, json: &str, out: &str) -> Result<(), CliError> {
  let image = std::fs::read(png)?;
  let payload = std::fs::read_to_string(json)?;
  let output = card::embed(&image, &payload)?;
  std::fs::write(out, output)?;
  tracing::info!("wrote card to {out}");
  Ok(())
}

fn list_chunks(path: &Path) -> Result<(), CliError> {
  let bytes = std::fs::read(path)?;
  println!("{}:", path.display());
  for (n, raw_chunk) in RawChunkReader::new(&bytes)?.enumerate() {
    let raw_chunk = raw_chunk?;
    println!("{n}: {} ({} bytes)", raw_chunk.ty(), raw_chunk.data().len());
  }
  Ok(())
}
