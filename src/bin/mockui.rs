use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

#[derive(Parser, Debug)]
#[command(name = "mockui", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON call script and print every captured structure snapshot.
    Replay(ReplayArgs),
    /// Decode a wire payload against a shape and print the value as JSON.
    Decode(DecodeArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Shape JSON.
    #[arg(long)]
    shape: PathBuf,

    /// Payload bytes as a JSON array of integers.
    #[arg(long)]
    payload: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Decode(args) => cmd_decode(args),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    let v = serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))?;
    Ok(v)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script: mockui::Script = read_json(&args.in_path, "script")?;
    let captures = mockui::replay(&script)
        .with_context(|| format!("replay '{}'", args.in_path.display()))?;

    for json in &captures {
        println!("{json}");
    }
    eprintln!(
        "replayed {} calls, {} captures",
        script.calls.len(),
        captures.len()
    );
    Ok(())
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let shape: mockui::Shape = read_json(&args.shape, "shape")?;
    shape.validate()?;
    let bytes: Vec<u8> = read_json(&args.payload, "payload")?;

    let value = mockui::decode_payload(&bytes, &shape)?;
    println!("{}", serde_json::to_string_pretty(&value.to_json())?);
    Ok(())
}
