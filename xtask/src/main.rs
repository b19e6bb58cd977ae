use std::fs;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for halftoner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write starter process configs for every mode into configs/
    SampleConfigs,
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SampleConfigs => sample_configs(),
        Commands::Ci => ci(),
    }
}

fn sample_configs() -> Result<()> {
    let samples = [
        ("spot", r#"{ "mode": "spot", "block_size": 8 }"#),
        ("diffuse", r#"{ "mode": "diffuse", "binarize": false }"#),
        (
            "ordered",
            r#"{ "mode": "ordered", "matrix_size": 8, "output_scale": 1 }"#,
        ),
    ];

    fs::create_dir_all("configs")?;
    for (name, body) in samples {
        fs::write(format!("configs/{name}.json"), body)?;
    }
    Ok(())
}

/// can run benches, bundle reports and so on later
fn ci() -> Result<()> {
    run_command("cargo", &["fmt", "--all", "--check"])?;
    run_command(
        "cargo",
        &[
            "clippy",
            "--all-targets",
            "--all-features",
            "--",
            "-D",
            "warnings",
            "-A",
            "clippy::needless_range_loop",
        ],
    )?;
    run_command("cargo", &["build", "--all-features"])?;
    run_command("cargo", &["test", "--all-features"])?;
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;
    let status = Command::new(cmd).args(args).status()?;
    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}
