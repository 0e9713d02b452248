use anyhow::{Context, Result};
use clap::Parser;
use lsdisk::collectors::{lsblk, lvm};
use lsdisk::config::Config;
use lsdisk::util::report;
use lsdisk::{Device, SystemRunner};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "lsdisk", about = "Disk, partition and logical volume inventory", version = "0.1")]
struct Cli {
    /// Print the disk table
    #[arg(long)]
    disks: bool,

    /// Print the partition table
    #[arg(long)]
    partitions: bool,

    /// Print the logical volume table (runs lvs)
    #[arg(long)]
    lvs: bool,

    /// Print a JSON snapshot instead of tables
    #[arg(long)]
    json: bool,

    /// Config file (default: ~/.config/lsdisk/lsdisk.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print config file path and current values, then exit
    #[arg(long)]
    print_config: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let cfg = Config::load(cli.config.as_deref()).context("loading config")?;

    if cli.print_config {
        return run_print_config(&cfg, cli.config.as_deref());
    }
    if cli.json {
        return run_json_snapshot(&cfg, cli.lvs);
    }
    run_tables(&cfg, &cli)
}

fn collect_devices(cfg: &Config) -> Result<HashMap<String, Device>> {
    let mut devices = lsblk::list_devices(&SystemRunner, &cfg.commands).context("listing block devices")?;
    report::exclude(&mut devices, &cfg.devices);
    Ok(devices)
}

fn run_tables(cfg: &Config, cli: &Cli) -> Result<()> {
    let all = !cli.disks && !cli.partitions && !cli.lvs;

    if all || cli.disks || cli.partitions {
        let devices = collect_devices(cfg)?;
        if all || cli.disks {
            print!("{}", report::disk_table(&devices));
        }
        if all || cli.partitions {
            print!("{}", report::partition_table(&devices));
        }
    }
    if cli.lvs {
        let lvs = lvm::lvs_report(&SystemRunner, &cfg.commands).context("reading logical volumes")?;
        print!("{}", report::volume_table(&lvs));
    }
    Ok(())
}

fn run_json_snapshot(cfg: &Config, with_lvs: bool) -> Result<()> {
    use serde_json::json;

    let devices = collect_devices(cfg)?;
    let lvs = if with_lvs {
        Some(lvm::lvs_report(&SystemRunner, &cfg.commands).context("reading logical volumes")?)
    } else {
        None
    };

    let snapshot = json!({
        "lsdisk_version": env!("CARGO_PKG_VERSION"),
        "timestamp":      chrono::Local::now().to_rfc3339(),
        "devices":        report::disks(&devices),
        "logical_volumes": lvs,
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config(cfg: &Config, explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(Config::config_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[commands]");
    println!("  lsblk  = {}", cfg.commands.lsblk);
    println!("  lvs    = {}", cfg.commands.lvs);
    println!("  serial = {}", cfg.commands.serial);
    println!();
    println!("[devices]");
    if cfg.devices.exclude.is_empty() {
        println!("  exclude = (none)");
    } else {
        println!("  exclude = {:?}", cfg.devices.exclude);
    }
    Ok(())
}
