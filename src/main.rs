use adb_snap::interactive::print_connection_guidance;
use adb_snap::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Capture screenshots from an Android device via ADB
#[derive(Parser, Debug)]
#[command(name = "adb-snap", version, about)]
struct Cli {
    /// Output directory for screenshots
    #[arg(short, long, default_value = "screenshots")]
    output: PathBuf,

    /// Capture a single screenshot and exit (the value doubles as the screen name)
    #[arg(short, long, value_name = "NAME")]
    single: Option<String>,

    /// Screen name to include in the filename (use with --single or interactive mode)
    #[arg(short, long)]
    name: Option<String>,

    /// Target device serial (defaults to the first online device)
    #[arg(short, long)]
    device: Option<String>,

    /// Path to the adb executable
    #[arg(long, default_value = "adb")]
    adb: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut builder = SnapConfigBuilder::default()
        .adb_path(&cli.adb)
        .output_dir(&cli.output);
    if let Some(serial) = &cli.device {
        builder = builder.device_serial(serial);
    }

    let mut session = match SnapSession::new(builder.build()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(single) = &cli.single {
        // 单次模式下连接失败以非零状态退出
        match session.check_connection() {
            Ok(device) => println!("✅ Connected to device: {}", device.id),
            Err(e) => {
                print_connection_guidance(&e);
                return ExitCode::FAILURE;
            }
        }

        // --name 优先，否则用 --single 的值（去掉结尾的 .png）
        let screen_name = cli
            .name
            .clone()
            .unwrap_or_else(|| single.trim_end_matches(".png").to_string());
        session.capture_and_report(Some(&screen_name));
        return ExitCode::SUCCESS;
    }

    session.run_interactive();
    ExitCode::SUCCESS
}
