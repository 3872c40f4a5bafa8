/// Lumicube Terminal Demo - Rotating Cube with Light Sources
///
/// Renders a cube spinning about all three axes, shaded by a red, a green
/// and a blue directional light, with a white outline.
/// Usage: lumicube-terminal [--fps <n>] [--thickness <n>]
/// Controls:
///   - Q/ESC/Ctrl+C: Quit
///
/// Set `RUST_LOG=debug` and redirect stderr to a file to capture logs.

use log::{error, info};
use lumicube_core::RenderConfig;
use lumicube_terminal::TerminalApp;
use std::env;
use std::process::ExitCode;

fn program_name(args: &[String]) -> &str {
    args.first().map_or("lumicube-terminal", String::as_str)
}

fn parse_args(args: &[String]) -> Result<RenderConfig, String> {
    let mut config = RenderConfig::default();
    let mut iter = args.iter().skip(1);

    while let Some(flag) = iter.next() {
        let mut value = |name: &str| -> Result<u32, String> {
            let raw = iter
                .next()
                .ok_or_else(|| format!("{} needs a value", name))?;
            raw.parse()
                .map_err(|e| format!("invalid {} value {:?}: {}", name, raw, e))
        };
        match flag.as_str() {
            "--fps" => config.target_fps = value("--fps")?,
            "--thickness" => config.outline_thickness = value("--thickness")?,
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }

    Ok(config)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: {} [--fps <n>] [--thickness <n>]", program_name(&args));
            return ExitCode::FAILURE;
        }
    };

    let mut app = match TerminalApp::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to set up terminal surface: {}", e);
            eprintln!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match app.run() {
        Ok(summary) => {
            info!("exiting after {} frames", summary.frames_rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("render loop failed: {}", e);
            eprintln!("Render loop failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
