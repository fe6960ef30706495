//! cubehop: headless CUBEHOP host.
//!
//! Usage:
//!   cubehop replay --script run.json [--config cubehop.json] [--json]
//!   cubehop play [--config cubehop.json]

use std::io::BufRead;
use std::path::PathBuf;
use std::process;

use cubehop_app::config::AppConfig;
use cubehop_app::script::{self, Script};
use cubehop_app::state::AppState;
use cubehop_core::commands::GameCommand;
use cubehop_core::types::InputFlags;

fn main() {
    // Info by default, RUST_LOG overrides
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "replay" => cmd_replay(&args[2..]),
        "play" => cmd_play(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "cubehop: headless CUBEHOP host\n\
         \n\
         Commands:\n\
         \n\
         replay    Run a JSON input script and print the final state\n\
         \n\
           --script <path>    Input script (segments of frames + keys)\n\
           --config <path>    Host config JSON (optional)\n\
           --json             Print the final frame as JSON\n\
         \n\
         play      Run the real-time loop, reading keys from stdin\n\
         \n\
           --config <path>    Host config JSON (optional)\n\
         \n\
           Each stdin line is either a command (start, pause, resume,\n\
           switch, title, status, quit) or the keys to hold, e.g.\n\
           \"left forward jump\". An empty line releases every key.\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn load_config(args: &[String]) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let path = parse_path(args, "--config");
    let config = AppConfig::load_or_default(path.as_deref())?;
    if let Some(path) = path {
        log::info!("Loaded config from {}", path.display());
    }
    Ok(config)
}

fn cmd_replay(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let Some(script_path) = parse_path(args, "--script") else {
        eprintln!("Error: --script is required");
        process::exit(1);
    };
    let config = load_config(args)?;
    let script = Script::load(&script_path)?;

    log::info!(
        "Replaying {} ({} segments, {} frames)",
        script_path.display(),
        script.segments.len(),
        script.total_frames()
    );
    let report = script::replay(&script, &config);

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report.last_frame {
        Some(frame) => {
            let p = frame.snapshot.player.position;
            println!("{}", frame.hud);
            println!("Frames: {}", report.frames);
            println!("Player: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
            println!("Coins remaining: {}", frame.snapshot.coins_remaining);
        }
        None => println!("Script ran no frames"),
    }
    for event in &report.events {
        println!("  {event:?}");
    }
    Ok(())
}

/// A parsed stdin line.
enum PlayLine {
    Command(GameCommand),
    Keys(InputFlags),
    Status,
    Quit,
}

fn parse_play_line(line: &str) -> Result<PlayLine, String> {
    let line = line.trim().to_ascii_lowercase();
    let command = match line.as_str() {
        "start" => Some(GameCommand::StartGame),
        "pause" => Some(GameCommand::Pause),
        "resume" => Some(GameCommand::Resume),
        "switch" | "l" => Some(GameCommand::SwitchLevel),
        "title" => Some(GameCommand::ReturnToTitle),
        "status" => return Ok(PlayLine::Status),
        "quit" | "q" => return Ok(PlayLine::Quit),
        _ => None,
    };
    if let Some(command) = command {
        return Ok(PlayLine::Command(command));
    }

    let mut input = InputFlags::default();
    for key in line.split_whitespace() {
        match key {
            "left" => input.left = true,
            "right" => input.right = true,
            "forward" | "w" => input.forward = true,
            "backward" | "s" => input.backward = true,
            "up" => input.up = true,
            "down" => input.down = true,
            "jump" | "space" => input.jump = true,
            other => return Err(format!("Unknown key: {other}")),
        }
    }
    Ok(PlayLine::Keys(input))
}

fn cmd_play(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args)?;
    let state = AppState::new();
    state.start(config)?;
    log::info!("Type 'start' to begin, 'quit' to exit");

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match parse_play_line(&line) {
            Ok(PlayLine::Command(command)) => state.send_command(command)?,
            Ok(PlayLine::Keys(input)) => state.send_command(GameCommand::SetInput { input })?,
            Ok(PlayLine::Status) => match state.latest_frame()? {
                Some(frame) => println!("{}", serde_json::to_string(&frame)?),
                None => println!("No frame yet"),
            },
            Ok(PlayLine::Quit) => break,
            Err(e) => log::warn!("{e}"),
        }
    }

    state.shutdown()?;
    Ok(())
}
