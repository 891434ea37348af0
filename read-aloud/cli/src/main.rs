//! Read Aloud CLI - speak text with the voices installed on this machine

mod interactive;
mod render;

use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use read_aloud::{
    Config, EngineChoice, HostSpeech, PlatformEvent, PlatformEventReceiver, ReadAloud,
    UtteranceId, UtteranceSignal, config::parse_width, detect_engine, platform_event_channel,
};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Most characters read from stdin.
const STDIN_LIMIT: usize = 10_000;
/// How long to wait for the engine to list its voices.
const VOICE_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "read-aloud")]
#[command(about = "Read text aloud with the voices installed on this machine", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Speech engine: auto, espeak, say or none [env: READ_ALOUD_ENGINE]
    #[arg(long, global = true, value_name = "ENGINE")]
    engine: Option<String>,

    /// Viewport width in pixels for the suggestion carousel [env: READ_ALOUD_WIDTH]
    #[arg(long, global = true, value_name = "PIXELS")]
    width: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available voices
    Voices {
        /// Output as JSON instead of terminal format
        #[arg(long)]
        json: bool,
    },

    /// Speak text (reads from stdin if no text is given)
    Speak {
        /// Text to speak
        text: Vec<String>,

        /// Voice name to speak with
        #[arg(short = 'V', long, value_name = "NAME")]
        voice: Option<String>,
    },

    /// Speak a voice's preview sentence
    Preview {
        /// Voice name to preview
        #[arg(value_name = "NAME")]
        voice: String,
    },

    /// Show the suggestion carousel
    Suggestions {
        /// Steps to advance the carousel before showing it
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Show every suggestion in full
        #[arg(long)]
        all: bool,
    },

    /// Interactive session (default)
    Interactive,
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,read_aloud=info".to_string(),
            2 => "info,read_aloud=debug".to_string(),
            _ => "debug,read_aloud=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Environment configuration with command line overrides applied.
fn resolve_config(
    engine: Option<&str>,
    width: Option<&str>,
) -> Result<Config, read_aloud::ReadAloudError> {
    let mut config = Config::from_env()?;
    if let Some(engine) = engine {
        config = config.with_engine(engine.parse::<EngineChoice>()?);
    }
    if let Some(width) = width {
        config = config.with_width(parse_width(width)?);
    }
    Ok(config)
}

/// Text to speak: the arguments joined with spaces, or stdin when there are none.
fn input_text(args: Vec<String>) -> io::Result<Option<String>> {
    let text = if args.is_empty() {
        read_limited(io::stdin().lock())?
    } else {
        args.join(" ")
    };

    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Read `reader` to the end, keeping at most `STDIN_LIMIT` characters.
fn read_limited(mut reader: impl Read) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);

    let chars = text.chars().count();
    if chars > STDIN_LIMIT {
        tracing::warn!(chars, limit = STDIN_LIMIT, "Input too long, truncating");
        return Ok(text.chars().take(STDIN_LIMIT).collect());
    }
    Ok(text.into_owned())
}

/// Build a session on the configured engine and wait for its voices.
async fn open_session(config: &Config) -> (ReadAloud<HostSpeech>, PlatformEventReceiver) {
    let (events, mut rx) = platform_event_channel();
    let platform = detect_engine(config.engine).map(HostSpeech::new);
    let mut session = ReadAloud::new(platform, events);
    if let Some(width) = config.width {
        session.resize(width);
    }

    if session.playback().is_available() {
        let loaded = tokio::time::timeout(VOICE_LOAD_TIMEOUT, async {
            while let Some(event) = rx.recv().await {
                let voices_changed = event == PlatformEvent::VoicesChanged;
                session.handle_event(event);
                if voices_changed {
                    break;
                }
            }
        })
        .await;
        if loaded.is_err() {
            tracing::warn!("Timed out waiting for the speech engine to list its voices");
        }
    }

    (session, rx)
}

/// Feed platform events into the session until utterance `id` finishes.
///
/// Ctrl-C cancels the utterance. Returns the failure reason, if any.
async fn wait_for_utterance(
    session: &mut ReadAloud<HostSpeech>,
    rx: &mut PlatformEventReceiver,
    id: UtteranceId,
) -> Option<String> {
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    return None;
                };
                let outcome = match &event {
                    PlatformEvent::Utterance { id: event_id, signal } if *event_id == id => {
                        match signal {
                            UtteranceSignal::Started => None,
                            UtteranceSignal::Ended => Some(None),
                            UtteranceSignal::Failed(reason) => Some(Some(reason.clone())),
                        }
                    }
                    _ => None,
                };
                session.handle_event(event);
                if let Some(failure) = outcome {
                    return failure;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping speech");
                session.shutdown();
                return None;
            }
        }
    }
}

fn print_voices(session: &ReadAloud<HostSpeech>, json: bool) -> CliResult {
    let directory = session.directory();
    if json {
        let entries = render::voices_json(directory.voices());
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if !session.playback().is_available() {
        println!("Speech synthesis is not available on this host");
    }
    let selected = directory.selected_name();
    for voice in directory.voices() {
        println!("{}", render::voice_line(voice, selected == Some(voice.name.as_str())));
    }
    println!("{}", render::summary_line(directory.summary()));
    Ok(())
}

async fn speak(config: &Config, args: Vec<String>, voice: Option<String>) -> CliResult {
    let Some(text) = input_text(args)? else {
        return Err(
            "No input provided\nUsage: read-aloud speak <text> or echo \"text\" | read-aloud speak".into(),
        );
    };

    let (mut session, mut rx) = open_session(config).await;
    if let Some(name) = voice {
        if session.directory().find(&name).is_none() {
            eprintln!("Voice '{name}' not found, using the default voice");
        }
        session.select_voice(name);
    }

    session.set_text(text);
    let Some(id) = session.toggle_playback() else {
        return Err("Speech synthesis is not available on this host".into());
    };

    match wait_for_utterance(&mut session, &mut rx, id).await {
        Some(reason) => Err(format!("Speech failed: {reason}").into()),
        None => Ok(()),
    }
}

async fn preview(config: &Config, name: &str) -> CliResult {
    let (mut session, mut rx) = open_session(config).await;
    if !session.playback().is_available() {
        return Err("Speech synthesis is not available on this host".into());
    }
    let Some(id) = session.preview_voice(name) else {
        return Err(
            format!("Voice '{name}' not found. Run 'read-aloud voices' to list voices.").into(),
        );
    };

    match wait_for_utterance(&mut session, &mut rx, id).await {
        Some(reason) => Err(format!("Preview failed: {reason}").into()),
        None => Ok(()),
    }
}

fn print_suggestions(config: &Config, start: usize, all: bool) {
    if all {
        for (i, suggestion) in read_aloud::suggestions::suggestions().iter().enumerate() {
            println!("{}. {}\n{}\n", i + 1, suggestion.title, suggestion.content);
        }
        return;
    }

    let mut carousel = read_aloud::Carousel::default();
    if let Some(width) = config.width {
        carousel.resize(width);
    }
    for _ in 0..start.min(carousel.max_start_index()) {
        carousel.advance();
    }
    print!("{}", render::suggestion_cards(&carousel));
}

async fn run(cli: Cli) -> CliResult {
    let config = resolve_config(cli.engine.as_deref(), cli.width.as_deref())?;
    tracing::debug!(engine = %config.engine, width = ?config.width, "Configuration resolved");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Voices { json } => {
            let (session, _rx) = open_session(&config).await;
            print_voices(&session, json)
        }
        Commands::Speak { text, voice } => speak(&config, text, voice).await,
        Commands::Preview { voice } => preview(&config, &voice).await,
        Commands::Suggestions { start, all } => {
            print_suggestions(&config, start, all);
            Ok(())
        }
        Commands::Interactive => {
            let (session, rx) = open_session(&config).await;
            interactive::run(session, rx).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_default_command() {
        let cli = Cli::try_parse_from(["read-aloud"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parses_speak_with_voice() {
        let cli = Cli::try_parse_from(["read-aloud", "speak", "-V", "Daniel", "Hello", "world"])
            .unwrap();
        match cli.command {
            Some(Commands::Speak { text, voice }) => {
                assert_eq!(text, ["Hello", "world"]);
                assert_eq!(voice.as_deref(), Some("Daniel"));
            }
            _ => panic!("expected speak command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "read-aloud",
            "suggestions",
            "--engine",
            "none",
            "--width",
            "1280",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.engine.as_deref(), Some("none"));
        assert_eq!(cli.width.as_deref(), Some("1280"));
        assert_eq!(cli.log_verbosity, 2);
    }

    #[test]
    fn test_input_text_joins_arguments() {
        let text = input_text(vec!["Hello,".to_string(), "world!".to_string()]).unwrap();
        assert_eq!(text.as_deref(), Some("Hello, world!"));
    }

    #[test]
    fn test_input_text_blank_arguments_are_empty() {
        let text = input_text(vec!["  ".to_string()]).unwrap();
        assert!(text.is_none());
    }

    #[test]
    fn test_read_limited_counts_characters() {
        let input = "é".repeat(STDIN_LIMIT + 5);
        let text = read_limited(io::Cursor::new(input.into_bytes())).unwrap();
        assert_eq!(text.chars().count(), STDIN_LIMIT);
        assert!(text.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_read_limited_keeps_short_input() {
        let text = read_limited(io::Cursor::new("Bonjour à tous".as_bytes())).unwrap();
        assert_eq!(text, "Bonjour à tous");
    }

    #[test]
    fn test_resolve_config_rejects_bad_overrides() {
        assert!(resolve_config(Some("robot"), None).is_err());
        assert!(resolve_config(None, Some("wide")).is_err());
    }
}
