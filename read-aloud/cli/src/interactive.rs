//! The interactive session: a menu loop over a [`ReadAloud`] session.
//!
//! Prompts block, so each one runs on the blocking pool while platform
//! events keep flowing into the session.

use std::fmt;

use inquire::{InquireError, Select, Text};
use read_aloud::{HostSpeech, PlatformEventReceiver, ReadAloud};
use tokio::task::JoinHandle;

use crate::render;

type PromptResult<T> = Result<T, InquireError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Play,
    Stop,
    EditText,
    ChooseSuggestion,
    NextSuggestions,
    PreviousSuggestions,
    ChooseVoice,
    PreviewVoice,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Play => "▶ Play",
            Self::Stop => "■ Stop",
            Self::EditText => "Edit text",
            Self::ChooseSuggestion => "Use a suggestion",
            Self::NextSuggestions => "More suggestions ▶",
            Self::PreviousSuggestions => "◀ Earlier suggestions",
            Self::ChooseVoice => "Choose voice",
            Self::PreviewVoice => "Preview a voice",
            Self::Quit => "Quit",
        })
    }
}

/// A suggestion in the picker, remembering its catalog index.
struct SuggestionChoice {
    index: usize,
    title: &'static str,
}

impl fmt::Display for SuggestionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title)
    }
}

/// A voice in the picker.
struct VoiceChoice {
    name: String,
    label: String,
}

impl fmt::Display for VoiceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The actions that make sense in the current session state.
fn actions(session: &ReadAloud<HostSpeech>) -> Vec<Action> {
    let mut actions = Vec::new();
    if session.playback().is_active() {
        actions.push(Action::Stop);
    } else if session.can_play() && session.playback().is_available() {
        actions.push(Action::Play);
    }
    actions.push(Action::EditText);
    actions.push(Action::ChooseSuggestion);
    if session.carousel().can_advance() {
        actions.push(Action::NextSuggestions);
    }
    if session.carousel().can_retreat() {
        actions.push(Action::PreviousSuggestions);
    }
    if !session.directory().is_empty() {
        actions.push(Action::ChooseVoice);
        actions.push(Action::PreviewVoice);
    }
    actions.push(Action::Quit);
    actions
}

fn voice_choices(session: &ReadAloud<HostSpeech>) -> (Vec<VoiceChoice>, usize) {
    let directory = session.directory();
    let choices: Vec<VoiceChoice> = directory
        .voices()
        .iter()
        .map(|voice| VoiceChoice {
            name: voice.name.clone(),
            label: render::voice_label(voice),
        })
        .collect();
    let cursor = directory
        .selected_name()
        .and_then(|name| choices.iter().position(|c| c.name == name))
        .unwrap_or(0);
    (choices, cursor)
}

fn print_header(session: &ReadAloud<HostSpeech>) {
    println!();
    println!("{}", render::summary_line(session.directory().summary()));
    println!(
        "{}",
        render::status_line(session.playback_state(), session.directory().selected_voice())
    );
    if session.text().trim().is_empty() {
        println!("Text: (empty)");
    } else {
        println!("Text: {}", render::excerpt(session.text()));
    }
    print!("{}", render::suggestion_cards(session.carousel()));
}

/// Wait for a prompt running on the blocking pool, applying platform events
/// to the session in the meantime.
async fn await_prompt<T: Send + 'static>(
    session: &mut ReadAloud<HostSpeech>,
    rx: &mut PlatformEventReceiver,
    mut prompt: JoinHandle<PromptResult<T>>,
) -> Result<PromptResult<T>, tokio::task::JoinError> {
    loop {
        tokio::select! {
            result = &mut prompt => return result,
            Some(event) = rx.recv() => session.handle_event(event),
        }
    }
}

/// Run the interactive loop until the user quits or interrupts.
pub async fn run(
    mut session: ReadAloud<HostSpeech>,
    mut rx: PlatformEventReceiver,
) -> Result<(), Box<dyn std::error::Error>> {
    if !session.playback().is_available() {
        println!("Speech synthesis is not available on this host");
    }

    loop {
        print_header(&session);

        let options = actions(&session);
        let prompt = tokio::task::spawn_blocking(move || {
            Select::new("What next?", options)
                .with_help_message("↑↓ to move, enter to select, ESC to quit")
                .prompt()
        });
        let action = match await_prompt(&mut session, &mut rx, prompt).await? {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match action {
            Action::Play | Action::Stop => {
                session.toggle_playback();
            }
            Action::EditText => {
                let current = session.text().to_string();
                let prompt = tokio::task::spawn_blocking(move || {
                    Text::new("Text to read:").with_initial_value(&current).prompt()
                });
                match await_prompt(&mut session, &mut rx, prompt).await? {
                    Ok(text) => session.set_text(text),
                    Err(InquireError::OperationCanceled) => {}
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e.into()),
                }
            }
            Action::ChooseSuggestion => {
                let start = session.carousel().start_index();
                let choices: Vec<SuggestionChoice> = session
                    .visible_suggestions()
                    .iter()
                    .enumerate()
                    .map(|(offset, s)| SuggestionChoice {
                        index: start + offset,
                        title: s.title,
                    })
                    .collect();
                let prompt =
                    tokio::task::spawn_blocking(move || Select::new("Suggestion:", choices).prompt());
                match await_prompt(&mut session, &mut rx, prompt).await? {
                    Ok(choice) => {
                        session.choose_suggestion(choice.index);
                    }
                    Err(InquireError::OperationCanceled) => {}
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e.into()),
                }
            }
            Action::NextSuggestions => session.next_suggestions(),
            Action::PreviousSuggestions => session.previous_suggestions(),
            Action::ChooseVoice | Action::PreviewVoice => {
                let (choices, cursor) = voice_choices(&session);
                let message = if action == Action::ChooseVoice {
                    "Voice:"
                } else {
                    "Preview voice:"
                };
                let prompt = tokio::task::spawn_blocking(move || {
                    Select::new(message, choices)
                        .with_starting_cursor(cursor)
                        .with_page_size(12)
                        .prompt()
                });
                match await_prompt(&mut session, &mut rx, prompt).await? {
                    Ok(choice) if action == Action::ChooseVoice => session.select_voice(choice.name),
                    Ok(choice) => {
                        session.preview_voice(&choice.name);
                    }
                    Err(InquireError::OperationCanceled) => {}
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e.into()),
                }
            }
            Action::Quit => break,
        }
    }

    session.shutdown();
    Ok(())
}
