mod output;
mod repl;
mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use crossbeam_channel::Receiver;

use timeline_marker_core::dictation::dictation_adapter::DictationAdapter;
use timeline_marker_core::dictation::infrastructure::unsupported_speech::UnsupportedSpeechCapture;
use timeline_marker_core::playback::domain::player_api::PlayerApiSignal;
use timeline_marker_core::playback::domain::position_poller::PollTick;
use timeline_marker_core::playback::infrastructure::clock_player::{ClockPlayerFactory, ClockRemote};
use timeline_marker_core::playback::infrastructure::threaded_position_poller::ThreadedPositionPoller;
use timeline_marker_core::playback::playback_adapter::PlaybackAdapter;
use timeline_marker_core::session::session_event::SessionEvent;
use timeline_marker_core::session::timeline_session::TimelineSession;
use timeline_marker_core::timeline::infrastructure::snapshot_file;
use timeline_marker_core::video::domain::video_identifier::VideoId;

use settings::Settings;

/// Mark, label and export time ranges of a video.
#[derive(Parser)]
#[command(name = "timeline-marker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the video identifier a link resolves to.
    Id {
        /// Video link.
        link: String,
    },

    /// Print a timeline file.
    Show {
        /// Timeline file.
        file: PathBuf,
    },

    /// Add a labeled segment to a timeline file.
    Add {
        /// Timeline file (rewritten in place).
        file: PathBuf,

        /// Segment label.
        #[arg(long)]
        label: String,

        /// Range start in seconds.
        #[arg(long)]
        start: f64,

        /// Range end in seconds.
        #[arg(long)]
        end: f64,
    },

    /// Delete a segment from a timeline file by position.
    Delete {
        /// Timeline file (rewritten in place).
        file: PathBuf,

        /// Zero-based segment position.
        index: usize,
    },

    /// Interactive marking session against a simulated player.
    Session {
        /// Video link.
        link: String,

        /// Video length in seconds.
        #[arg(long)]
        duration: f64,

        /// Video title.
        #[arg(long, default_value = "")]
        title: String,

        /// Timeline file to start from.
        #[arg(long)]
        import: Option<PathBuf>,
    },

    /// Show or change saved settings.
    Config {
        /// Dictation language tag (e.g. en-US).
        #[arg(long)]
        language: Option<String>,

        /// Default directory for exports.
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Command::Id { link } => {
            let id = VideoId::parse(&link)
                .ok_or("Please enter a valid YouTube URL.")?;
            println!("{id}");
        }
        Command::Show { file } => {
            let snapshot = snapshot_file::read_snapshot(&file)?;
            output::print_snapshot(&snapshot);
        }
        Command::Add {
            file,
            label,
            start,
            end,
        } => run_add(&file, &label, start, end, &settings)?,
        Command::Delete { file, index } => run_delete(&file, index, &settings)?,
        Command::Session {
            link,
            duration,
            title,
            import,
        } => run_session(&link, duration, &title, import.as_deref(), &settings)?,
        Command::Config {
            language,
            export_dir,
        } => run_config(settings, language, export_dir)?,
    }

    Ok(())
}

/// Wires a session to the simulated player and the threaded poller.
fn build_session(
    duration: f64,
    title: &str,
    settings: &Settings,
) -> (TimelineSession, ClockRemote, Receiver<PollTick>) {
    let factory = ClockPlayerFactory::new(duration, title);
    let remote = factory.remote();
    let (poller, ticks) = ThreadedPositionPoller::with_channel();
    let playback = PlaybackAdapter::new(Box::new(factory), Box::new(poller), PlayerApiSignal::new());
    let dictation = DictationAdapter::new(
        Box::new(UnsupportedSpeechCapture),
        &settings.dictation_language,
    );
    (TimelineSession::new(playback, dictation), remote, ticks)
}

fn open_file_session(
    file: &Path,
    settings: &Settings,
) -> Result<TimelineSession, Box<dyn std::error::Error>> {
    let document = snapshot_file::read_document(file)?;
    let (mut session, _remote, _ticks) = build_session(0.0, "", settings);
    session.import_json(&document)?;
    Ok(session)
}

fn run_add(
    file: &Path,
    label: &str,
    start: f64,
    end: f64,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_seconds("start", start)?;
    validate_seconds("end", end)?;

    let mut session = open_file_session(file, settings)?;
    session.drag_range(start, end);
    session.set_query(label);
    let segment = session.add_segment()?;
    snapshot_file::write_snapshot(file, &session.export_snapshot())?;

    println!(
        "Added {}",
        output::segment_line(session.segments().len() - 1, &segment)
    );
    Ok(())
}

fn run_delete(
    file: &Path,
    index: usize,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_file_session(file, settings)?;
    let removed = session.delete_segment(index)?;
    snapshot_file::write_snapshot(file, &session.export_snapshot())?;
    println!("Deleted \"{}\"", removed.query);
    Ok(())
}

fn run_session(
    link: &str,
    duration: f64,
    title: &str,
    import: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_seconds("duration", duration)?;

    let (mut session, remote, ticks) = build_session(duration, title, settings);
    session.set_video_link(link);
    session.submit_video_link()?;
    session.dispatch(SessionEvent::PlayerApiReady)?;
    session.dispatch(SessionEvent::PlayerReady)?;

    if let Some(path) = import {
        repl::import(&mut session, &remote, path)?;
    }

    repl::run(&mut session, &remote, settings, &ticks);
    Ok(())
}

fn run_config(
    mut settings: Settings,
    language: Option<String>,
    export_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let changed = language.is_some() || export_dir.is_some();
    if let Some(language) = language {
        if language.trim().is_empty() {
            return Err("Language must not be empty".into());
        }
        settings.dictation_language = language;
    }
    if let Some(dir) = export_dir {
        settings.export_dir = Some(dir);
    }
    if changed {
        let path = settings.save()?;
        log::info!("Settings saved to {}", path.display());
    }

    println!("dictation_language = {}", settings.dictation_language);
    println!("export_dir = {}", settings.export_dir().display());
    Ok(())
}

fn validate_seconds(name: &str, value: f64) -> Result<(), Box<dyn std::error::Error>> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{name} must be a non-negative number of seconds, got {value}").into());
    }
    Ok(())
}
