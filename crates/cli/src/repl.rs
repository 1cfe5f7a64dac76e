use std::io::BufRead;
use std::path::{Path, PathBuf};

use crossbeam_channel::{select, Receiver};

use timeline_marker_core::playback::domain::position_poller::PollTick;
use timeline_marker_core::playback::domain::video_player::PlayerStateChange;
use timeline_marker_core::playback::infrastructure::clock_player::ClockRemote;
use timeline_marker_core::selection::domain::pointer_capture::NoopPointerCapture;
use timeline_marker_core::selection::domain::timeline_geometry::TrackGeometry;
use timeline_marker_core::session::session_event::SessionEvent;
use timeline_marker_core::session::timeline_session::TimelineSession;
use timeline_marker_core::shared::time_format::format_time;
use timeline_marker_core::timeline::infrastructure::snapshot_file;

use crate::output;
use crate::settings::Settings;

/// Width of the virtual track `scrub` drags across; positions are percents.
const SCRUB_TRACK_WIDTH: f64 = 100.0;

pub const HELP: &str = "\
Commands:
  play | pause            start or stop playback
  seek SECONDS            jump to a position
  range START END         set the selection (seconds)
  scrub PERCENT           drag the position marker to PERCENT of the track
  label TEXT              set the label for the next segment
  dictate                 toggle voice dictation
  add                     add a segment for the selection
  delete INDEX            delete a segment
  list                    list segments
  status                  show playback and selection
  export [PATH]           write the timeline file
  import PATH             load a timeline file
  help                    show this help
  quit                    leave";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Seek(f64),
    Range(f64, f64),
    Scrub(f64),
    Label(String),
    Dictate,
    Add,
    Delete(usize),
    List,
    Status,
    Export(Option<PathBuf>),
    Import(PathBuf),
    Help,
    Quit,
}

fn parse_seconds(arg: Option<&str>, what: &str) -> Result<f64, String> {
    let raw = arg.ok_or_else(|| format!("missing {what}"))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("{what} must be a number, got '{raw}'"))?;
    if !value.is_finite() {
        return Err(format!("{what} must be finite, got '{raw}'"));
    }
    Ok(value)
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let command = match word.to_lowercase().as_str() {
        "play" => Command::Play,
        "pause" => Command::Pause,
        "seek" => Command::Seek(parse_seconds(args.next(), "position")?),
        "range" => {
            let start = parse_seconds(args.next(), "start")?;
            let end = parse_seconds(args.next(), "end")?;
            Command::Range(start, end)
        }
        "scrub" => Command::Scrub(parse_seconds(args.next(), "percent")?),
        "label" => Command::Label(rest.to_string()),
        "dictate" => Command::Dictate,
        "add" => Command::Add,
        "delete" => {
            let raw = args.next().ok_or("missing index")?;
            let index = raw
                .parse()
                .map_err(|_| format!("index must be a whole number, got '{raw}'"))?;
            Command::Delete(index)
        }
        "list" => Command::List,
        "status" => Command::Status,
        "export" => Command::Export(args.next().map(PathBuf::from)),
        "import" => Command::Import(PathBuf::from(args.next().ok_or("missing path")?)),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

pub enum Flow {
    Continue,
    Quit,
}

/// Applies one command. Errors are notices to print; the loop carries on.
pub fn execute(
    session: &mut TimelineSession,
    remote: &ClockRemote,
    settings: &Settings,
    command: Command,
) -> Result<Flow, Box<dyn std::error::Error>> {
    match command {
        Command::Play => {
            session.dispatch(SessionEvent::PlayerStateChanged(remote.play()))?;
        }
        Command::Pause => {
            session.dispatch(SessionEvent::PlayerStateChanged(remote.pause()))?;
        }
        Command::Seek(seconds) => session.seek(seconds),
        Command::Range(start, end) => {
            let sel = session.drag_range(start, end);
            println!("Selection {} - {}", format_time(sel.start), format_time(sel.end));
        }
        Command::Scrub(percent) => {
            session.begin_marker_drag(
                TrackGeometry::new(0.0, SCRUB_TRACK_WIDTH),
                Box::new(NoopPointerCapture),
            );
            session.dispatch(SessionEvent::PointerMoved { client_x: percent })?;
            session.dispatch(SessionEvent::PointerReleased)?;
            println!("Position {}", format_time(session.position()));
        }
        Command::Label(text) => session.set_query(&text),
        Command::Dictate => {
            if session.toggle_dictation() {
                println!("Listening...");
            } else {
                println!("Dictation off");
            }
        }
        Command::Add => {
            let segment = session.add_segment()?;
            println!("Added {}", output::segment_line(session.segments().len() - 1, &segment));
        }
        Command::Delete(index) => {
            let removed = session.delete_segment(index)?;
            println!("Deleted \"{}\"", removed.query);
        }
        Command::List => output::print_segments(session.segments()),
        Command::Status => print_status(session),
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| snapshot_file::export_path(&settings.export_dir()));
            snapshot_file::write_snapshot(&path, &session.export_snapshot())?;
            println!("Exported to {}", path.display());
        }
        Command::Import(path) => import(session, remote, &path)?,
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Loads a timeline file into the session and points the simulated widget at it.
pub fn import(
    session: &mut TimelineSession,
    remote: &ClockRemote,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = snapshot_file::read_document(path)?;
    session.dispatch(SessionEvent::FileRead(document))?;

    // The simulated widget plays whatever the document describes.
    remote.set_media(session.duration(), session.title());
    session.dispatch(SessionEvent::PlayerReady)?;
    println!(
        "Imported \"{}\" with {} segments",
        session.title(),
        session.segments().len()
    );
    Ok(())
}

fn print_status(session: &TimelineSession) {
    let sel = session.selection();
    let state = if session.is_playing() { "playing" } else { "paused" };
    println!(
        "{} [{}] {} / {} ({:.0}%) {state}",
        session.video_id().map(|id| id.as_str()).unwrap_or("-"),
        session.title(),
        format_time(session.position()),
        format_time(session.duration()),
        session.marker_percent(),
    );
    println!("Selection {} - {}", format_time(sel.start), format_time(sel.end));
    if !session.query().is_empty() {
        println!("Label \"{}\"", session.query());
    }
}

/// Forwards stdin lines onto a channel so they can be selected alongside
/// poll ticks.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Runs the interactive loop until `quit` or end of input.
pub fn run(
    session: &mut TimelineSession,
    remote: &ClockRemote,
    settings: &Settings,
    ticks: &Receiver<PollTick>,
) {
    let lines = spawn_stdin_reader();
    println!("{HELP}");

    loop {
        select! {
            recv(lines) -> line => {
                let Ok(line) = line else { break };
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                };
                match execute(session, remote, settings, command) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => eprintln!("{e}"),
                }
            }
            recv(ticks) -> tick => {
                let Ok(tick) = tick else { break };
                on_tick(session, remote, tick);
            }
        }
    }

    session.teardown();
}

fn on_tick(session: &mut TimelineSession, remote: &ClockRemote, tick: PollTick) {
    if let Err(e) = session.dispatch(SessionEvent::PollTick(tick.generation)) {
        log::error!("Poll tick failed: {e}");
    }
    if remote.reached_end() {
        remote.pause();
        if let Err(e) = session.dispatch(SessionEvent::PlayerStateChanged(PlayerStateChange::Ended)) {
            log::error!("End of video failed: {e}");
        }
        println!("End of video");
    }
}
