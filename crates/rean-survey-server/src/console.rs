//! Line-oriented text front end over the same session the JSON-RPC surface
//! drives.

use std::io::{self, BufRead, Write};

use rean_survey_content::{INSTRUCTIONS_TEXT, SURVEY_SUBTITLE, SURVEY_TITLE};
use rean_survey_core::{Classification, Response};
use rean_survey_session::{Session, SessionError, SessionState};

use crate::server::SurveyServer;

const HELP: &str = "commands: <number> yes|no, list, progress, show, share, reset, help, quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Answer { number: usize, response: Response },
    List,
    Progress,
    Show,
    Share,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "progress" => Command::Progress,
        "show" | "results" => Command::Show,
        "share" => Command::Share,
        "reset" | "new" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        number => {
            let number = number
                .parse::<usize>()
                .map_err(|_| format!("unknown command {head:?}"))?;
            let response = parts
                .next()
                .ok_or_else(|| format!("question {number} needs yes or no"))?
                .parse::<Response>()
                .map_err(|e| e.to_string())?;
            Command::Answer { number, response }
        }
    };
    if parts.next().is_some() {
        return Err(format!("too many arguments for {head:?}"));
    }
    Ok(command)
}

/// Runs the console until `quit` or EOF.
pub fn run<R: BufRead, W: Write>(
    server: &SurveyServer,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "{SURVEY_TITLE}\n{SURVEY_SUBTITLE}\n")?;
    let initial = server.with_session_mut(|session| render_opening(session));
    writer.write_all(initial.as_bytes())?;
    writer.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = match parse_command(trimmed) {
            Ok(command) => command,
            Err(message) => {
                writeln!(writer, "{message}\n{HELP}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let output = execute(server, command);
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
    }
    Ok(())
}

fn execute(server: &SurveyServer, command: Command) -> String {
    match command {
        Command::Answer { number, response } => server.with_session_mut(|session| {
            let Some(position) = number.checked_sub(1) else {
                return "questions are numbered from 1\n".to_string();
            };
            match session.set_answer(position, response) {
                Ok(()) => format!(
                    "{number}: {response} ({}% done)\n",
                    session.progress_percent()
                ),
                Err(err) => describe_error(&err),
            }
        }),
        Command::List => server.with_session_mut(|session| render_questions(session)),
        Command::Progress => server.with_session_mut(|session| {
            format!(
                "Progress: {}% ({} of {})\n",
                session.progress_percent(),
                session.answers().len(),
                session.catalog().len()
            )
        }),
        Command::Show => server.with_session_mut(|session| {
            if session.is_locked() {
                return session.result().map_or_else(
                    || "shared result is incomplete\n".to_string(),
                    |classification| render_result(&classification, session),
                );
            }
            match session.show_results() {
                Ok(classification) => render_result(&classification, session),
                Err(err) => describe_error(&err),
            }
        }),
        Command::Share => match server.share() {
            Ok(note) => {
                let href = server.with_session_mut(|session| session.location().href());
                format!("{}\n{href}\n", note.message)
            }
            Err(err) => describe_error(&err),
        },
        Command::Reset => server.with_session_mut(|session| {
            session.reset();
            format!("Started a new survey.\n{}", render_questions(session))
        }),
        Command::Help => format!("{HELP}\n"),
        Command::Quit => String::new(),
    }
}

fn render_opening(session: &Session) -> String {
    match session.state() {
        SessionState::SharedLocked => match session.result() {
            Some(classification) => format!(
                "Shared result (read-only)\n{}",
                render_result(&classification, session)
            ),
            None => "Shared result is incomplete; type reset to start a new survey.\n".to_string(),
        },
        SessionState::Editing | SessionState::ResultsShown => {
            format!("{INSTRUCTIONS_TEXT}\n{}{HELP}\n", render_questions(session))
        }
    }
}

fn render_questions(session: &Session) -> String {
    let mut out = String::new();
    for question in session.catalog().questions() {
        let mark = session
            .answers()
            .get(question.position)
            .map_or("   ", |response| match response {
                Response::Yes => "yes",
                Response::No => "no ",
            });
        out.push_str(&format!("[{mark}] {}. {}\n", question.number(), question.text));
    }
    out
}

fn render_result(classification: &Classification, session: &Session) -> String {
    format!(
        "Score: {} points – {}\n\n{}\n\nLink: {}\n",
        classification.score,
        classification.title,
        classification.display_text,
        session.location().href()
    )
}

fn describe_error(err: &SessionError) -> String {
    match err {
        SessionError::Locked => {
            "this shared result is read-only; type reset to start a new survey\n".to_string()
        }
        other => format!("{other}\n"),
    }
}
