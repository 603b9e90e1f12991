use std::io;

use rean_survey_server::{console, ServeMode, ServerConfig, SurveyServer};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    let mut config =
        ServerConfig::from_env().map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    if let Some(arg) = std::env::args().nth(1) {
        config.bootstrap = Some(arg);
    }

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(rean_survey_server::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let server = SurveyServer::new(&config)?;
    match config.mode {
        ServeMode::Stdio => server.serve_stdio(),
        ServeMode::Console => {
            let stdin = io::stdin();
            let mut reader = io::BufReader::new(stdin.lock());
            let mut stdout = io::stdout();
            console::run(&server, &mut reader, &mut stdout)
        }
    }
}
