use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;

/// All settings come from the environment; the command line only carries
/// `--help` and `--version`.
#[derive(Parser, Debug)]
#[command(name = "adguard-presence")]
#[command(
    about = "Publish recent AdGuard Home query counts per client to Home Assistant",
    long_about = "Publish recent AdGuard Home query counts per client to Home Assistant.\n\n\
                  Configured through ADGUARD_URL, ADGUARD_USERNAME, ADGUARD_PASSWORD, \
                  HOME_ASSISTANT_URL, HOME_ASSISTANT_TOKEN and QUERY_LIMIT (default 1000), \
                  read from the environment or a .env file.",
    version
)]
pub struct Args {}

#[derive(Debug)]
pub enum Invocation {
    Run,
    /// Arguments clap did not recognise; they are ignored and the run goes ahead.
    RunIgnoring(Vec<String>),
    /// `--help` or `--version`: print and stop.
    Print(clap::Error),
}

impl Invocation {
    pub fn from_args<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        match Args::try_parse_from(&argv) {
            Ok(_) => Self::Run,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Self::Print(e)
            }
            Err(_) => Self::RunIgnoring(
                argv.iter()
                    .skip(1)
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect(),
            ),
        }
    }
}
