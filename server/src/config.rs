use error_stack::{Report, ResultExt};
use kernel::KernelError;

const SERVER_PORT: &str = "SERVER_PORT";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str =
    "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        dotenvy::dotenv().ok();

        let port = match dotenvy::var(SERVER_PORT) {
            Ok(port) => port
                .parse::<u16>()
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| format!("{SERVER_PORT} is not a port number: {port}"))?,
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => DEFAULT_PORT,
            Err(e) => {
                return Err(Report::new(e)
                    .change_context(KernelError::Internal)
                    .attach_printable(format!("Failed to read {SERVER_PORT}")))
            }
        };
        let log_filter =
            dotenvy::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self { port, log_filter })
    }
}
