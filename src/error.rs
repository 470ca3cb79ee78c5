use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Invalid date format: {0}")]
    #[diagnostic(
        code(turnos::invalid_date_format),
        help("use YYYY-MM-DD or the short format of your locale")
    )]
    InvalidDateFormat(String),

    #[error("Invalid calendar date: {year:04}-{month:02}-{day:02}")]
    #[diagnostic(code(turnos::invalid_calendar_date))]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },

    #[error("Field override produces an invalid date: {year:04}-{month:02}-{day:02}")]
    #[diagnostic(code(turnos::invalid_field_override))]
    InvalidFieldOverride { year: i32, month: u32, day: u32 },

    #[error("Date out of range: {date} shifted by {days} days")]
    #[diagnostic(code(turnos::date_out_of_range))]
    DateOutOfRange { date: String, days: i64 },

    #[error("Unknown time zone: {0}")]
    #[diagnostic(
        code(turnos::invalid_timezone),
        help("use an IANA name such as America/Argentina/Buenos_Aires")
    )]
    InvalidTimezone(String),

    #[error("Invalid locale tag: {0}")]
    #[diagnostic(code(turnos::invalid_locale), help("use a BCP-47 tag such as es-AR"))]
    InvalidLocale(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(turnos::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(turnos::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(turnos::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(turnos::serialization))]
    Serialization(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type TurnosResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str, value: &str) -> Error {
    Error::Environment(format!("Invalid value for {}: {}", var, value))
}

/// Helper to create date format errors
pub fn format_error(input: &str) -> Error {
    Error::InvalidDateFormat(input.to_string())
}
