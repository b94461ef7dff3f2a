/// Coarse error classification reported to callers.
///
/// | Kind | Raised when |
/// |------|-------------|
/// | `Configuration` | unknown endpoint name, missing or invalid environment |
/// | `Upstream` | transport failure, timeout, non-2xx status, malformed body |
/// | `Serialization` | a tool result could not be encoded as JSON text (raised by `finage-tools`) |
///
/// None of the kinds are retried; a failed call fails as a whole.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Local configuration problem. Fixing the environment is the only remedy.
    Configuration,

    /// The upstream API failed or answered with something unexpected.
    Upstream,

    /// Encoding the result failed.
    Serialization,
}

impl ErrorKind {
    /// Stable string code for logs and tool error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION_ERROR",
            ErrorKind::Upstream => "UPSTREAM_ERROR",
            ErrorKind::Serialization => "SERIALIZATION_ERROR",
        }
    }
}
