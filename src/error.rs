use thiserror::Error;

/// Errors that stop a request from producing a response. Each one ends the connection it
/// happened on, and only that connection.
///
/// Protocol-level errors of the implemented APIs (e.g. an unsupported ApiVersions version)
/// are not represented here, they travel to the client inside the response `error_code`.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The frame is shorter than the layout it claims to carry
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("malformed request header: {0}")]
    MalformedHeader(String),

    /// No handler is registered for the API key
    #[error("unsupported api key `{0}`")]
    UnsupportedApi(i16),

    #[error("connection I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ProtocolError::MalformedFrame(_) | ProtocolError::MalformedHeader(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_api_key() {
        let err = ProtocolError::UnsupportedApi(99);
        assert_eq!(err.to_string(), "unsupported api key `99`");
        assert!(!err.is_malformed());
    }

    #[test]
    fn malformed_variants_are_grouped() {
        assert!(ProtocolError::MalformedFrame("short".into()).is_malformed());
        assert!(ProtocolError::MalformedHeader("short".into()).is_malformed());

        let io = ProtocolError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(!io.is_malformed());
    }
}
