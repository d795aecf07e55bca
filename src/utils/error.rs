//! Error formatting.

use std::error::Error;

/// `outer: inner: root` for an error and its sources.
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use std::io::{self, ErrorKind};
    use std::path::PathBuf;

    #[test]
    fn test_error_chain_includes_sources() {
        let err = ConfigError::Io(
            PathBuf::from("shields.toml"),
            io::Error::new(ErrorKind::NotFound, "gone"),
        );
        assert_eq!(error_chain(&err), "IO error when reading `shields.toml`: gone");

        let plain = io::Error::new(ErrorKind::Other, "plain");
        assert_eq!(error_chain(&plain), "plain");
    }
}
