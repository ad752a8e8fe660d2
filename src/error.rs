use std::{error, fmt};

type Source = Box<dyn error::Error + Send + Sync>;

/// Error raised while decoding an access log line or driving the CLI.
pub struct Error {
    message: String,
    source: Option<Source>,
}

impl Error {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rollup error: {}", self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self {
            message,
            source: None,
        }
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl<E: error::Error + Send + Sync + 'static> From<(String, E)> for Error {
    fn from((message, err): (String, E)) -> Self {
        Self {
            message,
            source: Some(Box::new(err)),
        }
    }
}

impl<E: error::Error + Send + Sync + 'static> From<(&str, E)> for Error {
    fn from((message, err): (&str, E)) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        format!("{}", err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_source() {
        let cause = "x".parse::<i64>().unwrap_err();
        let err = Error::from(("couldn't parse duration", cause));
        assert_eq!(err.message(), "couldn't parse duration");
        assert_eq!(
            format!("{}", err),
            "couldn't parse duration: invalid digit found in string"
        );
        assert!(error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_without_source() {
        let err = Error::from("too few tokens");
        assert_eq!(format!("{}", err), "too few tokens");
        assert_eq!(format!("{:?}", err), "rollup error: too few tokens");
        assert!(error::Error::source(&err).is_none());
    }
}
