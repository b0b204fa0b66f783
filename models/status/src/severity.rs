use std::fmt;
use std::str::FromStr;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

/// Severity of a status check result.
///
/// Variants are declared in increasing order of precedence so the derived
/// `Ord` implementation gives `Critical > Warning > Ok`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// The dependency is healthy.
    #[serde(rename = "OK")]
    Ok,

    /// The dependency is degraded but still usable.
    #[serde(rename = "WARN")]
    Warning,

    /// The dependency is failing.
    #[serde(rename = "CRIT")]
    Critical,
}

impl Severity {
    /// Wire token for the severity.
    pub fn token(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARN",
            Severity::Critical => "CRIT",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.token())
    }
}

impl FromStr for Severity {
    type Err = InvalidSeverity;
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "OK" => Ok(Severity::Ok),
            "WARN" => Ok(Severity::Warning),
            "CRIT" => Ok(Severity::Critical),
            token => Err(InvalidSeverity(token.to_string())),
        }
    }
}

/// Returned when parsing an unknown severity token.
#[derive(Error, Debug, Eq, PartialEq)]
#[error("invalid severity token '{0}'")]
pub struct InvalidSeverity(pub String);

#[cfg(test)]
mod tests {
    use super::InvalidSeverity;
    use super::Severity;

    #[test]
    fn precedence() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Ok);
        let worst = vec![Severity::Warning, Severity::Ok, Severity::Critical]
            .into_iter()
            .max();
        assert_eq!(worst, Some(Severity::Critical));
    }

    #[test]
    fn from_token() {
        assert_eq!("CRIT".parse(), Ok(Severity::Critical));
        assert_eq!("WARN".parse(), Ok(Severity::Warning));
        assert_eq!("OK".parse(), Ok(Severity::Ok));
        assert_eq!(
            "ok".parse::<Severity>(),
            Err(InvalidSeverity("ok".to_string()))
        );
    }

    #[test]
    fn to_json() {
        let payload = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(payload, r#""WARN""#);
    }

    #[test]
    #[should_panic(expected = "unknown variant `BAD`")]
    fn from_json_unknown() {
        let _severity: Severity = serde_json::from_str(r#""BAD""#).unwrap();
    }
}
