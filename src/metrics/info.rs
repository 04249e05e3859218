use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref SERVER_VERSION: Regex = Regex::new(r"redis_version:([0-9.]+)").unwrap();
    static ref REPLICATION_ROLE: Regex = Regex::new(r"role:([a-z]+)").unwrap();
}

/// Identity of the connected server, as reported by `INFO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVersionInfo {
    pub version: String,
    pub role: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InfoParseError {
    #[error("error parsing {field} from info: not found")]
    Missing { field: &'static str },

    #[error("error parsing {field} from info: found {count} times")]
    Duplicate { field: &'static str, count: usize },
}

/// Extract the server version and replication role from raw `INFO` text.
///
/// Each field must appear exactly once; an absent or repeated field is an
/// error rather than a guess.
pub fn parse_build_version_info(info: &str) -> Result<BuildVersionInfo, InfoParseError> {
    let version = capture_once(&SERVER_VERSION, info, "server version")?;
    let role = capture_once(&REPLICATION_ROLE, info, "role")?;

    Ok(BuildVersionInfo {
        version: version.to_string(),
        role: role.to_string(),
    })
}

fn capture_once<'a>(
    pattern: &Regex,
    text: &'a str,
    field: &'static str,
) -> Result<&'a str, InfoParseError> {
    let captures: Vec<&str> = pattern
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();

    match captures.as_slice() {
        [value] => Ok(*value),
        [] => Err(InfoParseError::Missing { field }),
        _ => Err(InfoParseError::Duplicate {
            field,
            count: captures.len(),
        }),
    }
}
