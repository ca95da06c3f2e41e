use thiserror::Error;

/// Caller contract violations. Empty or unknown inputs are never errors; they
/// produce zero-valued results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("cannot compare team {0:?} with itself")]
    SameTeam(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Rejects blank identifying parameters and returns the trimmed value.
pub fn require<'a>(value: &'a str, name: &'static str) -> QueryResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(QueryError::MissingParameter(name))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank() {
        assert_eq!(require("", "team"), Err(QueryError::MissingParameter("team")));
        assert_eq!(require("  ", "team"), Err(QueryError::MissingParameter("team")));
        assert_eq!(require(" CSK ", "team"), Ok("CSK"));
    }
}
