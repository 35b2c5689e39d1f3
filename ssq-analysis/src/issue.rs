use std::str::FromStr;

use tracing::warn;

use crate::error::AnalysisError;

/// Issue identifier: 4-digit year followed by the period number within that year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IssueId {
    pub year: u32,
    pub period: u32,
}

impl FromStr for IssueId {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AnalysisError::MalformedIssue(s.to_string());
        let (year, period) = match (s.get(..4), s.get(4..)) {
            (Some(y), Some(p)) if !p.is_empty() => (y, p),
            _ => return Err(malformed()),
        };
        if !year.bytes().all(|b| b.is_ascii_digit()) || !period.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        Ok(IssueId {
            year: year.parse().map_err(|_| malformed())?,
            period: period.parse().map_err(|_| malformed())?,
        })
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{:03}", self.year, self.period)
    }
}

impl IssueId {
    pub fn next(&self) -> IssueId {
        IssueId {
            year: self.year,
            period: self.period.saturating_add(1),
        }
    }
}

/// Identifier following `latest`, or `fallback` when there is no history.
// TODO: decide whether period 1000 should roll over to the next year once the draw calendar rule is confirmed.
pub fn next_issue(latest: Option<&str>, fallback: &str) -> Result<String, AnalysisError> {
    let Some(latest) = latest else {
        return Ok(fallback.to_string());
    };
    let next = latest.parse::<IssueId>()?.next();
    if next.period > 999 {
        warn!(latest, next = %next, "period exceeds three digits");
    }
    Ok(next.to_string())
}
