use crate::core::{days_between, Issue};
use crate::errors::Result;

/// Days from opening to closing; both timestamps are required
pub fn closed_time(issue: &Issue) -> Result<f64> {
    Ok(days_between(&issue.created()?, &issue.closed()?))
}
