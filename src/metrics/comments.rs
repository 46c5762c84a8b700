//! Comment-based metrics.
//!
//! Only human comments count: fetch-error markers and comments written by bots are
//! skipped everywhere. Comment times are measured in days from the issue's creation to
//! the comment selected by ordinal (lowest for the first, highest for the last).

use crate::classify::BotClassifier;
use crate::core::{days_between, Comment, Issue};
use crate::errors::Result;
use std::collections::HashSet;

/// Posted comments not written by a bot, in thread order
pub fn human_comments<'a>(
    issue: &'a Issue,
    bots: &BotClassifier,
) -> Result<Vec<(u32, &'a Comment)>> {
    let mut kept = Vec::new();
    for (ordinal, comment) in issue.comments.posted() {
        if !bots.is_bot(comment.author())? {
            kept.push((ordinal, comment));
        }
    }
    Ok(kept)
}

pub fn comment_count(issue: &Issue, bots: &BotClassifier) -> Result<usize> {
    Ok(human_comments(issue, bots)?.len())
}

fn days_to_comment(issue: &Issue, ordinal: Option<u32>) -> Result<Option<f64>> {
    let Some(ordinal) = ordinal else {
        return Ok(None);
    };
    let created = issue.created()?;
    Ok(issue
        .comments
        .by_ordinal(ordinal)?
        .map(|comment| days_between(&created, &comment.created_at)))
}

/// Days until the lowest-ordinal human comment, `None` without human comments
pub fn first_comment_time(issue: &Issue, bots: &BotClassifier) -> Result<Option<f64>> {
    let oldest = human_comments(issue, bots)?
        .into_iter()
        .map(|(ordinal, _)| ordinal)
        .min();
    days_to_comment(issue, oldest)
}

/// Days until the highest-ordinal human comment, `None` without human comments
pub fn last_comment_time(issue: &Issue, bots: &BotClassifier) -> Result<Option<f64>> {
    let newest = human_comments(issue, bots)?
        .into_iter()
        .map(|(ordinal, _)| ordinal)
        .max();
    days_to_comment(issue, newest)
}

/// Distinct human commenters other than the issue author
pub fn participant_count(issue: &Issue, bots: &BotClassifier) -> Result<usize> {
    let mut participants: HashSet<&str> = HashSet::from([issue.author()]);
    for (_, comment) in human_comments(issue, bots)? {
        participants.insert(comment.author());
    }
    Ok(participants.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::GroundTruthBots;
    use crate::core::{CommentThread, Timestamp};
    use crate::errors::IssueError;

    fn ts(raw: &str) -> Timestamp {
        Timestamp::parse(raw).unwrap()
    }

    fn bots() -> BotClassifier {
        BotClassifier::with_table(GroundTruthBots::from_logins(["travis-ci"]))
    }

    fn issue_with(thread: CommentThread) -> Issue {
        let mut issue = Issue::new("reporter");
        issue.created_at = Some(ts("2022-01-10T10:00:00Z"));
        issue.comments = thread;
        issue
    }

    #[test]
    fn test_no_comments() {
        let issue = issue_with(CommentThread::new());
        assert_eq!(comment_count(&issue, &bots()).unwrap(), 0);
        assert_eq!(first_comment_time(&issue, &bots()).unwrap(), None);
        assert_eq!(last_comment_time(&issue, &bots()).unwrap(), None);
        assert_eq!(participant_count(&issue, &bots()).unwrap(), 0);
    }

    #[test]
    fn test_fetch_error_counts_as_no_comments() {
        let issue = issue_with(CommentThread::unavailable());
        assert_eq!(comment_count(&issue, &bots()).unwrap(), 0);
        assert_eq!(first_comment_time(&issue, &bots()).unwrap(), None);
        assert_eq!(participant_count(&issue, &bots()).unwrap(), 0);
    }

    #[test]
    fn test_bot_comments_are_skipped() {
        let issue = issue_with(
            CommentThread::new()
                .with_comment(1, Comment::new("codecov[bot]", ts("2022-01-10T10:05:00Z")))
                .with_comment(2, Comment::new("developer", ts("2022-01-11T10:00:00Z")))
                .with_comment(3, Comment::new("travis-ci", ts("2022-01-12T10:00:00Z"))),
        );
        assert_eq!(comment_count(&issue, &bots()).unwrap(), 1);
        assert_eq!(first_comment_time(&issue, &bots()).unwrap(), Some(1.0));
        assert_eq!(last_comment_time(&issue, &bots()).unwrap(), Some(1.0));
        assert_eq!(participant_count(&issue, &bots()).unwrap(), 1);
    }

    #[test]
    fn test_only_bot_comments_yield_none() {
        let issue = issue_with(
            CommentThread::new()
                .with_comment(1, Comment::new("dependabot[bot]", ts("2022-01-10T10:05:00Z"))),
        );
        assert_eq!(comment_count(&issue, &bots()).unwrap(), 0);
        assert_eq!(first_comment_time(&issue, &bots()).unwrap(), None);
        assert_eq!(last_comment_time(&issue, &bots()).unwrap(), None);
    }

    #[test]
    fn test_selection_is_by_ordinal_not_thread_order() {
        let issue = issue_with(
            CommentThread::new()
                .with_comment(3, Comment::new("c", ts("2022-01-13T10:00:00Z")))
                .with_comment(1, Comment::new("a", ts("2022-01-11T10:00:00Z")))
                .with_comment(2, Comment::new("b", ts("2022-01-12T10:00:00Z"))),
        );
        assert_eq!(first_comment_time(&issue, &bots()).unwrap(), Some(1.0));
        assert_eq!(last_comment_time(&issue, &bots()).unwrap(), Some(3.0));
    }

    #[test]
    fn test_participants_dedupe_and_exclude_author() {
        let issue = issue_with(
            CommentThread::new()
                .with_comment(1, Comment::new("reporter", ts("2022-01-11T10:00:00Z")))
                .with_comment(2, Comment::new("alice", ts("2022-01-11T11:00:00Z")))
                .with_comment(3, Comment::new("alice", ts("2022-01-11T12:00:00Z")))
                .with_comment(4, Comment::new("bob", ts("2022-01-11T13:00:00Z")))
                .with_comment(5, Comment::new("reporter", ts("2022-01-11T14:00:00Z"))),
        );
        assert_eq!(comment_count(&issue, &bots()).unwrap(), 5);
        assert_eq!(participant_count(&issue, &bots()).unwrap(), 2);
    }

    #[test]
    fn test_duplicate_ordinal_is_an_error() {
        let issue = issue_with(
            CommentThread::new()
                .with_comment(1, Comment::new("alice", ts("2022-01-11T10:00:00Z")))
                .with_comment(1, Comment::new("bob", ts("2022-01-12T10:00:00Z"))),
        );
        assert!(matches!(
            first_comment_time(&issue, &bots()),
            Err(IssueError::AmbiguousCommentOrdinal { ordinal: 1 })
        ));
    }

    #[test]
    fn test_irregular_comment_keys_are_surfaced() {
        let issue = Issue::from_value(serde_json::json!({
            "user": {"login": "reporter"},
            "created_at": "2022-01-10T10:00:00Z",
            "comments_dict": {
                "1st comment": {"created_at": "2022-01-11T10:00:00Z", "user": {"login": "alice"}},
                "2nd comment": {"created_at": "2022-01-12T10:00:00Z", "user": {"login": "bob"}}
            }
        }))
        .unwrap();

        assert_eq!(comment_count(&issue, &bots()).unwrap(), 2);
        assert_eq!(participant_count(&issue, &bots()).unwrap(), 2);
        assert!(matches!(
            first_comment_time(&issue, &bots()),
            Err(IssueError::IrregularCommentKey { .. })
        ));
        let err = last_comment_time(&issue, &bots()).unwrap_err();
        assert!(err.is_data_integrity());
        assert!(err.to_string().contains("2nd comment"));
    }

    #[test]
    fn test_comment_before_creation_is_negative() {
        let issue = issue_with(
            CommentThread::new()
                .with_comment(1, Comment::new("alice", ts("2022-01-09T10:00:00Z"))),
        );
        assert_eq!(first_comment_time(&issue, &bots()).unwrap(), Some(-1.0));
    }
}
