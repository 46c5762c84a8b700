//! Descriptive metrics computed per issue.

pub mod comments;
pub mod timing;

pub use comments::{
    comment_count, first_comment_time, human_comments, last_comment_time, participant_count,
};
pub use timing::closed_time;
