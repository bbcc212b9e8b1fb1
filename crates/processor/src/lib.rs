//! Comment aggregation for the community wellness report

pub mod clock;
pub mod source;
pub mod wellness;


pub use clock::{Clock, FixedClock, SystemClock};
pub use source::{CommentSource, PgCommentSource};
pub use wellness::WellnessQuery;
