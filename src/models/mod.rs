pub mod clock;
pub mod due;
pub mod grade;
pub mod review_state;
pub mod sm2;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use due::format_next_review;
pub use grade::Grade;
pub use review_state::ReviewState;
pub use sm2::apply_grade;
pub use stats::ReviewStats;
