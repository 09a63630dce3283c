mod chain;
mod course;
mod notification;
mod shared;
mod subscription;

pub use chain::{
    collapse_after_delete, deletion_diff, rebuild_forward, shift_for_resume, validate_chain,
    ChainError, MILLIS_PER_MINUTE,
};
pub use course::Course;
pub use notification::{CourseSnapshot, NotificationRecord};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use subscription::{PushSubscription, SubscriptionKeys};
