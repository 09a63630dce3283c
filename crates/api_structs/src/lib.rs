mod course;
mod notification;
mod session;
mod status;
mod subscription;

pub mod dtos {
    pub use crate::course::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::subscription::dtos::*;
}

pub use crate::course::api::*;
pub use crate::notification::api::*;
pub use crate::session::api::*;
pub use crate::status::api::*;
pub use crate::subscription::api::*;
