mod calendar_mirror;
mod push;

pub use calendar_mirror::{ICalendarMirror, NoopCalendarMirror, RestCalendarMirror};
pub use push::{IPushSender, WebPushSender};
