//! Calendar domain: company/personal events and assigned tasks.
//!
//! Entity shapes and input validation only; who may do what lives in
//! `workhub-access`.

pub mod event;
pub mod task;

pub use event::{CalendarType, Event, NewEvent};
pub use task::{NewTask, Task, TaskStatus};
