#![forbid(unsafe_code)]

pub mod items_read;
pub mod students_delete;
pub mod students_get;
pub mod version;
