pub mod entry;
pub mod project;
pub mod summary;
pub mod timer;
