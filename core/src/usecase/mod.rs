pub mod timer_session;
pub mod tracker;

mod tracker_test;
