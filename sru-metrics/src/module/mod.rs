pub mod launchpad;
pub mod publisher;
pub mod queue;
pub mod sru_report;
