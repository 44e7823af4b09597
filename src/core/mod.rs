pub mod calendar;
pub mod clock;
pub mod config;
pub mod correction;
pub mod ledger;
pub mod log;
pub mod notify;
pub mod state;
pub mod tracker;
