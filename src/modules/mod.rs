pub mod activities;
pub mod calendar;
pub mod weeks;
