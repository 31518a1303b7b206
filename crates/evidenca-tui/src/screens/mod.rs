pub mod calendar;
pub mod login;
pub mod projects;
