pub mod input;
pub mod panel;
