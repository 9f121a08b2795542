pub mod coaches;
pub mod trains;
