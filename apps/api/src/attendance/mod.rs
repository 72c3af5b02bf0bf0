pub mod clock;
pub mod handlers;
