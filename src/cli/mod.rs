pub mod events;
pub mod payments;
pub mod setup;
pub mod tournaments;
pub mod ui;
pub mod validate;
