//! egui rendering. Widgets read [`crate::state::AppState`] and push
//! [`crate::state::Command`]s; they never touch the session directly.

pub mod panels;
pub mod plot;
pub mod table;
