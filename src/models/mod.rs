pub mod game;
pub mod validation;
