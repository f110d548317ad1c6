pub mod bank;
pub mod guessing_game;

pub use bank::Bank;
pub use guessing_game::GuessingGame;
