pub mod generate;
pub mod play;
pub mod score;
pub mod simulate;
