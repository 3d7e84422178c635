pub mod human;
pub mod ticker;

pub use human::HumanMode;
pub use ticker::Ticker;
