//! Game rules: win and draw detection.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;
