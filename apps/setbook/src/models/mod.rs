pub mod date;
pub mod show;
pub mod song;

pub use date::ShowDate;
pub use show::{Set, Show, ShowHeader};
pub use song::format_song;
