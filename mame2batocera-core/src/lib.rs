pub mod game_id;
pub mod media;

pub use game_id::GameId;
pub use media::{MediaAsset, MediaCategory, MediaIndex};
