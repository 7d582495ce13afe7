pub mod config;
pub mod player;

pub use config::PlaybackConfig;
pub use player::{play, play_with_config, Play, Playback, PlaybackReport};
