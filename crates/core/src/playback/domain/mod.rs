pub mod player_api;
pub mod position_poller;
pub mod video_player;
