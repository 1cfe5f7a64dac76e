pub mod clock_player;
pub mod threaded_position_poller;
