pub mod data_routes;
pub mod info_routes;
pub mod playback_routes;
pub mod ws_handler;
