pub mod compression;
pub mod constants;
pub mod error;
pub mod format;
pub mod parser;
pub mod playback;
pub mod reader;
pub mod scaler;
pub mod series;
pub mod sim;
