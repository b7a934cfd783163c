pub mod player_model;
