pub mod prelude;

pub mod config;
pub mod game;
pub mod logs_entry;
pub mod morpion;
pub mod team;
pub mod team_morpion;
