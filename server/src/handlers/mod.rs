mod prelude;
mod tmpl_data;

pub mod get_create_team;
pub mod get_index;
pub mod get_teams;
pub mod post_create_team;
pub mod post_teams;
