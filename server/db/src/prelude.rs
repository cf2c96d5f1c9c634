pub use super::config::Entity as Config;
pub use super::game::Entity as Game;
pub use super::logs_entry::Entity as LogsEntry;
pub use super::morpion::Entity as Morpion;
pub use super::team::Entity as Team;
pub use super::team_morpion::Entity as TeamMorpion;
