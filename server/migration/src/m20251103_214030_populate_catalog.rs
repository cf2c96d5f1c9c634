use morpion_db::{config, morpion, prelude::*};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// name, hp, attack, mana, accuracy
const MORPIONS: [(&str, i32, i32, i32, i32); 12] = [
    ("Archer", 6, 3, 1, 8),
    ("Berserker", 9, 6, 0, 3),
    ("Cleric", 6, 1, 7, 4),
    ("Druid", 5, 2, 7, 4),
    ("Golem", 12, 3, 0, 3),
    ("Knight", 9, 4, 1, 4),
    ("Mage", 4, 2, 9, 3),
    ("Monk", 7, 4, 3, 5),
    ("Necromancer", 4, 3, 8, 3),
    ("Paladin", 8, 3, 4, 3),
    ("Rogue", 5, 5, 1, 7),
    ("Sentinel", 10, 2, 2, 4),
];

// grid_size, max_turns
const CONFIGS: [(i32, i32); 3] = [(3, 9), (4, 16), (5, 25)];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if std::env::var("MORPION_POPULATE_DATABASE").is_err() {
            return Ok(());
        }
        let db = manager.get_connection();
        let morpions = MORPIONS
            .iter()
            .map(|&(name, hp, attack, mana, accuracy)| morpion::ActiveModel {
                name: Set(name.to_owned()),
                image_url: Set(format!("/static/morpions/{}.png", name.to_lowercase())),
                hp: Set(hp),
                attack: Set(attack),
                mana: Set(mana),
                accuracy: Set(accuracy),
                ..Default::default()
            });
        Morpion::insert_many(morpions).exec(db).await?;
        let configs = CONFIGS
            .iter()
            .map(|&(grid_size, max_turns)| config::ActiveModel {
                grid_size: Set(grid_size),
                max_turns: Set(max_turns),
                ..Default::default()
            });
        Config::insert_many(configs).exec(db).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        Morpion::delete_many()
            .filter(morpion::Column::Name.is_in(MORPIONS.iter().map(|m| m.0)))
            .exec(db)
            .await?;
        Config::delete_many().exec(db).await?;
        Ok(())
    }
}
