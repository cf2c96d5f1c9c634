//! Fixtures for tests that run against a migrated in-memory database.

use sea_orm::prelude::TimeDateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;

use morpion_db as db;

pub async fn test_db() -> DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory sqlite DB.");
    migration::Migrator::up(&db, None)
        .await
        .expect("Applying initial DB migrations failed");
    db
}

/// Inserts `n` morpions named so that their name order is the reverse of
/// their insertion order. Returns ids in insertion order.
pub async fn insert_morpions(db: &DatabaseConnection, n: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let morpion = db::morpion::ActiveModel {
            name: Set(format!("morpion-{:02}", n - i)),
            image_url: Set(format!("/static/morpions/{i}.png")),
            hp: Set(5 + i as i32),
            attack: Set(3),
            mana: Set(2),
            accuracy: Set(4),
            ..Default::default()
        };
        ids.push(
            db::morpion::Entity::insert(morpion)
                .exec(db)
                .await
                .expect("Failed to insert morpion")
                .last_insert_id,
        );
    }
    ids
}

pub async fn insert_team(
    db: &DatabaseConnection,
    name: &str,
    color: &str,
    created_at: TimeDateTimeWithTimeZone,
) -> i64 {
    let team = db::team::ActiveModel {
        name: Set(name.to_owned()),
        color: Set(color.to_owned()),
        created_at: Set(created_at),
        ..Default::default()
    };
    db::team::Entity::insert(team)
        .exec(db)
        .await
        .expect("Failed to insert team")
        .last_insert_id
}

pub async fn insert_config(db: &DatabaseConnection, grid_size: i32, max_turns: i32) -> i64 {
    let config = db::config::ActiveModel {
        grid_size: Set(grid_size),
        max_turns: Set(max_turns),
        ..Default::default()
    };
    db::config::Entity::insert(config)
        .exec(db)
        .await
        .expect("Failed to insert config")
        .last_insert_id
}

pub struct GameFixture {
    pub team1_id: i64,
    pub team2_id: i64,
    pub winner_team_id: Option<i64>,
    pub started_at: TimeDateTimeWithTimeZone,
    pub ended_at: Option<TimeDateTimeWithTimeZone>,
    pub config_id: i64,
}

pub async fn insert_game(db: &DatabaseConnection, g: GameFixture) -> i64 {
    let game = db::game::ActiveModel {
        team1_id: Set(g.team1_id),
        team2_id: Set(g.team2_id),
        winner_team_id: Set(g.winner_team_id),
        started_at: Set(g.started_at),
        ended_at: Set(g.ended_at),
        config_id: Set(g.config_id),
        ..Default::default()
    };
    db::game::Entity::insert(game)
        .exec(db)
        .await
        .expect("Failed to insert game")
        .last_insert_id
}

pub async fn insert_log(
    db: &DatabaseConnection,
    game_id: i64,
    num: i32,
    created_at: TimeDateTimeWithTimeZone,
) {
    let entry = db::logs_entry::ActiveModel {
        game_id: Set(game_id),
        num: Set(num),
        created_at: Set(created_at),
        message: Set(format!("turn {num}")),
    };
    db::logs_entry::Entity::insert(entry)
        .exec(db)
        .await
        .expect("Failed to insert log entry");
}
