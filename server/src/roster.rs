use sea_orm::prelude::TimeDateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QueryTrait, Set,
};
use serde::Serialize;

use std::collections::{HashMap, HashSet};

use morpion_db as db;

use crate::query;

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamRef {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl From<db::team::Model> for TeamRef {
    fn from(t: db::team::Model) -> Self {
        TeamRef {
            id: t.id,
            name: t.name,
            color: t.color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamWithMorpions {
    pub team: db::team::Model,
    // Ordered by name.
    pub morpions: Vec<db::morpion::Model>,
    pub morpion_count: usize,
}

/// A game seen from one of its participants, with everything the team
/// listing shows about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamGame {
    pub game: db::game::Model,
    pub team1: TeamRef,
    pub team2: TeamRef,
    pub winner: Option<TeamRef>,
    pub config: Option<db::config::Model>,
}

pub async fn get_all_morpions<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<db::morpion::Model>, DbErr> {
    db::morpion::Entity::find()
        .order_by_asc(db::morpion::Column::Name)
        .order_by_asc(db::morpion::Column::Id)
        .all(db)
        .await
}

pub async fn team_name_color_exists<C: ConnectionTrait>(
    db: &C,
    name: &str,
    color: &str,
) -> Result<bool, DbErr> {
    let n = db::team::Entity::find()
        .filter(
            Condition::all()
                .add(db::team::Column::Name.eq(name))
                .add(db::team::Column::Color.eq(color)),
        )
        .count(db)
        .await?;
    Ok(n > 0)
}

pub async fn team_color_exists<C: ConnectionTrait>(db: &C, color: &str) -> Result<bool, DbErr> {
    let n = db::team::Entity::find()
        .filter(db::team::Column::Color.eq(color))
        .count(db)
        .await?;
    Ok(n > 0)
}

/// Inserts the team row only. Uniqueness must be checked by the caller;
/// a violated constraint shows up as `None`.
pub async fn create_team<C: ConnectionTrait>(db: &C, name: &str, color: &str) -> Option<i64> {
    let team = db::team::ActiveModel {
        name: Set(name.to_owned()),
        color: Set(color.to_owned()),
        created_at: Set(TimeDateTimeWithTimeZone::now_utc()),
        ..Default::default()
    };
    let result = db::team::Entity::insert(team).exec(db).await;
    let team_id = query::logged(
        &format!("Failed to create team name={name} color={color}"),
        result.map(|r| r.last_insert_id),
    )?;
    log::info!("Created team {team_id}: name={name} color={color}");
    Some(team_id)
}

/// Returns how many pairs were actually inserted: pairs that already exist
/// are skipped without error.
pub async fn add_morpions_to_team<C: ConnectionTrait>(
    db: &C,
    team_id: i64,
    morpion_ids: &[i64],
) -> Option<u64> {
    if morpion_ids.is_empty() {
        return Some(0);
    }
    let pairs = morpion_ids
        .iter()
        .map(|&morpion_id| db::team_morpion::ActiveModel {
            team_id: Set(team_id),
            morpion_id: Set(morpion_id),
        });
    let insert = db::team_morpion::Entity::insert_many(pairs)
        .on_conflict(
            OnConflict::columns([
                db::team_morpion::Column::TeamId,
                db::team_morpion::Column::MorpionId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .into_query();
    let added = query::execute(db, &insert).await?;
    log::info!("Added {added} morpions to team {team_id}");
    Some(added)
}

/// Newest teams first, then by name.
pub async fn get_all_teams_with_morpions<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<TeamWithMorpions>, DbErr> {
    let teams = db::team::Entity::find()
        .order_by_desc(db::team::Column::CreatedAt)
        .order_by_asc(db::team::Column::Name)
        .all(db)
        .await?;
    if teams.is_empty() {
        return Ok(vec![]);
    }
    let links = db::team_morpion::Entity::find()
        .filter(db::team_morpion::Column::TeamId.is_in(teams.iter().map(|t| t.id)))
        .all(db)
        .await?;
    let mut teams_of_morpion = HashMap::<i64, Vec<i64>>::new();
    for l in links.iter() {
        teams_of_morpion
            .entry(l.morpion_id)
            .or_default()
            .push(l.team_id);
    }
    let morpions = db::morpion::Entity::find()
        .filter(db::morpion::Column::Id.is_in(teams_of_morpion.keys().copied()))
        .order_by_asc(db::morpion::Column::Name)
        .order_by_asc(db::morpion::Column::Id)
        .all(db)
        .await?;
    let mut morpions_of_team = HashMap::<i64, Vec<db::morpion::Model>>::new();
    for m in morpions {
        let Some(team_ids) = teams_of_morpion.get(&m.id) else {
            continue;
        };
        for team_id in team_ids {
            morpions_of_team.entry(*team_id).or_default().push(m.clone());
        }
    }
    Ok(teams
        .into_iter()
        .map(|team| {
            let morpions = morpions_of_team.remove(&team.id).unwrap_or_default();
            TeamWithMorpions {
                team,
                morpion_count: morpions.len(),
                morpions,
            }
        })
        .collect())
}

/// Games where the team plays as team1 or team2, most recently started first.
pub async fn get_games_for_team<C: ConnectionTrait>(
    db: &C,
    team_id: i64,
) -> Result<Vec<TeamGame>, DbErr> {
    let games = db::game::Entity::find()
        .filter(participant_condition(team_id))
        .order_by_desc(db::game::Column::StartedAt)
        .order_by_desc(db::game::Column::Id)
        .all(db)
        .await?;
    if games.is_empty() {
        return Ok(vec![]);
    }
    let team_ids = games
        .iter()
        .flat_map(|g| [Some(g.team1_id), Some(g.team2_id), g.winner_team_id])
        .flatten()
        .collect::<HashSet<_>>();
    let teams = get_teams_by_ids(db, team_ids).await?;
    let configs = get_configs_by_ids(db, games.iter().map(|g| g.config_id)).await?;
    Ok(games
        .into_iter()
        .map(|game| TeamGame {
            team1: team_ref(&teams, game.team1_id),
            team2: team_ref(&teams, game.team2_id),
            winner: game.winner_team_id.map(|id| team_ref(&teams, id)),
            config: configs.get(&game.config_id).cloned(),
            game,
        })
        .collect())
}

/// With `cascade_games`, games the team plays in are deleted first (their
/// log entries go with them). The two deletions are separate statements.
/// Returns whether the team row was removed.
pub async fn delete_team<C: ConnectionTrait>(
    db: &C,
    team_id: i64,
    cascade_games: bool,
) -> Result<bool, DbErr> {
    if cascade_games {
        let res = db::game::Entity::delete_many()
            .filter(participant_condition(team_id))
            .exec(db)
            .await
            .inspect_err(|e| log::error!("Failed to delete games of team {team_id}: {e}"))?;
        log::info!("Deleted {} games of team {team_id}", res.rows_affected);
    }
    let res = db::team::Entity::delete_by_id(team_id)
        .exec(db)
        .await
        .inspect_err(|e| log::error!("Failed to delete team {team_id}: {e}"))?;
    log::info!("Deleted team {team_id}: rows_affected={}", res.rows_affected);
    Ok(res.rows_affected > 0)
}

pub async fn get_teams_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, TeamRef>, DbErr> {
    Ok(db::team::Entity::find()
        .filter(db::team::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, TeamRef::from(t)))
        .collect())
}

pub async fn get_configs_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, db::config::Model>, DbErr> {
    Ok(db::config::Entity::find()
        .filter(db::config::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect())
}

pub fn team_ref(teams: &HashMap<i64, TeamRef>, id: i64) -> TeamRef {
    teams.get(&id).cloned().unwrap_or_else(|| TeamRef {
        id,
        ..Default::default()
    })
}

fn participant_condition(team_id: i64) -> Condition {
    Condition::any()
        .add(db::game::Column::Team1Id.eq(team_id))
        .add(db::game::Column::Team2Id.eq(team_id))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{self, GameFixture};
    use time::macros::datetime;

    #[tokio::test]
    async fn test_morpions_ordered_by_name() {
        let db = testing::test_db().await;
        let ids = testing::insert_morpions(&db, 3).await;
        let morpions = get_all_morpions(&db).await.expect("Failed to get morpions");
        assert_eq!(
            morpions.iter().map(|m| m.id).collect::<Vec<_>>(),
            ids.into_iter().rev().collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_existence_checks() {
        let db = testing::test_db().await;
        testing::insert_team(&db, "Reds", "#ff0000", datetime!(2024-01-01 10:00 UTC)).await;
        assert!(team_name_color_exists(&db, "Reds", "#ff0000").await.unwrap());
        assert!(!team_name_color_exists(&db, "Reds", "#00ff00").await.unwrap());
        assert!(!team_name_color_exists(&db, "Blues", "#ff0000").await.unwrap());
        assert!(team_color_exists(&db, "#ff0000").await.unwrap());
        assert!(!team_color_exists(&db, "#0000ff").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_team_rejects_duplicate_color() {
        let db = testing::test_db().await;
        let id = create_team(&db, "Reds", "red").await.expect("Failed to create team");
        assert!(id > 0);
        assert_eq!(create_team(&db, "Other reds", "red").await, None);
        assert_eq!(create_team(&db, "Reds", "red").await, None);
        assert!(create_team(&db, "Reds", "crimson").await.is_some());
    }

    #[tokio::test]
    async fn test_add_morpions_is_idempotent_per_pair() {
        let db = testing::test_db().await;
        let m = testing::insert_morpions(&db, 8).await;
        let team_id = create_team(&db, "Reds", "red").await.unwrap();
        assert_eq!(add_morpions_to_team(&db, team_id, &[]).await, Some(0));
        assert_eq!(add_morpions_to_team(&db, team_id, &m[0..6]).await, Some(6));
        assert_eq!(add_morpions_to_team(&db, team_id, &m[4..8]).await, Some(2));
        assert_eq!(add_morpions_to_team(&db, team_id, &m[0..8]).await, Some(0));
        let teams = get_all_teams_with_morpions(&db).await.unwrap();
        assert_eq!(teams[0].morpion_count, 8);
        // Unknown morpion violates the foreign key.
        assert_eq!(add_morpions_to_team(&db, team_id, &[9999]).await, None);
    }

    #[tokio::test]
    async fn test_teams_with_morpions() {
        let db = testing::test_db().await;
        let m = testing::insert_morpions(&db, 4).await;
        let old = testing::insert_team(&db, "Zeta", "z", datetime!(2024-01-01 10:00 UTC)).await;
        let new_b = testing::insert_team(&db, "Beta", "b", datetime!(2024-02-01 10:00 UTC)).await;
        let new_a = testing::insert_team(&db, "Alpha", "a", datetime!(2024-02-01 10:00 UTC)).await;
        add_morpions_to_team(&db, old, &[m[0], m[1], m[2]]).await.unwrap();
        add_morpions_to_team(&db, new_b, &[m[3], m[0]]).await.unwrap();
        let teams = get_all_teams_with_morpions(&db).await.unwrap();
        assert_eq!(
            teams.iter().map(|t| t.team.id).collect::<Vec<_>>(),
            vec![new_a, new_b, old]
        );
        assert_eq!(teams[0].morpion_count, 0);
        assert!(teams[0].morpions.is_empty());
        // Morpion names sort in reverse insertion order.
        assert_eq!(
            teams[1].morpions.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![m[3], m[0]]
        );
        assert_eq!(
            teams[2].morpions.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![m[2], m[1], m[0]]
        );
        assert_eq!(teams[2].morpion_count, 3);
    }

    #[tokio::test]
    async fn test_games_for_team() {
        let db = testing::test_db().await;
        let t = datetime!(2024-03-01 10:00 UTC);
        let reds = testing::insert_team(&db, "Reds", "red", t).await;
        let blues = testing::insert_team(&db, "Blues", "blue", t).await;
        let greens = testing::insert_team(&db, "Greens", "green", t).await;
        let config = testing::insert_config(&db, 3, 9).await;
        let g1 = testing::insert_game(
            &db,
            GameFixture {
                team1_id: reds,
                team2_id: blues,
                winner_team_id: Some(blues),
                started_at: datetime!(2024-03-02 10:00 UTC),
                ended_at: Some(datetime!(2024-03-02 10:10 UTC)),
                config_id: config,
            },
        )
        .await;
        let g2 = testing::insert_game(
            &db,
            GameFixture {
                team1_id: greens,
                team2_id: reds,
                winner_team_id: None,
                started_at: datetime!(2024-03-03 10:00 UTC),
                ended_at: None,
                config_id: config,
            },
        )
        .await;
        testing::insert_game(
            &db,
            GameFixture {
                team1_id: greens,
                team2_id: blues,
                winner_team_id: None,
                started_at: datetime!(2024-03-04 10:00 UTC),
                ended_at: None,
                config_id: config,
            },
        )
        .await;
        let games = get_games_for_team(&db, reds).await.unwrap();
        assert_eq!(
            games.iter().map(|g| g.game.id).collect::<Vec<_>>(),
            vec![g2, g1]
        );
        assert_eq!(games[0].team1.name, "Greens");
        assert_eq!(games[0].team2.color, "red");
        assert_eq!(games[0].winner, None);
        assert_eq!(games[1].winner.as_ref().map(|w| w.name.as_str()), Some("Blues"));
        let cfg = games[1].config.as_ref().expect("config must be attached");
        assert_eq!((cfg.grid_size, cfg.max_turns), (3, 9));
        let none = testing::insert_team(&db, "Idle", "grey", t).await;
        assert!(get_games_for_team(&db, none).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_team() {
        let db = testing::test_db().await;
        let m = testing::insert_morpions(&db, 6).await;
        let t = datetime!(2024-03-01 10:00 UTC);
        let reds = testing::insert_team(&db, "Reds", "red", t).await;
        let blues = testing::insert_team(&db, "Blues", "blue", t).await;
        add_morpions_to_team(&db, reds, &m).await.unwrap();
        add_morpions_to_team(&db, blues, &m).await.unwrap();
        let config = testing::insert_config(&db, 3, 9).await;
        let game = testing::insert_game(
            &db,
            GameFixture {
                team1_id: blues,
                team2_id: reds,
                winner_team_id: Some(reds),
                started_at: t,
                ended_at: Some(datetime!(2024-03-01 10:03 UTC)),
                config_id: config,
            },
        )
        .await;
        testing::insert_log(&db, game, 1, t).await;
        testing::insert_log(&db, game, 2, t).await;

        // Games still reference the team.
        assert!(delete_team(&db, reds, false).await.is_err());
        assert_eq!(query::count_rows(&db, "team").await, 2);
        assert_eq!(query::count_rows(&db, "game").await, 1);

        assert!(delete_team(&db, reds, true).await.unwrap());
        assert_eq!(query::count_rows(&db, "team").await, 1);
        assert_eq!(query::count_rows(&db, "game").await, 0);
        assert_eq!(query::count_rows(&db, "logs_entry").await, 0);
        assert_eq!(query::count_rows(&db, "team_morpion").await, 6);

        assert!(delete_team(&db, blues, false).await.unwrap());
        assert_eq!(query::count_rows(&db, "team_morpion").await, 0);
        assert!(!delete_team(&db, blues, false).await.unwrap());
    }
}
