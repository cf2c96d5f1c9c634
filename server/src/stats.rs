//! Aggregates shown on the landing page.

use sea_orm::prelude::TimeDateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use sea_query::Expr;
use serde::Serialize;
use time::UtcOffset;

use std::collections::{BTreeMap, HashMap};

use morpion_db as db;

use crate::query;
use crate::roster::{self, TeamRef};

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TableCount {
    pub table: String,
    pub count: i64,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct TeamWins {
    pub team_id: i64,
    pub name: String,
    pub wins: i64,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CompletedGame {
    pub game_id: i64,
    pub started_at: TimeDateTimeWithTimeZone,
    pub ended_at: TimeDateTimeWithTimeZone,
    pub duration: time::Duration,
    pub team1: TeamRef,
    pub team2: TeamRef,
    pub winner: Option<TeamRef>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MonthlyLogAverage {
    pub year: i32,
    pub month: u8,
    pub avg_logs: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LandingPageStats {
    pub counts: Vec<TableCount>,
    pub top_teams: Vec<TeamWins>,
    pub fastest_game: Option<CompletedGame>,
    pub longest_game: Option<CompletedGame>,
    pub avg_logs: Vec<MonthlyLogAverage>,
}

pub async fn counts_for_tables<C: ConnectionTrait>(
    db: &C,
    table_names: &[impl AsRef<str>],
) -> Vec<TableCount> {
    let mut counts = Vec::with_capacity(table_names.len());
    for name in table_names {
        let name = name.as_ref();
        counts.push(TableCount {
            table: name.to_owned(),
            count: query::count_rows(db, name).await,
        });
    }
    counts
}

/// Teams with at least one win, most wins first, ties by name.
pub async fn top_teams_by_wins<C: ConnectionTrait>(db: &C, limit: u64) -> Vec<TeamWins> {
    let result = db::team::Entity::find()
        .join(JoinType::InnerJoin, db::game::Relation::Winner.def().rev())
        .select_only()
        .column_as(db::team::Column::Id, "team_id")
        .column_as(db::team::Column::Name, "name")
        .column_as(
            Expr::col((db::game::Entity, db::game::Column::Id)).count(),
            "wins",
        )
        .group_by(db::team::Column::Id)
        .group_by(db::team::Column::Name)
        .order_by_desc(Expr::cust("wins"))
        .order_by_asc(db::team::Column::Name)
        .limit(limit)
        .into_model::<TeamWins>()
        .all(db)
        .await;
    query::logged("Failed to rank teams by wins", result).unwrap_or_default()
}

/// Shortest and longest completed games. Equal durations resolve to the
/// lowest game id.
pub async fn fastest_and_longest_games<C: ConnectionTrait>(
    db: &C,
) -> (Option<CompletedGame>, Option<CompletedGame>) {
    let result = db::game::Entity::find()
        .filter(db::game::Column::EndedAt.is_not_null())
        .order_by_asc(db::game::Column::Id)
        .all(db)
        .await;
    let Some(completed) = query::logged("Failed to fetch completed games", result) else {
        return (None, None);
    };
    let timed = completed
        .into_iter()
        .filter_map(|g| g.ended_at.map(|end| (end - g.started_at, g)))
        .collect::<Vec<_>>();
    let fastest = timed
        .iter()
        .min_by(|(d1, g1), (d2, g2)| d1.cmp(d2).then(g1.id.cmp(&g2.id)));
    let longest = timed
        .iter()
        .max_by(|(d1, g1), (d2, g2)| d1.cmp(d2).then(g2.id.cmp(&g1.id)));
    let team_ids = fastest
        .iter()
        .chain(longest.iter())
        .flat_map(|(_, g)| [Some(g.team1_id), Some(g.team2_id), g.winner_team_id])
        .flatten();
    let teams = query::logged(
        "Failed to fetch teams of fastest/longest games",
        roster::get_teams_by_ids(db, team_ids.collect::<Vec<_>>()).await,
    )
    .unwrap_or_default();
    (
        fastest.map(|(d, g)| completed_game(&teams, *d, g)),
        longest.map(|(d, g)| completed_game(&teams, *d, g)),
    )
}

fn completed_game(
    teams: &HashMap<i64, TeamRef>,
    duration: time::Duration,
    g: &db::game::Model,
) -> CompletedGame {
    CompletedGame {
        game_id: g.id,
        started_at: g.started_at,
        ended_at: g.ended_at.unwrap_or(g.started_at + duration),
        duration,
        team1: roster::team_ref(teams, g.team1_id),
        team2: roster::team_ref(teams, g.team2_id),
        winner: g.winner_team_id.map(|id| roster::team_ref(teams, id)),
    }
}

/// Log lines are counted per (game, calendar month), then those counts are
/// averaged per month over the games that logged in it. Months are UTC.
pub async fn average_logs_per_month<C: ConnectionTrait>(db: &C) -> Vec<MonthlyLogAverage> {
    let result: Result<Vec<(i64, TimeDateTimeWithTimeZone)>, _> = db::logs_entry::Entity::find()
        .select_only()
        .column(db::logs_entry::Column::GameId)
        .column(db::logs_entry::Column::CreatedAt)
        .into_tuple()
        .all(db)
        .await;
    let Some(stamps) = query::logged("Failed to fetch log timestamps", result) else {
        return vec![];
    };
    let mut per_game_month = HashMap::<(i32, u8, i64), u64>::new();
    for (game_id, created_at) in stamps {
        let t = created_at.to_offset(UtcOffset::UTC);
        *per_game_month
            .entry((t.year(), u8::from(t.month()), game_id))
            .or_default() += 1;
    }
    // (year, month) -> (log lines, games)
    let mut per_month = BTreeMap::<(i32, u8), (u64, u64)>::new();
    for ((year, month, _), n) in per_game_month {
        let e = per_month.entry((year, month)).or_default();
        e.0 += n;
        e.1 += 1;
    }
    per_month
        .into_iter()
        .map(|((year, month), (lines, games))| MonthlyLogAverage {
            year,
            month,
            avg_logs: lines as f64 / games as f64,
        })
        .collect()
}

pub async fn landing_page_stats<C: ConnectionTrait>(
    db: &C,
    table_names: &[impl AsRef<str>],
    top_limit: u64,
) -> LandingPageStats {
    let counts = counts_for_tables(db, table_names).await;
    let top_teams = top_teams_by_wins(db, top_limit).await;
    let (fastest_game, longest_game) = fastest_and_longest_games(db).await;
    let avg_logs = average_logs_per_month(db).await;
    LandingPageStats {
        counts,
        top_teams,
        fastest_game,
        longest_game,
        avg_logs,
    }
}
