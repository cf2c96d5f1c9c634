use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_game")]
    pub id: i64,
    #[sea_orm(indexed)]
    pub team1_id: i64,
    #[sea_orm(indexed)]
    pub team2_id: i64,
    #[sea_orm(indexed)]
    pub winner_team_id: Option<i64>,
    #[sea_orm(indexed)]
    pub started_at: TimeDateTimeWithTimeZone,
    // None while the game is in progress.
    #[sea_orm(indexed)]
    pub ended_at: Option<TimeDateTimeWithTimeZone>,
    pub config_id: i64,
}

// Three relations point at `team`, so there is no `Related<team::Entity>`;
// join through the specific relation instead.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::Team1Id",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Team1,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::Team2Id",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Team2,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::WinnerTeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Winner,
    #[sea_orm(
        belongs_to = "super::config::Entity",
        from = "Column::ConfigId",
        to = "super::config::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Config,
    #[sea_orm(has_many = "super::logs_entry::Entity")]
    LogsEntry,
}

impl Related<super::config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Config.def()
    }
}

impl Related<super::logs_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LogsEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
