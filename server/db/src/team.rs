use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_team")]
    pub id: i64,
    #[sea_orm(indexed)]
    pub name: String,
    // Unique on its own; (name, color) also gets a unique index in the migration.
    #[sea_orm(unique, indexed)]
    pub color: String,
    #[sea_orm(indexed)]
    pub created_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_morpion::Entity")]
    TeamMorpion,
}

impl Related<super::team_morpion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMorpion.def()
    }
}

impl Related<super::morpion::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_morpion::Relation::Morpion.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_morpion::Relation::Team.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
