use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "team_morpion")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_id: i64,
    #[sea_orm(primary_key, auto_increment = false, indexed)]
    pub morpion_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Team,
    #[sea_orm(
        belongs_to = "super::morpion::Entity",
        from = "Column::MorpionId",
        to = "super::morpion::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Morpion,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::morpion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Morpion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
