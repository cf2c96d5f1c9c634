use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "morpion")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_morpion")]
    pub id: i64,
    #[sea_orm(indexed)]
    pub name: String,
    pub image_url: String,
    pub hp: i32,
    pub attack: i32,
    pub mana: i32,
    pub accuracy: i32,
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

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_morpion::Relation::Team.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_morpion::Relation::Morpion.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
