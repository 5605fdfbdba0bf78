use sea_orm::entity::prelude::*;

/// Flat tag attached to content items. Names are not unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::content_item_categories::Entity")]
    ContentItemCategories,
}

impl Related<super::content_item_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentItemCategories.def()
    }
}

impl Related<super::content_items::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_item_categories::Relation::ContentItem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::content_item_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
