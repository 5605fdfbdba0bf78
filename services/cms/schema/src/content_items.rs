use sea_orm::entity::prelude::*;

/// Short text document with an uploaded attachment.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub body: String,
    pub summary: String,
    /// Path relative to the media root, e.g. `documents/<uuid>-report.pdf`.
    pub document: String,
    pub author_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id"
    )]
    Author,
    #[sea_orm(has_many = "super::content_item_categories::Entity")]
    ContentItemCategories,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::content_item_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentItemCategories.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_item_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::content_item_categories::Relation::ContentItem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
