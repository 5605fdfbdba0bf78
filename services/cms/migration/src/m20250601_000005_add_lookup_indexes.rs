use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(ContentItems::Table)
                    .col(ContentItems::AuthorId)
                    .name("idx_content_items_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ContentItemCategories::Table)
                    .col(ContentItemCategories::CategoryId)
                    .name("idx_content_item_categories_category_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_content_item_categories_category_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_content_items_author_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentItems {
    Table,
    AuthorId,
}

#[derive(Iden)]
enum ContentItemCategories {
    Table,
    CategoryId,
}
