use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentItemCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentItemCategories::ContentItemId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentItemCategories::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ContentItemCategories::ContentItemId)
                            .col(ContentItemCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ContentItemCategories::Table,
                                ContentItemCategories::ContentItemId,
                            )
                            .to(ContentItems::Table, ContentItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ContentItemCategories::Table,
                                ContentItemCategories::CategoryId,
                            )
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentItemCategories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentItemCategories {
    Table,
    ContentItemId,
    CategoryId,
}

#[derive(Iden)]
enum ContentItems {
    Table,
    Id,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
}
