use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(folio_cms_migration::Migrator).await;
}
