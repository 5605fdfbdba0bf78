use std::collections::HashMap;

use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::sea_query::{BinOper, Expr, Func, Query, SelectStatement, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use folio_cms_schema::{categories, content_item_categories, content_items, users};
use folio_domain::field_errors::FieldErrors;
use folio_domain::search::SearchQuery;
use folio_domain::visibility::Visibility;

use crate::domain::repository::{CategoryRepository, ContentRepository, UserRepository};
use crate::domain::types::{ContentChanges, ContentItem, NewContentItem, User};
use crate::error::CmsServiceError;
use crate::usecase::register::{EMAIL_TAKEN, USERNAME_TAKEN};

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CmsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CmsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, CmsServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("count users by email")?;
        Ok(count > 0)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, CmsServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), CmsServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            password: Set(user.password_hash.clone()),
            phone: Set(user.phone.clone()),
            address: Set(user.address.clone()),
            city: Set(user.city.clone()),
            state: Set(user.state.clone()),
            country: Set(user.country.clone()),
            pincode: Set(user.pincode.clone()),
            is_admin: Set(user.is_admin),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    Err(unique_violation(&detail).into())
                }
                _ => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }
}

/// Map a lost uniqueness race to the field it concerns.
fn unique_violation(detail: &str) -> FieldErrors {
    if detail.contains("username") {
        FieldErrors::single("username", USERNAME_TAKEN)
    } else {
        FieldErrors::single("email", EMAIL_TAKEN)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        password_hash: model.password,
        phone: model.phone,
        address: model.address,
        city: model.city,
        state: model.state,
        country: model.country,
        pincode: model.pincode,
        is_admin: model.is_admin,
        created_at: model.created_at,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn find_existing(&self, ids: &[i32]) -> Result<Vec<i32>, CmsServiceError> {
        let found: Vec<i32> = categories::Entity::find()
            .select_only()
            .column(categories::Column::Id)
            .filter(categories::Column::Id.is_in(ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find existing categories")?;
        Ok(found)
    }
}

// ── Content repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContentRepository {
    pub db: DatabaseConnection,
}

impl DbContentRepository {
    /// Join author emails and category ids onto fetched rows, preserving order.
    async fn hydrate(
        &self,
        rows: Vec<(content_items::Model, Option<users::Model>)>,
    ) -> Result<Vec<ContentItem>, CmsServiceError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<i32> = rows.iter().map(|(item, _)| item.id).collect();
        let links = content_item_categories::Entity::find()
            .filter(content_item_categories::Column::ContentItemId.is_in(ids))
            .order_by_asc(content_item_categories::Column::CategoryId)
            .all(&self.db)
            .await
            .context("load content item categories")?;

        let mut categories_by_item: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in links {
            categories_by_item
                .entry(link.content_item_id)
                .or_default()
                .push(link.category_id);
        }

        rows.into_iter()
            .map(|(item, author)| {
                let author =
                    author.ok_or_else(|| anyhow!("content item {} has no author", item.id))?;
                let category_ids = categories_by_item.remove(&item.id).unwrap_or_default();
                Ok(content_from_model(item, author.email, category_ids))
            })
            .collect()
    }
}

impl ContentRepository for DbContentRepository {
    async fn list(
        &self,
        visibility: Visibility,
        search: Option<&SearchQuery>,
    ) -> Result<Vec<ContentItem>, CmsServiceError> {
        let mut query = scoped(content_items::Entity::find(), visibility)
            .order_by_asc(content_items::Column::Id);
        if let Some(search) = search {
            query = query.filter(search_condition(search));
        }
        let rows = query
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list content items")?;
        self.hydrate(rows).await
    }

    async fn find(
        &self,
        visibility: Visibility,
        id: i32,
    ) -> Result<Option<ContentItem>, CmsServiceError> {
        let row = scoped(content_items::Entity::find_by_id(id), visibility)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find content item")?;
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, item: &NewContentItem) -> Result<i32, CmsServiceError> {
        let id = self
            .db
            .transaction::<_, i32, sea_orm::DbErr>(|txn| {
                let item = item.clone();
                Box::pin(async move {
                    let now = Utc::now();
                    let model = content_items::ActiveModel {
                        title: Set(item.title),
                        body: Set(item.body),
                        summary: Set(item.summary),
                        document: Set(item.document),
                        author_id: Set(item.author_id),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_category_links(txn, model.id, &item.category_ids).await?;
                    Ok(model.id)
                })
            })
            .await
            .context("create content item")?;
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &ContentChanges) -> Result<(), CmsServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let mut model = content_items::ActiveModel {
                        id: Set(id),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    if let Some(title) = changes.title {
                        model.title = Set(title);
                    }
                    if let Some(body) = changes.body {
                        model.body = Set(body);
                    }
                    if let Some(summary) = changes.summary {
                        model.summary = Set(summary);
                    }
                    if let Some(document) = changes.document {
                        model.document = Set(document);
                    }
                    model.update(txn).await?;

                    if let Some(category_ids) = changes.category_ids {
                        content_item_categories::Entity::delete_many()
                            .filter(content_item_categories::Column::ContentItemId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_category_links(txn, id, &category_ids).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update content item")?;
        Ok(())
    }

    async fn delete(&self, visibility: Visibility, id: i32) -> Result<bool, CmsServiceError> {
        let mut query =
            content_items::Entity::delete_many().filter(content_items::Column::Id.eq(id));
        if let Visibility::AuthoredBy(author_id) = visibility {
            query = query.filter(content_items::Column::AuthorId.eq(author_id));
        }
        let result = query
            .exec(&self.db)
            .await
            .context("delete content item")?;
        Ok(result.rows_affected > 0)
    }
}

fn scoped(query: Select<content_items::Entity>, visibility: Visibility) -> Select<content_items::Entity> {
    match visibility {
        Visibility::Everything => query,
        Visibility::AuthoredBy(author_id) => {
            query.filter(content_items::Column::AuthorId.eq(author_id))
        }
    }
}

async fn insert_category_links(
    txn: &DatabaseTransaction,
    content_item_id: i32,
    category_ids: &[i32],
) -> Result<(), sea_orm::DbErr> {
    if category_ids.is_empty() {
        return Ok(());
    }
    let links = category_ids
        .iter()
        .map(|category_id| content_item_categories::ActiveModel {
            content_item_id: Set(content_item_id),
            category_id: Set(*category_id),
        });
    content_item_categories::Entity::insert_many(links)
        .exec(txn)
        .await?;
    Ok(())
}

fn content_from_model(
    model: content_items::Model,
    author_email: String,
    category_ids: Vec<i32>,
) -> ContentItem {
    ContentItem {
        id: model.id,
        title: model.title,
        body: model.body,
        summary: model.summary,
        document: model.document,
        author_id: model.author_id,
        author_email,
        category_ids,
    }
}

// ── Search ───────────────────────────────────────────────────────────────────

/// Escape LIKE wildcards so terms match literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `UPPER(column) LIKE UPPER(pattern)`. Both sides fold in the database so
/// they agree on case mapping. Backslash is the default LIKE escape in Postgres.
fn upper_like(column: impl sea_orm::sea_query::IntoColumnRef, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::upper(Expr::col(column)))
        .binary(BinOper::Like, Func::upper(Expr::val(pattern)))
}

/// Ids of content items tagged with a category whose name matches `pattern`.
fn category_name_match(pattern: &str) -> SelectStatement {
    Query::select()
        .column((
            content_item_categories::Entity,
            content_item_categories::Column::ContentItemId,
        ))
        .from(content_item_categories::Entity)
        .inner_join(
            categories::Entity,
            Expr::col((categories::Entity, categories::Column::Id)).equals((
                content_item_categories::Entity,
                content_item_categories::Column::CategoryId,
            )),
        )
        .and_where(upper_like(
            (categories::Entity, categories::Column::Name),
            pattern,
        ))
        .to_owned()
}

/// Every term must match; a term matches when any searchable field contains it.
fn search_condition(search: &SearchQuery) -> Condition {
    search.terms().iter().fold(Condition::all(), |all, term| {
        let pattern = format!("%{}%", escape_like(term));
        all.add(
            Condition::any()
                .add(upper_like(
                    (content_items::Entity, content_items::Column::Title),
                    &pattern,
                ))
                .add(upper_like(
                    (content_items::Entity, content_items::Column::Body),
                    &pattern,
                ))
                .add(upper_like(
                    (content_items::Entity, content_items::Column::Summary),
                    &pattern,
                ))
                .add(content_items::Column::Id.in_subquery(category_name_match(&pattern))),
        )
    })
}
