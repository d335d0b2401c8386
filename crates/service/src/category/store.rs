//! Category Store: the only code touching `service_category` rows.
//!
//! Every function is generic over `ConnectionTrait`, so the coordinator can
//! run them on a pooled connection or inside an open transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{Set, Unchanged}, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use models::service_category::{self, Entity as CategoryEntity};

use super::domain::{Category, CategoryId};
use super::errors::CategoryError;

/// Which parent a listed category must have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParentFilter {
    #[default]
    Any,
    /// Categories without parent.
    Root,
    Under(CategoryId),
    AnyOf(Vec<CategoryId>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub parent: ParentFilter,
    pub name: Option<String>,
    pub exclude_id: Option<CategoryId>,
}

impl CategoryFilter {
    pub fn all() -> Self { Self::default() }

    pub fn roots() -> Self { Self { parent: ParentFilter::Root, ..Self::default() } }

    pub fn children_of(id: CategoryId) -> Self { Self { parent: ParentFilter::Under(id), ..Self::default() } }

    pub fn children_of_any(ids: Vec<CategoryId>) -> Self { Self { parent: ParentFilter::AnyOf(ids), ..Self::default() } }

    /// Siblings under `parent` (root level when `None`) carrying `name`.
    pub fn siblings_named(parent: Option<CategoryId>, name: &str, exclude_id: Option<CategoryId>) -> Self {
        let parent = match parent {
            Some(id) => ParentFilter::Under(id),
            None => ParentFilter::Root,
        };
        Self { parent, name: Some(name.to_string()), exclude_id }
    }

    fn matches_nothing(&self) -> bool {
        matches!(&self.parent, ParentFilter::AnyOf(ids) if ids.is_empty())
    }

    fn apply(&self, mut finder: Select<CategoryEntity>) -> Select<CategoryEntity> {
        finder = match &self.parent {
            ParentFilter::Any => finder,
            ParentFilter::Root => finder.filter(service_category::Column::ParentId.is_null()),
            ParentFilter::Under(id) => finder.filter(service_category::Column::ParentId.eq(*id)),
            ParentFilter::AnyOf(ids) => finder.filter(service_category::Column::ParentId.is_in(ids.iter().copied())),
        };
        if let Some(name) = &self.name {
            finder = finder.filter(service_category::Column::Name.eq(name.clone()));
        }
        if let Some(id) = self.exclude_id {
            finder = finder.filter(service_category::Column::Id.ne(id));
        }
        finder
    }
}

/// Get a category by id.
pub async fn get<C: ConnectionTrait>(db: &C, id: CategoryId) -> Result<Option<Category>, CategoryError> {
    let found = CategoryEntity::find_by_id(id).one(db).await?;
    Ok(found.map(Category::from))
}

/// Get a category by id, failing with `NotFound`.
pub async fn require<C: ConnectionTrait>(db: &C, id: CategoryId) -> Result<Category, CategoryError> {
    get(db, id).await?.ok_or_else(|| CategoryError::category_not_found(id))
}

/// Get a category by id and hold a row lock (`FOR UPDATE`) until the
/// surrounding transaction ends. SQLite has no row locks; its writers are
/// already serialized.
pub async fn get_locked<C: ConnectionTrait>(db: &C, id: CategoryId) -> Result<Option<Category>, CategoryError> {
    let found = CategoryEntity::find_by_id(id).lock_exclusive().one(db).await?;
    Ok(found.map(Category::from))
}

/// `get_locked`, failing with `NotFound`.
pub async fn require_locked<C: ConnectionTrait>(db: &C, id: CategoryId) -> Result<Category, CategoryError> {
    get_locked(db, id).await?.ok_or_else(|| CategoryError::category_not_found(id))
}

/// List categories matching `filter`, ordered by id.
pub async fn list<C: ConnectionTrait>(db: &C, filter: &CategoryFilter) -> Result<Vec<Category>, CategoryError> {
    if filter.matches_nothing() { return Ok(Vec::new()); }
    let rows = filter
        .apply(CategoryEntity::find())
        .order_by_asc(service_category::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Category::from).collect())
}

/// Count categories matching `filter`.
pub async fn count<C: ConnectionTrait>(db: &C, filter: &CategoryFilter) -> Result<u64, CategoryError> {
    if filter.matches_nothing() { return Ok(0); }
    Ok(filter.apply(CategoryEntity::find()).count(db).await?)
}

/// Insert a new row; name and parent must already be validated.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    name: &str,
    image: Option<String>,
    parent_id: Option<CategoryId>,
) -> Result<Category, CategoryError> {
    let created = service_category::insert(db, name, image, parent_id).await?;
    Ok(created.into())
}

/// Write every mutable field of an existing category back; refreshes `updated_at`.
pub async fn save<C: ConnectionTrait>(db: &C, category: Category) -> Result<Category, CategoryError> {
    let id = category.id;
    let am = service_category::ActiveModel {
        id: Unchanged(id),
        name: Set(category.name),
        image: Set(category.image),
        parent_id: Set(category.parent_id),
        created_at: Unchanged(category.created_at),
        updated_at: Set(Utc::now().into()),
    };
    match am.update(db).await {
        Ok(updated) => Ok(updated.into()),
        Err(sea_orm::DbErr::RecordNotUpdated) => Err(CategoryError::category_not_found(id)),
        Err(e) => Err(e.into()),
    }
}

/// Physically delete a row. Referencing children or leaf records make the
/// database reject it, which surfaces as `ConstraintViolation`.
pub async fn delete<C: ConnectionTrait>(db: &C, id: CategoryId) -> Result<(), CategoryError> {
    let res = CategoryEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(CategoryError::category_not_found(id));
    }
    Ok(())
}
