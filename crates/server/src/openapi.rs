use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CategoryDoc {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub parent_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LeafRecordDoc {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// A category flattened together with its services and loaded children.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CategoryNodeDoc {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub parent_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
    pub services: Vec<LeafRecordDoc>,
    pub children: Vec<CategoryNodeDoc>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewCategoryDoc {
    pub name: String,
    pub parent_id: Option<i32>,
    pub image: Option<String>,
}

/// Omit a field to keep it; send `null` for `image`/`parentId` to clear it.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CategoryChangesDoc {
    pub name: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct MoveCategoryDoc { pub parent_id: Option<i32> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CategoryStatisticsDoc {
    pub total_count: u64,
    pub root_count: u64,
    pub max_depth: u64,
    pub count_with_children: u64,
}

#[derive(ToSchema)]
pub struct StoredFileDoc { pub path: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub code: u16, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::categories::create,
        crate::routes::categories::list,
        crate::routes::categories::roots,
        crate::routes::categories::tree,
        crate::routes::categories::statistics,
        crate::routes::categories::get,
        crate::routes::categories::with_children,
        crate::routes::categories::services,
        crate::routes::categories::update,
        crate::routes::categories::move_category,
        crate::routes::categories::move_by_query,
        crate::routes::categories::delete,
        crate::routes::uploads::upload_image,
    ),
    components(
        schemas(
            HealthResponse,
            CategoryDoc,
            LeafRecordDoc,
            CategoryNodeDoc,
            NewCategoryDoc,
            CategoryChangesDoc,
            MoveCategoryDoc,
            CategoryStatisticsDoc,
            StoredFileDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories"),
        (name = "uploads")
    )
)]
pub struct ApiDoc;
