use storage::{
    UnitOfWork, dto::category::CreateCategoryRequest, error::Result, models::Category,
};
use uuid::Uuid;

/// List all categories
pub async fn list_categories(uow: &mut UnitOfWork) -> Result<Vec<Category>> {
    uow.categories().list().await
}

/// Get category by external id
pub async fn get_category(uow: &mut UnitOfWork, id: Uuid) -> Result<Category> {
    uow.categories().find_by_id(id).await
}

/// Create a new category
pub async fn create_category(
    uow: &mut UnitOfWork,
    request: &CreateCategoryRequest,
) -> Result<Category> {
    let category = uow.categories().create(request).await?;
    tracing::info!(id = %category.id, nome = %category.nome, "Category created");
    Ok(category)
}
