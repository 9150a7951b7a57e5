//! Product management route handlers.
//!
//! Each page view reloads the list from the table. Saves and deletes go to
//! the table first and then reload; the page only ever shows what the table
//! returned.

use askama::Template;
use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use kirana_core::{CurrencyCode, Notification, Price, RecordId};
use tower_sessions::Session;
use tracing::instrument;

use crate::cache::ReloadStatus;
use crate::error::Result;
use crate::models::session::{set_flash, take_flash};
use crate::models::{AdminProduct, FormError, PendingDelete, ProductForm};
use crate::state::AppState;

// =============================================================================
// Notifications
// =============================================================================

fn fetch_failed() -> Notification {
    Notification::error(
        "Error fetching products",
        "Could not load products from database.",
    )
}

fn save_failed() -> Notification {
    Notification::error("Error", "Could not save product. Please try again.")
}

fn delete_failed() -> Notification {
    Notification::error("Error", "Could not delete product. Please try again.")
}

fn not_found() -> Notification {
    Notification::error("Product not found", "It may have been deleted already.")
}

fn invalid_form(err: FormError) -> Notification {
    let description = match err {
        FormError::MissingName => "Please enter a product name.",
        FormError::MissingCategory => "Please enter a category.",
    };
    Notification::error("Missing details", description)
}

/// Success message, replaced by the fetch error when the list is stale.
fn after_mutation(done: Notification, reload: ReloadStatus) -> Notification {
    match reload {
        ReloadStatus::Reloaded => done,
        ReloadStatus::Stale => fetch_failed(),
    }
}

// =============================================================================
// Views
// =============================================================================

/// Product row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRowView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: i32,
    pub in_stock: bool,
    pub description: String,
}

impl From<&AdminProduct> for ProductRowView {
    fn from(product: &AdminProduct) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: Price::new(product.price, CurrencyCode::INR).display(),
            stock: product.stock_quantity,
            in_stock: product.in_stock(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| "No description".to_string()),
        }
    }
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductRowView>,
    pub flash: Option<Notification>,
}

/// Add/edit form template.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    /// `None` when adding a product.
    pub editing: Option<String>,
    pub form: ProductForm,
    pub flash: Option<Notification>,
}

impl ProductFormTemplate {
    fn action(&self) -> String {
        self.editing
            .as_ref()
            .map_or_else(|| "/products".to_string(), |id| format!("/products/{id}"))
    }
}

/// Delete confirmation template.
#[derive(Template)]
#[template(path = "products/delete.html")]
pub struct DeleteConfirmTemplate {
    pub id: String,
    pub prompt: String,
    pub flash: Option<Notification>,
}

fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

fn render_form(
    status: StatusCode,
    editing: Option<RecordId>,
    form: ProductForm,
    flash: Notification,
) -> Response {
    let template = ProductFormTemplate {
        editing: editing.map(|id| id.to_string()),
        form,
        flash: Some(flash),
    };
    (status, render(&template)).into_response()
}

/// Look a product up, reloading once if it is not in the current copy.
async fn lookup(state: &AppState, id: RecordId) -> Option<AdminProduct> {
    let catalog = state.catalog();
    if let Some(product) = catalog.find(id).await {
        return Some(product);
    }
    if let Err(e) = catalog.load().await {
        tracing::error!("Failed to fetch products: {e}");
    }
    catalog.find(id).await
}

// =============================================================================
// Handlers
// =============================================================================

/// Products list page handler.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Html<String> {
    let mut flash = take_flash(&session).await;

    let products = match state.catalog().load().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            flash = Some(fetch_failed());
            state.catalog().products().await
        }
    };

    render(&ProductsIndexTemplate {
        products: products.iter().map(ProductRowView::from).collect(),
        flash,
    })
}

/// Empty add form.
#[instrument(skip(session))]
pub async fn new_form(session: Session) -> Html<String> {
    render(&ProductFormTemplate {
        editing: None,
        form: ProductForm {
            price: "0".to_string(),
            stock_quantity: "0".to_string(),
            ..ProductForm::default()
        },
        flash: take_flash(&session).await,
    })
}

/// Create a product.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Response {
    let fields = match form.clone().into_fields() {
        Ok(fields) => fields,
        Err(e) => return render_form(StatusCode::UNPROCESSABLE_ENTITY, None, form, invalid_form(e)),
    };

    match state.catalog().create(&fields).await {
        Ok(created) => {
            tracing::info!(product_id = %created.value.id, name = %created.value.name, "Product created");
            let done = Notification::success(
                "Product created",
                "New product has been added successfully.",
            );
            set_flash(&session, &after_mutation(done, created.reload)).await;
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            render_form(StatusCode::OK, None, form, save_failed())
        }
    }
}

/// Edit form, pre-filled from the stored product.
#[instrument(skip(state, session))]
pub async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<RecordId>,
) -> Response {
    let Some(product) = lookup(&state, id).await else {
        set_flash(&session, &not_found()).await;
        return Redirect::to("/products").into_response();
    };

    render(&ProductFormTemplate {
        editing: Some(product.id.to_string()),
        form: ProductForm::from(&product),
        flash: take_flash(&session).await,
    })
    .into_response()
}

/// Save edits to a product.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<RecordId>,
    Form(form): Form<ProductForm>,
) -> Response {
    let fields = match form.clone().into_fields() {
        Ok(fields) => fields,
        Err(e) => {
            return render_form(StatusCode::UNPROCESSABLE_ENTITY, Some(id), form, invalid_form(e));
        }
    };

    match state.catalog().update(id, &fields).await {
        Ok(updated) => {
            tracing::info!(product_id = %id, "Product updated");
            let done = Notification::success(
                "Product updated",
                "Product has been updated successfully.",
            );
            set_flash(&session, &after_mutation(done, updated.reload)).await;
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update product: {e}");
            render_form(StatusCode::OK, Some(id), form, save_failed())
        }
    }
}

/// Ask for confirmation before deleting.
#[instrument(skip(state, session))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<RecordId>,
) -> Result<Response> {
    let Some(product) = lookup(&state, id).await else {
        set_flash(&session, &not_found()).await;
        return Ok(Redirect::to("/products").into_response());
    };

    let pending = PendingDelete::for_product(&product);
    pending.store(&session).await?;

    Ok(render(&DeleteConfirmTemplate {
        id: pending.id.to_string(),
        prompt: pending.prompt(),
        flash: take_flash(&session).await,
    })
    .into_response())
}

/// Delete a product whose deletion was confirmed.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<RecordId>,
) -> Result<Redirect> {
    let Some(pending) = PendingDelete::confirm(&session, id).await? else {
        set_flash(
            &session,
            &Notification::error("Delete not confirmed", "Please confirm the deletion again."),
        )
        .await;
        return Ok(Redirect::to("/products"));
    };

    match state.catalog().delete(pending.id).await {
        Ok(deleted) => {
            tracing::info!(product_id = %pending.id, name = %pending.name, "Product deleted");
            let done = Notification::success(
                "Product deleted",
                "Product has been removed successfully.",
            );
            set_flash(&session, &after_mutation(done, deleted.reload)).await;
        }
        Err(e) => {
            tracing::error!("Failed to delete product: {e}");
            set_flash(&session, &delete_failed()).await;
        }
    }

    Ok(Redirect::to("/products"))
}

/// Drop the pending delete.
#[instrument(skip(session))]
pub async fn cancel_delete(session: Session, Path(_id): Path<RecordId>) -> Result<Redirect> {
    PendingDelete::cancel(&session).await?;
    Ok(Redirect::to("/products"))
}
