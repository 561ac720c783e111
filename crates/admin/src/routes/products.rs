//! Product editor route handlers.
//!
//! A rejected submission (bad price or position, or a failed store write)
//! re-renders the form with everything the user typed and a blocking notice
//! at the top.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use patty_wagon_core::{Product, ProductId, StoreError};
use serde::Deserialize;
use tracing::instrument;

use super::{Notice, render};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{FieldErrors, ProductForm};
use crate::state::AppState;

const INVALID_FORM_MESSAGE: &str = "Please fix the highlighted fields and submit again.";
const SAVE_FAILED_MESSAGE: &str =
    "The product could not be saved. Nothing was changed; please try again.";
const DELETE_FAILED_MESSAGE: &str =
    "The product could not be deleted. Nothing was changed; please try again.";

/// Whether the form creates a product or edits an existing one.
#[derive(Debug, Clone)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// Product form template (new and edit).
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub current_path: String,
    pub heading: String,
    pub action: String,
    pub submit_label: String,
    pub form: ProductForm,
    pub errors: FieldErrors,
    /// Blocking notice shown above the form.
    pub error: Option<String>,
    /// Known category names, offered as suggestions.
    pub categories: Vec<String>,
}

impl ProductFormTemplate {
    fn new(
        mode: &FormMode,
        form: ProductForm,
        errors: FieldErrors,
        error: Option<String>,
        categories: Vec<String>,
    ) -> Self {
        let (heading, action, submit_label) = match mode {
            FormMode::Create => (
                "New product".to_string(),
                "/products".to_string(),
                "Add product".to_string(),
            ),
            FormMode::Edit(id) => (
                "Edit product".to_string(),
                format!("/products/{}", urlencoding::encode(id.as_str())),
                "Save changes".to_string(),
            ),
        };
        Self {
            current_path: "/products".to_string(),
            heading,
            action,
            submit_label,
            form,
            errors,
            error,
            categories,
        }
    }
}

/// Delete confirmation template.
#[derive(Template)]
#[template(path = "products/confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub current_path: String,
    pub name: String,
    pub action: String,
    /// Blocking notice shown above the confirmation.
    pub error: Option<String>,
}

impl ConfirmDeleteTemplate {
    fn new(id: &ProductId, name: String, error: Option<String>) -> Self {
        Self {
            current_path: "/products".to_string(),
            name,
            action: format!("/products/{}/delete", urlencoding::encode(id.as_str())),
            error,
        }
    }
}

/// Delete form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

/// Category names in display order.
async fn category_names(state: &AppState) -> Result<Vec<String>> {
    let mut categories = state.store().list_categories().await?;
    categories.sort_by_key(|category| category.position);
    Ok(categories.into_iter().map(|category| category.name).collect())
}

async fn find_product(state: &AppState, id: &ProductId) -> Result<Product> {
    state
        .store()
        .list_products()
        .await?
        .into_iter()
        .find(|product| product.id == *id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Re-render a rejected form, keeping the submitted values.
async fn rejected(
    state: &AppState,
    mode: &FormMode,
    form: ProductForm,
    errors: FieldErrors,
    message: &str,
    status: StatusCode,
) -> Result<Response> {
    // Keep the submitted values even if the suggestions fail to load
    let categories = category_names(state).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load category suggestions");
        Vec::new()
    });
    let template =
        ProductFormTemplate::new(mode, form, errors, Some(message.to_string()), categories);
    Ok((status, render(&template)?).into_response())
}

/// New product form handler.
#[instrument(skip(state))]
pub async fn new_product(State(state): State<AppState>) -> Result<Html<String>> {
    let categories = category_names(&state).await?;
    render(&ProductFormTemplate::new(
        &FormMode::Create,
        ProductForm {
            position: "0".to_string(),
            ..ProductForm::default()
        },
        FieldErrors::default(),
        None,
        categories,
    ))
}

/// Create product handler.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let mode = FormMode::Create;
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return rejected(&state, &mode, form, errors, INVALID_FORM_MESSAGE, status).await;
        }
    };

    match state.store().create_product(&input).await {
        Ok(_) => Ok(notice_redirect(Notice::Created)),
        Err(e) => {
            tracing::error!(error = %e, name = %input.name, "Failed to create product");
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            let errors = FieldErrors::default();
            rejected(&state, &mode, form, errors, SAVE_FAILED_MESSAGE, status).await
        }
    }
}

/// Edit product form handler.
#[instrument(skip(state))]
pub async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let id = ProductId::new(id);
    let product = find_product(&state, &id).await?;
    let categories = category_names(&state).await?;

    render(&ProductFormTemplate::new(
        &FormMode::Edit(id),
        ProductForm::from_product(&product),
        FieldErrors::default(),
        None,
        categories,
    ))
}

/// Update product handler.
///
/// Every writeable field is overwritten with the submitted values.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let mode = FormMode::Edit(id.clone());
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return rejected(&state, &mode, form, errors, INVALID_FORM_MESSAGE, status).await;
        }
    };

    match state.store().update_product(&id, &input).await {
        Ok(_) => Ok(notice_redirect(Notice::Updated)),
        Err(e @ StoreError::NotFound(_)) => Err(e.into()),
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "Failed to update product");
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            let errors = FieldErrors::default();
            rejected(&state, &mode, form, errors, SAVE_FAILED_MESSAGE, status).await
        }
    }
}

/// Delete product handler.
///
/// Without `confirm=true` this only renders a confirmation page. A failed
/// delete renders the confirmation again with an error notice.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<Response> {
    let id = ProductId::new(id);

    if form.confirm.as_deref() != Some("true") {
        let product = find_product(&state, &id).await?;
        let template = ConfirmDeleteTemplate::new(&id, product.name, None);
        return Ok(render(&template)?.into_response());
    }

    match state.store().delete_product(&id).await {
        Ok(()) => Ok(notice_redirect(Notice::Deleted)),
        Err(e @ StoreError::NotFound(_)) => Err(e.into()),
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "Failed to delete product");
            // Fall back to the id when the name cannot be read either
            let name = match find_product(&state, &id).await {
                Ok(product) => product.name,
                Err(_) => id.to_string(),
            };
            let template =
                ConfirmDeleteTemplate::new(&id, name, Some(DELETE_FAILED_MESSAGE.to_string()));
            Ok((StatusCode::INTERNAL_SERVER_ERROR, render(&template)?).into_response())
        }
    }
}

fn notice_redirect(notice: Notice) -> Response {
    Redirect::to(&format!("/?notice={}", notice.code())).into_response()
}
