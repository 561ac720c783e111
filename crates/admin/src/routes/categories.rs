//! Category route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use patty_wagon_core::Catalog;
use tracing::instrument;

use super::dashboard::CategoryRowView;
use super::{Notice, NoticeQuery, render};
use crate::error::Result;
use crate::filters;
use crate::models::{CategoryForm, FieldErrors};
use crate::state::AppState;

/// Category list and new category form.
#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesTemplate {
    pub current_path: String,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub categories: Vec<CategoryRowView>,
    pub form: CategoryForm,
    pub errors: FieldErrors,
}

/// Category rows in display order.
async fn category_rows(state: &AppState) -> Result<Vec<CategoryRowView>> {
    let catalog = Catalog::load(state.store()).await?;
    Ok(catalog
        .category_cards()
        .iter()
        .map(CategoryRowView::from)
        .collect())
}

/// Category list handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response> {
    let form = CategoryForm {
        position: "0".to_string(),
        ..CategoryForm::default()
    };
    let template = CategoriesTemplate {
        current_path: "/categories".to_string(),
        notice: query.message("Category"),
        error: None,
        categories: category_rows(&state).await?,
        form,
        errors: FieldErrors::default(),
    };
    Ok(render(&template)?.into_response())
}

/// Create category handler.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    let (status, error, errors) = match form.validate() {
        Ok(input) => match state.store().create_category(&input).await {
            Ok(_) => {
                return Ok(
                    Redirect::to(&format!("/categories?notice={}", Notice::Created.code()))
                        .into_response(),
                );
            }
            Err(e) => {
                tracing::error!(error = %e, name = %input.name, "Failed to create category");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The category could not be saved. Nothing was changed; please try again.",
                    FieldErrors::default(),
                )
            }
        },
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please fix the highlighted fields and submit again.",
            errors,
        ),
    };

    // Keep the submitted values even if the list fails to load
    let categories = category_rows(&state).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load categories");
        Vec::new()
    });
    let template = CategoriesTemplate {
        current_path: "/categories".to_string(),
        notice: None,
        error: Some(error.to_string()),
        categories,
        form,
        errors,
    };
    Ok((status, render(&template)?).into_response())
}
