//! Book endpoints.

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::book::{BookRecord, BookUpdate};
use crate::http::error::{ApiError, ApiResult};
use crate::runtime::handle::CatalogHandle;
use crate::types::BookId;

/// Book route group.
pub fn routes() -> Router<CatalogHandle> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/search", get(search_by_title))
        .route("/books/history", get(operation_history).delete(clear_history))
        .route("/books/undo", post(undo_last))
        .route("/books/isbn/:isbn", get(get_book_by_isbn))
        .route("/books/author/:author", get(get_books_by_author))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
}

/// Form fields accepted by `POST /books`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookForm {
    title: String,
    author: String,
    isbn: String,
    #[serde(default)]
    publication_year: Option<i32>,
    #[serde(default)]
    price: Option<f64>,
}

/// Query accepted by `GET /books/search`.
#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    title: String,
}

/// Plain message payload for undo/history endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Outcome description.
    pub message: String,
}

/// `GET /books`
async fn list_books(State(handle): State<CatalogHandle>) -> ApiResult<Json<Vec<BookRecord>>> {
    Ok(Json(handle.all_books().await?))
}

/// `GET /books/{id}`
async fn get_book(
    State(handle): State<CatalogHandle>,
    Path(id): Path<BookId>,
) -> ApiResult<Json<BookRecord>> {
    match handle.book_by_id(id).await? {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::not_found(format!("book not found with id: {id}"))),
    }
}

/// `GET /books/isbn/{isbn}`
async fn get_book_by_isbn(
    State(handle): State<CatalogHandle>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<BookRecord>> {
    match handle.book_by_isbn(&isbn).await? {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::not_found(format!(
            "book not found with isbn: {isbn}"
        ))),
    }
}

/// `GET /books/author/{author}`
async fn get_books_by_author(
    State(handle): State<CatalogHandle>,
    Path(author): Path<String>,
) -> ApiResult<Json<Vec<BookRecord>>> {
    Ok(Json(handle.search("author", author).await?))
}

/// `GET /books/search?title=`
async fn search_by_title(
    State(handle): State<CatalogHandle>,
    Query(query): Query<TitleQuery>,
) -> ApiResult<Json<Vec<BookRecord>>> {
    Ok(Json(handle.search("title", query.title).await?))
}

/// `POST /books`
async fn create_book(
    State(handle): State<CatalogHandle>,
    Form(form): Form<CreateBookForm>,
) -> ApiResult<(StatusCode, Json<BookRecord>)> {
    let book = handle
        .create(
            form.title,
            form.author,
            form.isbn,
            form.publication_year,
            form.price,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /books/{id}`
async fn update_book(
    State(handle): State<CatalogHandle>,
    Path(id): Path<BookId>,
    Json(update): Json<BookUpdate>,
) -> ApiResult<Json<BookRecord>> {
    Ok(Json(handle.update(id, update).await?))
}

/// `DELETE /books/{id}`
async fn delete_book(
    State(handle): State<CatalogHandle>,
    Path(id): Path<BookId>,
) -> ApiResult<StatusCode> {
    handle.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /books/undo`
///
/// Undoing with an empty history is a defined no-op and still returns 200.
async fn undo_last(State(handle): State<CatalogHandle>) -> ApiResult<Json<MessageResponse>> {
    handle.undo_last().await?;
    Ok(Json(MessageResponse {
        message: "Last operation undone successfully".to_string(),
    }))
}

/// `GET /books/history`
async fn operation_history(
    State(handle): State<CatalogHandle>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(handle.history().await?))
}

/// `DELETE /books/history`
async fn clear_history(State(handle): State<CatalogHandle>) -> ApiResult<Json<MessageResponse>> {
    handle.clear_history().await?;
    Ok(Json(MessageResponse {
        message: "Operation history cleared".to_string(),
    }))
}
