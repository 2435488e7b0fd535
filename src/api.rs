use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::error::Error;
use tracing::{error, info};

use crate::models::{
    BookInput, BookListResponse, BookPatch, BookResponse, ErrorResponse, NewBook,
};
use crate::repo::BookRepo;

#[derive(Clone)]
struct AppState<R> {
    repo: R,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn build_api<E: Error + 'static>(
    repo: impl BookRepo<E> + Send + Sync + Clone + 'static,
) -> Router {
    Router::new()
        .route("/", get(api_index))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(endpoint_not_found)
        .with_state(AppState { repo })
}

async fn api_index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to Book API",
        "endpoints": {
            "GET /books": "Get all books",
            "GET /books/:id": "Get a specific book",
            "POST /books": "Create a new book",
            "PUT /books/:id": "Update a book",
            "DELETE /books/:id": "Delete a book"
        }
    }))
}

async fn list_books<E, R>(
    State(state): State<AppState<R>>,
) -> Result<Json<BookListResponse>, ApiError>
where
    E: Error,
    R: BookRepo<E>,
{
    let books = state.repo.list_books().await.map_err(internal_error)?;

    info!("Listing {} books from the catalog", books.len());

    Ok(Json(BookListResponse::of(books)))
}

async fn get_book<E, R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, ApiError>
where
    E: Error,
    R: BookRepo<E>,
{
    let book = match parse_book_id(&id) {
        Some(book_id) => state.repo.get_book(book_id).await.map_err(internal_error)?,
        None => None,
    };

    match book {
        Some(book) => {
            info!("Retrieved book from the catalog: {:?}", book);
            Ok(Json(BookResponse::of(book)))
        }
        None => {
            info!("No book found in the catalog with id: {}", id);
            Err(book_not_found(&id))
        }
    }
}

async fn create_book<E, R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError>
where
    E: Error,
    R: BookRepo<E>,
{
    let input = parse_body(payload)?;

    let (Some(title), Some(author)) = (non_empty(input.title), non_empty(input.author)) else {
        return Err(invalid_input("Title and author are required"));
    };

    let book = state
        .repo
        .insert_book(NewBook { title, author })
        .await
        .map_err(internal_error)?;

    info!("Created book in the catalog: {:?}", book);

    Ok((
        StatusCode::CREATED,
        Json(BookResponse::with_message("Book created successfully", book)),
    ))
}

async fn update_book<E, R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError>
where
    E: Error,
    R: BookRepo<E>,
{
    let Some(book_id) = parse_book_id(&id) else {
        return Err(book_not_found(&id));
    };

    let input = parse_body(payload)?;
    let patch = BookPatch {
        title: non_empty(input.title),
        author: non_empty(input.author),
    };

    // A missing book wins over a missing payload, so probe before rejecting
    if patch.is_empty() {
        let exists = state
            .repo
            .get_book(book_id)
            .await
            .map_err(internal_error)?
            .is_some();
        return Err(if exists {
            invalid_input("Title or author must be provided")
        } else {
            book_not_found(&id)
        });
    }

    let updated_book = state
        .repo
        .update_book(book_id, patch)
        .await
        .map_err(internal_error)?;

    match updated_book {
        Some(book) => {
            info!("Updated book in the catalog: {:?}", book);
            Ok(Json(BookResponse::with_message(
                "Book updated successfully",
                book,
            )))
        }
        None => {
            info!("Tried to update non-existent book with id: {}", id);
            Err(book_not_found(&id))
        }
    }
}

async fn delete_book<E, R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, ApiError>
where
    E: Error,
    R: BookRepo<E>,
{
    let Some(book_id) = parse_book_id(&id) else {
        return Err(book_not_found(&id));
    };

    let deleted_book = state
        .repo
        .delete_book(book_id)
        .await
        .map_err(internal_error)?;

    match deleted_book {
        Some(book) => {
            info!("Deleted book from the catalog with id: {}", id);
            Ok(Json(BookResponse::with_message(
                "Book deleted successfully",
                book,
            )))
        }
        None => {
            info!("Tried to delete non-existent book with id: {}", id);
            Err(book_not_found(&id))
        }
    }
}

async fn endpoint_not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found")),
    )
}

/// An unparsable id can never match a record, so it reports as not found
/// rather than as a malformed request.
fn parse_book_id(id: &str) -> Option<i32> {
    id.parse().ok()
}

/// A request without a JSON body reads as an empty input, which the presence
/// checks then reject. Anything else the extractor refuses (broken JSON, a
/// mismatched payload) keeps the uniform error envelope.
fn parse_body(payload: Result<Json<BookInput>, JsonRejection>) -> Result<BookInput, ApiError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(BookInput::default()),
        Err(rejection) => Err((
            rejection.status(),
            Json(ErrorResponse::new(rejection.body_text())),
        )),
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

fn book_not_found(id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("Book with id {id} not found"))),
    )
}

fn invalid_input(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

/// Build the generic 500 response for an error, keeping the detail in the log
fn internal_error<E>(err: E) -> ApiError
where
    E: Error,
{
    error!("Request failed with an internal fault: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}
