use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{Book, BookPatch, NewBook};
use crate::repo::BookRepo;

#[derive(Debug)]
pub enum CatalogError {
    LockPoisoned,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::LockPoisoned => {
                write!(f, "catalog lock poisoned by a panicked request handler")
            }
        }
    }
}

impl Error for CatalogError {}

struct CatalogState {
    books: Vec<Book>,
    next_id: i32,
}

/// The catalog every fresh service starts with.
fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            title: "To Kill a Mockingbird".to_string(),
            author: "Harper Lee".to_string(),
        },
        Book {
            id: 2,
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
        },
        Book {
            id: 3,
            title: "The Great Gatsby".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
        },
    ]
}

/// In-memory book collection behind a single mutex. Cloning the repo shares
/// the same underlying collection, so one instance per process (or per test)
/// is the unit of isolation.
#[derive(Clone)]
pub struct InMemoryBookRepo {
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryBookRepo {
    pub fn new() -> Self {
        let books = seed_books();
        let next_id = books.last().map_or(1, |book| book.id + 1);
        InMemoryBookRepo {
            state: Arc::new(Mutex::new(CatalogState { books, next_id })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, CatalogState>, CatalogError> {
        self.state.lock().map_err(|_| CatalogError::LockPoisoned)
    }
}

impl Default for InMemoryBookRepo {
    fn default() -> Self {
        InMemoryBookRepo::new()
    }
}

impl BookRepo<CatalogError> for InMemoryBookRepo {
    async fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.lock()?.books.clone())
    }

    async fn get_book(&self, id: i32) -> Result<Option<Book>, CatalogError> {
        Ok(self.lock()?.books.iter().find(|book| book.id == id).cloned())
    }

    async fn insert_book(&self, new_book: NewBook) -> Result<Book, CatalogError> {
        let mut state = self.lock()?;

        let book = Book {
            id: state.next_id,
            title: new_book.title,
            author: new_book.author,
        };

        // The counter only ever moves forward, so deleted ids never come back
        state.next_id += 1;
        state.books.push(book.clone());

        Ok(book)
    }

    async fn update_book(&self, id: i32, patch: BookPatch) -> Result<Option<Book>, CatalogError> {
        let mut state = self.lock()?;

        let Some(book) = state.books.iter_mut().find(|book| book.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }

        Ok(Some(book.clone()))
    }

    async fn delete_book(&self, id: i32) -> Result<Option<Book>, CatalogError> {
        let mut state = self.lock()?;

        let index = state.books.iter().position(|book| book.id == id);

        Ok(index.map(|index| state.books.remove(index)))
    }
}
