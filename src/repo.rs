use crate::models::{Book, BookPatch, NewBook};
use std::error::Error;
use std::future::Future;

pub trait BookRepo<E: Error> {
    fn list_books(&self) -> impl Future<Output = Result<Vec<Book>, E>> + Send;

    fn get_book(&self, id: i32) -> impl Future<Output = Result<Option<Book>, E>> + Send;

    fn insert_book(&self, new_book: NewBook) -> impl Future<Output = Result<Book, E>> + Send;

    /// Applies the supplied fields to the record, leaving the rest alone.
    /// Returns `None` if no record has the given id.
    fn update_book(
        &self,
        id: i32,
        patch: BookPatch,
    ) -> impl Future<Output = Result<Option<Book>, E>> + Send;

    /// Returns the removed book if the id existed, `None` otherwise.
    fn delete_book(&self, id: i32) -> impl Future<Output = Result<Option<Book>, E>> + Send;
}
