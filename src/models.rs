/// A catalog record. Ids are assigned by the service and never reused.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
}

/// Request body for create and update. Either field may be absent, and an
/// empty string counts the same as absent.
#[derive(Clone, Default, serde::Deserialize)]
pub struct BookInput {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// A create input that has already passed presence checks.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

/// Fields of an update that actually apply. `Some` always carries a
/// non-empty value; anything else was dropped during validation.
#[derive(Debug, Clone)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct BookListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Book>,
}

impl BookListResponse {
    pub fn of(data: Vec<Book>) -> Self {
        BookListResponse {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct BookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Book,
}

impl BookResponse {
    pub fn of(data: Book) -> Self {
        BookResponse {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: Book) -> Self {
        BookResponse {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            message: message.into(),
        }
    }
}
