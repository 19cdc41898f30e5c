use serde::{Deserialize, Serialize};

/// Cursor state of a GraphQL connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of a cursor-paginated GraphQL connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            page_info: PageInfo::default(),
        }
    }

    pub fn with_cursor(items: Vec<T>, cursor: &str) -> Self {
        Self {
            items,
            page_info: PageInfo {
                has_next_page: true,
                end_cursor: Some(cursor.to_string()),
            },
        }
    }

    /// Cursor for the following page, `None` once the connection is drained.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.page_info.has_next_page {
            self.page_info.end_cursor.as_deref()
        } else {
            None
        }
    }
}

/// One page of a REST listing paginated through the `Link` header.
#[derive(Debug, Clone, PartialEq)]
pub struct RestPage<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

impl<T> RestPage<T> {
    pub fn new(items: Vec<T>, has_next: bool) -> Self {
        Self { items, has_next }
    }
}
