use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::HostalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

/// Parses `field`, `field,asc` or `field,desc`.
impl FromStr for SortOrder {
    type Err = HostalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let field = parts.next().unwrap_or_default().trim();
        if field.is_empty() {
            return Err(HostalError::Validation(format!(
                "invalid sort '{}': missing field",
                s
            )));
        }

        let direction = match parts.next().map(|d| d.trim().to_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(d) => {
                return Err(HostalError::Validation(format!(
                    "invalid sort direction '{}', expected asc or desc",
                    d
                )))
            }
        };

        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: vec![SortOrder::asc("id")],
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        if !sort.is_empty() {
            self.sort = sort;
        }
        self
    }

    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        query.extend(self.sort.iter().map(|s| ("sort".to_string(), s.to_string())));
        query
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
    /// False when the backend sent no total and `total_count` is a lower bound.
    pub exact_total: bool,
}

impl<T> Page<T> {
    /// Builds a page, falling back to what is visible when the total is unknown.
    pub fn new(items: Vec<T>, total_count: Option<u64>, request: &PageRequest) -> Self {
        let seen = request.page as u64 * request.size as u64 + items.len() as u64;
        Self {
            total_count: total_count.unwrap_or(seen),
            exact_total: total_count.is_some(),
            items,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.size as u64) as u32
    }

    pub fn has_next(&self) -> bool {
        if self.exact_total {
            self.page + 1 < self.total_pages()
        } else {
            self.items.len() as u32 >= self.size
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
