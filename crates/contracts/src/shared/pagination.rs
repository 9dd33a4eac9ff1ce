use crate::shared::decode::{DecodeError, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u64,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// Paginated list envelope (`{ items, pagination }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Some list endpoints answer with the envelope, older ones with a bare array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paginated(PaginatedResponse<T>),
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Paginated(p) => p.items,
            ListPayload::Bare(items) => items,
        }
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            ListPayload::Paginated(p) => Some(&p.pagination),
            ListPayload::Bare(_) => None,
        }
    }

    /// Normalise to the envelope; a bare array becomes a single page.
    pub fn into_paginated(self) -> PaginatedResponse<T> {
        match self {
            ListPayload::Paginated(p) => p,
            ListPayload::Bare(items) => {
                let total = items.len();
                PaginatedResponse {
                    pagination: Pagination {
                        page: 1,
                        pages: 1,
                        per_page: total as u32,
                        total: total as u64,
                        has_next: false,
                        has_prev: false,
                    },
                    items,
                }
            }
        }
    }
}

impl<T: Validate> Validate for PaginatedResponse<T> {
    fn validate(&self) -> Result<(), DecodeError> {
        self.items.validate().map_err(|e| e.within("items"))
    }
}

impl<T: Validate> Validate for ListPayload<T> {
    fn validate(&self) -> Result<(), DecodeError> {
        match self {
            ListPayload::Paginated(p) => p.validate(),
            ListPayload::Bare(items) => items.validate(),
        }
    }
}
