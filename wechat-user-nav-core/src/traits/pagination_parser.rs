//! Pagination parsing abstract Trait

use crate::error::{NavError, NavResult};

/// Turns raw `page` / `sort` query values into typed values
///
/// Provides a default implementation of `DefaultPaginationParser`.
pub trait PaginationParser: Send + Sync {
    /// Positive page number
    fn parse_page(&self, raw: &str) -> NavResult<u32>;

    /// Sort field of a `field,direction` string
    fn parse_predicate(&self, sort: &str) -> String;

    /// Sort direction of a `field,direction` string
    fn parse_ascending(&self, sort: &str) -> bool;
}

/// `sort` is `field[,field...],direction`; the direction segment is optional.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPaginationParser;

impl PaginationParser for DefaultPaginationParser {
    fn parse_page(&self, raw: &str) -> NavResult<u32> {
        match raw.trim().parse::<u32>() {
            Ok(page) if page > 0 => Ok(page),
            _ => Err(NavError::InvalidParam {
                name: "page".to_string(),
                value: raw.to_string(),
            }),
        }
    }

    fn parse_predicate(&self, sort: &str) -> String {
        let mut parts: Vec<&str> = sort.split(',').collect();
        if parts.len() > 1 {
            parts.pop();
        }
        parts.join(",")
    }

    fn parse_ascending(&self, sort: &str) -> bool {
        let parts: Vec<&str> = sort.split(',').collect();
        if parts.len() > 1 {
            parts.last().is_some_and(|dir| *dir == "asc")
        } else {
            true
        }
    }
}
