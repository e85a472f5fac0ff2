//! Store access.
//!
//! Repositories wrap one table (or the analytical payments table) each and return raw store
//! models with the store's own error type. Condition builders for the free-text and date
//! filters live next to the repository of the table they target.

pub mod account;
pub mod company;
pub mod customer;
pub mod game;
pub mod payment;
pub mod settings;
pub mod user;

#[cfg(test)]
mod tests;

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ColumnTrait, Condition, EntityTrait, ExprTrait,
};

use crate::model::filter::DateRange;

/// Escape character used in every `LIKE` pattern built from user input.
pub(crate) const LIKE_ESCAPE: char = '\\';

/// Escapes `LIKE` wildcards so `term` matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive literal substring match on a table-qualified column.
pub(crate) fn contains_ci<E: EntityTrait>(column: E::Column, term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    Condition::all().add(
        Expr::expr(Func::lower(Expr::col((E::default(), column))))
            .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
    )
}

/// `column BETWEEN start AND end`, both bounds inclusive.
pub(crate) fn within<C: ColumnTrait>(column: C, range: &DateRange) -> Condition {
    Condition::all().add(column.between(range.start, range.end))
}
