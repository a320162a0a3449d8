//! SQL builder for product listing.
//!
//! Builds a parameterized SELECT from a [`ProductFilter`]. All user-supplied
//! values are bound as positional parameters; column names never come from
//! the request. The sort column is resolved against a fixed allow-list and
//! anything else falls back to ordering by id.

use sea_orm::Value;

use crate::models::ProductFilter;

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, in_stock, category FROM products";

/// Sortable columns. Requests naming anything else sort by id.
const SORTABLE_COLUMNS: &[&str] = &["name", "price", "in_stock", "category"];

/// Resolve the ORDER BY clause for a requested sort column.
///
/// Known columns get an ascending sort with id as a tiebreaker so that
/// pagination is stable across rows with equal sort keys.
fn order_by_clause(sortby: Option<&str>) -> &'static str {
    match sortby {
        Some(requested) => SORTABLE_COLUMNS
            .iter()
            .find(|col| **col == requested)
            .map(|col| match *col {
                "name" => " ORDER BY name ASC, id ASC",
                "price" => " ORDER BY price ASC, id ASC",
                "in_stock" => " ORDER BY in_stock ASC, id ASC",
                "category" => " ORDER BY category ASC, id ASC",
                _ => unreachable!(),
            })
            .unwrap_or(" ORDER BY id ASC"),
        None => " ORDER BY id ASC",
    }
}

/// Build the listing query and its bound parameters.
///
/// Returns the SQL text with `$1..$n` placeholders and the values in
/// matching order. OFFSET and LIMIT are always bound as the two trailing
/// parameters, so the query shape varies only with which filters are set.
pub fn build_list_query(filter: &ProductFilter) -> (String, Vec<Value>) {
    let mut sql = String::from(SELECT_COLUMNS);
    let mut params: Vec<Value> = Vec::new();
    let mut clauses: Vec<String> = Vec::new();

    if let Some(category) = &filter.category {
        params.push(format!("%{}%", category).into());
        clauses.push(format!("category ILIKE ${}", params.len()));
    }

    if let Some(name) = &filter.name {
        params.push(format!("%{}%", name).into());
        clauses.push(format!("name ILIKE ${}", params.len()));
    }

    if let Some(min_price) = filter.min_price {
        params.push(min_price.into());
        clauses.push(format!("price >= ${}", params.len()));
    }

    if let Some(max_price) = filter.max_price {
        params.push(max_price.into());
        clauses.push(format!("price <= ${}", params.len()));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    sql.push_str(order_by_clause(filter.sortby.as_deref()));

    // Values beyond i64 saturate instead of wrapping negative, which
    // Postgres would reject
    params.push(i64::try_from(filter.skip).unwrap_or(i64::MAX).into());
    sql.push_str(&format!(" OFFSET ${}", params.len()));

    params.push(i64::try_from(filter.limit).unwrap_or(i64::MAX).into());
    sql.push_str(&format!(" LIMIT ${}", params.len()));

    (sql, params)
}
