//! Query helpers shared by every store.

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, ConnectionTrait, PaginatorTrait, SelectorTrait,
};

use crate::errors::AppResult;
use crate::types::PaginationParams;

/// Count the query, reject pages past the end, then fetch the requested page.
pub(crate) async fn fetch_page<'db, C, Q>(
    query: Q,
    db: &'db C,
    params: PaginationParams,
) -> AppResult<(Vec<<Q::Selector as SelectorTrait>::Item>, u64)>
where
    C: ConnectionTrait,
    Q: PaginatorTrait<'db, C>,
{
    let paginator = query.paginate(db, params.limit());
    let total = paginator.num_items().await?;
    params.ensure_page_exists(total)?;
    let items = paginator.fetch_page(params.page_index()).await?;
    Ok((items, total))
}

/// Case-insensitive substring match on a column.
pub(crate) fn icontains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column.as_column_ref())))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%_sure\\"), "100\\%\\_sure\\\\");
        assert_eq!(escape_like("action"), "action");
    }
}
