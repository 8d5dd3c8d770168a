use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn lower_contains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{}%", escape_like(needle))).escape('\\'))
}

/// Case-insensitive substring match OR'd across `columns`.
pub fn contains_any<C: ColumnTrait>(columns: impl IntoIterator<Item = C>, term: &str) -> Condition {
    let needle = term.trim().to_lowercase();
    columns
        .into_iter()
        .fold(Condition::any(), |cond, col| cond.add(lower_contains(col, &needle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("mac"), "mac");
    }
}
