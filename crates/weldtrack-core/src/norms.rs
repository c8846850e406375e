//! Norm collection: per-article time norms with prefix suggestions.
//!
//! Uniqueness of `article` is exact and case-sensitive (`AB1` and `ab1`
//! may coexist); the suggestion lookup, by contrast, folds case.

use rusqlite::{Connection, params};
use tracing::debug;

use crate::db::query;
use crate::error::{Error, Result};
use crate::model::{Norm, new_id};

/// Minimum prefix length before suggestions kick in.
pub const MIN_PREFIX_LEN: usize = 2;

/// Add a norm.
///
/// # Errors
///
/// Returns [`Error::DuplicateArticle`] when an exact case-sensitive match
/// already exists, or a storage error.
pub fn add_norm(conn: &Connection, article: &str, time: &str) -> Result<Norm> {
    let article = article.trim();
    if query::find_norm_by_article(conn, article)?.is_some() {
        return Err(Error::DuplicateArticle(article.to_string()));
    }

    let norm = Norm {
        id: new_id(),
        article: article.to_string(),
        time: time.trim().to_string(),
    };
    conn.execute(
        "INSERT INTO norms (norm_id, article, time_label) VALUES (?1, ?2, ?3)",
        params![norm.id, norm.article, norm.time],
    )?;
    debug!(norm = %norm.id, article = %norm.article, "norm added");
    Ok(norm)
}

/// Edit a norm in place. The uniqueness check excludes the record being
/// edited, so re-saving a norm under its own article is allowed.
///
/// # Errors
///
/// Returns [`Error::NormNotFound`] for an unknown id,
/// [`Error::DuplicateArticle`] on collision, or a storage error.
pub fn edit_norm(conn: &Connection, norm_id: &str, article: &str, time: &str) -> Result<Norm> {
    let article = article.trim();
    if query::get_norm(conn, norm_id)?.is_none() {
        return Err(Error::NormNotFound(norm_id.to_string()));
    }
    if let Some(existing) = query::find_norm_by_article(conn, article)? {
        if existing.id != norm_id {
            return Err(Error::DuplicateArticle(article.to_string()));
        }
    }

    conn.execute(
        "UPDATE norms SET article = ?2, time_label = ?3 WHERE norm_id = ?1",
        params![norm_id, article, time.trim()],
    )?;
    Ok(Norm {
        id: norm_id.to_string(),
        article: article.to_string(),
        time: time.trim().to_string(),
    })
}

/// Delete a norm unconditionally.
///
/// # Errors
///
/// Returns [`Error::NormNotFound`] if no row was deleted, or a storage
/// error.
pub fn delete_norm(conn: &Connection, norm_id: &str) -> Result<()> {
    let deleted = conn.execute("DELETE FROM norms WHERE norm_id = ?1", [norm_id])?;
    if deleted == 0 {
        return Err(Error::NormNotFound(norm_id.to_string()));
    }
    Ok(())
}

/// Case-insensitive prefix suggestions over the norm collection.
///
/// Prefixes shorter than [`MIN_PREFIX_LEN`] characters return nothing.
/// Case folding happens in Rust because SQLite's `NOCASE` collation only
/// folds ASCII and article codes are frequently Cyrillic; the collection
/// stays small enough that scanning the article-ordered index is fine.
///
/// # Errors
///
/// Returns an error if the underlying query fails.
pub fn suggest(conn: &Connection, prefix: &str) -> Result<Vec<Norm>> {
    if prefix.chars().count() < MIN_PREFIX_LEN {
        return Ok(Vec::new());
    }

    let folded = prefix.to_lowercase();
    let matches = query::list_norms(conn)?
        .into_iter()
        .filter(|norm| norm.article.to_lowercase().starts_with(&folded))
        .collect();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::{add_norm, delete_norm, edit_norm, suggest};
    use crate::db::{open_memory, query};
    use crate::error::Error;

    #[test]
    fn duplicate_article_is_rejected_case_sensitively() {
        let conn = open_memory().expect("open store");
        add_norm(&conn, "AB1", "1h").expect("add");

        let err = add_norm(&conn, "AB1", "2h").unwrap_err();
        assert!(matches!(err, Error::DuplicateArticle(_)));

        // Different case is a different article.
        add_norm(&conn, "ab1", "2h").expect("different case is accepted");
        assert_eq!(query::list_norms(&conn).expect("list").len(), 2);
    }

    #[test]
    fn edit_excludes_own_record_from_uniqueness() {
        let conn = open_memory().expect("open store");
        let norm = add_norm(&conn, "AB1", "1h").expect("add");
        add_norm(&conn, "CD2", "2h").expect("add other");

        // Re-saving under the same article only changes the time.
        let saved = edit_norm(&conn, &norm.id, "AB1", "90m").expect("edit");
        assert_eq!(saved.time, "90m");

        let err = edit_norm(&conn, &norm.id, "CD2", "1h").unwrap_err();
        assert!(matches!(err, Error::DuplicateArticle(_)));
    }

    #[test]
    fn delete_removes_unconditionally() {
        let conn = open_memory().expect("open store");
        let norm = add_norm(&conn, "AB1", "1h").expect("add");
        delete_norm(&conn, &norm.id).expect("delete");
        assert!(query::list_norms(&conn).expect("list").is_empty());

        let err = delete_norm(&conn, &norm.id).unwrap_err();
        assert!(matches!(err, Error::NormNotFound(_)));
    }

    #[test]
    fn short_prefixes_suggest_nothing() {
        let conn = open_memory().expect("open store");
        add_norm(&conn, "AB1", "1h").expect("add");

        assert!(suggest(&conn, "").expect("suggest").is_empty());
        assert!(suggest(&conn, "a").expect("suggest").is_empty());
    }

    #[test]
    fn suggestions_fold_case_both_ways() {
        let conn = open_memory().expect("open store");
        add_norm(&conn, "AB1", "1h").expect("add");
        add_norm(&conn, "ab2", "2h").expect("add");
        add_norm(&conn, "XY", "3h").expect("add");

        let hits = suggest(&conn, "ab").expect("suggest");
        let articles: Vec<&str> = hits.iter().map(|n| n.article.as_str()).collect();
        assert_eq!(articles, vec!["AB1", "ab2"]);
    }

    #[test]
    fn suggestions_fold_cyrillic_prefixes() {
        let conn = open_memory().expect("open store");
        add_norm(&conn, "ФЛ-102", "4h").expect("add");

        let hits = suggest(&conn, "фл").expect("suggest");
        assert_eq!(hits.len(), 1);
        // Two Cyrillic characters are four bytes; the length gate counts
        // characters, not bytes.
        assert_eq!(hits[0].article, "ФЛ-102");
    }
}
