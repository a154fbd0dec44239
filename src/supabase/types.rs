use serde::Deserialize;

use crate::supabase::error::SupabaseError;

/// One row of the `posts` collection as PostgREST returns it, with the
/// one-to-one `authors` relation embedded.
#[derive(Debug, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub authors: Option<AuthorRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorRecord {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Resolved display metadata for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMeta {
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
    pub author_name: String,
}

impl ArticleRecord {
    /// Null columns collapse to empty strings; a missing `authors` row
    /// means the join is broken and the record cannot be rendered.
    pub fn into_meta(self) -> Result<ArticleMeta, SupabaseError> {
        let author = self.authors.ok_or(SupabaseError::MissingAuthor)?;

        Ok(ArticleMeta {
            title: self.title.unwrap_or_default(),
            excerpt: self.excerpt.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
            author_name: author.full_name.unwrap_or_default(),
        })
    }
}
