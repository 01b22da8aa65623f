use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::articles::{ArticleListQuery, SaveArticleCommand};
use crate::domain::models::{Article, ArticleError};
use crate::domain::sorting::parse_sort;
use crate::domain::validation::{validate_article, ArticleFields};
use crate::storage::ArticleStorage;

/// Service for managing articles
#[derive(Clone)]
pub struct ArticleService {
    storage: Arc<dyn ArticleStorage>,
}

impl ArticleService {
    pub fn new(storage: Arc<dyn ArticleStorage>) -> Self {
        Self { storage }
    }

    /// List all articles, optionally ordered by the `sort` parameter
    pub async fn list_articles(&self, query: ArticleListQuery) -> Result<Vec<Article>, ArticleError> {
        let sort = match query.sort.as_deref() {
            Some(raw) => parse_sort(raw)?,
            None => Vec::new(),
        };
        info!("Listing articles with sort: {:?}", sort);

        let articles = self.storage.list_articles(&sort).await?;

        info!("Found {} articles", articles.len());
        Ok(articles)
    }

    /// Get an article by ID
    pub async fn get_article(&self, article_id: &str) -> Result<Article, ArticleError> {
        match self.storage.get_article(article_id).await? {
            Some(article) => Ok(article),
            None => {
                warn!("Article not found: {}", article_id);
                Err(ArticleError::NotFound(article_id.to_string()))
            }
        }
    }

    /// Validate and store a new article
    pub async fn create_article(&self, command: SaveArticleCommand) -> Result<Article, ArticleError> {
        let fields = self.validate(&command, None).await?;

        let now = Utc::now();
        let article = Article {
            id: Article::generate_id(),
            title: fields.title,
            slug: fields.slug,
            content: fields.content,
            created_at: now,
            updated_at: now,
        };

        self.storage.store_article(&article).await?;

        info!("Created article '{}' with ID: {}", article.slug, article.id);
        Ok(article)
    }

    /// Validate and replace the attributes of an existing article
    pub async fn update_article(
        &self,
        article_id: &str,
        command: SaveArticleCommand,
    ) -> Result<Article, ArticleError> {
        let mut article = self.get_article(article_id).await?;
        let fields = self.validate(&command, Some(article_id)).await?;

        article.title = fields.title;
        article.slug = fields.slug;
        article.content = fields.content;
        article.updated_at = Utc::now();

        if !self.storage.update_article(&article).await? {
            // Deleted between lookup and write.
            return Err(ArticleError::NotFound(article_id.to_string()));
        }

        info!("Updated article '{}' with ID: {}", article.slug, article.id);
        Ok(article)
    }

    /// Delete an article
    pub async fn delete_article(&self, article_id: &str) -> Result<(), ArticleError> {
        let article = self.get_article(article_id).await?;

        if !self.storage.delete_article(article_id).await? {
            return Err(ArticleError::NotFound(article_id.to_string()));
        }

        info!("Deleted article '{}' with ID: {}", article.slug, article.id);
        Ok(())
    }

    /// Run the attribute rules, querying slug uniqueness first.
    async fn validate(
        &self,
        command: &SaveArticleCommand,
        excluding_id: Option<&str>,
    ) -> Result<ArticleFields, ArticleError> {
        let slug_taken = match command.slug.as_filled_text() {
            Some(slug) => self.storage.slug_exists(slug, excluding_id).await?,
            None => false,
        };

        validate_article(command, slug_taken).map_err(|errors| {
            warn!("Rejected article attributes: {:?}", errors.violations());
            ArticleError::from(errors)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::articles::AttributeInput;
    use crate::domain::validation::{ArticleField, Violation};
    use crate::storage::{ArticleRepository, DbConnection};

    async fn setup_test() -> ArticleService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        ArticleService::new(Arc::new(ArticleRepository::new(db)))
    }

    fn command(title: &str, slug: &str, content: &str) -> SaveArticleCommand {
        SaveArticleCommand {
            title: AttributeInput::text(title),
            slug: AttributeInput::text(slug),
            content: AttributeInput::text(content),
        }
    }

    fn validation_errors(err: ArticleError) -> crate::domain::validation::ValidationErrors {
        match err {
            ArticleError::Validation(errors) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_article() {
        let service = setup_test().await;

        let created = service
            .create_article(command("Nuevo articulo", "nuevo-articulo", "Contenido del articulo"))
            .await
            .expect("Failed to create article");

        assert!(!created.id.is_empty());
        assert_eq!(created.title, "Nuevo articulo");
        assert_eq!(created.slug, "nuevo-articulo");
        assert_eq!(created.content, "Contenido del articulo");

        let fetched = service.get_article(&created.id).await.expect("Failed to get article");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_slug_keeps_first_article() {
        let service = setup_test().await;
        let first = service
            .create_article(command("Primer articulo", "mismo-slug", "uno"))
            .await
            .unwrap();

        let err = service
            .create_article(command("Segundo articulo", "mismo-slug", "dos"))
            .await
            .unwrap_err();
        let errors = validation_errors(err);
        assert!(errors.contains(ArticleField::Slug, Violation::SlugTaken));

        let all = service.list_articles(ArticleListQuery::default()).await.unwrap();
        assert_eq!(all, vec![first]);
    }

    #[tokio::test]
    async fn test_update_to_own_slug_succeeds() {
        let service = setup_test().await;
        let article = service
            .create_article(command("Nuevo articulo", "nuevo-articulo", "texto"))
            .await
            .unwrap();

        let updated = service
            .update_article(
                &article.id,
                command("Actualizar articulo", "nuevo-articulo", "Contenido editado"),
            )
            .await
            .expect("Updating with the same slug should succeed");

        assert_eq!(updated.id, article.id);
        assert_eq!(updated.title, "Actualizar articulo");
        assert_eq!(updated.content, "Contenido editado");
        assert_eq!(updated.created_at, article.created_at);
        assert!(updated.updated_at >= article.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_other_articles_slug_fails() {
        let service = setup_test().await;
        let first = service
            .create_article(command("Primer articulo", "primero", "uno"))
            .await
            .unwrap();
        service
            .create_article(command("Segundo articulo", "segundo", "dos"))
            .await
            .unwrap();

        let err = service
            .update_article(&first.id, command("Primer articulo", "segundo", "uno"))
            .await
            .unwrap_err();
        let errors = validation_errors(err);
        assert_eq!(errors.fields(), vec![ArticleField::Slug]);

        let unchanged = service.get_article(&first.id).await.unwrap();
        assert_eq!(unchanged.slug, "primero");
    }

    #[tokio::test]
    async fn test_update_requires_every_attribute() {
        let service = setup_test().await;
        let article = service
            .create_article(command("Nuevo articulo", "nuevo-articulo", "texto"))
            .await
            .unwrap();

        let partial = SaveArticleCommand {
            title: AttributeInput::text("Art"),
            ..SaveArticleCommand::default()
        };
        let errors = validation_errors(service.update_article(&article.id, partial).await.unwrap_err());

        assert!(errors.contains(ArticleField::Title, Violation::TooShort { min: 4 }));
        assert!(errors.contains(ArticleField::Slug, Violation::Required));
        assert!(errors.contains(ArticleField::Content, Violation::Required));
    }

    #[tokio::test]
    async fn test_missing_article_is_not_found() {
        let service = setup_test().await;

        assert!(matches!(
            service.get_article("missing").await,
            Err(ArticleError::NotFound(_))
        ));
        assert!(matches!(
            service
                .update_article("missing", command("Nuevo articulo", "nuevo", "texto"))
                .await,
            Err(ArticleError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_article("missing").await,
            Err(ArticleError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_article() {
        let service = setup_test().await;
        let article = service
            .create_article(command("Nuevo articulo", "nuevo-articulo", "texto"))
            .await
            .unwrap();

        service.delete_article(&article.id).await.expect("Failed to delete article");

        assert!(matches!(
            service.get_article(&article.id).await,
            Err(ArticleError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_with_invalid_sort() {
        let service = setup_test().await;
        let err = service
            .list_articles(ArticleListQuery {
                sort: Some("unknownfield".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ArticleError::InvalidSort(_)));
    }
}
