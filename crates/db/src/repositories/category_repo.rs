//! Repository for the `Category` and `Subcategory` tables.

use serde_json::Value;
use sqlx::PgPool;

/// Relation counts for a category, keyed the way the ORM reports them.
const CATEGORY_COUNTS: &str = r#"
    '_count', jsonb_build_object(
        'subcategory', (SELECT COUNT(*) FROM "Subcategory" s WHERE s."categoryId" = c.id),
        'assistanceRequest', (SELECT COUNT(*) FROM "AssistanceRequest" r WHERE r."categoryId" = c.id)
    )"#;

/// Read access to the category taxonomy.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List active categories by display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Value>, sqlx::Error> {
        let query = format!(
            r#"SELECT to_jsonb(c) || jsonb_build_object({CATEGORY_COUNTS})
               FROM "Category" c
               WHERE c."isActive"
               ORDER BY c."displayOrder", c.name"#
        );
        sqlx::query_scalar::<_, Value>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a category with its subcategories.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Value>, sqlx::Error> {
        let query = format!(
            r#"SELECT to_jsonb(c) || jsonb_build_object(
                   {CATEGORY_COUNTS},
                   'Subcategory', COALESCE((
                       SELECT jsonb_agg(to_jsonb(s) ORDER BY s."displayOrder", s.name)
                       FROM "Subcategory" s WHERE s."categoryId" = c.id
                   ), '[]'::jsonb)
               )
               FROM "Category" c WHERE c.id = $1"#
        );
        sqlx::query_scalar::<_, Value>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active subcategories, optionally restricted to one category.
    pub async fn list_subcategories(
        pool: &PgPool,
        category_id: Option<&str>,
    ) -> Result<Vec<Value>, sqlx::Error> {
        sqlx::query_scalar::<_, Value>(
            r#"SELECT to_jsonb(s) || jsonb_build_object(
                   'Category', (SELECT to_jsonb(c) FROM "Category" c WHERE c.id = s."categoryId"),
                   'SubcategoryAiSettings', (
                       SELECT to_jsonb(a) FROM "SubcategoryAiSettings" a WHERE a."subcategoryId" = s.id
                   ),
                   '_count', jsonb_build_object(
                       'ProfessionalUserSubcategory', (
                           SELECT COUNT(*) FROM "ProfessionalUserSubcategory" pus
                           WHERE pus."subcategoryId" = s.id
                       ),
                       'assistanceRequest', (
                           SELECT COUNT(*) FROM "AssistanceRequest" r WHERE r."subcategoryId" = s.id
                       )
                   )
               )
               FROM "Subcategory" s
               WHERE s."isActive" AND ($1::text IS NULL OR s."categoryId" = $1)
               ORDER BY s."displayOrder", s.name"#,
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }
}
