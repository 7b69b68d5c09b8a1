//! Repository for the `User` table.

use serde_json::Value;
use sqlx::PgPool;

/// Read access to users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user with their profession and professional subcategories.
    ///
    /// The password hash is stripped before the record leaves the database,
    /// as it is for every embedded user in the other repositories.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Value>, sqlx::Error> {
        sqlx::query_scalar::<_, Value>(
            r#"SELECT (to_jsonb(u) - 'password') || jsonb_build_object(
                   'Profession', (SELECT to_jsonb(pr) FROM "Profession" pr WHERE pr.id = u."professionId"),
                   'ProfessionalUserSubcategory', COALESCE((
                       SELECT jsonb_agg(
                           to_jsonb(pus) || jsonb_build_object(
                               'Subcategory', (SELECT to_jsonb(s) FROM "Subcategory" s WHERE s.id = pus."subcategoryId")
                           )
                           ORDER BY pus."createdAt"
                       )
                       FROM "ProfessionalUserSubcategory" pus WHERE pus."userId" = u.id
                   ), '[]'::jsonb)
               )
               FROM "User" u WHERE u.id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
