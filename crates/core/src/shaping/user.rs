//! User formatting.

use serde::Serialize;
use serde_json::Value;

use super::casing::EntityKind;
use super::record::RawRecord;
use super::taxonomy::{
    format_profession, format_professional_subcategory, FormattedProfession,
    FormattedProfessionalSubcategory,
};

/// Frontend shape of a user account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedUser {
    pub id: Value,
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// Kept in the stored upper-case form (`CLIENT`, `PROFESSIONAL`, ...).
    pub role: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub profession: Option<String>,
    pub profession_id: Value,
    pub profession_data: Option<FormattedProfession>,
    pub professional_user_subcategories: Vec<FormattedProfessionalSubcategory>,
    pub specializations: Value,
    pub hourly_rate: Option<f64>,
    pub currency: Option<String>,
    pub service_areas: Value,
    pub email_verified: Option<bool>,
    pub can_self_assign: Option<bool>,
    pub last_login_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Format a raw user record.
///
/// The profession record may arrive as `Profession` (relation name) or
/// `professionData` (already-mapped alias); both produce the same output.
pub fn format_user(raw: Option<&Value>) -> Option<FormattedUser> {
    let user = RawRecord::new(EntityKind::User, raw)?;

    let first_name = user.string("firstName");
    let last_name = user.string("lastName");
    let full_name = user
        .string("fullName")
        .filter(|name| !name.is_empty())
        .or_else(|| join_name(first_name.as_deref(), last_name.as_deref()));

    Some(FormattedUser {
        id: user.raw("id"),
        email: user.string("email"),
        username: user.string("username"),
        first_name,
        last_name,
        full_name,
        phone: user.string("phone"),
        role: user.enumeration("role", None),
        avatar: user.string("avatar"),
        bio: user.string("bio"),
        status: user.string("status"),
        address: user.string("address"),
        city: user.string("city"),
        province: user.string("province"),
        postal_code: user.string("postalCode"),
        country: user.string("country"),
        profession: user.string("profession"),
        profession_id: user.raw("professionId"),
        profession_data: format_profession(user.relation(&["Profession", "professionData"])),
        professional_user_subcategories: user
            .collection(&["ProfessionalUserSubcategory", "professionalUserSubcategories"])
            .iter()
            .filter_map(|link| format_professional_subcategory(Some(link)))
            .collect(),
        specializations: user.raw("specializations"),
        hourly_rate: user.decimal("hourlyRate"),
        currency: user.string("currency"),
        service_areas: user.raw("serviceAreas"),
        email_verified: user.bool("emailVerified"),
        can_self_assign: user.bool("canSelfAssign"),
        last_login_at: user.date("lastLoginAt"),
        created_at: user.date("createdAt"),
        updated_at: user.date("updatedAt"),
    })
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}
