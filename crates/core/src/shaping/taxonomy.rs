//! Category, subcategory and profession formatting.

use serde::Serialize;
use serde_json::Value;

use super::casing::EntityKind;
use super::record::RawRecord;
use super::user::{format_user, FormattedUser};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedProfession {
    pub id: Value,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

pub fn format_profession(raw: Option<&Value>) -> Option<FormattedProfession> {
    let profession = RawRecord::new(EntityKind::Profession, raw)?;

    Some(FormattedProfession {
        id: profession.raw("id"),
        name: profession.string("name"),
        slug: profession.string("slug"),
        description: profession.string("description"),
        is_active: profession.bool("isActive"),
        display_order: profession.integer("displayOrder"),
        created_at: profession.date("createdAt"),
        updated_at: profession.date("updatedAt"),
    })
}

/// Relation counts attached to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub subcategories: i64,
    pub assistance_requests: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedCategory {
    pub id: Value,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(rename = "_count")]
    pub count: Option<CategoryCounts>,
    pub subcategories: Vec<FormattedSubcategory>,
}

pub fn format_category(raw: Option<&Value>) -> Option<FormattedCategory> {
    let category = RawRecord::new(EntityKind::Category, raw)?;

    let count = category.counts().map(|counts| CategoryCounts {
        subcategories: counts.first_nonzero(&["subcategory", "subcategories", "Subcategory"]),
        assistance_requests: counts.first_nonzero(&[
            "assistanceRequest",
            "assistanceRequests",
            "AssistanceRequest",
        ]),
    });

    Some(FormattedCategory {
        id: category.raw("id"),
        name: category.string("name"),
        slug: category.string("slug"),
        description: category.string("description"),
        icon: category.string("icon"),
        color: category.string("color"),
        text_color: category.string("textColor"),
        is_active: category.bool("isActive"),
        display_order: category.integer("displayOrder"),
        created_at: category.date("createdAt"),
        updated_at: category.date("updatedAt"),
        count,
        subcategories: category
            .collection(&["Subcategory", "subcategory", "subcategories"])
            .iter()
            .filter_map(|sub| format_subcategory(Some(sub)))
            .collect(),
    })
}

/// Relation counts attached to a subcategory.
///
/// `professionals` and `assistanceRequests` duplicate the first two fields
/// under the names older frontend screens read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryCounts {
    #[serde(rename = "ProfessionalUserSubcategory")]
    pub professional_user_subcategory: i64,
    #[serde(rename = "assistanceRequest")]
    pub assistance_request: i64,
    pub professionals: i64,
    #[serde(rename = "assistanceRequests")]
    pub assistance_requests: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSubcategory {
    pub id: Value,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i64>,
    pub category_id: Value,
    pub metadata: Value,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub category: Option<Box<FormattedCategory>>,
    pub ai_settings: Option<FormattedAiSettings>,
    #[serde(rename = "_count")]
    pub count: Option<SubcategoryCounts>,
    pub professionals: Vec<FormattedProfessionalSubcategory>,
}

pub fn format_subcategory(raw: Option<&Value>) -> Option<FormattedSubcategory> {
    let subcategory = RawRecord::new(EntityKind::Subcategory, raw)?;

    let count = subcategory.counts().map(|counts| {
        let professionals = counts.first_nonzero(&["ProfessionalUserSubcategory"]);
        let requests = counts.first_nonzero(&["assistanceRequest"]);
        SubcategoryCounts {
            professional_user_subcategory: professionals,
            assistance_request: requests,
            professionals,
            assistance_requests: requests,
        }
    });

    Some(FormattedSubcategory {
        id: subcategory.raw("id"),
        name: subcategory.string("name"),
        slug: subcategory.string("slug"),
        description: subcategory.string("description"),
        requirements: subcategory.string("requirements"),
        color: subcategory.string("color"),
        text_color: subcategory.string("textColor"),
        is_active: subcategory.bool("isActive"),
        display_order: subcategory.integer("displayOrder"),
        category_id: subcategory.raw("categoryId"),
        metadata: subcategory.raw("metadata"),
        created_at: subcategory.date("createdAt"),
        updated_at: subcategory.date("updatedAt"),
        category: format_category(subcategory.relation(&["Category", "category"])).map(Box::new),
        ai_settings: format_ai_settings(
            subcategory.relation(&["SubcategoryAiSettings", "aiSettings"]),
        ),
        count,
        professionals: subcategory
            .collection(&["ProfessionalUserSubcategory", "professionals"])
            .iter()
            .filter_map(|link| format_professional_subcategory(Some(link)))
            .collect(),
    })
}

/// Model parameters used by the AI assistant for one subcategory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAiSettings {
    pub id: Value,
    pub subcategory_id: Value,
    pub model_name: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub system_prompt: Option<String>,
    pub knowledge_base_prompt: Option<String>,
    pub response_style: Option<String>,
    pub detail_level: Option<String>,
    pub include_diagrams: Option<bool>,
    pub include_references: Option<bool>,
    pub use_knowledge_base: Option<bool>,
    pub knowledge_base_ids: Value,
    pub is_active: Option<bool>,
    pub metadata: Value,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

pub fn format_ai_settings(raw: Option<&Value>) -> Option<FormattedAiSettings> {
    let settings = RawRecord::new(EntityKind::AiSettings, raw)?;

    Some(FormattedAiSettings {
        id: settings.raw("id"),
        subcategory_id: settings.raw("subcategoryId"),
        model_name: settings.string("modelName"),
        temperature: settings.decimal("temperature"),
        max_tokens: settings.integer("maxTokens"),
        top_p: settings.decimal("topP"),
        frequency_penalty: settings.decimal("frequencyPenalty"),
        presence_penalty: settings.decimal("presencePenalty"),
        system_prompt: settings.string("systemPrompt"),
        knowledge_base_prompt: settings.string("knowledgeBasePrompt"),
        response_style: settings.string("responseStyle"),
        detail_level: settings.string("detailLevel"),
        include_diagrams: settings.bool("includeDiagrams"),
        include_references: settings.bool("includeReferences"),
        use_knowledge_base: settings.bool("useKnowledgeBase"),
        knowledge_base_ids: settings.raw("knowledgeBaseIds"),
        is_active: settings.bool("isActive"),
        metadata: settings.raw("metadata"),
        created_at: settings.date("createdAt"),
        updated_at: settings.date("updatedAt"),
    })
}

/// Link between a professional and a subcategory they serve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedProfessionalSubcategory {
    pub id: Value,
    /// Owning user, read from the stored `userId`.
    pub recipient_id: Value,
    pub subcategory_id: Value,
    pub experience_years: Option<i64>,
    pub skill_level: Option<String>,
    pub certifications: Value,
    pub portfolio: Value,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub user: Option<Box<FormattedUser>>,
    pub subcategory: Option<Box<FormattedSubcategory>>,
}

pub fn format_professional_subcategory(
    raw: Option<&Value>,
) -> Option<FormattedProfessionalSubcategory> {
    let link = RawRecord::new(EntityKind::ProfessionalSubcategory, raw)?;

    Some(FormattedProfessionalSubcategory {
        id: link.raw("id"),
        recipient_id: link.raw("userId"),
        subcategory_id: link.raw("subcategoryId"),
        experience_years: link.integer("experienceYears"),
        skill_level: link.string("skillLevel"),
        certifications: link.raw("certifications"),
        portfolio: link.raw("portfolio"),
        is_active: link.bool("isActive"),
        created_at: link.date("createdAt"),
        updated_at: link.date("updatedAt"),
        user: format_user(link.relation(&["User", "user"])).map(Box::new),
        subcategory: format_subcategory(link.relation(&["Subcategory", "subcategory"]))
            .map(Box::new),
    })
}
