//! Project entity model, request DTOs, and mutation rules.
//!
//! A project bundles classification metadata, the AI conversation that
//! produced it, and the generated files. The store owns records of this
//! type; everything here is pure so the rules can be tested without one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{FileType, Framework, MessageRole, ProjectCategory, ProjectStatus, Theme};
use crate::error::CoreError;
use crate::types::{monotonic_after, ProjectId, Timestamp};
use crate::validation::{validate_file_path, validate_project_name};

/// Entity name used in not-found errors and logs.
pub const PROJECT_ENTITY: &str = "Project";

/// AI model assigned to new projects.
pub const DEFAULT_AI_MODEL: &str = "moonshotai/kimi-k2-instruct";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: Timestamp,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_modified: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_url: Option<String>,
    pub status: ProjectStatus,
    pub metadata: ProjectMetadata,
    pub conversation: Conversation,
    /// Keyed by project-relative path.
    pub files: BTreeMap<String, ProjectFile>,
    pub settings: ProjectSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProjectCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
    #[serde(default)]
    pub context: ConversationContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

/// What an assistant turn did to the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_packages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_id: Option<String>,
}

/// Context accumulated over the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    #[serde(default)]
    pub scraped_websites: Vec<ScrapedWebsite>,
    #[serde(default)]
    pub generated_components: Vec<GeneratedComponent>,
    #[serde(default)]
    pub applied_code: Vec<AppliedCode>,
    #[serde(default)]
    pub current_project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedWebsite {
    pub url: String,
    /// Whatever the scraper returned; stored opaquely.
    pub content: serde_json::Value,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedComponent {
    pub name: String,
    pub path: String,
    pub content: String,
}

/// One batch of generated code written into the sandbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCode {
    pub files: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_modified: Timestamp,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// Per-project editor settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    pub ai_model: String,
    pub auto_save: bool,
    pub theme: Theme,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            ai_model: DEFAULT_AI_MODEL.to_string(),
            auto_save: true,
            theme: Theme::Auto,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new project.
///
/// `name` is optional at the type level so a missing name surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Defaults to `other` if omitted or empty.
    pub category: Option<String>,
    pub target_url: Option<String>,
    pub style: Option<String>,
}

/// DTO for updating an existing project.
///
/// Every field present replaces the stored value wholesale, including the
/// nested `metadata`, `conversation`, `files`, and `settings` objects (no
/// deep merge). Absent or `null` fields are left untouched. `id`,
/// `createdAt`, and `lastModified` are not patchable and are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sandbox_id: Option<String>,
    pub sandbox_url: Option<String>,
    pub status: Option<ProjectStatus>,
    pub metadata: Option<ProjectMetadata>,
    pub conversation: Option<Conversation>,
    pub files: Option<BTreeMap<String, ProjectFile>>,
    pub settings: Option<ProjectSettings>,
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

impl Project {
    /// Build a fresh active project from a create request.
    ///
    /// Fails with [`CoreError::Validation`] if the name is missing or blank.
    /// A missing, empty, or unrecognised category becomes `other`.
    pub fn new(id: ProjectId, input: CreateProject, now: Timestamp) -> Result<Self, CoreError> {
        let name = validate_project_name(input.name.as_deref())?;
        let category = input
            .category
            .as_deref()
            .and_then(|raw| ProjectCategory::parse(raw).ok())
            .unwrap_or(ProjectCategory::Other);

        Ok(Self {
            id,
            description: Some(input.description.unwrap_or_default()),
            created_at: now,
            last_modified: now,
            sandbox_id: None,
            sandbox_url: None,
            status: ProjectStatus::Active,
            metadata: ProjectMetadata {
                category: Some(category),
                target_url: input.target_url,
                style: input.style,
                framework: Some(Framework::React),
                packages: Vec::new(),
                features: Vec::new(),
            },
            conversation: Conversation {
                messages: Vec::new(),
                context: ConversationContext {
                    current_project: name.clone(),
                    ..ConversationContext::default()
                },
            },
            files: BTreeMap::new(),
            settings: ProjectSettings::default(),
            name,
        })
    }

    /// Apply a partial update.
    ///
    /// The whole patch is validated before anything is written, so a
    /// rejected update leaves the project unchanged.
    pub fn apply_update(&mut self, patch: UpdateProject, now: Timestamp) -> Result<(), CoreError> {
        let name = patch
            .name
            .as_deref()
            .map(|n| validate_project_name(Some(n)))
            .transpose()?;

        if let Some(next) = patch.status {
            if !self.status.can_transition_to(next) {
                return Err(CoreError::Validation(format!(
                    "Cannot change status of a {} project to {next}",
                    self.status
                )));
            }
        }

        if let Some(files) = &patch.files {
            for path in files.keys() {
                validate_file_path(path)?;
            }
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(sandbox_id) = patch.sandbox_id {
            self.sandbox_id = Some(sandbox_id);
        }
        if let Some(sandbox_url) = patch.sandbox_url {
            self.sandbox_url = Some(sandbox_url);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
        if let Some(conversation) = patch.conversation {
            self.conversation = conversation;
        }
        if let Some(files) = patch.files {
            self.files = files;
        }
        if let Some(settings) = patch.settings {
            self.settings = settings;
        }

        self.touch(now);
        Ok(())
    }

    /// Soft-delete: flip the status to deleted and bump `last_modified`.
    pub fn mark_deleted(&mut self, now: Timestamp) {
        self.status = ProjectStatus::Deleted;
        self.touch(now);
    }

    /// Bump `last_modified` without letting it move backwards.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_modified = monotonic_after(self.last_modified, now);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn t(ms: i64) -> Timestamp {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn create(name: &str) -> CreateProject {
        CreateProject {
            name: Some(name.to_string()),
            ..CreateProject::default()
        }
    }

    fn file(content: &str) -> ProjectFile {
        ProjectFile {
            content: content.to_string(),
            last_modified: t(0),
            file_type: FileType::Component,
        }
    }

    #[test]
    fn new_project_has_defaults() {
        let p = Project::new(Uuid::new_v4(), create("Shop"), t(1_000)).unwrap();

        assert_eq!(p.name, "Shop");
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.created_at, p.last_modified);
        assert_eq!(p.description.as_deref(), Some(""));
        assert_eq!(p.metadata.category, Some(ProjectCategory::Other));
        assert_eq!(p.metadata.framework, Some(Framework::React));
        assert!(p.metadata.packages.is_empty());
        assert!(p.conversation.messages.is_empty());
        assert_eq!(p.conversation.context.current_project, "Shop");
        assert!(p.files.is_empty());
        assert_eq!(p.settings.ai_model, DEFAULT_AI_MODEL);
        assert!(p.settings.auto_save);
        assert_eq!(p.settings.theme, Theme::Auto);
    }

    #[test]
    fn new_project_keeps_request_fields() {
        let input = CreateProject {
            name: Some("Store".into()),
            description: Some("An online store".into()),
            category: Some("ecommerce".into()),
            target_url: Some("https://example.com".into()),
            style: Some("modern".into()),
        };
        let p = Project::new(Uuid::new_v4(), input, t(0)).unwrap();

        assert_eq!(p.description.as_deref(), Some("An online store"));
        assert_eq!(p.metadata.category, Some(ProjectCategory::Ecommerce));
        assert_eq!(p.metadata.target_url.as_deref(), Some("https://example.com"));
        assert_eq!(p.metadata.style.as_deref(), Some("modern"));
    }

    #[test]
    fn new_project_requires_name() {
        let err = Project::new(Uuid::new_v4(), CreateProject::default(), t(0)).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert!(Project::new(Uuid::new_v4(), create("  "), t(0)).is_err());
    }

    #[test]
    fn new_project_falls_back_to_other_category() {
        for raw in ["games", "", "Ecommerce"] {
            let input = CreateProject {
                category: Some(raw.into()),
                ..create("x")
            };
            let p = Project::new(Uuid::new_v4(), input, t(0)).unwrap();
            assert_eq!(p.metadata.category, Some(ProjectCategory::Other), "{raw}");
        }
    }

    #[test]
    fn new_project_keeps_name_as_sent() {
        let p = Project::new(Uuid::new_v4(), create("  Shop  "), t(0)).unwrap();
        assert_eq!(p.name, "  Shop  ");
        assert_eq!(p.conversation.context.current_project, "  Shop  ");
    }

    #[test]
    fn update_description_leaves_other_fields() {
        let mut p = Project::new(
            Uuid::new_v4(),
            CreateProject {
                category: Some("logistics".into()),
                target_url: Some("https://a.example".into()),
                ..create("Shop")
            },
            t(1_000),
        )
        .unwrap();
        let before = p.clone();

        p.apply_update(
            UpdateProject {
                description: Some("new".into()),
                ..UpdateProject::default()
            },
            t(2_000),
        )
        .unwrap();

        assert_eq!(p.description.as_deref(), Some("new"));
        assert_eq!(p.last_modified, t(2_000));
        assert_eq!(p.metadata, before.metadata);
        assert_eq!(p.settings, before.settings);
        assert_eq!(p.conversation, before.conversation);
        assert_eq!(p.name, before.name);
        assert_eq!(p.created_at, before.created_at);
        assert_eq!(p.id, before.id);
    }

    #[test]
    fn update_replaces_metadata_wholesale() {
        let mut p = Project::new(
            Uuid::new_v4(),
            CreateProject {
                category: Some("ecommerce".into()),
                target_url: Some("https://a.example".into()),
                ..create("Shop")
            },
            t(0),
        )
        .unwrap();

        p.apply_update(
            UpdateProject {
                metadata: Some(ProjectMetadata {
                    style: Some("retro".into()),
                    ..ProjectMetadata::default()
                }),
                ..UpdateProject::default()
            },
            t(1),
        )
        .unwrap();

        assert_eq!(p.metadata.style.as_deref(), Some("retro"));
        assert_eq!(p.metadata.category, None);
        assert_eq!(p.metadata.target_url, None);
    }

    #[test]
    fn update_never_moves_last_modified_backwards() {
        let mut p = Project::new(Uuid::new_v4(), create("Shop"), t(5_000)).unwrap();
        p.apply_update(UpdateProject::default(), t(4_000)).unwrap();
        assert_eq!(p.last_modified, t(5_000));
        assert!(p.last_modified >= p.created_at);
    }

    #[test]
    fn update_rejects_blank_name_without_mutating() {
        let mut p = Project::new(Uuid::new_v4(), create("Shop"), t(0)).unwrap();
        let before = p.clone();
        let err = p
            .apply_update(
                UpdateProject {
                    name: Some(" ".into()),
                    description: Some("changed".into()),
                    ..UpdateProject::default()
                },
                t(10),
            )
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(p, before);
    }

    #[test]
    fn update_cannot_revive_deleted_project() {
        let mut p = Project::new(Uuid::new_v4(), create("Shop"), t(0)).unwrap();
        p.mark_deleted(t(1));
        let err = p
            .apply_update(
                UpdateProject {
                    status: Some(ProjectStatus::Active),
                    ..UpdateProject::default()
                },
                t(2),
            )
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("deleted"));
        assert_eq!(p.status, ProjectStatus::Deleted);
    }

    #[test]
    fn update_can_archive_and_reactivate() {
        let mut p = Project::new(Uuid::new_v4(), create("Shop"), t(0)).unwrap();
        let archive = UpdateProject {
            status: Some(ProjectStatus::Archived),
            ..UpdateProject::default()
        };
        p.apply_update(archive, t(1)).unwrap();
        assert_eq!(p.status, ProjectStatus::Archived);

        let reactivate = UpdateProject {
            status: Some(ProjectStatus::Active),
            ..UpdateProject::default()
        };
        p.apply_update(reactivate, t(2)).unwrap();
        assert_eq!(p.status, ProjectStatus::Active);
    }

    #[test]
    fn update_rejects_escaping_file_path() {
        let mut p = Project::new(Uuid::new_v4(), create("Shop"), t(0)).unwrap();
        let mut files = BTreeMap::new();
        files.insert("src/App.tsx".to_string(), file("ok"));
        files.insert("../outside.txt".to_string(), file("nope"));

        let result = p.apply_update(
            UpdateProject {
                files: Some(files),
                ..UpdateProject::default()
            },
            t(1),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert!(p.files.is_empty());
    }

    #[test]
    fn update_replaces_files() {
        let mut p = Project::new(Uuid::new_v4(), create("Shop"), t(0)).unwrap();
        let mut files = BTreeMap::new();
        files.insert("src/App.tsx".to_string(), file("export default App"));
        p.apply_update(
            UpdateProject {
                files: Some(files),
                ..UpdateProject::default()
            },
            t(1),
        )
        .unwrap();
        assert_eq!(p.files.len(), 1);
        assert_eq!(p.files["src/App.tsx"].content, "export default App");
    }

    #[test]
    fn mark_deleted_flips_status_and_bumps_time() {
        let mut p = Project::new(Uuid::new_v4(), create("Shop"), t(0)).unwrap();
        p.mark_deleted(t(0) + Duration::seconds(1));
        assert_eq!(p.status, ProjectStatus::Deleted);
        assert_eq!(p.last_modified, t(1_000));
    }

    #[test]
    fn serializes_camel_case_millis() {
        let p = Project::new(Uuid::new_v4(), create("Shop"), t(1_234)).unwrap();
        let json = serde_json::to_value(&p).unwrap();

        assert_eq!(json["createdAt"], 1_234);
        assert_eq!(json["lastModified"], 1_234);
        assert_eq!(json["status"], "active");
        assert_eq!(json["metadata"]["category"], "other");
        assert_eq!(json["settings"]["aiModel"], DEFAULT_AI_MODEL);
        assert_eq!(json["settings"]["autoSave"], true);
        assert_eq!(json["conversation"]["context"]["currentProject"], "Shop");
        assert!(json["files"].as_object().unwrap().is_empty());
        assert!(json.get("sandboxId").is_none());
    }

    #[test]
    fn update_ignores_immutable_fields() {
        let patch: UpdateProject = serde_json::from_value(serde_json::json!({
            "id": "not-a-uuid",
            "createdAt": 0,
            "description": "new"
        }))
        .unwrap();
        assert_eq!(patch.description.as_deref(), Some("new"));
        assert!(patch.name.is_none());
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: ProjectSettings =
            serde_json::from_value(serde_json::json!({ "theme": "dark" })).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.ai_model, DEFAULT_AI_MODEL);
        assert!(settings.auto_save);
    }
}
