use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::definition::{DEFAULT_LIBRARY_DIR, DEFAULT_SCRIPT_EXTENSION, DEFAULT_SOURCE_DIR, ProjectLayout};

pub(crate) const SETTINGS_SECTION_KEY: &str = "au3-analyzer";

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ServerSettings {
    pub(crate) navigation: NavigationSettings,
    pub(crate) logging: LoggingSettings,
}

impl ServerSettings {
    pub(crate) fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub(crate) fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    /// Directory conventions handed to the definition engine.
    pub(crate) fn project_layout(&self) -> ProjectLayout {
        ProjectLayout {
            source_dir: self.navigation.source_dir_name.clone(),
            library_dir: self.navigation.library_dir_name.clone(),
            script_extension: self.navigation.script_extension.clone(),
            search_includes: self.navigation.search_includes,
        }
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(navigation) = patch.navigation {
            self.navigation.apply_patch(navigation);
        }
        if let Some(logging) = patch.logging {
            self.logging.apply_patch(logging);
        }
    }

    fn normalize(&mut self) {
        self.navigation.normalize();
        self.logging.normalize();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NavigationSettings {
    pub(crate) source_dir_name: String,
    pub(crate) library_dir_name: String,
    pub(crate) script_extension: String,
    pub(crate) search_includes: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            source_dir_name: DEFAULT_SOURCE_DIR.to_string(),
            library_dir_name: DEFAULT_LIBRARY_DIR.to_string(),
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            search_includes: true,
        }
    }
}

impl NavigationSettings {
    fn apply_patch(
        &mut self,
        patch: NavigationSettingsPatch,
    ) {
        if let Some(source_dir_name) = patch.source_dir_name {
            self.source_dir_name = source_dir_name;
        }
        if let Some(library_dir_name) = patch.library_dir_name {
            self.library_dir_name = library_dir_name;
        }
        if let Some(script_extension) = patch.script_extension {
            self.script_extension = script_extension;
        }
        if let Some(search_includes) = patch.search_includes {
            self.search_includes = search_includes;
        }
    }

    fn normalize(&mut self) {
        self.source_dir_name = non_blank_or(&self.source_dir_name, DEFAULT_SOURCE_DIR);
        self.library_dir_name = non_blank_or(&self.library_dir_name, DEFAULT_LIBRARY_DIR);
        self.script_extension =
            non_blank_or(self.script_extension.trim().trim_start_matches('.'), DEFAULT_SCRIPT_EXTENSION);
    }
}

fn non_blank_or(
    value: &str,
    fallback: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct LoggingSettings {
    pub(crate) level: LoggingLevel,
}

impl LoggingSettings {
    fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
    }

    fn normalize(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub(crate) fn allows_info(self) -> bool {
        self >= LoggingLevel::Info
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    navigation: Option<NavigationSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct NavigationSettingsPatch {
    source_dir_name: Option<String>,
    library_dir_name: Option<String>,
    script_extension: Option<String>,
    search_includes: Option<bool>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettingsPatch {
    level: Option<LoggingLevel>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = vec![payload.clone()];

    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }

    candidates
}

#[cfg(test)]
#[path = "../../tests/src/server/settings_tests.rs"]
mod tests;
