//! # Configuration
//!
//! Optional TOML config file:
//!
//! ```toml
//! [thresholds]
//! reactive_max = 8
//! basic_max = 16
//! intermediate_max = 22
//!
//! [questionnaire]
//! title = "Observability Maturity Assessment"
//!
//! [[questionnaire.steps]]
//! title = "Visibility"
//!
//! [[questionnaire.steps.fields]]
//! name = "visibility"
//! kind = "exclusive_choice"
//! options = ["1", "2", "3", "4", "5"]
//! required = true
//! ```
//!
//! Both tables are optional; missing ones fall back to the built-in
//! questionnaire and default thresholds.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vantage_core::{AssessmentError, CategoryAssessor, CategoryThresholds, Questionnaire};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a config file (1 MB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum size of an answers file (256 KB).
pub const MAX_ANSWERS_FILE_SIZE: u64 = 256 * 1024;

// =============================================================================
// APP CONFIG
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<CategoryThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<Questionnaire>,
}

impl AppConfig {
    /// The built-in questionnaire and default thresholds, spelled out.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            thresholds: Some(CategoryThresholds::default()),
            questionnaire: Some(Questionnaire::observability()),
        }
    }

    /// Load and check a config file.
    pub fn load(path: &Path) -> Result<Self, AssessmentError> {
        let text = read_text_file(path, MAX_CONFIG_FILE_SIZE)?;
        let config: Self = toml::from_str(&text).map_err(|e| {
            AssessmentError::DeserializationError(format!(
                "Invalid config '{}': {}",
                path.display(),
                e
            ))
        })?;

        if let Some(questionnaire) = &config.questionnaire {
            questionnaire.validate()?;
        }
        config.assessor()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the config file if one was given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AssessmentError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The category assessor described by this config.
    pub fn assessor(&self) -> Result<CategoryAssessor, AssessmentError> {
        match self.thresholds {
            Some(thresholds) => CategoryAssessor::with_thresholds(thresholds),
            None => Ok(CategoryAssessor::new()),
        }
    }

    /// The questionnaire described by this config.
    #[must_use]
    pub fn questionnaire(&self) -> Questionnaire {
        self.questionnaire.clone().unwrap_or_default()
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, AssessmentError> {
        toml::to_string_pretty(self).map_err(|e| AssessmentError::SerializationError(e.to_string()))
    }
}

// =============================================================================
// FILE HELPERS
// =============================================================================

/// Read a regular file as UTF-8 after checking its path and size.
pub fn read_text_file(path: &Path, max_size: u64) -> Result<String, AssessmentError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, max_size)?;
    std::fs::read_to_string(&canonical).map_err(|e| {
        AssessmentError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), AssessmentError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| AssessmentError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(AssessmentError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and ensure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, AssessmentError> {
    let canonical = path.canonicalize().map_err(|e| {
        AssessmentError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(AssessmentError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path: its parent must be an existing directory.
pub fn validate_output_path(path: &Path) -> Result<PathBuf, AssessmentError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        AssessmentError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(AssessmentError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| AssessmentError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}
