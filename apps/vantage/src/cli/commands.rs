//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::{AppConfig, MAX_ANSWERS_FILE_SIZE, read_text_file, validate_output_path};
use crate::terminal::Wizard;
use std::io::Write;
use std::path::Path;
use vantage_core::{AnswerSet, Assessment, AssessmentError, FieldKind, Navigator};

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Walk through the questionnaire on stdin/stdout.
///
/// In JSON mode the wizard talks on stderr and only the final assessment
/// is printed to stdout.
pub fn cmd_run(config_path: Option<&Path>, json_mode: bool) -> Result<(), AssessmentError> {
    let config = AppConfig::load_or_default(config_path)?;
    let navigator = Navigator::new(config.questionnaire())?.with_assessor(config.assessor()?);
    let stdin = std::io::stdin().lock();

    let assessment = if json_mode {
        Wizard::new(navigator, stdin, std::io::stderr().lock()).run()?
    } else {
        Wizard::new(navigator, stdin, std::io::stdout().lock()).run()?
    };

    match assessment {
        Some(assessment) if json_mode => print_json(&assessment),
        Some(_) => Ok(()),
        None => {
            tracing::info!("questionnaire left without submitting");
            Ok(())
        }
    }
}

// =============================================================================
// SCORE COMMAND
// =============================================================================

/// Score an answers file.
pub fn cmd_score(
    config_path: Option<&Path>,
    json_mode: bool,
    answers_path: &Path,
) -> Result<(), AssessmentError> {
    let config = AppConfig::load_or_default(config_path)?;
    let answers = load_answers(answers_path)?;
    let assessment = Assessment::evaluate(&answers, &config.assessor()?);
    tracing::debug!(
        answered = answers.len(),
        score = assessment.score,
        "scored answers file"
    );

    if json_mode {
        return print_json(&assessment);
    }

    println!("Score: {}", assessment.score);
    println!();
    print!("{}", assessment.to_plain_text());
    Ok(())
}

/// Read answers from a `.json` file, or TOML for any other extension.
pub fn load_answers(path: &Path) -> Result<AnswerSet, AssessmentError> {
    let text = read_text_file(path, MAX_ANSWERS_FILE_SIZE)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    } else {
        toml::from_str(&text).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| {
        AssessmentError::DeserializationError(format!(
            "Invalid answers file '{}': {}",
            path.display(),
            e
        ))
    })
}

// =============================================================================
// CATEGORIZE COMMAND
// =============================================================================

/// Show the category for a score.
pub fn cmd_categorize(
    config_path: Option<&Path>,
    json_mode: bool,
    score: i64,
) -> Result<(), AssessmentError> {
    let config = AppConfig::load_or_default(config_path)?;
    let assessor = config.assessor()?;
    let category = assessor.categorize(score);
    let to_next = assessor.points_to_next(score);

    if json_mode {
        let output = serde_json::json!({
            "score": score,
            "category": category,
            "description": category.description(),
            "next_category": category.next(),
            "points_to_next": to_next,
        });
        return print_json(&output);
    }

    println!("Score:    {}", score);
    println!("Category: {}", category);
    println!();
    println!("{}", category.description());
    if let (Some(next), Some(points)) = (category.next(), to_next) {
        println!();
        println!("{} more point(s) to reach {}.", points, next);
    }
    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Print the active questionnaire.
pub fn cmd_show(config_path: Option<&Path>, json_mode: bool) -> Result<(), AssessmentError> {
    let config = AppConfig::load_or_default(config_path)?;
    let questionnaire = config.questionnaire();

    if json_mode {
        return print_json(&questionnaire);
    }

    println!("{}", questionnaire.title);
    println!("{}", "=".repeat(questionnaire.title.chars().count()));
    for (index, step) in questionnaire.steps.iter().enumerate() {
        println!();
        println!("Step {}: {}", index + 1, step.title);
        for field in &step.fields {
            let required = if field.required { " (required)" } else { "" };
            let options = match &field.kind {
                FieldKind::ExclusiveChoice { options } | FieldKind::MultiSelect { options } => {
                    let list: Vec<&str> = options.iter().map(|o| o.as_str()).collect();
                    format!(" [{}]", list.join(", "))
                }
                FieldKind::BinaryConsent | FieldKind::FreeText { .. } => String::new(),
            };
            println!(
                "  {} - {}{}{}",
                field.name,
                field.kind.label(),
                options,
                required
            );
        }
    }
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the built-in questionnaire and thresholds as a config file.
pub fn cmd_init(output: &Path, force: bool) -> Result<(), AssessmentError> {
    let path = validate_output_path(output)?;
    if path.exists() && !force {
        return Err(AssessmentError::IoError(format!(
            "'{}' already exists (use --force to overwrite)",
            output.display()
        )));
    }

    let text = AppConfig::builtin().to_toml()?;
    std::fs::write(&path, text).map_err(|e| {
        AssessmentError::IoError(format!("Cannot write '{}': {}", output.display(), e))
    })?;

    tracing::info!(path = %path.display(), "wrote config");
    println!("Config written to {}", path.display());
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AssessmentError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AssessmentError::SerializationError(e.to_string()))?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text)
        .map_err(|e| AssessmentError::IoError(format!("Cannot write output: {}", e)))
}
