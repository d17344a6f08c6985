//! Template rendering into the output directory.
//!
//! Templates are Handlebars files named `<output>.hbs`, looked up first in
//! the templates directory and then in its cloud-specific subdirectory.

use crate::error::{AppError, Result};
use crate::models::{Answers, SubnetPlan, Zone};
use handlebars::Handlebars;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Files generated for every project, in render order.
pub const TEMPLATES: [&str; 5] = [
    "main.tf",
    "variables.tf",
    "outputs.tf",
    "README.md",
    "backend.tf",
];

/// Extension of template files.
pub const TEMPLATE_EXT: &str = "hbs";

/// Directories searched for templates, in lookup order.
pub fn template_search_path(templates_dir: &Path, answers: &Answers) -> Vec<PathBuf> {
    vec![
        templates_dir.to_path_buf(),
        templates_dir.join(answers.cloud.as_str()),
    ]
}

/// Find the first `<name>.hbs` along the search path.
pub fn find_template(search_path: &[PathBuf], name: &str) -> Option<PathBuf> {
    let file_name = format!("{name}.{TEMPLATE_EXT}");
    search_path
        .iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Build the variables visible to templates: every answer plus the plan.
pub fn template_context(answers: &Answers, plan: &SubnetPlan) -> Result<Value> {
    let mut context = serde_json::to_value(answers)
        .map_err(|e| AppError::Render(format!("Error serializing answers: {e}")))?;
    let zones: Vec<Zone> = plan.zones().collect();

    if let Value::Object(map) = &mut context {
        map.insert("vpc_cidr".to_string(), json!(plan.base.to_string()));
        map.insert("public_subnets".to_string(), json!(plan.public_cidrs()));
        map.insert("private_subnets".to_string(), json!(plan.private_cidrs()));
        map.insert("zones".to_string(), json!(zones));
        map.insert("subnet_prefix".to_string(), json!(plan.new_prefix));
        map.insert(
            "generated_at".to_string(),
            json!(chrono::Utc::now().to_rfc3339()),
        );
    }
    Ok(context)
}

/// Render one template file with the given context.
fn render_one(
    handlebars: &mut Handlebars,
    name: &str,
    path: &Path,
    context: &Value,
) -> Result<String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| AppError::Render(format!("Cannot read {}: {e}", path.display())))?;
    handlebars
        .register_template_string(name, source)
        .map_err(|e| AppError::Render(format!("Invalid template {}: {e}", path.display())))?;
    handlebars
        .render(name, context)
        .map_err(|e| AppError::Render(format!("Error rendering {}: {e}", path.display())))
}

/// Render all project templates into `outdir`.
///
/// A template that is missing, fails to render or cannot be written is
/// skipped with a warning; the others are still written.
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - The files written
/// * `Err` - If the templates directory or output directory is unusable
pub fn render_templates(
    answers: &Answers,
    plan: &SubnetPlan,
    templates_dir: &Path,
    outdir: &Path,
) -> Result<Vec<PathBuf>> {
    if !templates_dir.is_dir() {
        return Err(AppError::Render(format!(
            "Templates directory not found: {}",
            templates_dir.display()
        )));
    }

    let search_path = template_search_path(templates_dir, answers);
    let context = template_context(answers, plan)?;

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    std::fs::create_dir_all(outdir)?;
    log::info!(
        "Rendering templates from {:?} into {}",
        search_path,
        outdir.display()
    );

    let mut written = Vec::new();
    for name in TEMPLATES {
        let Some(path) = find_template(&search_path, name) else {
            log::warn!("Could not find template {name}.{TEMPLATE_EXT}. Skipping.");
            continue;
        };
        let target = outdir.join(name);
        let result = render_one(&mut handlebars, name, &path, &context).and_then(|rendered| {
            std::fs::write(&target, rendered)
                .map_err(|e| AppError::Render(format!("Cannot write {}: {e}", target.display())))
        });
        match result {
            Ok(()) => {
                log::debug!("Wrote {}", target.display());
                written.push(target);
            }
            Err(e) => log::warn!("Could not render template {name}. Skipping. Error: {e}"),
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cloud;
    use crate::processing::plan_from_cidr;
    use tempfile::TempDir;

    fn answers() -> Answers {
        Answers {
            project: Some("demo".to_string()),
            cloud: Cloud::Aws,
            vpc_cidr: Some("10.0.0.0/16".to_string()),
            az_count: Some(2),
            ..Answers::default()
        }
    }

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_context_contains_plan() {
        let plan = plan_from_cidr("10.0.0.0/16", 2).unwrap();
        let context = template_context(&answers(), &plan).unwrap();
        assert_eq!(context["project"], "demo");
        assert_eq!(context["cloud"], "aws");
        assert_eq!(context["public_subnets"], json!(["10.0.0.0/18", "10.0.128.0/18"]));
        assert_eq!(context["private_subnets"], json!(["10.0.64.0/18", "10.0.192.0/18"]));
        assert_eq!(context["zones"][1]["private"], "10.0.192.0/18");
        assert_eq!(context["subnet_prefix"], 18);
        assert!(context["generated_at"].is_string());
    }

    #[test]
    fn test_base_dir_wins_over_cloud_dir() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md.hbs", "base");
        write(&tmp.path().join("aws"), "README.md.hbs", "aws");
        write(&tmp.path().join("aws"), "main.tf.hbs", "aws main");

        let search_path = template_search_path(tmp.path(), &answers());
        assert_eq!(
            find_template(&search_path, "README.md").unwrap(),
            tmp.path().join("README.md.hbs")
        );
        assert_eq!(
            find_template(&search_path, "main.tf").unwrap(),
            tmp.path().join("aws").join("main.tf.hbs")
        );
        assert!(find_template(&search_path, "backend.tf").is_none());
    }

    #[test]
    fn test_render_skips_missing_and_broken_templates() {
        let tmp = TempDir::new().unwrap();
        let templates = tmp.path().join("templates");
        write(
            &templates.join("aws"),
            "main.tf.hbs",
            "# {{project}}\npublic = [{{#each public_subnets}}\"{{this}}\"{{#unless @last}}, {{/unless}}{{/each}}]\n",
        );
        write(&templates, "outputs.tf.hbs", "{{#each zones}}");

        let outdir = tmp.path().join("out").join("nested");
        let plan = plan_from_cidr("10.0.0.0/16", 2).unwrap();
        let written = render_templates(&answers(), &plan, &templates, &outdir).unwrap();

        assert_eq!(written, vec![outdir.join("main.tf")]);
        let main_tf = std::fs::read_to_string(outdir.join("main.tf")).unwrap();
        assert_eq!(
            main_tf,
            "# demo\npublic = [\"10.0.0.0/18\", \"10.0.128.0/18\"]\n"
        );
        assert!(!outdir.join("outputs.tf").exists());
    }

    #[test]
    fn test_context_uses_canonical_vpc_cidr() {
        let answers = Answers {
            vpc_cidr: Some(" 10.0.0.0/16 ".to_string()),
            ..answers()
        };
        let plan = plan_from_cidr(" 10.0.0.0/16 ", 2).unwrap();
        let context = template_context(&answers, &plan).unwrap();
        assert_eq!(context["vpc_cidr"], "10.0.0.0/16");

        let tmp = TempDir::new().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "variables.tf.hbs", "cidr = \"{{vpc_cidr}}\"\n");
        let outdir = tmp.path().join("out");
        render_templates(&answers, &plan, &templates, &outdir).unwrap();
        assert_eq!(
            std::fs::read_to_string(outdir.join("variables.tf")).unwrap(),
            "cidr = \"10.0.0.0/16\"\n"
        );
    }

    #[test]
    fn test_unwritable_target_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let templates = tmp.path().join("templates");
        write(&templates, "main.tf.hbs", "# {{project}}\n");
        write(&templates, "outputs.tf.hbs", "# outputs\n");
        write(&templates, "backend.tf.hbs", "# backend\n");

        let outdir = tmp.path().join("out");
        std::fs::create_dir_all(outdir.join("outputs.tf")).unwrap();
        let plan = plan_from_cidr("10.0.0.0/16", 2).unwrap();
        let written = render_templates(&answers(), &plan, &templates, &outdir).unwrap();

        assert_eq!(
            written,
            vec![outdir.join("main.tf"), outdir.join("backend.tf")]
        );
        assert_eq!(
            std::fs::read_to_string(outdir.join("backend.tf")).unwrap(),
            "# backend\n"
        );
        assert!(outdir.join("outputs.tf").is_dir());
    }

    #[test]
    fn test_missing_templates_dir_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let outdir = tmp.path().join("out");
        let plan = plan_from_cidr("10.0.0.0/24", 1).unwrap();
        let err = render_templates(&answers(), &plan, &tmp.path().join("nope"), &outdir)
            .unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
        assert!(!outdir.exists());
    }
}
