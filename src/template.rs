use anyhow::{Context, Result, bail};
use handlebars::{Handlebars, no_escape};
use serde::Serialize;

pub const DEFAULT_COMMAND_TEMPLATE: &str = "gh release create {{tag}} --generate-notes ";
pub const TAG_TOKEN: &str = "tag";

#[derive(Debug, Serialize)]
pub struct CommandRenderContext<'a> {
    /// Shell-safe tag.
    pub tag: &'a str,
    /// Tag exactly as supplied.
    pub raw_tag: &'a str,
}

pub fn render_command(template: &str, raw_tag: &str) -> Result<String> {
    let tag = shell_escape_single(raw_tag);
    render_template(
        "release-command",
        template,
        &CommandRenderContext {
            tag: &tag,
            raw_tag,
        },
    )
}

/// Checks a command template at config load time.
pub fn validate_command_template(template: &str) -> Result<()> {
    if !template.contains("{{tag}}") && !template.contains("{{ tag }}") {
        bail!("`command_template` must reference `{{{{{TAG_TOKEN}}}}}`.");
    }
    render_command(template, "v0.0.0").map(|_| ())
}

fn render_template<T: Serialize>(name: &str, template: &str, context: &T) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(no_escape);
    handlebars.set_strict_mode(true);
    handlebars
        .register_template_string(name, template)
        .with_context(|| format!("Failed to parse template `{name}`."))?;

    handlebars
        .render(name, context)
        .with_context(|| format!("Failed to render template `{name}`."))
}

pub fn shell_escape_single(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }

    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '/' | '.' | '_' | '-' | ':' | '+'))
    {
        return value.to_string();
    }

    let escaped = value.replace('\'', "'\"'\"'");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_matches_gh_invocation() {
        assert_eq!(
            render_command(DEFAULT_COMMAND_TEMPLATE, "v2.0.0").unwrap(),
            "gh release create v2.0.0 --generate-notes "
        );
    }

    #[test]
    fn unsafe_tags_are_quoted() {
        assert_eq!(
            render_command(DEFAULT_COMMAND_TEMPLATE, "v1; rm -rf /").unwrap(),
            "gh release create 'v1; rm -rf /' --generate-notes "
        );
        assert_eq!(
            render_command(DEFAULT_COMMAND_TEMPLATE, "").unwrap(),
            "gh release create '' --generate-notes "
        );
    }

    #[test]
    fn raw_tag_is_available_unescaped() {
        assert_eq!(
            render_command("echo {{tag}} {{raw_tag}}", "v1 2").unwrap(),
            "echo 'v1 2' v1 2"
        );
    }

    #[test]
    fn template_must_reference_tag() {
        assert!(validate_command_template("gh release create --generate-notes").is_err());
        assert!(validate_command_template("gh release create {{ tag }}").is_ok());
        assert!(validate_command_template(DEFAULT_COMMAND_TEMPLATE).is_ok());
    }

    #[test]
    fn template_rejects_unknown_variables() {
        let err = validate_command_template("gh release create {{tag}} {{title}}").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to render template"));
    }

    #[test]
    fn shell_escape_wraps_non_safe_values() {
        assert_eq!(shell_escape_single("v1.2.3+4"), "v1.2.3+4");
        assert_eq!(shell_escape_single("it's"), "'it'\"'\"'s'");
    }
}
