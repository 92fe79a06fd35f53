//! Subcommand implementations
//!
//! Commands write their results to `out`; logs go to stderr.

use std::io::Write;

use anyhow::Context;
use ctxvar_application::ports::QuickInput;
use ctxvar_application::{
    ApplicationError, PickContextVariable, ResolveReferences, VariableService,
};
use ctxvar_domain::{ResolutionRequest, VariableContext, VariableDefinition};
use ctxvar_infrastructure::to_json_stable;
use tracing::warn;

/// Lists registered variables sorted by name.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn list<S: VariableService>(service: &S, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let mut variables = service.get_variables();
    variables.sort_by(|a, b| a.name.cmp(&b.name));

    if json {
        out.write_all(to_json_stable(&variables)?.as_bytes())?;
        return Ok(());
    }
    for variable in &variables {
        writeln!(out, "{}\t{}", usage(variable), variable.description)?;
    }
    Ok(())
}

/// `#name` or `#name:<arg|arg>` as typed in chat text.
fn usage(variable: &VariableDefinition) -> String {
    if variable.takes_argument() {
        let args: Vec<_> = variable.args.iter().map(|arg| arg.name.as_str()).collect();
        format!("#{}:<{}>", variable.name, args.join("|"))
    } else {
        format!("#{}", variable.name)
    }
}

fn reference_text(request: &ResolutionRequest) -> String {
    match request.arg() {
        Some(arg) => format!("#{}:{arg}", request.variable.name),
        None => format!("#{}", request.variable.name),
    }
}

/// Resolves one variable and prints its value.
///
/// # Errors
///
/// Returns an error if the name is malformed or the variable yields no
/// value.
pub async fn resolve<S: VariableService>(
    service: S,
    name: &str,
    arg: Option<&str>,
    with_context: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let reference = match arg {
        Some(arg) => format!("{name}:{arg}"),
        None => name.to_string(),
    };
    let resolved = ResolveReferences::new(service)
        .resolve_one(&reference, &VariableContext::new())
        .await?;

    writeln!(out, "{}", resolved.value)?;
    if let Some(context_value) = resolved.context_value.filter(|_| with_context) {
        writeln!(out)?;
        out.write_all(context_value.as_bytes())?;
        if !context_value.ends_with('\n') {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Expands references in `text` and prints the result.
///
/// Unresolved references are kept and reported as warnings.
///
/// # Errors
///
/// Returns an error if writing fails.
pub async fn expand<S: VariableService>(
    service: S,
    text: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let output = ResolveReferences::new(service)
        .execute(text, &VariableContext::new())
        .await;
    if !output.is_complete {
        warn!(unresolved = ?output.unresolved, "some references could not be resolved");
    }
    out.write_all(output.expanded.as_bytes())?;
    if !output.expanded.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

/// Lets the user pick a variable and argument, then prints the reference
/// or, with `resolve`, its value.
///
/// # Errors
///
/// Returns an error if nothing was picked or the pick yields no value.
pub async fn pick<S, Q>(
    service: S,
    quick_input: Q,
    resolve: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: VariableService + Clone,
    Q: QuickInput,
{
    let Some(request) = PickContextVariable::new(service.clone(), quick_input)
        .execute()
        .await
    else {
        return Err(ApplicationError::Cancelled.into());
    };

    let reference = reference_text(&request);
    if !resolve {
        writeln!(out, "{reference}")?;
        return Ok(());
    }

    let resolved = service
        .resolve_variable(request.into(), &VariableContext::new())
        .await
        .with_context(|| format!("no value for {reference}"))?;
    writeln!(out, "{}", resolved.value)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::registry::build_service_with;
    use async_trait::async_trait;
    use ctxvar_application::QuickPickItem;
    use ctxvar_domain::Settings;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Answers each quick pick with the next scripted label.
    struct ByLabel(Mutex<Vec<&'static str>>);

    #[async_trait]
    impl QuickInput for ByLabel {
        async fn show_quick_pick(&self, items: Vec<QuickPickItem>, _: &str) -> Option<String> {
            let mut answers = self.0.lock();
            if answers.is_empty() {
                return None;
            }
            let label = answers.remove(0);
            items
                .into_iter()
                .find(|item| item.label == label)
                .map(|item| item.id)
        }
    }

    fn workspace() -> (TempDir, Settings) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "pub fn answer() -> u8 { 42 }\n").unwrap();
        let mut settings = Settings::default();
        settings.add_workspace_root(dir.path());
        (dir, settings)
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn list_prints_usage_and_description() {
        let (_dir, settings) = workspace();
        let service = build_service_with(&settings, ByLabel(Mutex::new(Vec::new())));
        let mut out = Vec::new();

        list(&service, false, &mut out).unwrap();

        assert_eq!(
            output(out),
            "#file:<uri>\tResolves the contents of a file\n\
             #today:<inIso8601|inUnixSeconds>\tResolves the current date\n"
        );
    }

    #[test]
    fn list_json_is_an_array_of_definitions() {
        let (_dir, settings) = workspace();
        let service = build_service_with(&settings, ByLabel(Mutex::new(Vec::new())));
        let mut out = Vec::new();

        list(&service, true, &mut out).unwrap();

        let text = output(out);
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\"id\": \"file-provider\""));
    }

    #[tokio::test]
    async fn resolve_prints_value_and_context() {
        let (_dir, settings) = workspace();
        let service = build_service_with(&settings, ByLabel(Mutex::new(Vec::new())));
        let mut out = Vec::new();

        resolve(service, "#file", Some("src/lib.rs"), true, &mut out)
            .await
            .unwrap();

        assert_eq!(output(out), "src/lib.rs\n\npub fn answer() -> u8 { 42 }\n");
    }

    #[tokio::test]
    async fn resolve_without_value_fails() {
        let (_dir, settings) = workspace();
        let service = build_service_with(&settings, ByLabel(Mutex::new(Vec::new())));
        let mut out = Vec::new();

        let error = resolve(service, "file", Some("missing.rs"), false, &mut out)
            .await
            .unwrap_err();

        assert!(error.to_string().contains("file"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn expand_substitutes_known_references() {
        let (_dir, settings) = workspace();
        let service = build_service_with(&settings, ByLabel(Mutex::new(Vec::new())));
        let mut out = Vec::new();

        expand(service, "explain #file:src/lib.rs and #nope", &mut out)
            .await
            .unwrap();

        assert_eq!(output(out), "explain src/lib.rs and #nope\n");
    }

    #[tokio::test]
    async fn pick_prints_reference_from_file_picker() {
        let (dir, settings) = workspace();
        let input = ByLabel(Mutex::new(vec!["file"]));
        let service = build_service_with(&settings, ByLabel(Mutex::new(vec!["src/lib.rs"])));
        let mut out = Vec::new();

        pick(service, input, false, &mut out).await.unwrap();

        let expected = format!("#file:{}\n", dir.path().join("src/lib.rs").display());
        assert_eq!(output(out), expected);
    }

    #[tokio::test]
    async fn pick_can_resolve_the_selection() {
        let (_dir, settings) = workspace();
        let input = ByLabel(Mutex::new(vec!["file"]));
        let service = build_service_with(&settings, ByLabel(Mutex::new(vec!["src/lib.rs"])));
        let mut out = Vec::new();

        pick(service, input, true, &mut out).await.unwrap();

        assert_eq!(output(out), "src/lib.rs\n");
    }

    #[tokio::test]
    async fn dismissed_pick_is_an_error() {
        let (_dir, settings) = workspace();
        let service = build_service_with(&settings, ByLabel(Mutex::new(Vec::new())));
        let mut out = Vec::new();

        let error = pick(service, ByLabel(Mutex::new(Vec::new())), false, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ApplicationError>(),
            Some(ApplicationError::Cancelled)
        ));
    }
}
