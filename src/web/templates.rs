use minijinja::{path_loader, AutoEscape, Environment};
use std::path::Path;

/// Builds the template environment used by every page.
pub fn environment(template_dir: impl AsRef<Path>) -> Environment<'static> {
    let mut env = Environment::new();

    // Templates end in `.jinja`, which minijinja would not escape by default.
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    fn hostname(value: String) -> String {
        let without_scheme = value
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&value);
        without_scheme
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string()
    }
    env.add_filter("hostname", hostname);

    env.add_global("app_name", "Celebrity Search");
    env.set_loader(path_loader(template_dir.as_ref()));
    env
}
