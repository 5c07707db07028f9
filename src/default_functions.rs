use directories::ProjectDirs;
use std::path::PathBuf;

pub(crate) fn default_functions_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "eqcost")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("default.rhai");
    Some(path)
}

/// Put `default.rhai` from the config dir in front of the user's function
/// files, when it exists.
pub(crate) fn prepend_default_functions_if_present(
    functions: &mut Vec<PathBuf>,
    no_default_functions: bool,
) {
    if no_default_functions {
        return;
    }
    let Some(path) = default_functions_path() else {
        return;
    };
    if path.is_file() {
        tracing::debug!(path = %path.display(), "using default functions");
        functions.insert(0, path);
    }
}
