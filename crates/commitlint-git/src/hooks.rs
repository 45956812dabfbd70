//! commit-msg hook installation and management
//!
//! The hook is a small shell script in the repository's hooks directory that
//! runs `commitlint check` on the message file git hands it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use commitlint_core::error::HookError;

/// Filename of the managed hook
pub const HOOK_NAME: &str = "commit-msg";

/// Marker comment embedded in the generated hook script
const COMMITLINT_MARKER: &str = "# managed by commitlint, do not edit";

/// Suffix for a backed-up foreign hook
const BACKUP_SUFFIX: &str = ".pre-commitlint";

/// State of the commit-msg hook in a hooks directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookStatus {
    /// A commitlint-managed hook is in place
    pub installed: bool,
    /// A hook exists that commitlint does not manage
    pub foreign: bool,
    /// A foreign hook was backed up on install
    pub has_backup: bool,
}

/// Generate the hook script
fn hook_script() -> String {
    format!(
        r#"#!/bin/sh
{COMMITLINT_MARKER}
exec commitlint check "$1"
"#
    )
}

/// Check whether a file at `path` is a commitlint-managed hook
pub fn is_commitlint_hook(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.contains(COMMITLINT_MARKER))
        .unwrap_or(false)
}

fn backup_path(hook_path: &Path) -> PathBuf {
    hook_path.with_file_name(format!("{HOOK_NAME}{BACKUP_SUFFIX}"))
}

fn install_failed(reason: impl Into<String>) -> HookError {
    HookError::InstallFailed {
        hook: HOOK_NAME.to_string(),
        reason: reason.into(),
    }
}

fn uninstall_failed(reason: impl Into<String>) -> HookError {
    HookError::UninstallFailed {
        hook: HOOK_NAME.to_string(),
        reason: reason.into(),
    }
}

/// Install the commit-msg hook into `hooks_dir`, creating it if needed
///
/// An existing hook that commitlint does not manage is renamed to
/// `commit-msg.pre-commitlint` first. Install fails rather than replace an
/// earlier backup.
pub fn install_hook(hooks_dir: &Path) -> Result<(), HookError> {
    fs::create_dir_all(hooks_dir).map_err(|e| install_failed(e.to_string()))?;
    let path = hooks_dir.join(HOOK_NAME);

    if path.exists() && !is_commitlint_hook(&path) {
        let backup = backup_path(&path);
        if backup.exists() {
            return Err(install_failed(format!(
                "a foreign hook is in place and {} already holds a backup",
                backup.display()
            )));
        }
        info!(backup = %backup.display(), "backing up existing commit-msg hook");
        fs::rename(&path, &backup)
            .map_err(|e| install_failed(format!("failed to back up existing hook: {e}")))?;
    }

    fs::write(&path, hook_script()).map_err(|e| install_failed(e.to_string()))?;
    make_executable(&path)
        .map_err(|e| install_failed(format!("failed to set permissions: {e}")))?;

    info!(path = %path.display(), "installed commit-msg hook");
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Remove the managed commit-msg hook, restoring a backup if present
pub fn uninstall_hook(hooks_dir: &Path) -> Result<(), HookError> {
    let path = hooks_dir.join(HOOK_NAME);

    if !path.exists() {
        debug!("hook not installed, nothing to remove");
        return Ok(());
    }

    if !is_commitlint_hook(&path) {
        warn!("commit-msg hook exists but is not managed by commitlint, skipping");
        return Ok(());
    }

    fs::remove_file(&path).map_err(|e| uninstall_failed(e.to_string()))?;

    let backup = backup_path(&path);
    if backup.exists() {
        info!("restoring pre-commitlint backup");
        fs::rename(&backup, &path)
            .map_err(|e| uninstall_failed(format!("failed to restore backup: {e}")))?;
    }

    debug!("uninstalled commit-msg hook");
    Ok(())
}

/// Report the state of the commit-msg hook
pub fn status(hooks_dir: &Path) -> HookStatus {
    let path = hooks_dir.join(HOOK_NAME);
    let exists = path.exists();
    let installed = exists && is_commitlint_hook(&path);

    HookStatus {
        installed,
        foreign: exists && !installed,
        has_backup: backup_path(&path).exists(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_hooks_dir() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let hooks = dir.path().join(".git/hooks");
        fs::create_dir_all(&hooks).unwrap();
        (dir, hooks)
    }

    #[test]
    fn test_hook_script_contains_marker() {
        let script = hook_script();
        assert!(script.contains(COMMITLINT_MARKER));
        assert!(script.contains("commitlint check \"$1\""));
    }

    #[test]
    fn test_install_and_detect() {
        let (_dir, hooks) = setup_hooks_dir();
        install_hook(&hooks).unwrap();

        let path = hooks.join(HOOK_NAME);
        assert!(is_commitlint_hook(&path));
        assert_eq!(
            status(&hooks),
            HookStatus {
                installed: true,
                foreign: false,
                has_backup: false,
            }
        );
    }

    #[test]
    fn test_install_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let hooks = dir.path().join("hooks");
        install_hook(&hooks).unwrap();
        assert!(hooks.join(HOOK_NAME).exists());
    }

    #[test]
    fn test_install_twice_keeps_single_hook() {
        let (_dir, hooks) = setup_hooks_dir();
        install_hook(&hooks).unwrap();
        install_hook(&hooks).unwrap();
        assert!(!status(&hooks).has_backup);
    }

    #[test]
    fn test_install_backs_up_and_uninstall_restores() {
        let (_dir, hooks) = setup_hooks_dir();
        let hook_path = hooks.join(HOOK_NAME);
        fs::write(&hook_path, "#!/bin/sh\necho old hook\n").unwrap();
        assert!(status(&hooks).foreign);

        install_hook(&hooks).unwrap();
        assert!(is_commitlint_hook(&hook_path));
        assert!(status(&hooks).has_backup);

        uninstall_hook(&hooks).unwrap();
        assert_eq!(
            fs::read_to_string(&hook_path).unwrap(),
            "#!/bin/sh\necho old hook\n"
        );
        assert!(!status(&hooks).has_backup);
    }

    #[test]
    fn test_uninstall_removes_hook() {
        let (_dir, hooks) = setup_hooks_dir();
        install_hook(&hooks).unwrap();
        uninstall_hook(&hooks).unwrap();
        assert!(!hooks.join(HOOK_NAME).exists());
        assert!(!status(&hooks).installed);
    }

    #[test]
    fn test_uninstall_skips_foreign_hook() {
        let (_dir, hooks) = setup_hooks_dir();
        let hook_path = hooks.join(HOOK_NAME);
        fs::write(&hook_path, "#!/bin/sh\necho foreign\n").unwrap();

        uninstall_hook(&hooks).unwrap();
        assert!(hook_path.exists());
    }

    #[test]
    fn test_install_keeps_existing_backup() {
        let (_dir, hooks) = setup_hooks_dir();
        let hook_path = hooks.join(HOOK_NAME);
        fs::write(&hook_path, "#!/bin/sh\necho first\n").unwrap();
        install_hook(&hooks).unwrap();

        fs::write(&hook_path, "#!/bin/sh\necho second\n").unwrap();
        let err = install_hook(&hooks).unwrap_err();
        assert!(matches!(err, HookError::InstallFailed { .. }));

        assert_eq!(
            fs::read_to_string(backup_path(&hook_path)).unwrap(),
            "#!/bin/sh\necho first\n"
        );
        assert_eq!(
            fs::read_to_string(&hook_path).unwrap(),
            "#!/bin/sh\necho second\n"
        );
    }
}
