//! Image file pickers.
//!
//! The viewer asks for a file through [`FilePicker`]. Native pickers shell
//! out to whatever chooser the host OS ships (PowerShell, `osascript`,
//! `zenity`, `kdialog`) so the dialog looks at home; the toolkit dialog from
//! `rfd` is the fallback whenever that fails.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use chromalab_imaging::SUPPORTED_EXTENSIONS;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Something that can ask the user for one image file.
pub trait FilePicker {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Block until the user picks a file or gives up.
    fn pick_image_file(&self, initial_dir: &Path, title: &str) -> Option<PathBuf>;
}

/// Try `primary`, then `fallback` if it produced nothing. A path that turns
/// out not to be an existing file is discarded.
pub fn pick_with_fallback(
    primary: &dyn FilePicker,
    fallback: &dyn FilePicker,
    initial_dir: &Path,
    title: &str,
) -> Option<PathBuf> {
    let path = primary
        .pick_image_file(initial_dir, title)
        .or_else(|| {
            debug!("{} picked nothing, falling back to {}", primary.name(), fallback.name());
            fallback.pick_image_file(initial_dir, title)
        })?;
    if path.is_file() {
        info!("Picked {}", path.display());
        Some(path)
    } else {
        warn!("Ignoring picked path that is not a file: {}", path.display());
        None
    }
}

// ---------------------------------------------------------------------------
// Native pickers
// ---------------------------------------------------------------------------

/// Builds the argument list for one chooser invocation.
type ArgsBuilder = fn(initial_dir: &Path, title: &str) -> Vec<String>;

/// One external chooser program, run as a blocking subprocess. Whatever it
/// prints to stdout (trimmed) is taken as the chosen path.
#[derive(Clone)]
pub struct CommandPicker {
    program: &'static str,
    build_args: ArgsBuilder,
    timeout: Duration,
}

impl CommandPicker {
    pub fn new(program: &'static str, build_args: ArgsBuilder, timeout: Duration) -> Self {
        Self {
            program,
            build_args,
            timeout,
        }
    }

    pub fn powershell(timeout: Duration) -> Self {
        Self::new("powershell", powershell_args, timeout)
    }

    pub fn osascript(timeout: Duration) -> Self {
        Self::new("osascript", osascript_args, timeout)
    }

    pub fn zenity(timeout: Duration) -> Self {
        Self::new("zenity", zenity_args, timeout)
    }

    pub fn kdialog(timeout: Duration) -> Self {
        Self::new("kdialog", kdialog_args, timeout)
    }

    pub fn args(&self, initial_dir: &Path, title: &str) -> Vec<String> {
        (self.build_args)(initial_dir, title)
    }
}

impl FilePicker for CommandPicker {
    fn name(&self) -> &str {
        self.program
    }

    fn pick_image_file(&self, initial_dir: &Path, title: &str) -> Option<PathBuf> {
        let program = match which::which(self.program) {
            Ok(p) => p,
            Err(e) => {
                debug!("{} not available: {e}", self.program);
                return None;
            }
        };
        run_with_timeout(&program, self.args(initial_dir, title), self.timeout).map(PathBuf::from)
    }
}

/// The chooser chain for the host OS, tried in order.
pub struct NativePicker {
    chain: Vec<CommandPicker>,
}

impl NativePicker {
    pub fn new(chain: Vec<CommandPicker>) -> Self {
        Self { chain }
    }

    #[cfg(target_os = "windows")]
    pub fn for_host(timeout: Duration) -> Self {
        Self::new(vec![CommandPicker::powershell(timeout)])
    }

    #[cfg(target_os = "macos")]
    pub fn for_host(timeout: Duration) -> Self {
        Self::new(vec![CommandPicker::osascript(timeout)])
    }

    #[cfg(target_os = "linux")]
    pub fn for_host(timeout: Duration) -> Self {
        Self::new(vec![CommandPicker::zenity(timeout), CommandPicker::kdialog(timeout)])
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    pub fn for_host(_timeout: Duration) -> Self {
        Self::new(Vec::new())
    }

    pub fn programs(&self) -> Vec<&str> {
        self.chain.iter().map(|p| p.name()).collect()
    }
}

impl FilePicker for NativePicker {
    fn name(&self) -> &str {
        "native"
    }

    fn pick_image_file(&self, initial_dir: &Path, title: &str) -> Option<PathBuf> {
        self.chain
            .iter()
            .find_map(|picker| picker.pick_image_file(initial_dir, title))
    }
}

/// The toolkit's own file dialog.
#[derive(Default)]
pub struct DialogPicker;

impl FilePicker for DialogPicker {
    fn name(&self) -> &str {
        "dialog"
    }

    fn pick_image_file(&self, initial_dir: &Path, title: &str) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Images", &SUPPORTED_EXTENSIONS);
        if initial_dir.is_dir() {
            dialog = dialog.set_directory(initial_dir);
        }
        dialog.pick_file()
    }
}

/// Run `program` and return its trimmed stdout, or `None` on spawn failure,
/// timeout, or empty output. The child is killed when the timeout expires.
fn run_with_timeout(program: &Path, args: Vec<String>, timeout: Duration) -> Option<String> {
    let handle = match duct::cmd(program, args)
        .stdout_capture()
        .stderr_null()
        .unchecked()
        .start()
    {
        Ok(h) => h,
        Err(e) => {
            warn!("Failed to start {}: {e}", program.display());
            return None;
        }
    };

    let deadline = Instant::now() + timeout;
    loop {
        match handle.try_wait() {
            Ok(Some(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
                return (!stdout.is_empty()).then_some(stdout);
            }
            Ok(None) if Instant::now() >= deadline => {
                warn!(
                    "{} did not answer within {}s",
                    program.display(),
                    timeout.as_secs()
                );
                if let Err(e) = handle.kill() {
                    debug!("Could not kill {}: {e}", program.display());
                }
                return None;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                warn!("{} failed: {e}", program.display());
                return None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Per-program argument builders
// ---------------------------------------------------------------------------

fn glob_patterns(separator: &str) -> String {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!("*.{ext}"))
        .collect::<Vec<_>>()
        .join(separator)
}

fn powershell_args(initial_dir: &Path, _title: &str) -> Vec<String> {
    let mut script = format!(
        "Add-Type -AssemblyName System.Windows.Forms;\
         $ofd = New-Object System.Windows.Forms.OpenFileDialog;\
         $ofd.Filter = 'Images|{}';",
        glob_patterns(";")
    );
    let dir = initial_dir.to_string_lossy();
    if !dir.is_empty() {
        // Single quotes are doubled inside a PowerShell literal.
        script.push_str(&format!(
            "$ofd.InitialDirectory = '{}';",
            dir.replace('\'', "''")
        ));
    }
    script.push_str(
        "if ($ofd.ShowDialog() -eq [System.Windows.Forms.DialogResult]::OK) \
         { Write-Output $ofd.FileName }",
    );
    vec!["-NoProfile".into(), "-Command".into(), script]
}

fn osascript_args(_initial_dir: &Path, title: &str) -> Vec<String> {
    let prompt = title.replace('\\', "\\\\").replace('"', "\\\"");
    [
        "try".to_string(),
        format!("  set f to (choose file with prompt \"{prompt}\")"),
        "  POSIX path of f".to_string(),
        "on error".to_string(),
        "  return \"\"".to_string(),
        "end try".to_string(),
    ]
    .into_iter()
    .flat_map(|line| ["-e".to_string(), line])
    .collect()
}

fn zenity_args(initial_dir: &Path, title: &str) -> Vec<String> {
    let mut args = vec![
        "--file-selection".to_string(),
        "--title".to_string(),
        title.to_string(),
        format!("--file-filter=Images | {}", glob_patterns(" ")),
    ];
    if !initial_dir.as_os_str().is_empty() {
        // Trailing separator makes zenity open the directory itself.
        args.push("--filename".into());
        args.push(initial_dir.join("").to_string_lossy().into_owned());
    }
    args
}

fn kdialog_args(initial_dir: &Path, _title: &str) -> Vec<String> {
    let mut args = vec!["--getopenfilename".to_string()];
    if !initial_dir.as_os_str().is_empty() {
        args.push(initial_dir.to_string_lossy().into_owned());
    }
    args.push(glob_patterns(" "));
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Returns a fixed answer and counts how often it was asked.
    struct FixedPicker {
        answer: Option<PathBuf>,
        calls: Cell<usize>,
    }

    impl FixedPicker {
        fn new(answer: Option<PathBuf>) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
            }
        }
    }

    impl FilePicker for FixedPicker {
        fn name(&self) -> &str {
            "fixed"
        }

        fn pick_image_file(&self, _initial_dir: &Path, _title: &str) -> Option<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            self.answer.clone()
        }
    }

    fn existing_file() -> PathBuf {
        let dir = std::env::temp_dir().join("chromalab_test_picker");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("picked.png");
        std::fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn primary_answer_wins() {
        let file = existing_file();
        let primary = FixedPicker::new(Some(file.clone()));
        let fallback = FixedPicker::new(None);
        let picked = pick_with_fallback(&primary, &fallback, Path::new("/"), "t");
        assert_eq!(picked, Some(file));
        assert_eq!(fallback.calls.get(), 0);
    }

    #[test]
    fn empty_primary_falls_back() {
        let file = existing_file();
        let primary = FixedPicker::new(None);
        let fallback = FixedPicker::new(Some(file.clone()));
        let picked = pick_with_fallback(&primary, &fallback, Path::new("/"), "t");
        assert_eq!(picked, Some(file));
        assert_eq!(primary.calls.get(), 1);
        assert_eq!(fallback.calls.get(), 1);
    }

    #[test]
    fn non_file_answer_is_discarded() {
        let primary = FixedPicker::new(Some(std::env::temp_dir()));
        let fallback = FixedPicker::new(None);
        assert_eq!(
            pick_with_fallback(&primary, &fallback, Path::new("/"), "t"),
            None
        );
    }

    #[test]
    fn missing_program_yields_none() {
        let picker = CommandPicker::new(
            "chromalab-no-such-picker",
            |_, _| Vec::new(),
            Duration::from_secs(1),
        );
        assert_eq!(picker.pick_image_file(Path::new("/"), "t"), None);
    }

    #[test]
    fn zenity_arguments() {
        let args = CommandPicker::zenity(Duration::from_secs(60))
            .args(Path::new("/home/me/Pictures"), "Select image");
        assert_eq!(args[0], "--file-selection");
        assert_eq!(args[1..3], ["--title".to_string(), "Select image".to_string()]);
        assert_eq!(
            args[3],
            "--file-filter=Images | *.png *.jpg *.jpeg *.bmp *.tiff *.gif"
        );
        assert_eq!(args[4], "--filename");
        assert!(args[5].starts_with("/home/me/Pictures"));
        assert!(args[5].ends_with(std::path::MAIN_SEPARATOR));
    }

    #[test]
    fn kdialog_arguments() {
        let args = CommandPicker::kdialog(Duration::from_secs(60)).args(Path::new("/data"), "x");
        assert_eq!(
            args,
            vec![
                "--getopenfilename".to_string(),
                "/data".to_string(),
                "*.png *.jpg *.jpeg *.bmp *.tiff *.gif".to_string(),
            ]
        );
    }

    #[test]
    fn powershell_script_escapes_quotes() {
        let args = CommandPicker::powershell(Duration::from_secs(60))
            .args(Path::new("C:/Users/o'neil"), "x");
        assert_eq!(args[..2], ["-NoProfile".to_string(), "-Command".to_string()]);
        assert!(args[2].contains("InitialDirectory = 'C:/Users/o''neil'"));
        assert!(args[2].contains("'Images|*.png;*.jpg;*.jpeg;*.bmp;*.tiff;*.gif'"));
    }

    #[test]
    fn osascript_prompt_is_quoted() {
        let args = CommandPicker::osascript(Duration::from_secs(60))
            .args(Path::new("/"), "Pick \"one\"");
        assert_eq!(args.len(), 12);
        assert!(args.iter().step_by(2).all(|a| a == "-e"));
        assert_eq!(args[3], "  set f to (choose file with prompt \"Pick \\\"one\\\"\")");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_chain_prefers_zenity() {
        let native = NativePicker::for_host(Duration::from_secs(60));
        assert_eq!(native.programs(), vec!["zenity", "kdialog"]);
    }
}
