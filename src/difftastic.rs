use std::process::{Command, ExitStatus};

use camino::Utf8Path;

use crate::display::DisplayMode;

pub const DEFAULT_PROGRAM: &str = "difft";

/// Pass-through flag that makes difftastic exit non-zero when it finds differences
const EXIT_CODE_FLAG: &str = "--exit-code";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{program} --version run failed")]
    NotInstalled {
        program: String,
        #[source]
        cause: std::io::Error,
    },
    #[error("{program} --version run failed: {status}")]
    Unusable { program: String, status: ExitStatus },
    #[error("could not start {program}")]
    Spawn {
        program: String,
        #[source]
        cause: std::io::Error,
    },
    #[error("difftastic run failed: {0}")]
    Failed(ExitStatus),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Success,
    /// Non-zero exit the caller asked for with `--exit-code`
    Differences(i32),
}

#[derive(Debug, Clone)]
pub struct Difftastic {
    program: String,
    display: DisplayMode,
    passthrough: Vec<String>,
}

impl Difftastic {
    pub fn new(
        program: impl Into<String>,
        display: DisplayMode,
        passthrough: Vec<String>,
    ) -> Self {
        Self {
            program: program.into(),
            display,
            passthrough,
        }
    }

    pub fn expects_exit_code(&self) -> bool {
        self.passthrough.iter().any(|arg| arg == EXIT_CODE_FLAG)
    }

    /// Make sure the program is there before doing any work
    pub fn check(&self) -> Result<(), Error> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|cause| Error::NotInstalled {
                program: self.program.clone(),
                cause,
            })?;
        if !output.status.success() {
            return Err(Error::Unusable {
                program: self.program.clone(),
                status: output.status,
            });
        }
        log::debug!(
            "using {}",
            String::from_utf8_lossy(&output.stdout).trim_end()
        );
        Ok(())
    }

    /// `--display <mode> <dirs...> <pass-through...>`
    pub fn args(&self, dirs: &[&str]) -> Vec<String> {
        let mut args = vec!["--display".to_string(), self.display.to_string()];
        args.extend(dirs.iter().map(|d| d.to_string()));
        args.extend(self.passthrough.iter().cloned());
        args
    }

    /// Run the program from `cwd`. Output goes straight to our stdout/stderr.
    pub fn run(&self, cwd: &Utf8Path, dirs: &[&str]) -> Result<Outcome, Error> {
        let args = self.args(dirs);
        log::debug!("running {} with args: {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(cwd)
            .status()
            .map_err(|cause| Error::Spawn {
                program: self.program.clone(),
                cause,
            })?;

        self.outcome(status)
    }

    fn outcome(&self, status: ExitStatus) -> Result<Outcome, Error> {
        if status.success() {
            return Ok(Outcome::Success);
        }
        match status.code() {
            Some(code) if self.expects_exit_code() => Ok(Outcome::Differences(code)),
            _ => Err(Error::Failed(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Difftastic, Error};
    use crate::display::DisplayMode;

    #[test]
    fn display_and_dirs_come_before_passthrough() {
        let difft = Difftastic::new(
            "difft",
            DisplayMode::Inline,
            vec!["--tab-width=10".to_string(), "--color=never".to_string()],
        );

        assert_eq!(
            difft.args(&["0", "1"]),
            vec![
                "--display",
                "inline",
                "0",
                "1",
                "--tab-width=10",
                "--color=never"
            ]
        );
    }

    #[test]
    fn exit_code_is_expected_only_when_asked_for() {
        let plain = Difftastic::new("difft", DisplayMode::default(), vec![]);
        let asked = Difftastic::new(
            "difft",
            DisplayMode::default(),
            vec!["--exit-code".to_string()],
        );

        assert!(!plain.expects_exit_code());
        assert!(asked.expects_exit_code());
    }

    #[test]
    fn missing_program_is_reported() {
        let difft = Difftastic::new(
            "diffyaml-surely-not-installed",
            DisplayMode::default(),
            vec![],
        );

        let err = difft.check().unwrap_err();
        assert!(matches!(err, Error::NotInstalled { .. }));
        assert_eq!(
            err.to_string(),
            "diffyaml-surely-not-installed --version run failed"
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failure_unless_expected() {
        use std::os::unix::process::ExitStatusExt;

        use super::Outcome;

        let status = std::process::ExitStatus::from_raw(1 << 8);
        let plain = Difftastic::new("difft", DisplayMode::default(), vec![]);
        let asked = Difftastic::new(
            "difft",
            DisplayMode::default(),
            vec!["--exit-code".to_string()],
        );

        assert!(matches!(plain.outcome(status), Err(Error::Failed(_))));
        assert_eq!(asked.outcome(status).unwrap(), Outcome::Differences(1));
        assert_eq!(
            plain.outcome(std::process::ExitStatus::from_raw(0)).unwrap(),
            Outcome::Success
        );
    }
}
