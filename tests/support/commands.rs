//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an untold command running in the test workspace.
    ///
    /// Variables that would change environment or key resolution are
    /// cleared, and colors are off.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("untold").expect("failed to find untold binary");
        cmd.env_remove("UNTOLD_ENV");
        cmd.env_remove("UNTOLD_PRIVATE_KEY");
        cmd.env_remove("UNTOLD_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `untold init`.
    pub fn init(&self) -> Output {
        self.cmd()
            .arg("init")
            .output()
            .expect("failed to run untold init")
    }

    /// Shortcut for `untold create-vault --env <env>`.
    pub fn create_vault(&self, env: &str) -> Output {
        self.cmd()
            .args(["create-vault", "--env", env])
            .output()
            .expect("failed to run untold create-vault")
    }

    /// Shortcut for `untold rotate-vault --env <env>`.
    pub fn rotate_vault(&self, env: &str) -> Output {
        self.cmd()
            .args(["rotate-vault", "--env", env])
            .output()
            .expect("failed to run untold rotate-vault")
    }

    /// Shortcut for `untold add-secret`, value piped on stdin.
    pub fn add(&self, env: &str, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["add-secret", "--env", env, name])
            .write_stdin(format!("{}\n", value))
            .output()
            .expect("failed to run untold add-secret")
    }

    /// Shortcut for `untold change-secret`, value piped on stdin.
    pub fn change(&self, env: &str, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["change-secret", "--env", env, name])
            .write_stdin(format!("{}\n", value))
            .output()
            .expect("failed to run untold change-secret")
    }

    /// Shortcut for `untold show-secret`.
    pub fn show(&self, env: &str, name: &str) -> Output {
        self.cmd()
            .args(["show-secret", "--env", env, name])
            .output()
            .expect("failed to run untold show-secret")
    }

    /// Shortcut for `untold show-secret --key <key>`.
    pub fn show_with_key(&self, env: &str, key: &str, name: &str) -> Output {
        self.cmd()
            .args(["show-secret", "--env", env, "--key", key, name])
            .output()
            .expect("failed to run untold show-secret --key")
    }
}
