use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub const EXAMPLE_NAMES: [&str; 2] = ["nomacs-image-viewer", "fontPreviewer"];

pub fn run_maqal(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    work: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            work: tempfile::tempdir().expect("create temporary working dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_maqal"))
            .args(args)
            .current_dir(self.work.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env_remove("MAQAL_GEMINI_API_KEY")
            .env_remove("GOOGLE_API_KEY")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to execute maqal binary")
    }

    /// Working directory the binary runs in; relative `data/` and `output/` live here.
    #[allow(dead_code)]
    pub fn work_dir(&self) -> &Path {
        self.work.path()
    }

    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }

    #[allow(dead_code)]
    pub fn write_examples(&self) {
        let data = self.work.path().join("data");
        std::fs::create_dir_all(&data).expect("create data dir");
        for name in EXAMPLE_NAMES {
            std::fs::write(data.join(format!("{name}.txt")), "نص المثال").expect("write txt");
            std::fs::write(data.join(format!("{name}.md")), "## نص المثال").expect("write md");
            std::fs::write(data.join(format!("{name}.json")), "{\"title\": \"مثال\"}")
                .expect("write json");
        }
    }

    #[allow(dead_code)]
    pub fn write_article(&self, text: &str) -> PathBuf {
        let path = self.work.path().join("article.txt");
        std::fs::write(&path, text).expect("write article");
        path
    }
}
