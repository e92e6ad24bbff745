//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to name the framework it scaffolds, the
//! environment variables it honours, and the commands shown after generation.

/// Configuration trait for the scaffolded product
///
/// Defines:
/// - Product identity (name, display name, banner)
/// - Framework package and local-development environment variables
/// - Post-setup commands and instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for diagnostics)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Package name of the framework dependency
    fn framework_package(&self) -> &'static str;

    /// Environment variable that switches on local framework mode when set to `1`
    fn local_mode_env(&self) -> &'static str;

    /// Editor extension id recommended in the final panel
    fn editor_extension(&self) -> &'static str;

    /// Framework CLI invocation that starts the development server (run inside the project env)
    fn dev_command(&self) -> &'static [&'static str];

    /// ASCII banner printed at start-up
    fn banner(&self) -> &'static str {
        ""
    }

    /// URL for product documentation, shown in the final panel when set
    fn docs_url(&self) -> Option<&'static str> {
        None
    }

    /// Destination offered when the user just presses enter
    fn default_directory(&self) -> &'static str {
        "./my-app"
    }

    /// Message for the initial commit in the generated repository
    fn commit_message(&self) -> &'static str {
        "feat: initial project structure"
    }

    /// Shell commands the user runs to enter the project after generation.
    /// Includes a manual sync step when dependency installation did not succeed.
    fn next_steps(&self, location: &str, synced: bool) -> Vec<String> {
        let mut steps = vec![format!("cd {}", location)];

        if !synced {
            steps.push("uv sync".to_string());
        }

        if cfg!(windows) {
            steps.push(r".venv\Scripts\activate".to_string());
        } else {
            steps.push("source .venv/bin/activate".to_string());
        }

        steps.push(self.dev_command().join(" "));
        steps
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone)]
    pub(crate) struct TestProduct;

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "pywire"
        }

        fn display_name(&self) -> &'static str {
            "PyWire"
        }

        fn framework_package(&self) -> &'static str {
            "pywire"
        }

        fn local_mode_env(&self) -> &'static str {
            "TEST_USE_LOCAL_PYWIRE"
        }

        fn editor_extension(&self) -> &'static str {
            "pywire.pywire"
        }

        fn dev_command(&self) -> &'static [&'static str] {
            &["pywire", "dev"]
        }
    }

    #[test]
    fn test_next_steps_after_successful_sync() {
        let steps = TestProduct.next_steps("./my-app", true);
        assert_eq!(steps.first().map(String::as_str), Some("cd ./my-app"));
        assert!(!steps.iter().any(|s| s == "uv sync"));
        assert_eq!(steps.last().map(String::as_str), Some("pywire dev"));
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_next_steps_include_manual_sync() {
        let steps = TestProduct.next_steps("./my-app", false);
        assert_eq!(steps[1], "uv sync");
        assert_eq!(steps.len(), 4);
    }
}
