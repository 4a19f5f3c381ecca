use sovran_optional::{
    BuildPolicies, BuildPolicy, Color, ColorMode, Console, ConsoleHandle, LintCheck, LintConfig,
    LintContext, LintError, LintStatus, PackageLayout, PostBuildLint,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn run(lint: &PostBuildLint) -> Result<(usize, String), LintError> {
    let console = Console::spawn(Vec::new(), false);
    let problems = lint.perform_all_checks(&console.handle());
    let output = String::from_utf8_lossy(&console.finish()?).into_owned();
    Ok((problems, output))
}

#[test]
fn test_clean_package_reports_nothing() -> Result<(), LintError> {
    let layout = PackageLayout::with_include_dir(["zlib.h", "zconf.h"]);
    let lint = PostBuildLint::new(BuildPolicies::new(), layout);

    let (problems, output) = run(&lint)?;
    assert_eq!(problems, 0);
    assert!(output.is_empty(), "unexpected output: {}", output);
    Ok(())
}

#[test]
fn test_empty_package_skips_all_checks() -> Result<(), LintError> {
    let policies = BuildPolicies::new().with(BuildPolicy::EmptyPackage, true);
    let calls = Arc::new(AtomicUsize::new(0));
    let lint = PostBuildLint::new(policies, PackageLayout::new()).with_check(Counting {
        calls: Arc::clone(&calls),
    });

    let (problems, output) = run(&lint)?;
    assert_eq!(problems, 0);
    assert!(output.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_missing_include_directory() -> Result<(), LintError> {
    let lint = PostBuildLint::new(BuildPolicies::new(), PackageLayout::new());

    let (problems, output) = run(&lint)?;
    assert_eq!(problems, 1);
    assert!(output.contains("The folder /include is empty or not present"));
    Ok(())
}

#[test]
fn test_empty_include_directory() -> Result<(), LintError> {
    let layout = PackageLayout::with_include_dir(Vec::<String>::new());
    let lint = PostBuildLint::new(BuildPolicies::new(), layout);

    let (problems, _) = run(&lint)?;
    assert_eq!(problems, 1);
    Ok(())
}

#[test]
fn test_cmake_helper_port_must_not_install_headers() -> Result<(), LintError> {
    let policies = BuildPolicies::new().with(BuildPolicy::CmakeHelperPort, true);

    let with_headers = PostBuildLint::new(
        policies.clone(),
        PackageLayout::with_include_dir(["helper.h"]),
    );
    let (problems, output) = run(&with_headers)?;
    assert_eq!(problems, 1);
    assert!(output.contains("exists in a cmake helper port"));

    let without_headers = PostBuildLint::new(policies, PackageLayout::new());
    let (problems, output) = run(&without_headers)?;
    assert_eq!(problems, 0);
    assert!(output.is_empty());
    Ok(())
}

#[test]
fn test_restricted_headers_are_listed_once_in_order() -> Result<(), LintError> {
    let layout = PackageLayout::with_include_dir(["time.h", "fmt.h", "config.h", "time.h"]);
    let lint = PostBuildLint::new(BuildPolicies::new(), layout);

    let (problems, output) = run(&lint)?;
    assert_eq!(problems, 1);

    let listed: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with("    include/"))
        .collect();
    assert_eq!(listed, ["    include/config.h", "    include/time.h"]);
    assert!(output.contains("VCPKG_POLICY_ALLOW_RESTRICTED_HEADERS"));
    Ok(())
}

#[test]
fn test_allow_restricted_headers_policy() -> Result<(), LintError> {
    let policies = BuildPolicies::new().with(BuildPolicy::AllowRestrictedHeaders, true);
    let layout = PackageLayout::with_include_dir(["stdio.h", "json.h"]);
    let lint = PostBuildLint::new(policies, layout);

    let (problems, output) = run(&lint)?;
    assert_eq!(problems, 0);
    assert!(output.is_empty());
    Ok(())
}

#[test]
fn test_problems_from_every_check_are_summed() -> Result<(), LintError> {
    let policies = BuildPolicies::new().with(BuildPolicy::CmakeHelperPort, true);
    let layout = PackageLayout::with_include_dir(["errno.h"]);
    let lint = PostBuildLint::new(policies, layout).with_check(AlwaysFails);

    let (problems, output) = run(&lint)?;
    assert_eq!(problems, 3);
    assert!(output.contains("cmake helper port"));
    assert!(output.contains("include/errno.h"));
    assert!(output.contains("custom check failed"));
    Ok(())
}

#[test]
fn test_custom_check_sees_layout_and_policies() -> Result<(), LintError> {
    let calls = Arc::new(AtomicUsize::new(0));
    let layout = PackageLayout::with_include_dir(["a.h", "b.h"]);
    let lint = PostBuildLint::new(BuildPolicies::new(), layout).with_check(Counting {
        calls: Arc::clone(&calls),
    });

    let (problems, _) = run(&lint)?;
    assert_eq!(problems, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_config_file_drives_policies() -> Result<(), LintError> {
    let path = std::env::temp_dir().join(format!("sovran-optional-lint-{}.toml", std::process::id()));
    fs::write(
        &path,
        "[policies]\ncmake-helper-port = true\n\n[console]\ncolor = \"always\"\n",
    )?;
    let loaded = LintConfig::from_path(&path);
    fs::remove_file(&path)?;
    let config = loaded?;

    assert_eq!(config.policies.get(BuildPolicy::CmakeHelperPort), true);
    assert!(!config.policies.get(BuildPolicy::EmptyPackage).has_value());
    assert_eq!(config.color, ColorMode::Always);

    let lint = PostBuildLint::new(config.policies, PackageLayout::new());
    let (problems, _) = run(&lint)?;
    assert_eq!(problems, 0);
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let path = std::env::temp_dir().join("sovran-optional-does-not-exist.toml");
    assert!(matches!(LintConfig::from_path(path), Err(LintError::Io(_))));
}

/// Counts include files and records that it ran.
struct Counting {
    calls: Arc<AtomicUsize>,
}

impl LintCheck for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn run(&self, context: &LintContext<'_>, _console: &ConsoleHandle) -> LintStatus {
        let files = context.layout.include_files().map(Vec::len).value_or(0usize);
        self.calls.fetch_add(files, Ordering::SeqCst);
        if context.policies.is_enabled(BuildPolicy::EmptyPackage) {
            LintStatus::ProblemDetected
        } else {
            LintStatus::Success
        }
    }
}

struct AlwaysFails;

impl LintCheck for AlwaysFails {
    fn name(&self) -> &'static str {
        "always-fails"
    }

    fn run(&self, _context: &LintContext<'_>, console: &ConsoleHandle) -> LintStatus {
        let _ = console.println(Color::Error, "custom check failed");
        LintStatus::ProblemDetected
    }
}

struct Explodes;

impl LintCheck for Explodes {
    fn name(&self) -> &'static str {
        "explodes"
    }

    fn run(&self, _context: &LintContext<'_>, _console: &ConsoleHandle) -> LintStatus {
        panic!("check exploded")
    }
}

#[test]
#[should_panic(expected = "check exploded")]
fn test_panicking_check_is_reraised_after_all_checks_finish() {
    let layout = PackageLayout::with_include_dir(["zlib.h"]);
    let lint = PostBuildLint::new(BuildPolicies::new(), layout).with_check(Explodes);
    let console = Console::spawn(Vec::new(), false);
    lint.perform_all_checks(&console.handle());
}
