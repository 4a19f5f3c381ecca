use sovran_optional::{
    ColorMode, Console, LintConfig, LintError, PackageLayout, PostBuildLint,
};
use std::io;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
[policies]
cmake-helper-port = false

[console]
color = "auto"
"#;

fn main() -> Result<(), LintError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Policies come from a TOML document, or a file passed as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => LintConfig::from_path(path)?,
        None => CONFIG.parse()?,
    };

    // A package that ships one header too many
    let layout = PackageLayout::with_include_dir(["mylib.h", "config.h", "unistd.h"]);
    let lint = PostBuildLint::new(config.policies, layout);

    // All checks run in parallel; the console thread keeps their output whole
    let console = Console::spawn(io::stderr(), config.color.enabled_for_stderr());
    let problems = lint.perform_all_checks(&console.handle());
    console.finish()?;

    if problems == 0 {
        println!("All post-build checks passed");
    } else {
        println!("Found {} post-build check error(s)", problems);
    }

    // Colour mode resolution for reference
    println!("color when piped with auto: {}", ColorMode::Auto.enabled_for(false));
    Ok(())
}
