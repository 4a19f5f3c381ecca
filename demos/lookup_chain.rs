use sovran_optional::{line_info, LiteOptional, Optional, OptionalMut};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

// A tiny port registry: name -> version, version -> download URL
struct Registry {
    versions: HashMap<&'static str, &'static str>,
    urls: HashMap<&'static str, &'static str>,
}

impl Registry {
    fn new() -> Self {
        let mut versions = HashMap::new();
        versions.insert("zlib", "1.3.1");
        versions.insert("fmt", "10.2.1");
        versions.insert("openssl", "3.3.0");

        let mut urls = HashMap::new();
        urls.insert("1.3.1", "https://zlib.net/zlib-1.3.1.tar.gz");
        urls.insert("10.2.1", "https://github.com/fmtlib/fmt/archive/10.2.1.tar.gz");

        Self { versions, urls }
    }

    fn version(&self, port: &str) -> Optional<String> {
        self.versions.get(port).map(|v| v.to_string()).into()
    }

    fn url(&self, version: &str) -> Optional<String> {
        self.urls.get(version).map(|u| u.to_string()).into()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = Registry::new();

    // Chain lookups; any missing link leaves the result empty
    for port in ["zlib", "fmt", "openssl", "curl"] {
        let url = registry.version(port).then(|version| registry.url(version));
        println!("{:<8} -> {}", port, url.value_or("<no download>"));
    }

    // Transform without unpacking
    let major = registry
        .version("fmt")
        .into_map(|version| version.split('.').next().unwrap_or("0").to_string());
    println!("fmt major version: {}", major.value_or_exit(line_info!()));

    // Edit a value owned elsewhere through an alias
    let mut features = vec![String::from("core")];
    {
        let mut alias = OptionalMut::new(&mut features);
        alias.value_mut().push(String::from("zstd"));
    }
    println!("features: {:?}", features);

    // The lightweight variant for hot loops
    let mut last_seen: LiteOptional<u64> = LiteOptional::empty();
    for build in 1..=3u64 {
        last_seen.emplace(build);
    }
    println!("last build: {}", last_seen.value());

    // Presence is mandatory here; a missing entry stops the process with a located message
    let zlib = registry.version("zlib");
    println!("zlib is pinned to {}", zlib.value_or_exit(line_info!()));
}
