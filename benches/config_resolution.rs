//! Benchmarks for configuration materialisation and path normalization.
//!
//! These run on in-memory documents, so they measure the typed schema and
//! mapping derivation without any filesystem access.

use chassis::config::{Configuration, PathNormalizer};
use chassis::extension::{folder_name, ExtensionSource};
use chassis::output::MemoryReporter;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Configuration with everything inside the project root.
const LOCAL_CONFIG: &str = r#"
hosts: [vagrant.local]
database:
  prefix: wp_
paths:
  base: .
  wp: wp
  content: content
"#;

/// Configuration mounting base and content from outside the project.
const EXTERNAL_CONFIG: &str = r#"
version: 3
hosts: [vagrant.local, alias.local]
database:
  prefix: wp_
paths:
  base: /srv/site
  wp: wp
  content: /data/content
php: 8.1
nfs: "yes"
auto_update:
  core: true
  extensions: true
extensions:
  - nodejs
  - acct/repo
  - https://example.com/tools.git
"#;

fn generate_config(num_extensions: usize) -> String {
    let mut config = String::from(LOCAL_CONFIG);
    config.push_str("extensions:\n");
    for i in 0..num_extensions {
        config.push_str(&format!("  - account-{}/extension-{}\n", i, i));
    }
    config
}

fn parse(yaml: &str) -> Configuration {
    Configuration::from_value(serde_yaml::from_str(yaml).unwrap()).unwrap()
}

fn bench_materialise(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialise");

    group.bench_function("local", |b| b.iter(|| parse(black_box(LOCAL_CONFIG))));
    group.bench_function("external", |b| {
        b.iter(|| parse(black_box(EXTERNAL_CONFIG)))
    });

    for count in [10, 100, 1000] {
        let config = generate_config(count);
        group.bench_with_input(
            BenchmarkId::new("extensions", count),
            &config,
            |b, config| b.iter(|| parse(black_box(config))),
        );
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let reporter = MemoryReporter::new();
    let normalizer = PathNormalizer::new("/proj", &reporter);

    for (name, yaml) in [("local", LOCAL_CONFIG), ("external", EXTERNAL_CONFIG)] {
        let config = parse(yaml);
        group.bench_with_input(BenchmarkId::new("paths", name), &config, |b, config| {
            b.iter(|| normalizer.normalize(black_box(config)))
        });
    }

    group.finish();
}

fn bench_identifiers(c: &mut Criterion) {
    let identifiers = [
        "nodejs",
        "acct/Mail-Hog",
        "https://github.com/Chassis/PHP-Xdebug.git",
    ];

    c.bench_function("classify_and_name", |b| {
        b.iter(|| {
            for identifier in identifiers {
                let location = ExtensionSource::classify(black_box(identifier)).location();
                black_box(folder_name(&location, 3));
            }
        })
    });
}

criterion_group!(benches, bench_materialise, bench_normalize, bench_identifiers);
criterion_main!(benches);
