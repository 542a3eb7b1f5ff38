//! Integration test: config discovery plus multi-file extraction from disk.

use ngmeta::{Category, DiagnosticKind, Extractor, RootMetadataModel, Severity};
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "ngmeta.toml",
        "[extractor]\nmax_depth = 64\n\n[decorators]\nFeatureComponent = \"component\"\n",
    );
    write(
        dir.path(),
        "src/app/hero.component.ts",
        "@FeatureComponent({ selector: 'app-hero' })\nexport class HeroComponent {}\n",
    );
    write(
        dir.path(),
        "src/app/hero.service.ts",
        "@Injectable({ providedIn: 'root' })\nexport class HeroService {}\n",
    );
    write(
        dir.path(),
        "src/app/hero.ts",
        "export interface Hero { id: number; name: string; }\nexport type HeroId = Hero['id'];\n",
    );
    dir
}

#[test]
fn discovers_config_and_extracts_files() {
    let dir = project();
    let extractor = Extractor::builder()
        .root(dir.path())
        .build()
        .expect("extractor should build");
    assert_eq!(extractor.config().extractor.max_depth, 64);

    let files: Vec<_> = ["hero.component.ts", "hero.service.ts", "hero.ts"]
        .iter()
        .map(|name| dir.path().join("src/app").join(name))
        .collect();
    let result = extractor
        .extract_files(&files)
        .expect("extraction should succeed");

    assert_eq!(result.files_processed, 3);
    assert_eq!(result.files_failed, 0);
    assert_eq!(result.model.identifiers(Category::Components), ["HeroComponent"]);
    assert_eq!(result.model.identifiers(Category::Injectables), ["HeroService"]);
    assert_eq!(result.model.identifiers(Category::Interfaces), ["Hero"]);
    assert_eq!(result.model.identifiers(Category::TypeAliases), ["HeroId"]);
    assert_eq!(result.model.len(Category::SourceFiles), 3);
}

#[test]
fn unsupported_type_degrades_with_warning() {
    let dir = project();
    let extractor = Extractor::builder().root(dir.path()).build().unwrap();
    let result = extractor
        .extract_files(&[dir.path().join("src/app/hero.ts")])
        .unwrap();

    // `Hero['id']` is an indexed access type, outside the resolver tiers.
    let warnings = result.by_severity(Severity::Warning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, DiagnosticKind::UnknownType);
    assert!(result.has_warnings());
    assert!(!result.has_errors());

    let json = serde_json::to_value(&result.model).unwrap();
    assert_eq!(json["typeAliases"][0]["type"]["kind"], "unknown");
}

#[test]
fn unreadable_file_is_counted_as_failed() {
    let dir = project();
    let extractor = Extractor::builder().root(dir.path()).build().unwrap();
    let result = extractor
        .extract_files(&[
            dir.path().join("src/app/hero.ts"),
            dir.path().join("src/app/missing.ts"),
        ])
        .unwrap();
    assert_eq!(result.files_processed, 1);
    assert_eq!(result.files_failed, 1);
}

#[test]
fn serialized_model_round_trips() {
    let dir = project();
    let extractor = Extractor::builder().root(dir.path()).build().unwrap();
    let files = [
        dir.path().join("src/app/hero.component.ts"),
        dir.path().join("src/app/hero.service.ts"),
    ];
    let result = extractor.extract_files(&files).unwrap();

    let json = result.model.to_json_pretty().unwrap();
    let back = RootMetadataModel::from_json(&json).unwrap();
    assert_eq!(back, result.model);
    for category in Category::ALL {
        assert!(json.contains(&format!("\"{}\"", category.key())));
    }
}
