//! Tests against the real tools. Skipped when they are not installed.

use std::fs;
use std::path::Path;

use smithy::{Harness, HarnessConfig, Language, SystemToolchain, ToolchainConfig};

fn tool_available(name: &str) -> bool {
    std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| dir.join(name).is_file())
    })
}

fn system_harness(dir: &Path) -> Harness<SystemToolchain> {
    Harness::new(
        SystemToolchain::new(ToolchainConfig::new()),
        HarnessConfig::new().with_work_dir(dir),
    )
}

#[test]
fn test_csmith_generation_is_deterministic() {
    if !tool_available("csmith") {
        eprintln!("Skipping test: csmith not found");
        return;
    }
    let temp = tempfile::tempdir().unwrap();
    let harness = system_harness(temp.path());
    let path = temp.path().join("0.cpp");

    let case = harness.generate(Language::Cpp, 0).unwrap();
    assert_eq!(case.id, 0);
    let first = fs::read(&path).unwrap();
    fs::remove_file(&path).unwrap();
    harness.generate(Language::Cpp, 0).unwrap();

    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn test_native_checksum_and_ir() {
    if !tool_available("clang++") {
        eprintln!("Skipping test: clang++ not found");
        return;
    }
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("0.cpp");
    fs::write(
        &source,
        "#include <cstdio>\nint main() { std::printf(\"checksum = %X\\n\", 0x1234); }\n",
    )
    .unwrap();
    let harness = system_harness(temp.path());
    let mut case = harness.open(0, Language::Cpp).unwrap();

    let checksum = harness.compile_and_run(&mut case).unwrap();
    assert_eq!(checksum, "1234");

    // Cross-target lowering needs the target's headers; only check it when
    // a freestanding program is used.
    fs::write(&source, "int main() { return 0; }\n").unwrap();
    let ir = harness.lower(&mut case, &smithy::OptimizationSpec::default()).unwrap();
    let text = fs::read_to_string(ir).unwrap();
    assert!(text.contains("target triple = \"mips64el"));
}
