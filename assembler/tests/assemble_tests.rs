use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn assembler_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("assembler"))
}

const SKELETON: &str = "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<script>\n\
$$GREETING_XML$$\n\
// PUT_BUILD_MJS_HERE\n\
// PUT_WASM_JS_HERE\n\
var is_prod = false;\n\
var decoy = \"$$GREETING_XML$$ stays put\";\n\
</script>\n\
</head>\n\
</html>\n";

const LOADER: &str = "let wasm;\n\
function initSync(module) {\n\
    return module;\n\
}\n\
async function __wbg_init(input) {\n\
    if (wasm !== undefined) return wasm;\n\
    const imports = __wbg_get_imports();\n\
    input = fetch(input);\n\
    __wbg_init_memory(imports);\n\
    const { instance, module } = await __wbg_load(await input, imports);\n\
    return __wbg_finalize_init(instance, module);\n\
}\n\
export { initSync };\n\
export default __wbg_init;\n";

// Wasm module preamble, base64-encodes to "AGFzbQEAAAA=".
const ARTIFACT: &[u8] = b"\x00asm\x01\x00\x00\x00";

fn write_default_inputs(dir: &Path) {
    fs::write(dir.join("skeleton.html"), SKELETON).unwrap();
    fs::write(dir.join("greeting.xml"), "<greeting>hello</greeting>").unwrap();
    fs::write(dir.join("bundle.mjs"), "export const build = 'bundled';").unwrap();
}

fn write_production_inputs(dir: &Path) {
    write_default_inputs(dir);
    fs::create_dir_all(dir.join("pkg")).unwrap();
    fs::write(dir.join("pkg/viewer_bg.wasm"), ARTIFACT).unwrap();
    fs::write(dir.join("pkg/viewer.js"), LOADER).unwrap();
}

/// Test default mode inserts fixtures and bundles, leaves the payload point empty
#[test]
fn default_mode_assembles_fixtures_and_bundles() {
    let temp_dir = TempDir::new().unwrap();
    write_default_inputs(temp_dir.path());

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .arg("--fixture")
        .arg("$$GREETING_XML$$=greeting.xml")
        .arg("--bundle")
        .arg("// PUT_BUILD_MJS_HERE=bundle.mjs")
        .assert()
        .success();

    let document = fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
    assert!(document.contains("<greeting>hello</greeting>"));
    assert!(document.contains("export const build = 'bundled';"));
    assert!(document.contains("var is_prod = false;"));
    assert!(document.contains("var decoy = \"$$GREETING_XML$$ stays put\";"));
    assert!(!document.contains("GLOBAL_WASM"));
    assert!(!document.contains("// PUT_BUILD_MJS_HERE"));
}

/// Test the assembled document uses CRLF line endings throughout
#[test]
fn assembled_document_uses_crlf_line_endings() {
    let temp_dir = TempDir::new().unwrap();
    write_default_inputs(temp_dir.path());

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .assert()
        .success();

    let document = fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
    assert!(document.contains("</head>\r\n</html>"));
    assert!(!document.replace("\r\n", "").contains('\n'));
}

/// Test production mode embeds the payload and patches the loader
#[test]
fn production_mode_embeds_payload_and_patches_loader() {
    let temp_dir = TempDir::new().unwrap();
    write_production_inputs(temp_dir.path());

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .arg("--production")
        .arg("--fixture")
        .arg("$$GREETING_XML$$=greeting.xml")
        .arg("--bundle")
        .arg("// PUT_BUILD_MJS_HERE=bundle.mjs")
        .assert()
        .success();

    let document = fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
    assert!(document.contains("window.GLOBAL_WASM = ["));
    assert!(document.contains("\"AGFzbQEAAAA=\","));
    assert!(document.contains("].join('');"));
    assert!(document.contains("base64ToArrayBuffer(window.GLOBAL_WASM)"));
    assert!(document.contains("export { initSync };"));
    assert!(!document.contains("fetch(input)"));
    assert!(document.contains("var is_prod = true;"));
    assert!(!document.contains("var is_prod = false;"));
}

/// Test an archive is expanded before assembly and its files are usable as bundles
#[test]
fn expands_archive_before_assembly() {
    let temp_dir = TempDir::new().unwrap();
    write_default_inputs(temp_dir.path());

    let archive_file = fs::File::create(temp_dir.path().join("viewer-dist.zip")).unwrap();
    let mut writer = zip::ZipWriter::new(archive_file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    writer.start_file("build/viewer.mjs", options).unwrap();
    writer
        .write_all(b"export const viewer = 'from archive';")
        .unwrap();
    writer.finish().unwrap();

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .arg("--archive")
        .arg("viewer-dist.zip")
        .arg("--extract-dir")
        .arg("web")
        .arg("--bundle")
        .arg("// PUT_BUILD_MJS_HERE=web/build/viewer.mjs")
        .assert()
        .success();

    assert!(temp_dir.path().join("web/build/viewer.mjs").exists());
    let document = fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
    assert!(document.contains("export const viewer = 'from archive';"));
}

/// Test a missing skeleton aborts with a non-zero exit and no output
#[test]
fn missing_skeleton_fails() {
    let temp_dir = TempDir::new().unwrap();

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IoError"));

    assert!(!temp_dir.path().join("index.html").exists());
}

/// Test a malformed MARKER=PATH pair is rejected
#[test]
fn malformed_marker_pair_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_default_inputs(temp_dir.path());

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .arg("--fixture")
        .arg("no-separator-here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected MARKER=PATH"));

    assert!(!temp_dir.path().join("index.html").exists());
}

/// Test a loader whose initializer span is never closed aborts the build
#[test]
fn unclosed_loader_span_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_production_inputs(temp_dir.path());
    fs::write(
        temp_dir.path().join("pkg/viewer.js"),
        "async function __wbg_init(input) {\n    const imports = __wbg_get_imports();\n}\n",
    )
    .unwrap();

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .arg("--production")
        .assert()
        .failure()
        .stderr(predicate::str::contains("never closed"));

    assert!(!temp_dir.path().join("index.html").exists());
}

/// Test a zero chunk size is rejected at argument parsing time
#[test]
fn zero_chunk_size_is_rejected_by_the_cli() {
    let temp_dir = TempDir::new().unwrap();
    write_production_inputs(temp_dir.path());

    assembler_cmd()
        .current_dir(&temp_dir)
        .arg("assemble")
        .arg("--production")
        .arg("--chunk-size")
        .arg("0")
        .assert()
        .failure();
}
