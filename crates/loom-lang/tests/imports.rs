use std::fs;
use std::path::PathBuf;

use loom_lang::{interpret_in_dir, EvalLimits};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("loom-lang-import-test-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn plain_import_binds_a_module_namespace() {
    let dir = temp_dir("plain");
    fs::write(dir.join("mathutils.loom"), "value = 42\n").expect("write module");

    let source = "import mathutils\nresult = mathutils.value\n";
    interpret_in_dir(source, dir.clone(), EvalLimits::default()).expect("should run");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn dotted_import_binds_under_its_last_component() {
    let dir = temp_dir("dotted");
    fs::create_dir_all(dir.join("pkg")).expect("create package dir");
    fs::write(dir.join("pkg").join("sub.loom"), "value = 99\n").expect("write module");

    let source = "import pkg.sub\nresult = sub.value\n";
    interpret_in_dir(source, dir.clone(), EvalLimits::default()).expect("should run");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn import_as_renames_the_binding() {
    let dir = temp_dir("aliased");
    fs::write(dir.join("mathutils.loom"), "value = 1\n").expect("write module");

    let source = "import mathutils as mu\nresult = mu.value\n";
    interpret_in_dir(source, dir.clone(), EvalLimits::default()).expect("should run");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn from_import_named_binds_directly() {
    let dir = temp_dir("named");
    fs::write(dir.join("utils.loom"), "def helper():\n    return 7\n").expect("write module");

    let source = "from utils import helper\nresult = helper()\n";
    interpret_in_dir(source, dir.clone(), EvalLimits::default()).expect("should run");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn from_import_star_binds_everything() {
    let dir = temp_dir("star");
    fs::write(dir.join("constants.loom"), "a = 1\nb = 2\n").expect("write module");

    let source = "from constants import *\nresult = a + b\n";
    interpret_in_dir(source, dir.clone(), EvalLimits::default()).expect("should run");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_module_is_an_import_error() {
    let dir = temp_dir("missing");
    let source = "import does_not_exist\n";
    let err = interpret_in_dir(source, dir.clone(), EvalLimits::default()).unwrap_err();
    assert!(matches!(err, loom_lang::LoomError::Interpreter(e) if e.kind == loom_lang::InterpreterErrorKind::Import));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn re_importing_the_same_module_does_not_rerun_it() {
    let dir = temp_dir("cached");
    fs::write(dir.join("counter.loom"), "hits = []\nhits.append(1)\n").expect("write module");

    let source = "import counter\nimport counter\nfirst = counter.hits\n";
    interpret_in_dir(source, dir, EvalLimits::default()).expect("should run");
}
