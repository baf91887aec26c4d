use std::fs;

use rgconf_emit::{Emitter, OutputPaths};
use rgconf_registry::{Registry, option_table};

fn paths(dir: &std::path::Path) -> OutputPaths {
    OutputPaths {
        header: dir.join("rg_config.h"),
        makefile: dir.join("rg_config.mk"),
        c_file: dir.join("rg_config.c"),
    }
}

#[test_log::test]
fn invalid_number_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());
    fs::write(&paths.header, "/* previous run */\n").unwrap();

    let r = Registry::from_options(option_table![
        CONFIG_FOO [] = "y",
        CONFIG_NUM [is_number] = "notanumber",
    ])
    .unwrap();

    let err = Emitter::new(&r, "config.log").emit(&paths).unwrap_err();
    assert!(err.to_string().contains("CONFIG_NUM=notanumber"), "{}", err);

    assert_eq!(
        fs::read_to_string(&paths.header).unwrap(),
        "/* previous run */\n"
    );
    assert!(!paths.makefile.exists());
    assert!(!paths.c_file.exists());
}

#[test_log::test]
fn writes_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path());

    let r = Registry::from_options(option_table![
        CONFIG_FOO [] = "y",
        CONFIG_NUM [is_number] = "0x10",
    ])
    .unwrap();

    Emitter::new(&r, "config.log").emit(&paths).unwrap();

    let header = fs::read_to_string(&paths.header).unwrap();
    assert!(header.contains("#define CONFIG_FOO 1\n"));
    assert!(header.contains("#define CONFIG_NUM 0x10\n"));
    assert!(header.ends_with("#endif\n"));

    let makefile = fs::read_to_string(&paths.makefile).unwrap();
    assert!(makefile.contains("CONFIG_NUM=0x10\n"));

    assert!(paths.c_file.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
}
