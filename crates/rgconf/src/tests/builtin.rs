use rgconf_emit::OutputPaths;
use rgconf_registry::RegistryError;
use rgconf_registry::license::features;

use crate::ConfigContext;
use crate::context::Target;
use crate::driver::{Invocation, configure};
use crate::errors::ContextError;
use crate::license::StaticDecoder;
use crate::rules::BuiltinRules;

fn invocation(dist: &str, overrides: &[&str]) -> Invocation {
    Invocation {
        target: Target {
            dist: dist.to_string(),
            ..Target::default()
        },
        overrides: overrides.iter().map(|s| s.to_string()).collect(),
        outputs: OutputPaths {
            header: "rg_config.h".into(),
            makefile: "rg_config.mk".into(),
            c_file: "rg_config.c".into(),
        },
        report: None,
        config_log: "config.log".to_string(),
    }
}

fn resolve(dist: &str, overrides: &[&str]) -> ConfigContext {
    let mut all = vec!["LIC=n"];
    all.extend_from_slice(overrides);
    configure(&invocation(dist, &all), &BuiltinRules, &StaticDecoder::default()).unwrap()
}

#[test_log::test]
fn uml() {
    let ctx = resolve("UML", &[]);
    let r = ctx.registry();

    assert_eq!(ctx.target().hw, "UML");
    assert_eq!(r.get_or_empty("CONFIG_RG_DIST").unwrap(), "UML");
    assert_eq!(r.get_or_empty("CONFIG_RG_HW").unwrap(), "UML");
    assert_eq!(r.get_or_empty("CONFIG_RG_OS").unwrap(), "LINUX_24");
    assert_eq!(r.get_or_empty("ARCH").unwrap(), "um");
    assert_eq!(r.get_str("CONFIG_RG_IPV4").unwrap(), Some("m"));
    assert_eq!(r.get_number("CONFIG_RG_FLASH_LAYOUT_SIZE").unwrap(), 64);

    for token in [
        "MODULE_RG_UPNP",
        "CONFIG_RG_IGD",
        "CONFIG_RG_UCD_SNMP",
        "CONFIG_RG_LPD",
        "CONFIG_RG_TARGET_LINUX",
        "CONFIG_ULIBC",
        "CONFIG_GUI_RG",
        "CONFIG_GUI_NETGEAR",
    ] {
        assert!(r.is_y(token).unwrap(), "{token}");
    }
    assert!(!r.get_bool("CONFIG_RG_JPKG").unwrap());
}

#[test_log::test]
fn developer_mode_links_statically() {
    let ctx = resolve("UML", &["CONFIG_RG_DEV=y"]);
    assert_eq!(ctx.registry().get_str("CONFIG_RG_IPV4").unwrap(), Some("y"));
    assert_eq!(
        ctx.registry().get_str("CONFIG_RG_PPP_COMMON").unwrap(),
        Some("y")
    );
}

#[test_log::test]
fn module_disabled_on_command_line() {
    let ctx = resolve("UML", &["MODULE_RG_UPNP=n"]);
    let r = ctx.registry();

    assert_eq!(r.get_str("MODULE_RG_UPNP").unwrap(), Some("n"));
    assert!(r.get("MODULE_RG_UPNP").unwrap().set_by_command_line());
    assert_eq!(r.get_str("CONFIG_RG_IGD").unwrap(), None);
}

#[test_log::test]
fn theme_on_command_line_suppresses_defaults() {
    let ctx = resolve("UML", &["CONFIG_GUI_SMB2=y"]);
    let r = ctx.registry();

    assert!(r.is_y("CONFIG_GUI_SMB2").unwrap());
    assert_eq!(r.get_str("CONFIG_GUI_RG").unwrap(), None);
}

#[test_log::test]
fn danube() {
    let ctx = resolve("DANUBE", &[]);
    let r = ctx.registry();

    assert_eq!(r.get_or_empty("BOARD").unwrap(), "Danube");
    assert_eq!(r.get_or_empty("TARGET_ENDIANESS").unwrap(), "BIG");
    assert!(r.is_y("CONFIG_CPU_BIG_ENDIAN").unwrap());
    assert_eq!(r.get_str("CONFIG_VINETIC").unwrap(), Some("m"));
    assert_eq!(r.get_str("CONFIG_HW_LEDS").unwrap(), Some("m"));
    assert_eq!(
        r.get_or_empty("CONFIG_RG_JPKG_DIST").unwrap(),
        "JPKG_MIPSEB_INFINEON"
    );
    assert!(r.is_y("CONFIG_RG_DISK_MNG").unwrap());
    assert!(r.is_y("CONFIG_ATM").unwrap());
}

#[test_log::test]
fn distribution_decides_the_os() {
    // DANUBE always runs Linux 2.4, whatever -o said
    let mut inv = invocation("DANUBE", &["LIC=n"]);
    inv.target.os = "LINUX_26".to_string();
    let ctx = configure(&inv, &BuiltinRules, &StaticDecoder::default()).unwrap();
    assert_eq!(ctx.target().os, "LINUX_24");

    let ctx = resolve("UML_26", &[]);
    assert_eq!(
        ctx.registry().get_or_empty("CONFIG_RG_OS").unwrap(),
        "LINUX_26"
    );
    assert_eq!(
        ctx.registry().get_or_empty("CONFIG_RG_KERNEL_COMP_METHOD").unwrap(),
        "lzma"
    );
}

#[test_log::test]
fn rgloader_skips_userspace() {
    let ctx = resolve("RGLOADER_UML", &[]);
    let r = ctx.registry();

    assert!(r.is_y("CONFIG_RG_RGLOADER").unwrap());
    assert_eq!(r.get_str("CONFIG_RG_IPV4").unwrap(), None);
    assert_eq!(r.get_str("CONFIG_PROC_FS").unwrap(), None);
}

#[test_log::test]
fn jpkg_bundle() {
    let ctx = resolve("JPKG_UML", &[]);
    let r = ctx.registry();

    let dists: Vec<_> = ctx.jpkg_distributions().collect();
    assert_eq!(
        dists,
        vec!["UML", "UML_GLIBC", "UML_26", "RGLOADER_UML", "UML_VALGRIND"]
    );

    // Own values stay
    assert_eq!(r.get_or_empty("CONFIG_RG_HW").unwrap(), "JPKG");
    assert_eq!(r.get_or_empty("CONFIG_RG_DIST").unwrap(), "JPKG_UML");
    assert_eq!(r.get_or_empty("JPKG_ARCH").unwrap(), "\"uml\"");

    // The rest comes from the first sub-target that had it
    assert_eq!(r.get_or_empty("ARCH").unwrap(), "um");
    assert!(r.is_y("CONFIG_GLIBC").unwrap());
    assert!(r.is_y("CONFIG_RG_OS_LINUX_24").unwrap());
    assert_eq!(r.get_or_empty("CONFIG_RG_OS").unwrap(), "LINUX_24");

    let glibc = ctx.jpkg.iter().find(|d| d.name == "UML_GLIBC").unwrap();
    assert!(glibc.registry().is_y("GLIBC_IN_TOOLCHAIN").unwrap());
    assert_eq!(glibc.registry().get_str("CONFIG_ULIBC").unwrap(), None);
}

#[test_log::test]
fn unknown_targets() {
    let err = configure(
        &invocation("PDP11", &["LIC=n"]),
        &BuiltinRules,
        &StaticDecoder::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContextError>(),
        Some(ContextError::UnknownTarget { kind: "Distribution", name, .. }) if name == "PDP11"
    ));

    let mut inv = invocation("UML", &["LIC=n"]);
    inv.target.os = "PLAN9".to_string();
    let err = configure(&inv, &BuiltinRules, &StaticDecoder::default()).unwrap_err();
    assert!(err.to_string().starts_with("OS isn't legal: OS=PLAN9"));
}

#[test_log::test]
fn unlicensed_modules() {
    let decoder = StaticDecoder {
        licenses: maplit::hashmap! {
            "key".to_string() => vec![features::RG_FOUNDATION, features::PPP],
        },
        version_ok: true,
        ..StaticDecoder::default()
    };

    // LIC_AUTOCONF defaults to y, so unlicensed modules are quietly left out
    let ctx = configure(&invocation("UML", &["LICSTR=key"]), &BuiltinRules, &decoder).unwrap();
    let r = ctx.registry();
    assert!(r.is_y("MODULE_RG_FOUNDATION").unwrap());
    assert!(r.is_y("MODULE_RG_PPP").unwrap());
    assert_eq!(r.get_str("MODULE_RG_UPNP").unwrap(), None);
    assert_eq!(r.get_str("CONFIG_RG_IGD").unwrap(), None);

    // Unless the user asked not to
    let err = configure(
        &invocation("UML", &["LICSTR=key", "LIC_AUTOCONF=n"]),
        &BuiltinRules,
        &decoder,
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::UnlicensedFeature { .. })
    ));

    // Or forces them in
    let ctx = configure(
        &invocation("UML", &["LICSTR=key", "LIC_AUTOCONF=n", "LIC_FORCE=y"]),
        &BuiltinRules,
        &decoder,
    )
    .unwrap();
    assert!(ctx.registry().is_y("MODULE_RG_UPNP").unwrap());
}
