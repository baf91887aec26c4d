use rgconf_registry::{
    LicenseGate, LicenseState, ModuleOutcome, Provenance, Registry, SetPriority, option_table,
};

fn registry() -> Registry {
    Registry::from_options(option_table![
        CONFIG_FOO [],
        CONFIG_BAR [module_expand, static_on_develop],
        CONFIG_RG_DEV [],
        MODULE_RG_UPNP [module, major_feature] : "UPnP",
        LIC_AUTOCONF [],
        LIC_FORCE [],
    ])
    .unwrap()
}

#[test_log::test]
fn command_line_wins_over_default() {
    let mut r = registry();
    let at = Provenance::caller();

    r.set("CONFIG_FOO", "y", SetPriority::TokenSetDefault, at)
        .unwrap();
    r.set("CONFIG_FOO", "n", SetPriority::CommandLine, at)
        .unwrap();

    assert_eq!(r.get_str("CONFIG_FOO").unwrap(), Some("n"));
}

#[test_log::test]
fn module_becomes_static_in_developer_mode() {
    let mut r = registry();
    let at = Provenance::caller();

    r.set("CONFIG_RG_DEV", "y", SetPriority::CommandLine, at)
        .unwrap();
    r.set("CONFIG_BAR", "m", SetPriority::TokenSet, at).unwrap();

    assert_eq!(r.get_str("CONFIG_BAR").unwrap(), Some("y"));
}

#[test_log::test]
fn unlicensed_module_without_policy_is_fatal() {
    let mut r = registry();
    let gate = LicenseGate::new(LicenseState::default());

    let err = gate
        .enable_module(&mut r, "MODULE_RG_UPNP", Provenance::caller())
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("there is no valid license for MODULE_RG_UPNP"),
        "{}",
        err
    );
}

#[test_log::test]
fn unlicensed_module_with_auto_disable_stays_unset() {
    let mut r = registry();
    let gate = LicenseGate::new(LicenseState::default());
    r.set_command_line("LIC_AUTOCONF", "y").unwrap();

    let outcome = gate
        .enable_module(&mut r, "MODULE_RG_UPNP", Provenance::caller())
        .unwrap();

    assert_eq!(outcome, ModuleOutcome::AutoDisabled);
    assert_eq!(r.get_or_empty("MODULE_RG_UPNP").unwrap(), "");
}
