use maplit::{hashmap, hashset};
use rgconf_registry::SetPriority;
use rgconf_registry::license::features;

use super::{TestRules, context};
use crate::ConfigContext;
use crate::errors::ContextError;
use crate::license::{StaticDecoder, license_init};

fn decoder() -> StaticDecoder {
    StaticDecoder {
        hwid: Some("12ab34".to_string()),
        files: hashmap! {
            "acme.lic".to_string() => "1234567890.Acme\nsecond line is ignored\n".to_string(),
        },
        licenses: hashmap! {
            "1234567890.Acme".to_string() => vec![features::RG_FOUNDATION, features::PPP],
        },
        evaluation: false,
        version_ok: true,
    }
}

fn init(ctx: &mut ConfigContext, decoder: &StaticDecoder) -> Result<(), ContextError> {
    license_init(ctx, &TestRules::new(), decoder).map_err(|e| {
        e.downcast_ref::<ContextError>()
            .cloned()
            .unwrap_or_else(|| panic!("unexpected error {e:#}"))
    })
}

#[test_log::test]
fn license_file_is_decoded() {
    let mut ctx = context("A");
    ctx.apply_command_line("LIC=acme.lic").unwrap();

    init(&mut ctx, &decoder()).unwrap();

    assert_eq!(ctx.token_get_str("LICSTR").unwrap(), "1234567890.Acme");
    assert_eq!(
        ctx.gate().state().enabled,
        hashset! {features::RG_FOUNDATION, features::PPP}
    );
    assert!(!ctx.gate().state().no_license);
    assert!(ctx.gate().is_licensed("MODULE_RG_PPP"));
    assert!(!ctx.gate().is_licensed("MODULE_RG_UPNP"));

    let auto = ctx.registry().get("LIC_AUTOCONF").unwrap();
    assert_eq!(auto.value.as_deref(), Some("y"));
    assert_eq!(auto.priority, SetPriority::TokenSet);
}

#[test_log::test]
fn license_string_is_used_directly() {
    let mut ctx = context("A");
    ctx.apply_command_line("LICSTR=1234567890.Acme").unwrap();

    let evaluation = StaticDecoder {
        evaluation: true,
        ..decoder()
    };
    init(&mut ctx, &evaluation).unwrap();

    assert!(ctx.gate().state().evaluation);
    assert!(ctx.gate().is_licensed("MODULE_RG_PPP"));
}

#[test_log::test]
fn command_line_auto_disable_survives() {
    let mut ctx = context("A");
    ctx.apply_command_line("LIC=acme.lic").unwrap();
    ctx.apply_command_line("LIC_AUTOCONF=n").unwrap();

    init(&mut ctx, &decoder()).unwrap();
    assert_eq!(ctx.token_get_str("LIC_AUTOCONF").unwrap(), "n");
}

#[test_log::test]
fn license_checking_can_be_turned_off() {
    let mut ctx = context("A");
    ctx.apply_command_line("LIC=N").unwrap();

    init(&mut ctx, &StaticDecoder::default()).unwrap();
    assert!(ctx.gate().state().no_license);
    assert!(ctx.gate().is_licensed("MODULE_RG_UPNP"));
    assert_eq!(ctx.token_get_str("LIC_AUTOCONF").unwrap(), "");
}

#[test_log::test]
fn file_and_string_are_exclusive() {
    let mut ctx = context("A");
    ctx.apply_command_line("LIC=acme.lic").unwrap();
    ctx.apply_command_line("LICSTR=1234567890.Acme").unwrap();

    assert_eq!(
        init(&mut ctx, &decoder()),
        Err(ContextError::ConflictingLicenseSources)
    );
}

#[test_log::test]
fn missing_license_reports_the_hardware_id() {
    assert_eq!(
        init(&mut context("A"), &decoder()),
        Err(ContextError::MissingLicense {
            hwid: "12ab34".to_string()
        })
    );

    assert_eq!(
        init(&mut context("A"), &StaticDecoder::default()),
        Err(ContextError::MissingLicense {
            hwid: "0042aa".to_string()
        })
    );
}

#[test_log::test]
fn unreadable_or_invalid_licenses() {
    let mut ctx = context("A");
    ctx.apply_command_line("LIC=other.lic").unwrap();
    assert_eq!(
        init(&mut ctx, &decoder()),
        Err(ContextError::InvalidLicenseFile("other.lic".to_string()))
    );

    let mut ctx = context("A");
    ctx.apply_command_line("LICSTR=garbage").unwrap();
    assert_eq!(
        init(&mut ctx, &decoder()),
        Err(ContextError::InvalidLicense)
    );

    let old = StaticDecoder {
        version_ok: false,
        ..decoder()
    };
    let mut ctx = context("A");
    ctx.apply_command_line("LIC=acme.lic").unwrap();
    assert_eq!(
        init(&mut ctx, &old),
        Err(ContextError::IncompatibleLicenseVersion)
    );
}
