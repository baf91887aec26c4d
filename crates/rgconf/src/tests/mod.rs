use indexmap::indexmap;
use rgconf_registry::{Registry, option_table};

use crate::RgConfResult;
use crate::context::{ConfigContext, Target};
use crate::rules::{Catalog, Rules};

mod builtin;
mod license;

fn registry() -> Registry {
    Registry::from_options(option_table![
        CONFIG_RG_DIST [is_string],
        CONFIG_RG_HW [is_string],
        CONFIG_RG_HW_DESC_STR [is_c_string],
        CONFIG_RG_OS [is_string],
        CONFIG_RG_JPKG [internal],
        CONFIG_RG_BUILD_LOCAL_TARGETS_ONLY [],
        CONFIG_RG_OS_LINUX_24 [],
        CONFIG_FOO [],
        CONFIG_BAZ [is_number],
        CONFIG_QUX [is_string],
        CONFIG_CPU_BIG_ENDIAN [],
        CONFIG_CPU_LITTLE_ENDIAN [],
        TARGET_ENDIANESS [is_string],
        MODULE_RG_PPP [module] : "PPP",
        MODULE_RG_UPNP [module] : "UPnP",
        LIC [is_string],
        LICSTR [is_string],
        LIC_FORCE [],
        LIC_AUTOCONF [],
    ])
    .unwrap()
}

fn context(dist: &str) -> ConfigContext {
    ConfigContext::new(registry()).with_target(Target {
        dist: dist.to_string(),
        ..Target::default()
    })
}

/// `TOP` bundles `A` and `B`; `B` pulls in `C` while it is being resolved. `BROKEN` writes to a
/// token that does not exist.
struct TestRules {
    catalog: Catalog,
}

impl TestRules {
    fn new() -> Self {
        TestRules {
            catalog: Catalog {
                distributions: indexmap! {
                    "TOP" => "bundle",
                    "A" => "first",
                    "B" => "second",
                    "C" => "registered by B",
                    "LOCAL" => "no hardware",
                    "BROKEN" => "fails",
                },
                hardware: indexmap! {
                    "BOARD" => "Test board",
                    "BUNDLE" => "No specific board",
                },
                operating_systems: indexmap! {
                    "LINUX_24" => "Linux 2.4",
                },
            },
        }
    }
}

impl Rules for TestRules {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn distribution(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        let dist = ctx.target().dist.clone();
        match dist.as_str() {
            "TOP" => {
                ctx.target_mut().hw = "BUNDLE".to_string();
                ctx.register_distribution("A");
                ctx.register_distribution("B");
            }
            "A" => {
                ctx.target_mut().hw = "BOARD".to_string();
                ctx.target_mut().os = "LINUX_24".to_string();
                ctx.token_set("CONFIG_BAZ", "8")?;
                ctx.token_set_y("CONFIG_FOO")?;
            }
            "B" => {
                ctx.target_mut().hw = "BOARD".to_string();
                ctx.token_set("CONFIG_BAZ", "16")?;
                ctx.register_distribution("C");
            }
            "C" => {
                ctx.token_set("CONFIG_QUX", "from C")?;
            }
            "BROKEN" => {
                ctx.token_set_y("CONFIG_DOES_NOT_EXIST")?;
            }
            _ => {}
        }
        Ok(())
    }

    fn target_os(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        ctx.token_set_y("CONFIG_RG_OS_LINUX_24")?;
        Ok(())
    }

    fn hardware(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        if ctx.target().hw == "BOARD" {
            ctx.set_big_endian(false)?;
        }
        Ok(())
    }

    fn common(&self, _ctx: &mut ConfigContext) -> RgConfResult<()> {
        Ok(())
    }

    fn general(&self, _ctx: &mut ConfigContext) -> RgConfResult<()> {
        Ok(())
    }

    fn primary_os(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        if ctx.token_get("CONFIG_RG_OS_LINUX_24")? {
            ctx.token_set("CONFIG_RG_OS", "LINUX_24")?;
        }
        Ok(())
    }
}
