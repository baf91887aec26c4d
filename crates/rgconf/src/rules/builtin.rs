//! A small rule set covering the UML development boards, the Infineon Danube reference board and
//! the JPKG binary distribution built from them.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::bail;
use indexmap::indexmap;

use crate::RgConfResult;
use crate::context::ConfigContext;
use crate::errors::ContextError;
use crate::rules::{Catalog, Rules};

const DEFAULT_LICENSE_DIR: &str = "pkg/license/licenses";

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    distributions: indexmap! {
        "UML" => "OpenRG on User Mode Linux, all modules",
        "UML_GLIBC" => "UML distribution linked against glibc",
        "UML_26" => "UML distribution on a 2.6 kernel",
        "UML_VALGRIND" => "UML distribution instrumented for valgrind",
        "RGLOADER_UML" => "RGLoader for User Mode Linux",
        "DANUBE" => "Infineon Danube ADSL2+ gateway",
        "JPKG_UML" => "Binary package of the UML distributions",
    },
    hardware: indexmap! {
        "UML" => "User Mode Linux",
        "DANUBE" => "Infineon Danube reference board",
        "JPKG" => "JPKG binary distribution, no specific board",
    },
    operating_systems: indexmap! {
        "LINUX_24" => "Linux 2.4",
        "LINUX_26" => "Linux 2.6",
        "ECOS" => "eCos",
        "VXWORKS" => "VxWorks",
    },
});

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRules;

impl BuiltinRules {
    fn uml(&self, ctx: &mut ConfigContext, dist: &str) -> RgConfResult<()> {
        ctx.target_mut().hw = "UML".to_string();
        if matches!(dist, "UML_26" | "UML_VALGRIND") {
            ctx.target_mut().os = "LINUX_26".to_string();
        }

        if dist == "UML_GLIBC" {
            ctx.token_set_y("CONFIG_GLIBC")?;
            ctx.token_set_y("GLIBC_IN_TOOLCHAIN")?;
        }
        if dist == "UML_VALGRIND" {
            ctx.token_set_y("CONFIG_VALGRIND")?;
        }

        ctx.token_set_y("CONFIG_RG_SMB")?;

        for module in [
            "MODULE_RG_FOUNDATION",
            "MODULE_RG_UPNP",
            "MODULE_RG_PPP",
            "MODULE_RG_FIREWALL_AND_SECURITY",
            "MODULE_RG_ADVANCED_MANAGEMENT",
            "MODULE_RG_IPSEC",
            "MODULE_RG_PPTP",
            "MODULE_RG_SNMP",
            "MODULE_RG_IPV6",
            "MODULE_RG_VLAN",
            "MODULE_RG_ADVANCED_ROUTING",
            "MODULE_RG_L2TP",
            "MODULE_RG_URL_FILTERING",
            "MODULE_RG_QOS",
            "MODULE_RG_REDUCE_SUPPORT",
            "MODULE_RG_FILESERVER",
            "MODULE_RG_UPNP_AV",
            "MODULE_RG_PRINTSERVER",
            "CONFIG_HW_80211G_UML_WLAN",
            "MODULE_RG_WLAN_AND_ADVANCED_WLAN",
        ] {
            ctx.enable_module(module)?;
        }

        // UML disk emulation
        ctx.token_set_y("CONFIG_HW_UML_LOOP_STORAGE")?;
        ctx.token_set_y("CONFIG_HW_ETH_WAN")?;
        ctx.enable_module("CONFIG_HW_DSP")?;
        ctx.token_set_y("CONFIG_HW_ETH_LAN")?;
        ctx.token_set_y("CONFIG_HW_ETH_LAN2")?;
        ctx.token_set("CONFIG_RG_JPKG_DIST", "JPKG_UML")?;
        ctx.token_set_y("CONFIG_RG_DYN_FLASH_LAYOUT")?;
        Ok(())
    }

    fn rgloader_uml(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        ctx.target_mut().hw = "UML".to_string();
        ctx.target_mut().os = "LINUX_24".to_string();

        ctx.token_set_y("CONFIG_RG_RGLOADER")?;
        ctx.token_set_y("CONFIG_HW_ETH_LAN")?;
        ctx.token_set_y("CONFIG_HW_ETH_LAN2")?;
        ctx.token_set_y("CONFIG_RG_TELNETS")?;
        ctx.token_set_y("CONFIG_RG_DYN_FLASH_LAYOUT")?;
        Ok(())
    }

    fn danube(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        ctx.target_mut().hw = "DANUBE".to_string();
        ctx.target_mut().os = "LINUX_24".to_string();

        ctx.token_set("CONFIG_RG_JPKG_DIST", "JPKG_MIPSEB_INFINEON")?;
        for module in [
            "MODULE_RG_FOUNDATION",
            "MODULE_RG_VLAN",
            "MODULE_RG_ADVANCED_MANAGEMENT",
            "MODULE_RG_DSL",
            "MODULE_RG_PPP",
            "MODULE_RG_PPTP",
            "MODULE_RG_L2TP",
            "MODULE_RG_FIREWALL_AND_SECURITY",
            "MODULE_RG_URL_FILTERING",
            "MODULE_RG_REDUCE_SUPPORT",
            "MODULE_RG_UPNP_AV",
            "CONFIG_HW_ENCRYPTION",
        ] {
            ctx.enable_module(module)?;
        }
        ctx.token_set_y("CONFIG_IPSEC_USE_DANUBE_CRYPTO")?;

        for module in [
            "MODULE_RG_IPSEC",
            "MODULE_RG_WLAN_AND_ADVANCED_WLAN",
            "MODULE_RG_FILESERVER",
            "MODULE_RG_PRINTSERVER",
            "MODULE_RG_ZERO_CONFIGURATION_NETWORKING",
            "MODULE_RG_UPNP",
            "MODULE_RG_ATA",
            "MODULE_RG_QOS",
        ] {
            ctx.enable_module(module)?;
        }

        ctx.enable_module("CONFIG_HW_USB_STORAGE")?;
        ctx.token_set_y("CONFIG_HW_ETH_LAN")?;
        ctx.token_set_y("CONFIG_HW_SWITCH_LAN")?;
        ctx.enable_module("CONFIG_HW_DSP")?;
        ctx.token_set_y("CONFIG_HW_DSL_WAN")?;
        ctx.token_set_m("CONFIG_HW_LEDS")?;
        ctx.token_set_m("CONFIG_HW_BUTTONS")?;
        Ok(())
    }

    fn jpkg_uml(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        ctx.target_mut().hw = "JPKG".to_string();
        ctx.token_set("JPKG_ARCH", "\"uml\"")?;
        ctx.token_set_y("CONFIG_RG_JPKG_UML")?;

        for dist in ["UML", "UML_GLIBC", "UML_26", "RGLOADER_UML", "UML_VALGRIND"] {
            ctx.register_distribution(dist);
        }

        // host tools
        ctx.token_set_y("CONFIG_RG_ZLIB")?;
        ctx.token_set_y("CONFIG_RG_TOOLS")?;
        Ok(())
    }

    fn select_default_themes(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        if ctx.registry().any_set_with(|k| k.theme) {
            return Ok(());
        }
        for theme in [
            "CONFIG_GUI_RG",
            "CONFIG_GUI_RG2",
            "CONFIG_GUI_SMB2",
            "CONFIG_GUI_NETGEAR",
        ] {
            ctx.token_set_y(theme)?;
        }
        Ok(())
    }
}

impl Rules for BuiltinRules {
    fn catalog(&self) -> &Catalog {
        &CATALOG
    }

    fn default_license(&self, ctx: &ConfigContext) -> Option<String> {
        let name = match ctx.target().dist.as_str() {
            "DANUBE" => "danube.lic",
            _ => return None,
        };
        let path = Path::new(DEFAULT_LICENSE_DIR).join(name);
        path.exists().then(|| path.display().to_string())
    }

    fn distribution(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        let dist = ctx.target().dist.clone();
        match dist.as_str() {
            "UML" | "UML_GLIBC" | "UML_26" | "UML_VALGRIND" => self.uml(ctx, &dist)?,
            "RGLOADER_UML" => self.rgloader_uml(ctx)?,
            "DANUBE" => self.danube(ctx)?,
            "JPKG_UML" => self.jpkg_uml(ctx)?,
            _ => bail!(ContextError::UnknownTarget {
                kind: "Distribution",
                name: dist,
                legal: Catalog::legal(&self.catalog().distributions),
            }),
        }

        let target = ctx.target_mut();
        if !target.hw.is_empty() && target.hw != "JPKG" && target.os.is_empty() {
            target.os = "LINUX_24".to_string();
        }
        Ok(())
    }

    fn target_os(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        let os = ctx.target().os.clone();
        match os.as_str() {
            "LINUX_24" => ctx.token_set_y("CONFIG_RG_OS_LINUX_24")?,
            "LINUX_26" => ctx.token_set_y("CONFIG_RG_OS_LINUX_26")?,
            "ECOS" => ctx.token_set_y("CONFIG_RG_OS_ECOS")?,
            "VXWORKS" => ctx.token_set_y("CONFIG_RG_OS_VXWORKS")?,
            _ => bail!(ContextError::UnknownTarget {
                kind: "OS",
                name: os,
                legal: Catalog::legal(&self.catalog().operating_systems),
            }),
        };

        if ctx.token_get("CONFIG_RG_OS_VXWORKS")? {
            ctx.token_set_y("CONFIG_RG_NOT_UNIX")?;
            ctx.token_set_y("CONFIG_RG_EFSS")?;
            if ctx.token_get("CONFIG_RG_DEV")? {
                ctx.token_set_y("CONFIG_VX_SYMTBL")?;
            }
            ctx.token_set_y("CONFIG_RG_VX_TIMERS_TASK")?;
        }

        if ctx.token_get("CONFIG_RG_OS_LINUX_26")? {
            ctx.token_set_y("CONFIG_RG_OS_LINUX")?;

            ctx.token_set("CONFIG_INIT_ENV_ARG_LIMIT", "32")?;
            ctx.token_set_y("CONFIG_PRINTK")?;
            ctx.token_set("CONFIG_LOG_BUF_SHIFT", "14")?;
            ctx.token_set_y("CONFIG_BUG")?;
            ctx.token_set("CONFIG_BASE_SMALL", "0")?;
            ctx.token_set_y("CONFIG_SYSCTL")?;
            ctx.token_set_y("CONFIG_BINFMT_ELF")?;
            ctx.token_set_y("CONFIG_MMU")?;
            ctx.token_set_y("CONFIG_SYSVIPC")?;
            ctx.token_set("CONFIG_DEFAULT_IOSCHED", "\"anticipatory\"")?;
            ctx.token_set_y("CONFIG_RAMFS")?;

            if !ctx.token_get("CONFIG_RG_RGLOADER")? {
                ctx.token_set_y("CONFIG_PROC_FS")?;
                ctx.token_set_y("CONFIG_SYSFS")?;
                ctx.token_set_m("CONFIG_RG_IPV4")?;
            }

            ctx.token_set_y("CONFIG_MODULES")?;
            ctx.token_set_y("CONFIG_MODULE_UNLOAD")?;
            ctx.token_set_y("CONFIG_NET")?;
            ctx.token_set_y("CONFIG_NETDEVICES")?;
            ctx.token_set_y("CONFIG_PACKET")?;
            ctx.token_set_y("CONFIG_UNIX")?;
            ctx.token_set_y("CONFIG_INET")?;
            ctx.token_set_y("CONFIG_IP_MULTICAST")?;
            ctx.token_set_y("CONFIG_IP_ADVANCED_ROUTER")?;
            ctx.token_set_y("CONFIG_NET_ETHERNET")?;

            ctx.token_set_y("CONFIG_LEGACY_PTYS")?;
            ctx.token_set("CONFIG_LEGACY_PTY_COUNT", "256")?;

            // only override if lzma is too slow
            ctx.token_set("CONFIG_RG_KERNEL_COMP_METHOD", "lzma")?;
        }

        if ctx.token_get("CONFIG_RG_OS_LINUX_24")? {
            ctx.token_set_y("CONFIG_UID16")?;
            ctx.token_set_y("CONFIG_IP_MULTICAST")?;
            ctx.token_set_y("CONFIG_IP_ADVANCED_ROUTER")?;
            ctx.token_set_y("CONFIG_UNIX")?;
            ctx.token_set_y("CONFIG_RG_OS_LINUX")?;
            ctx.token_set_y("CONFIG_INET")?;
            ctx.token_set_y("CONFIG_MODULES")?;
            ctx.token_set_y("CONFIG_NET")?;
            ctx.token_set_y("CONFIG_NETDEVICES")?;
            ctx.token_set_y("CONFIG_NET_ETHERNET")?;
            ctx.token_set_y("CONFIG_PACKET")?;
            ctx.token_set_y("CONFIG_SYSVIPC")?;

            if !ctx.token_get("CONFIG_RG_RGLOADER")? {
                ctx.token_set_y("CONFIG_PROC_FS")?;
                ctx.token_set_m("CONFIG_RG_IPV4")?;
            }

            ctx.token_set("CONFIG_RG_KERNEL_COMP_METHOD", "lzma")?;
        }

        if ctx.token_get("CONFIG_RG_OS_LINUX")? {
            ctx.token_set_y("CONFIG_RG_TTYP")?;
            ctx.token_set_y("CONFIG_RG_TARGET_LINUX")?;
        }
        if ctx.token_get("CONFIG_RG_OS_VXWORKS")? {
            ctx.token_set_y("CONFIG_RG_TARGET_VXWORKS")?;
        }
        Ok(())
    }

    fn hardware(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        match ctx.target().hw.as_str() {
            "DANUBE" => {
                ctx.token_set("BOARD", "Danube")?;
                ctx.token_set_y("CONFIG_RG_HW_DANUBE")?;
                ctx.token_set("FIRM", "Infineon")?;
                ctx.set_big_endian(true)?;
                ctx.token_set("LIBC_ARCH", "mips")?;
                ctx.token_set("ARCH", "mips")?;
                ctx.token_set_y("CONFIG_HAS_MMU")?;

                if ctx.token_get("CONFIG_HW_DSP")? {
                    ctx.token_set_m("CONFIG_VINETIC")?;
                    ctx.token_set("CONFIG_VINETIC_LINES_PER_CHIP", "2")?;
                }
            }
            "UML" => {
                ctx.token_set("ARCH", "um")?;
                ctx.token_set("CONFIG_RG_FLASH_LAYOUT_SIZE", "64")?;
                if ctx.token_get("CONFIG_HW_DSL_WAN")? {
                    ctx.token_set_y("CONFIG_ATM_NULL")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn common(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        // export objects and binaries, not just sources
        ctx.token_set_y("CONFIG_EXPORT_BINARIES")?;

        if ctx.token_get("CONFIG_VALGRIND")? {
            ctx.token_set_y("OPENRG_DEBUG")?;
        }
        if !ctx.token_get("CONFIG_GLIBC")? && !ctx.token_get("CONFIG_RG_NOT_UNIX")? {
            ctx.token_set_y("CONFIG_ULIBC")?;
        }
        if !ctx.token_get("CONFIG_RG_NOT_UNIX")? {
            ctx.token_set_y("CONFIG_UNIX")?;
        }

        ctx.token_set_y("CONFIG_RG_FACTORY_SETTINGS")?;
        ctx.token_set_y("CONFIG_SYN_COOKIES")?;

        ctx.token_set("OPENRG_CHRDEV_NAME", "rg_chrdev")?;
        ctx.token_set("OPENRG_CHRDEV_MAJOR", "240")?;

        if ctx.token_get_str("CONFIG_RG_LANGUAGES")?.is_empty() {
            ctx.token_set("CONFIG_RG_LANGUAGES", "DEF fr ru es ko zh_TW ja de it zh_CN")?;
        }

        if ctx.gate().state().evaluation {
            ctx.token_set_y("CONFIG_LICENSE_AGREEMENT")?;
        }
        Ok(())
    }

    fn general(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        if ctx.token_get("MODULE_RG_SNMP")? {
            ctx.token_set_y("CONFIG_RG_UCD_SNMP")?;
            ctx.token_set_y("CONFIG_RG_UCD_SNMP_V3")?;
        }
        if ctx.token_get("MODULE_RG_UPNP")? {
            ctx.token_set_y("CONFIG_RG_IGD")?;
        }
        if ctx.token_get("MODULE_RG_UPNP_AV")? {
            ctx.token_set_y("CONFIG_RG_UPNP_AV")?;
            ctx.token_set_y("CONFIG_RG_DISK_MNG")?;
        }
        if ctx.token_get("MODULE_RG_REDUCE_SUPPORT")? {
            ctx.token_set_y("CONFIG_RG_REDUCE_SUPPORT")?;
        }
        if ctx.token_get("MODULE_RG_ADVANCED_ROUTING")? {
            ctx.token_set_y("CONFIG_RG_RIP")?;
            ctx.token_set_y("CONFIG_RG_BGP")?;
            ctx.token_set_y("CONFIG_RG_OSPF")?;
            ctx.token_set_y("CONFIG_RG_DNS_CONCURRENT")?;
        }
        if ctx.token_get("MODULE_RG_PPP")? {
            ctx.token_set_m("CONFIG_RG_PPP_COMMON")?;
            ctx.token_set_y("CONFIG_RG_PPP")?;
            ctx.token_set_y("CONFIG_RG_PPPOE")?;
        }
        if ctx.token_get("MODULE_RG_DSL")? {
            ctx.token_set_y("CONFIG_ATM")?;
            ctx.token_set_y("CONFIG_ATM_PVC_SCAN")?;
        }
        if ctx.token_get("MODULE_RG_PRINTSERVER")? {
            ctx.token_set_y("CONFIG_RG_PRINT_SERVER")?;
            ctx.token_set_y("CONFIG_RG_IPP")?;
            ctx.enable_module("CONFIG_RG_LPD")?;
        }
        if ctx.token_get("MODULE_RG_FILESERVER")? {
            ctx.token_set_y("CONFIG_RG_FS_BACKUP")?;
            ctx.token_set_y("CONFIG_RG_DISK_MNG")?;
            ctx.token_set_y("CONFIG_RG_FILESERVER")?;
            ctx.token_set_y("CONFIG_RG_SAMBA")?;
        }
        if ctx.token_get("MODULE_RG_IPSEC")? {
            ctx.token_set_y("CONFIG_FREESWAN")?;
        }

        self.select_default_themes(ctx)
    }

    fn primary_os(&self, ctx: &mut ConfigContext) -> RgConfResult<()> {
        let os = [
            ("CONFIG_RG_OS_LINUX_24", "LINUX_24"),
            ("CONFIG_RG_OS_LINUX_26", "LINUX_26"),
            ("CONFIG_RG_OS_ECOS", "ECOS"),
            ("CONFIG_RG_OS_VXWORKS", "VXWORKS"),
        ];
        for (token, name) in os {
            if ctx.token_get(token)? {
                let os_token = ctx.tokens().os;
                ctx.token_set(os_token, name)?;
                break;
            }
        }
        Ok(())
    }
}
