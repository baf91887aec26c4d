use std::collections::HashSet;

use anyhow::bail;
use phf::phf_map;
use tracing::{debug, info, warn};

use crate::errors::{RegistryError, RegistryResult};
use crate::option::{Provenance, SetPriority};
use crate::registry::Registry;

/// Numeric feature identifier as found in a decoded license.
pub type FeatureId = u32;

pub mod features {
    use super::FeatureId;

    pub const USB_RNDIS: FeatureId = 0;
    pub const WLAN_80211: FeatureId = 1;
    pub const DSP_VOICE: FeatureId = 2;
    pub const RG_FOUNDATION: FeatureId = 3;
    pub const ADV_MANAGEMENT: FeatureId = 4;
    pub const SNMP: FeatureId = 5;
    pub const DSL: FeatureId = 6;
    pub const PPP: FeatureId = 7;
    pub const IPV6: FeatureId = 8;
    pub const VLAN: FeatureId = 9;
    pub const UPNP: FeatureId = 10;
    pub const ADV_ROUTING: FeatureId = 11;
    pub const SECURITY: FeatureId = 12;
    pub const VPN_L2TP: FeatureId = 13;
    pub const VPN_IPSEC: FeatureId = 14;
    pub const VPN_PPTP: FeatureId = 15;
    pub const FILE_SERVER: FeatureId = 16;
    pub const PRINT_SERVER: FeatureId = 17;
    pub const WLAN_ADV_SECURITY: FeatureId = 18;
    pub const CABLEHOME: FeatureId = 19;
    pub const VODSL: FeatureId = 20;
    pub const RV_SIP: FeatureId = 21;
    pub const RV_MGCP: FeatureId = 22;
    pub const RV_H323: FeatureId = 23;
    pub const OSIP: FeatureId = 24;
    pub const URL_FILTERING: FeatureId = 25;
    pub const QOS: FeatureId = 26;
    pub const DSLHOME: FeatureId = 27;
    pub const MAIL_FILTER: FeatureId = 28;
    pub const MAIL_SERVER: FeatureId = 29;
    pub const ZERO_CONFIG_NET: FeatureId = 30;
    pub const WEB_SERVER: FeatureId = 31;
    pub const FTP_SERVER: FeatureId = 32;
    pub const ROUTE_MULTIWAN: FeatureId = 33;
    pub const ASTERISK_SIP: FeatureId = 34;
    pub const ASTERISK_H323: FeatureId = 35;
    pub const BLUETOOTH_PAN: FeatureId = 36;
    pub const TR_064: FeatureId = 37;
    pub const JVM: FeatureId = 38;
    pub const SSL_VPN: FeatureId = 39;
    pub const ASTERISK_MGCP_CALL_AGENT: FeatureId = 40;
    pub const ATA: FeatureId = 41;
    pub const PBX: FeatureId = 42;
    pub const AV_LAN: FeatureId = 43;
    pub const AV_NAC: FeatureId = 44;
    pub const UPNP_AV: FeatureId = 45;
    pub const RADIUS_SERVER: FeatureId = 46;
    pub const REDUCE_SUPPORT: FeatureId = 47;
    pub const USB_HOST: FeatureId = 48;
    pub const FIREWIRE_1394: FeatureId = 49;
    pub const PSE: FeatureId = 50;
    pub const WPS: FeatureId = 51;
}

/// Tokens that can only be turned on through [`LicenseGate::enable_module`], and the license
/// feature each one needs. Several tokens may share a feature.
static MODULE_FEATURES: phf::Map<&'static str, FeatureId> = phf_map! {
    "CONFIG_HW_USB_RNDIS" => features::USB_RNDIS,
    "CONFIG_HW_80211G_BCM43XX" => features::WLAN_80211,
    "CONFIG_HW_80211G_ISL38XX" => features::WLAN_80211,
    "CONFIG_HW_80211G_ISL_SOFTMAC" => features::WLAN_80211,
    "CONFIG_HW_80211B_PRISM2" => features::WLAN_80211,
    "CONFIG_HW_80211G_AR531X" => features::WLAN_80211,
    "CONFIG_HW_80211A_AR531X" => features::WLAN_80211,
    "CONFIG_HW_80211G_RALINK_RT2560" => features::WLAN_80211,
    "CONFIG_HW_80211G_RALINK_RT2561" => features::WLAN_80211,
    "CONFIG_RG_ATHEROS_HW_AR5212" => features::WLAN_80211,
    "CONFIG_RG_ATHEROS_HW_AR5416" => features::WLAN_80211,
    "CONFIG_HW_80211N_AIRGO_AGN100" => features::WLAN_80211,
    "CONFIG_HW_80211G_UML_WLAN" => features::WLAN_80211,
    "CONFIG_HW_DSP" => features::DSP_VOICE,
    "MODULE_RG_FOUNDATION" => features::RG_FOUNDATION,
    "MODULE_RG_ADVANCED_MANAGEMENT" => features::ADV_MANAGEMENT,
    "MODULE_RG_SNMP" => features::SNMP,
    "MODULE_RG_DSL" => features::DSL,
    "MODULE_RG_PPP" => features::PPP,
    "MODULE_RG_IPV6" => features::IPV6,
    "MODULE_RG_VLAN" => features::VLAN,
    "MODULE_RG_UPNP" => features::UPNP,
    "MODULE_RG_ADVANCED_ROUTING" => features::ADV_ROUTING,
    "MODULE_RG_FIREWALL_AND_SECURITY" => features::SECURITY,
    "MODULE_RG_L2TP" => features::VPN_L2TP,
    "MODULE_RG_IPSEC" => features::VPN_IPSEC,
    "CONFIG_HW_ENCRYPTION" => features::VPN_IPSEC,
    "MODULE_RG_PPTP" => features::VPN_PPTP,
    "MODULE_RG_FILESERVER" => features::FILE_SERVER,
    "MODULE_RG_PRINTSERVER" => features::PRINT_SERVER,
    "CONFIG_RG_LPD" => features::PRINT_SERVER,
    "MODULE_RG_WLAN_AND_ADVANCED_WLAN" => features::WLAN_ADV_SECURITY,
    "MODULE_RG_CABLEHOME" => features::CABLEHOME,
    "MODULE_RG_VODSL" => features::VODSL,
    "MODULE_RG_VOIP_RV_SIP" => features::RV_SIP,
    "MODULE_RG_VOIP_RV_MGCP" => features::RV_MGCP,
    "MODULE_RG_VOIP_RV_H323" => features::RV_H323,
    "MODULE_RG_VOIP_OSIP" => features::OSIP,
    "MODULE_RG_URL_FILTERING" => features::URL_FILTERING,
    "MODULE_RG_QOS" => features::QOS,
    "MODULE_RG_DSLHOME" => features::DSLHOME,
    "MODULE_RG_MAIL_FILTER" => features::MAIL_FILTER,
    "MODULE_RG_MAIL_SERVER" => features::MAIL_SERVER,
    "MODULE_RG_ZERO_CONFIGURATION_NETWORKING" => features::ZERO_CONFIG_NET,
    "MODULE_RG_WEB_SERVER" => features::WEB_SERVER,
    "MODULE_RG_FTP_SERVER" => features::FTP_SERVER,
    "MODULE_RG_ROUTE_MULTIWAN" => features::ROUTE_MULTIWAN,
    "MODULE_RG_VOIP_ASTERISK_SIP" => features::ASTERISK_SIP,
    "MODULE_RG_VOIP_ASTERISK_H323" => features::ASTERISK_H323,
    "MODULE_RG_BLUETOOTH" => features::BLUETOOTH_PAN,
    "MODULE_RG_TR_064" => features::TR_064,
    "MODULE_RG_JVM" => features::JVM,
    "MODULE_RG_SSL_VPN" => features::SSL_VPN,
    "MODULE_RG_VOIP_ASTERISK_MGCP_CALL_AGENT" => features::ASTERISK_MGCP_CALL_AGENT,
    "MODULE_RG_ATA" => features::ATA,
    "MODULE_RG_PBX" => features::PBX,
    "MODULE_RG_ANTIVIRUS_LAN_PROXY" => features::AV_LAN,
    "MODULE_RG_ANTIVIRUS_NAC" => features::AV_NAC,
    "MODULE_RG_UPNP_AV" => features::UPNP_AV,
    "MODULE_RG_RADIUS_SERVER" => features::RADIUS_SERVER,
    "MODULE_RG_REDUCE_SUPPORT" => features::REDUCE_SUPPORT,
    "CONFIG_HW_USB_STORAGE" => features::USB_HOST,
    "CONFIG_HW_USB_HOST_UHCI" => features::USB_HOST,
    "CONFIG_HW_USB_HOST_OHCI" => features::USB_HOST,
    "CONFIG_HW_USB_HOST_EHCI" => features::USB_HOST,
    "CONFIG_HW_FIREWIRE" => features::FIREWIRE_1394,
    "CONFIG_HW_FIREWIRE_STORAGE" => features::FIREWIRE_1394,
    "MODULE_RG_PSE" => features::PSE,
    "MODULE_RG_WPS" => features::WPS,
};

/// The license feature `token` is gated on, if it is a module at all.
pub fn feature_of(token: &str) -> Option<FeatureId> {
    MODULE_FEATURES.get(token).copied()
}

/// Entitlements decoded from a license string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseState {
    pub enabled: HashSet<FeatureId>,
    /// License checking is off; every module counts as licensed.
    pub no_license: bool,
    pub evaluation: bool,
}

impl LicenseState {
    pub fn unchecked() -> Self {
        LicenseState {
            no_license: true,
            ..LicenseState::default()
        }
    }

    pub fn with_features<I: IntoIterator<Item = FeatureId>>(features: I) -> Self {
        LicenseState {
            enabled: features.into_iter().collect(),
            ..LicenseState::default()
        }
    }
}

/// The tokens that tell the gate what to do about unlicensed modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensePolicy {
    /// Truthy: enable unlicensed modules anyway, with a warning.
    pub force_token: &'static str,
    /// `y`: quietly leave indirectly requested unlicensed modules off.
    pub auto_disable_token: &'static str,
}

impl Default for LicensePolicy {
    fn default() -> Self {
        LicensePolicy {
            force_token: "LIC_FORCE",
            auto_disable_token: "LIC_AUTOCONF",
        }
    }
}

/// What [`LicenseGate::enable_module`] did with a request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    Enabled,
    /// Enabled without a license because the force flag is set.
    Forced,
    /// Left unset: no license, and auto-disable is on.
    AutoDisabled,
    /// The command line turned the module off; nothing was written.
    DisabledByCommandLine,
}

#[derive(Debug, Clone, Default)]
pub struct LicenseGate {
    state: LicenseState,
    policy: LicensePolicy,
}

impl LicenseGate {
    pub fn new(state: LicenseState) -> Self {
        LicenseGate {
            state,
            policy: LicensePolicy::default(),
        }
    }

    pub fn with_policy(self, policy: LicensePolicy) -> Self {
        LicenseGate { policy, ..self }
    }

    pub fn state(&self) -> &LicenseState {
        &self.state
    }

    pub fn policy(&self) -> &LicensePolicy {
        &self.policy
    }

    pub fn is_module(&self, token: &str) -> bool {
        feature_of(token).is_some()
    }

    /// Tokens that are not modules are never license-checked.
    pub fn is_licensed(&self, token: &str) -> bool {
        match feature_of(token) {
            None => true,
            Some(_) if self.state.no_license => true,
            Some(feature) => self.state.enabled.contains(&feature),
        }
    }

    /// Rejects a plain write to a token that must go through [`LicenseGate::enable_module`].
    pub fn check_plain_write(&self, token: &str, at: Provenance) -> RegistryResult<()> {
        if let Some(feature) = feature_of(token) {
            bail!(RegistryError::ModuleRequiresGate {
                token: token.to_string(),
                feature,
                at,
            });
        }
        Ok(())
    }

    /// Turns on a licensed module.
    ///
    /// A command-line request is honored if licensed or forced and re-asserted at `TokenSet`
    /// priority. Without one, an unlicensed module is forced on, left off, or refused depending on
    /// the policy tokens.
    pub fn enable_module(
        &self,
        registry: &mut Registry,
        token: &str,
        at: Provenance,
    ) -> RegistryResult<ModuleOutcome> {
        if !self.is_module(token) {
            bail!(RegistryError::NotAModule {
                token: token.to_string(),
                at,
            });
        }

        let force = registry.is_truthy(self.policy.force_token);
        let auto_disable = registry
            .find(self.policy.auto_disable_token)
            .is_some_and(|o| o.value.as_deref() == Some("y"));
        if force && auto_disable {
            bail!(RegistryError::ConflictingLicensePolicy {
                force: self.policy.force_token.to_string(),
                auto: self.policy.auto_disable_token.to_string(),
            });
        }

        let licensed = self.is_licensed(token);
        let requested = registry.get(token)?;

        if requested.set_by_command_line() {
            if !requested.is_truthy() {
                debug!(token, "module disabled by command line");
                return Ok(ModuleOutcome::DisabledByCommandLine);
            }

            let mut outcome = ModuleOutcome::Enabled;
            if !licensed {
                if !force {
                    bail!(RegistryError::UnlicensedFeature {
                        token: token.to_string(),
                        at,
                        hint: format!(
                            "use {}=y with 'make config' command line to override license enforcement",
                            self.policy.force_token
                        ),
                    });
                }
                warn!("enabling {token} although there is no license, the created image will not run properly");
                outcome = ModuleOutcome::Forced;
            }
            registry.set(token, "y", SetPriority::TokenSet, at)?;
            return Ok(outcome);
        }

        if licensed {
            registry.set(token, "y", SetPriority::TokenSet, at)?;
            Ok(ModuleOutcome::Enabled)
        } else if force {
            warn!("{at}: enabling {token} although there is no license, the created image will not run properly");
            registry.set(token, "y", SetPriority::TokenSet, at)?;
            Ok(ModuleOutcome::Forced)
        } else if auto_disable {
            info!(
                "{at}: disabling {token} (no license). use {}=n {}=y in 'make config' command line to override license enforcement",
                self.policy.auto_disable_token, self.policy.force_token
            );
            Ok(ModuleOutcome::AutoDisabled)
        } else {
            bail!(RegistryError::UnlicensedFeature {
                token: token.to_string(),
                at,
                hint: format!(
                    "Add {token}=n to the 'make config' command line to disable the module or add {}=y to the 'make config' command line to automatically disable features you do not have a license for",
                    self.policy.auto_disable_token
                ),
            });
        }
    }
}
