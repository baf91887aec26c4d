//! The default option table. Every token a rule may read or write is declared here, and nowhere
//! else: writing to a token missing from this table is an error.

use rgconf_registry::{ConfigOption, option_table};

pub fn options() -> Vec<ConfigOption> {
    option_table![
        // Target identity
        CONFIG_RG_DIST [is_string, emit_header_raw, emit_makefile, exported],
        CONFIG_RG_HW [is_string, emit_header_raw, emit_makefile, exported],
        CONFIG_RG_HW_DESC_STR [is_c_string, internal, emit_header_cooked],
        CONFIG_RG_OS [is_string, emit_header_raw, emit_makefile, exported],
        CONFIG_RG_JPKG [internal],
        CONFIG_RG_JPKG_DIST [is_string, emit_makefile],
        CONFIG_RG_JPKG_UML [],
        JPKG_ARCH [is_string, emit_makefile],
        CONFIG_RG_BUILD_LOCAL_TARGETS_ONLY [emit_makefile],
        BOARD [is_string, emit_makefile, exported],
        FIRM [is_string, emit_makefile],
        ARCH [is_string, emit_makefile, exported],
        LIBC_ARCH [is_string, emit_makefile],
        TARGET_ENDIANESS [is_string, emit_makefile],
        CONFIG_CPU_BIG_ENDIAN [],
        CONFIG_CPU_LITTLE_ENDIAN [],

        // Build policy
        CONFIG_RG_DEV [],
        CONFIG_RG_CONFIG_STRINGS [emit_header_raw],
        CONFIG_EXPORT_BINARIES [emit_makefile],
        CONFIG_RG_TOOLS [emit_makefile],
        CONFIG_VALGRIND [],
        OPENRG_DEBUG [emit_makefile, exported],
        CONFIG_GLIBC [],
        GLIBC_IN_TOOLCHAIN [emit_makefile],
        CONFIG_ULIBC [],
        CONFIG_RG_LANGUAGES [is_string, emit_makefile] = "",
        CONFIG_LICENSE_AGREEMENT [emit_header_cooked],

        // License
        LIC [is_string, emit_makefile],
        LICSTR [is_string, emit_makefile],
        LIC_FORCE [emit_makefile],
        LIC_AUTOCONF [emit_makefile],

        // Target OS
        CONFIG_RG_OS_LINUX [],
        CONFIG_RG_OS_LINUX_24 [],
        CONFIG_RG_OS_LINUX_26 [],
        CONFIG_RG_OS_ECOS [],
        CONFIG_RG_OS_VXWORKS [],
        CONFIG_RG_TARGET_LINUX [],
        CONFIG_RG_TARGET_VXWORKS [],
        CONFIG_RG_NOT_UNIX [],
        CONFIG_RG_EFSS [],
        CONFIG_VX_SYMTBL [],
        CONFIG_RG_VX_TIMERS_TASK [],
        CONFIG_RG_TTYP [],
        CONFIG_RG_KERNEL_COMP_METHOD [is_string, emit_makefile],

        // Kernel
        CONFIG_INIT_ENV_ARG_LIMIT [is_number],
        CONFIG_PRINTK [],
        CONFIG_LOG_BUF_SHIFT [is_number],
        CONFIG_BUG [],
        CONFIG_BASE_SMALL [is_number],
        CONFIG_SYSCTL [],
        CONFIG_BINFMT_ELF [],
        CONFIG_MMU [],
        CONFIG_HAS_MMU [],
        CONFIG_SYSVIPC [],
        CONFIG_DEFAULT_IOSCHED [is_string],
        CONFIG_RAMFS [],
        CONFIG_PROC_FS [],
        CONFIG_SYSFS [],
        CONFIG_MODULES [],
        CONFIG_MODULE_UNLOAD [],
        CONFIG_NET [],
        CONFIG_NETDEVICES [],
        CONFIG_PACKET [],
        CONFIG_UNIX [],
        CONFIG_INET [],
        CONFIG_IP_MULTICAST [],
        CONFIG_IP_ADVANCED_ROUTER [],
        CONFIG_NET_ETHERNET [],
        CONFIG_LEGACY_PTYS [],
        CONFIG_LEGACY_PTY_COUNT [is_number],
        CONFIG_UID16 [],
        CONFIG_SYN_COOKIES [],
        CONFIG_ATM [],
        CONFIG_ATM_NULL [],
        CONFIG_ATM_PVC_SCAN [],
        CONFIG_RG_IPV4 [module_expand, static_on_develop],

        // Hardware
        CONFIG_RG_HW_DANUBE [],
        CONFIG_HW_ETH_WAN [hardware] : "Ethernet WAN",
        CONFIG_HW_ETH_LAN [hardware] : "Ethernet LAN",
        CONFIG_HW_ETH_LAN2 [hardware] : "Second Ethernet LAN",
        CONFIG_HW_DSL_WAN [hardware] : "DSL WAN",
        CONFIG_HW_SWITCH_LAN [hardware] : "LAN switch",
        CONFIG_HW_UML_LOOP_STORAGE [hardware] : "UML loop device storage",
        CONFIG_HW_DSP [module, hardware] : "Voice DSP",
        CONFIG_HW_ENCRYPTION [module, hardware] : "Hardware encryption engine",
        CONFIG_HW_USB_STORAGE [module, hardware] : "USB mass storage",
        CONFIG_HW_80211G_UML_WLAN [module, hardware] : "Simulated 802.11g WLAN",
        CONFIG_HW_LEDS [module_expand, hardware] : "LEDs",
        CONFIG_HW_BUTTONS [module_expand, hardware] : "Buttons",
        CONFIG_VINETIC [module_expand],
        CONFIG_VINETIC_LINES_PER_CHIP [is_number, emit_header_cooked],
        CONFIG_IPSEC_USE_DANUBE_CRYPTO [],
        CONFIG_RG_FLASH_LAYOUT_SIZE [is_number, emit_header_cooked, emit_makefile],
        CONFIG_RG_DYN_FLASH_LAYOUT [],

        // Modules
        MODULE_RG_FOUNDATION [module] : "Foundation Package",
        MODULE_RG_ADVANCED_MANAGEMENT [module] : "Advanced Management",
        MODULE_RG_SNMP [module] : "SNMP",
        MODULE_RG_DSL [module] : "DSL",
        MODULE_RG_PPP [module] : "PPP",
        MODULE_RG_IPV6 [module] : "IPv6",
        MODULE_RG_VLAN [module] : "VLAN",
        MODULE_RG_UPNP [module] : "UPnP",
        MODULE_RG_UPNP_AV [module] : "UPnP AV",
        MODULE_RG_ADVANCED_ROUTING [module] : "Advanced Routing",
        MODULE_RG_FIREWALL_AND_SECURITY [module] : "Firewall and Security",
        MODULE_RG_L2TP [module] : "L2TP",
        MODULE_RG_IPSEC [module] : "IPSec",
        MODULE_RG_PPTP [module] : "PPTP",
        MODULE_RG_FILESERVER [module] : "File Server",
        MODULE_RG_PRINTSERVER [module] : "Print Server",
        MODULE_RG_WLAN_AND_ADVANCED_WLAN [module] : "Wireless LAN",
        MODULE_RG_URL_FILTERING [module] : "URL Filtering",
        MODULE_RG_QOS [module] : "Quality of Service",
        MODULE_RG_ZERO_CONFIGURATION_NETWORKING [module] : "Zero Configuration Networking",
        MODULE_RG_ATA [module] : "Analog Telephone Adapter",
        MODULE_RG_REDUCE_SUPPORT [module] : "Reduced Support",

        // Features
        CONFIG_RG_SMB [major_feature] : "Small business features",
        CONFIG_RG_RGLOADER [major_feature] : "RGLoader",
        CONFIG_RG_TELNETS [major_feature] : "Telnet server",
        CONFIG_RG_FACTORY_SETTINGS [],
        CONFIG_RG_ZLIB [],
        CONFIG_RG_UCD_SNMP [major_feature] : "SNMP agent",
        CONFIG_RG_UCD_SNMP_V3 [major_feature] : "SNMPv3",
        CONFIG_RG_IGD [major_feature] : "UPnP Internet Gateway Device",
        CONFIG_RG_UPNP_AV [major_feature] : "UPnP media server",
        CONFIG_RG_DISK_MNG [major_feature] : "Disk management",
        CONFIG_RG_REDUCE_SUPPORT [],
        CONFIG_RG_RIP [major_feature] : "RIP",
        CONFIG_RG_BGP [major_feature] : "BGP",
        CONFIG_RG_OSPF [major_feature] : "OSPF",
        CONFIG_RG_DNS_CONCURRENT [],
        CONFIG_RG_PPP_COMMON [module_expand, static_on_develop],
        CONFIG_RG_PPP [major_feature] : "PPP",
        CONFIG_RG_PPPOE [major_feature] : "PPP over Ethernet",
        CONFIG_RG_PRINT_SERVER [major_feature] : "Print server",
        CONFIG_RG_IPP [major_feature] : "Internet Printing Protocol",
        CONFIG_RG_LPD [module] : "LPD print server",
        CONFIG_RG_FS_BACKUP [],
        CONFIG_RG_FILESERVER [major_feature] : "File server",
        CONFIG_RG_SAMBA [major_feature] : "Samba",
        CONFIG_FREESWAN [major_feature] : "FreeS/WAN IPSec",

        // Themes
        CONFIG_GUI_RG [theme],
        CONFIG_GUI_RG2 [theme],
        CONFIG_GUI_SMB2 [theme],
        CONFIG_GUI_NETGEAR [theme],

        // Runtime
        OPENRG_CHRDEV_NAME [is_c_string, emit_header_raw, emit_makefile],
        OPENRG_CHRDEV_MAJOR [is_number, emit_header_raw, emit_makefile],
    ]
}
