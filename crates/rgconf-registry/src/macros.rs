/// Builds an [`OptionKind`](crate::option::OptionKind) with the named tags set.
///
/// ```
/// use rgconf_registry::kind;
///
/// let k = kind!(module_expand, static_on_develop);
/// assert!(k.module_expand && k.static_on_develop);
/// assert!(!k.is_number);
/// ```
#[macro_export]
macro_rules! kind {
    () => {
        $crate::option::OptionKind::NONE
    };
    ($($tag:ident),+ $(,)?) => {{
        let mut kind = $crate::option::OptionKind::NONE;
        $(kind.$tag = true;)+
        kind
    }};
}

/// Declares a default option table as a `Vec<ConfigOption>`.
///
/// Each entry is `TOKEN [tags] (= "value")? (: "description")?`:
///
/// ```
/// use rgconf_registry::option_table;
///
/// let table = option_table![
///     CONFIG_RG_DEV [],
///     CONFIG_RG_KERNEL_LOAD_ADDRESS [is_number, emit_makefile] = "0x8000",
///     MODULE_RG_UPNP [module, major_feature] : "UPnP",
/// ];
/// assert_eq!(table.len(), 3);
/// assert_eq!(table[1].value.as_deref(), Some("0x8000"));
/// assert_eq!(table[2].description.as_deref(), Some("UPnP"));
/// ```
#[macro_export]
macro_rules! option_table {
    ($($token:ident [$($tag:ident),* $(,)?] $(= $value:literal)? $(: $desc:literal)?),* $(,)?) => {
        vec![
            $({
                let option = $crate::option::ConfigOption::new(
                    stringify!($token),
                    $crate::kind!($($tag),*),
                );
                $(let option = option.with_value($value);)?
                $(let option = option.with_description($desc);)?
                option
            }),*
        ]
    };
}
