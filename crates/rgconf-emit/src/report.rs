//! The human-readable major features list and its C counterpart.

use std::fmt::{self, Write};

use rgconf_registry::{ConfigOption, OptionKind, Registry};
use rgconf_util::escape::c_escape;
use tracing::warn;

use crate::errors::EmitResult;

/// What the report is about.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity<'a> {
    pub dist: &'a str,
    pub hw: &'a str,
    pub os: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorFeatures {
    /// The text listing.
    pub text: String,
    /// `char *major_features[]`, the included major features by description.
    pub c_file: String,
}

/// Falls back to the token itself.
fn description(option: &ConfigOption) -> &str {
    option.description.as_deref().unwrap_or(&option.token)
}

fn write_section<'r>(
    f: &mut String,
    title: &str,
    options: impl Iterator<Item = &'r ConfigOption>,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.len()))?;
    for option in options {
        writeln!(f, "{:<40} {}", description(option), option.token)?;
    }
    Ok(())
}

fn included<'r>(
    registry: &'r Registry,
    tag: impl Fn(&OptionKind) -> bool + 'r,
) -> impl Iterator<Item = &'r ConfigOption> {
    registry
        .iter()
        .filter(move |o| o.kind.is_reportable() && o.is_truthy() && tag(&o.kind))
}

impl MajorFeatures {
    pub fn new(registry: &Registry, identity: Identity<'_>, c_file_name: &str) -> EmitResult<Self> {
        let mut text = String::new();
        let mut c_file = String::new();
        Self::render(registry, identity, c_file_name, &mut text, &mut c_file)?;
        Ok(MajorFeatures { text, c_file })
    }

    fn render(
        registry: &Registry,
        identity: Identity<'_>,
        c_file_name: &str,
        f: &mut String,
        c: &mut String,
    ) -> fmt::Result {
        for option in registry
            .iter()
            .filter(|o| o.kind.is_reportable() && o.description.is_none())
        {
            warn!("no description for major feature '{}'", option.token);
        }

        writeln!(f, "-------------------")?;
        writeln!(f, "Major features list")?;
        writeln!(f, "-------------------")?;
        for (label, name) in [
            ("Distribution", identity.dist),
            ("Hardware", identity.hw),
            ("Os", identity.os),
        ] {
            if !name.is_empty() {
                writeln!(f, "{label}: {name}")?;
            }
        }

        write_section(
            f,
            "Hardware configured in the distribution",
            included(registry, |k| k.hardware),
        )?;
        write_section(
            f,
            "Modules INCLUDED in the distribution",
            included(registry, |k| k.module),
        )?;
        write_section(
            f,
            "Features INCLUDED in the distribution",
            included(registry, |k| k.major_feature),
        )?;
        write_section(
            f,
            "Features NOT INCLUDED in the distribution",
            registry
                .iter()
                .filter(|o| o.kind.is_reportable() && !o.is_truthy()),
        )?;

        writeln!(c, "/* {c_file_name} */")?;
        writeln!(c, "/* This file was automatically generated. Do not modify it. */")?;
        writeln!(c)?;
        writeln!(c, "#include <stdio.h>")?;
        writeln!(c)?;
        writeln!(c, "char *major_features[] = {{")?;
        for option in included(registry, |k| k.major_feature) {
            writeln!(c, "    \"{}\",", c_escape(description(option)))?;
        }
        writeln!(c, "    NULL")?;
        writeln!(c, "}};")?;
        writeln!(c)
    }
}
