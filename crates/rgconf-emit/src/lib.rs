//! Turns a resolved [`Registry`] into the files the build consumes:
//!
//! - a C header of `#define`s (`rg_config.h`),
//! - a makefile fragment of `TOKEN=value` lines (`rg_config.mk`),
//! - a C file with runtime copies of cooked options and, when `CONFIG_RG_CONFIG_STRINGS` is on,
//!   the `config_strings[]` table.
//!
//! Every option is validated before anything is written, and the three files are replaced
//! together (see [`Commit`]).
use std::fmt::Write;
use std::path::PathBuf;

use rgconf_registry::Registry;
use tracing::{debug, info};

use crate::strings::StringTable;
use crate::validate::{Targets, check_option};

pub mod commit;
pub mod errors;
mod header;
mod makefile;
pub mod report;
mod strings;
pub mod validate;

pub use commit::Commit;
pub use errors::{EmitError, EmitResult};
pub use report::{Identity, MajorFeatures};

/// Where the three configuration files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub makefile: PathBuf,
    pub c_file: PathBuf,
}

/// The rendered contents of the three configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub header: String,
    pub makefile: String,
    pub c_file: String,
}

impl Rendered {
    pub fn commit(self, paths: &OutputPaths) -> EmitResult<()> {
        let mut commit = Commit::new();
        commit
            .add(&paths.header, self.header)
            .add(&paths.makefile, self.makefile)
            .add(&paths.c_file, self.c_file);
        commit.finish()
    }
}

pub struct Emitter<'a> {
    registry: &'a Registry,
    config_log: &'a str,
    strings_token: &'static str,
}

impl<'a> Emitter<'a> {
    pub fn new(registry: &'a Registry, config_log: &'a str) -> Self {
        Emitter {
            registry,
            config_log,
            strings_token: "CONFIG_RG_CONFIG_STRINGS",
        }
    }

    /// Validates and renders every option, in table order.
    pub fn render(&self) -> EmitResult<Rendered> {
        let log = self.config_log;
        let with_strings = self.registry.is_truthy(self.strings_token);

        let mut h = String::new();
        let mut mk = String::new();
        let mut c = String::new();
        let mut table = StringTable::default();

        writeln!(mk, "# This file was automatically generated by create_config")?;
        writeln!(mk, "# See {log} for configuration log.")?;
        writeln!(mk)?;

        writeln!(c, "/* This file was automatically generated by create_config")?;
        writeln!(c, " * See {log} for configuration log.")?;
        writeln!(c, " */")?;
        writeln!(c)?;
        writeln!(c, "#include <stdlib.h>")?;
        if with_strings {
            writeln!(c, "#include <build/config_strings.h>")?;
        }
        writeln!(c)?;

        writeln!(h, "/* This file was automatically generated by create_config")?;
        writeln!(h, " * See {log} for configuration log.")?;
        writeln!(h, " */")?;
        writeln!(h, "#ifndef _RG_CONFIG_H_")?;
        writeln!(h, "#define _RG_CONFIG_H_")?;
        writeln!(h)?;
        writeln!(h, "#define AUTOCONF_INCLUDED")?;

        for option in self.registry.iter() {
            check_option(option)?;

            let targets = Targets::of(option);
            if targets.makefile {
                makefile::write_option(&mut mk, option)?;
            }
            if targets.header {
                header::write_option(&mut h, &mut c, option)?;
            }
            table.push(&option.token, option.value.as_deref());
        }

        if with_strings {
            debug!("{} entries in config_strings", table.len());
            table.write(&mut c)?;
        }
        writeln!(h, "#endif")?;

        Ok(Rendered {
            header: h,
            makefile: mk,
            c_file: c,
        })
    }

    /// Renders and writes all three files. Nothing is written if any option fails validation.
    pub fn emit(&self, paths: &OutputPaths) -> EmitResult<()> {
        let rendered = self.render()?;
        rendered.commit(paths)?;
        info!(
            "Configuration written to {}, {} and {}",
            paths.header.display(),
            paths.makefile.display(),
            paths.c_file.display()
        );
        Ok(())
    }
}
