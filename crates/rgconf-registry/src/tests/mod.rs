use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::option_table;
use crate::registry::Registry;


fn registry() -> Registry {
    Registry::from_options(option_table![
        CONFIG_FOO [],
        CONFIG_BAR [module_expand],
        CONFIG_BAZ [module_expand, static_on_develop],
        CONFIG_RG_DEV [],
        CONFIG_RG_OS_VXWORKS [],
        CONFIG_RG_PROD_STR [is_c_string, emit_header_cooked] = "\"OpenRG\"",
        CONFIG_RG_FLASH_SIZE [is_number] = "0x800000",
        CONFIG_RG_TTY [is_number] = "notanumber",
        CONFIG_RG_INTERNAL_THING [internal],
        CONFIG_RG_THEME_BLUE [theme],
        CONFIG_RG_THEME_RED [theme],
        MODULE_RG_UPNP [module, major_feature] : "UPnP",
        MODULE_RG_PPP [module, major_feature] : "PPP",
        MODULE_RG_DSL [module, major_feature, module_expand] : "DSL",
        LIC_FORCE [],
        LIC_AUTOCONF [],
    ])
    .unwrap()
}

/// Collects the message of every WARN event.
#[derive(Clone, Default)]
struct Warnings(Arc<Mutex<Vec<String>>>);

struct Message<'a>(&'a mut String);

impl Visit for Message<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Warnings {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut message = String::new();
        event.record(&mut Message(&mut message));
        if let Ok(mut warnings) = self.0.lock() {
            warnings.push(message);
        }
    }
}

/// Runs `f` and returns the warnings it logged.
fn warnings_from<F: FnOnce()>(f: F) -> Vec<String> {
    let warnings = Warnings::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());
    tracing::subscriber::with_default(subscriber, f);
    let logged = warnings.0.lock().map(|w| w.clone()).unwrap_or_default();
    logged
}
