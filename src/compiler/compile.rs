//! Compilation of a search config into a [`CompiledTable`].

use crate::bangs::{BangFormat, VendorCatalogs};
use crate::compiler::table::{BangEntry, CompiledTable, INSTANT_BANG};
use crate::config::schema::SearchConfig;
use crate::engines::adjusted_template;

/// Compile `config` and `catalogs` into a fresh lookup table.
///
/// Enabled catalogs are applied in order, so a later catalog's bang replaces
/// an earlier one. Never fails: unknown engines resolve to the default engine.
pub fn compile(config: &SearchConfig, catalogs: &VendorCatalogs) -> CompiledTable {
    let mut table = CompiledTable::new();

    let engine = config.fallback_engine.resolve();
    let fallback = adjusted_template(&engine, &config.settings);
    table.set_engine(fallback.as_str());

    for named in catalogs.iter().filter(|c| config.catalog_enabled(&c.name)) {
        for definition in &named.catalog {
            let bang = definition.bang.to_lowercase();
            if bang == INSTANT_BANG {
                continue;
            }

            let template = definition.template(&fallback);
            if let Some(lone) = definition.lone_url(&template) {
                table.set_lone(&bang, lone);
            }
            table.set_bang(&bang, BangEntry::new(definition.format, &template));
        }
        tracing::trace!(catalog = %named.name, bangs = named.catalog.len(), "Applied vendor catalog");
    }

    if config.instant_redirect.enabled {
        let engine = config.instant_redirect.engine.resolve_instant();
        if let Some(first_result) = engine.first_result.as_deref() {
            table.set_bang(INSTANT_BANG, BangEntry::new(BangFormat::FULL, first_result));
        }
    }

    for entry in &config.bang_overrides {
        let bang = entry.bang.to_lowercase();
        if bang == INSTANT_BANG {
            continue;
        }

        let format = BangFormat::new(entry.url_encode_placeholder, entry.url_encode_space_to_plus);
        table.set_bang(&bang, BangEntry::new(format, &entry.url));
        table.set_lone(&bang, entry.lone_url.as_str());
    }

    tracing::debug!(
        engine = %engine.name,
        entries = table.len(),
        "Compiled bang table"
    );

    table
}
