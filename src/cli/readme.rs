//! `readme` command: patch the README tables from `badges.json`.

use anyhow::Result;

use crate::{
    config::ProjectConfig, font::FontRegistry, log, readme::update_readme, utils::plural_count,
};

pub fn update(config: &ProjectConfig) -> Result<()> {
    let paths = &config.paths;
    let (slugs, fonts) = update_readme(
        &paths.readme,
        &paths.badges,
        &paths.output,
        config.render.font_showcase.as_deref(),
        FontRegistry::embedded(),
    )?;

    if fonts > 0 {
        log!("readme"; "{}: {} and {}",
            config.root_relative(&paths.readme).display(),
            plural_count(slugs, "slug"),
            plural_count(fonts, "font"));
    } else {
        log!("readme"; "{}: {}",
            config.root_relative(&paths.readme).display(),
            plural_count(slugs, "slug"));
    }
    Ok(())
}
