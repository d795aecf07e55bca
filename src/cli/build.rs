//! Badge rendering orchestration.
//!
//! Build pipeline phases:
//! - **Freshness** - Skip when the manifest is older than the last run
//! - **Load** - Palette, fonts, manifest entries
//! - **Render** - Fetch each badge, transform it, write it
//! - **Finalize** - `badges.json`, run metadata, README tables

use anyhow::{Context, Result, bail};
use std::time::Instant;

use crate::{
    badge::{Badge, BadgeSpec, HttpFetcher, render_all, write_records},
    color::named::Palette,
    config::ProjectConfig,
    debug,
    font::FontRegistry,
    freshness, log, manifest,
    utils::{error_chain, plural_count},
};

/// Run the full pipeline. `force` ignores run metadata.
pub fn build_badges(config: &ProjectConfig, force: bool, update_readme: bool) -> Result<()> {
    let paths = &config.paths;

    if !force && !freshness::should_run(&paths.manifest, &paths.metadata) {
        log!("build"; "manifest unchanged since last run, nothing to do");
        return Ok(());
    }

    let started = Instant::now();
    let css = config.css_registry().context("failed to load css color definitions")?;
    let palette = match &css {
        Some(css) => Palette::with_css(css),
        None => Palette::default(),
    };
    let fonts = FontRegistry::embedded();

    let specs = manifest::load(&paths.manifest, &palette, fonts)?;
    log!("build"; "loaded {} from {}",
        plural_count(specs.len(), "slug"),
        config.root_relative(&paths.manifest).display());

    let badges = collect_badges(&specs, config.render.font_showcase.as_deref(), fonts)?;
    debug!("build"; "{} to render", plural_count(badges.len(), "badge"));

    let base = config.base_url()?;
    let fetcher = HttpFetcher::new(&config.render.user_agent, config.timeout());
    let mut report = render_all(&badges, &fetcher, &base, &paths.output);

    write_records(&paths.badges, &mut report.records)?;

    if !report.is_success() {
        for (badge, err) in &report.failures {
            log!("error"; "{}: {}", badge, error_chain(err));
        }
        bail!(
            "{} failed, {} written",
            plural_count(report.failures.len(), "badge"),
            report.records.len()
        );
    }

    freshness::write_metadata(&paths.metadata)?;
    log!("build"; "rendered {} in {:.1?}",
        plural_count(report.records.len(), "badge"),
        started.elapsed());

    if update_readme {
        super::readme::update(config)?;
    }
    log!("build"; "done");
    Ok(())
}

/// Every style variant of every entry, followed by the font showcase.
fn collect_badges<'a>(
    specs: &'a [BadgeSpec],
    showcase: Option<&str>,
    fonts: &'a FontRegistry,
) -> Result<Vec<Badge<'a>>> {
    let mut badges: Vec<_> = specs.iter().flat_map(BadgeSpec::badges).collect();

    if let Some(slug) = showcase {
        let Some(spec) = specs.iter().find(|spec| spec.slug == slug) else {
            bail!("font showcase `{slug}` is not a manifest slug");
        };
        badges.extend(spec.showcase(fonts.real_fonts()));
    }
    Ok(badges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::BadgeStyle;
    use crate::badge::tests::spec;

    #[test]
    fn test_collect_badges_with_showcase() {
        let mut flat_only = spec("gitlab");
        flat_only.style = Some(BadgeStyle::Flat);
        let specs = vec![spec("github"), flat_only];
        let fonts = FontRegistry::embedded();

        let badges = collect_badges(&specs, None, fonts).unwrap();
        assert_eq!(badges.len(), BadgeStyle::ALL.len() + 1);

        let badges = collect_badges(&specs, Some("gitlab"), fonts).unwrap();
        assert_eq!(badges.len(), BadgeStyle::ALL.len() + 1 + 46);
        assert_eq!(
            badges.last().unwrap().relative_path(),
            format!("flat/{}/gitlab.svg", badges.last().unwrap().font.slug())
        );
    }

    #[test]
    fn test_collect_badges_unknown_showcase() {
        let specs = vec![spec("github")];
        let err = collect_badges(&specs, Some("twitter"), FontRegistry::embedded()).unwrap_err();
        assert!(err.to_string().contains("twitter"));
    }
}
