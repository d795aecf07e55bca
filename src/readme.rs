//! README table patcher.
//!
//! Rewrites the Markdown tables that follow the `#### Available Slugs` and
//! `#### Available Fonts` headings. A blank line right after a heading is
//! kept; every `|`-prefixed line after it is replaced.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::badge::{BadgeRecord, BadgeStyle};
use crate::font::FontRegistry;

pub const SLUGS_HEADING: &str = "#### Available Slugs";
pub const FONTS_HEADING: &str = "#### Available Fonts";

/// Replace the table under `heading`. Content without the heading is
/// returned unchanged apart from line endings.
pub fn replace_table(content: &str, heading: &str, table: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        out.push(line);
        i += 1;

        if line.trim() != heading {
            continue;
        }
        if i < lines.len() && lines[i].trim().is_empty() {
            out.push(lines[i]);
            i += 1;
        }
        while i < lines.len() && lines[i].trim_start().starts_with('|') {
            i += 1;
        }
        out.push(table);
    }

    let mut patched = out.join("\n");
    patched.push('\n');
    patched
}

/// `| Slug | Sample |` with one row per distinct slug, sorted.
///
/// The sample is the slug's `flat` badge, or its first record when the
/// entry was limited to another style.
pub fn slugs_table(records: &[BadgeRecord], samples: &str) -> String {
    let mut sample_paths: BTreeMap<&str, &str> = BTreeMap::new();
    for record in records {
        let is_flat = record.path == format!("{}/{}.svg", BadgeStyle::Flat, record.slug);
        sample_paths
            .entry(record.slug.as_str())
            .and_modify(|path| {
                if is_flat {
                    *path = record.path.as_str();
                }
            })
            .or_insert(record.path.as_str());
    }

    let mut lines = vec!["| Slug | Sample |".to_string(), "| --- | --- |".to_string()];
    lines.extend(
        sample_paths
            .iter()
            .map(|(slug, path)| format!("| {slug} | ![{slug}]({samples}/{path}) |")),
    );
    lines.join("\n")
}

/// `| Family Name | Type | Sample |` for every real font, sorted by name.
pub fn fonts_table(fonts: &FontRegistry, showcase: &str, samples: &str) -> String {
    let mut real: Vec<_> = fonts.real_fonts().collect();
    real.sort_by(|a, b| a.family_name().cmp(b.family_name()));

    let mut lines = vec![
        "| Family Name | Type | Sample |".to_string(),
        "| --- | --- | --- |".to_string(),
    ];
    lines.extend(real.iter().map(|font| {
        format!(
            "| {} | {} | ![{showcase}]({samples}/flat/{}/{showcase}.svg) |",
            title_case(font.family_name()),
            title_case(font.group().as_str()),
            font.slug(),
        )
    }));
    lines.join("\n")
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Link prefix for sample images: `output` relative to the README's
/// directory when possible.
pub fn samples_prefix(readme: &Path, output: &Path) -> String {
    let relative = readme
        .parent()
        .and_then(|dir| output.strip_prefix(dir).ok());
    match relative {
        Some(rel) => {
            let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
            format!("./{}", parts.join("/"))
        }
        None => output.display().to_string(),
    }
}

/// Patch the README in place. Returns `(slugs, fonts)` row counts.
///
/// The fonts table is only rewritten when a showcase slug is configured.
pub fn update_readme(
    readme: &Path,
    badges_json: &Path,
    output: &Path,
    showcase: Option<&str>,
    fonts: &FontRegistry,
) -> Result<(usize, usize)> {
    let records: Vec<BadgeRecord> = {
        let json = fs::read_to_string(badges_json)
            .with_context(|| format!("failed to read {}", badges_json.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid badge metadata {}", badges_json.display()))?
    };
    let mut content = fs::read_to_string(readme)
        .with_context(|| format!("failed to read {}", readme.display()))?;

    let samples = samples_prefix(readme, output);
    let slugs = slugs_table(&records, &samples);
    let slug_rows = slugs.lines().count() - 2;
    content = replace_table(&content, SLUGS_HEADING, &slugs);

    let mut font_rows = 0;
    if let Some(showcase) = showcase {
        let table = fonts_table(fonts, showcase, &samples);
        font_rows = table.lines().count() - 2;
        content = replace_table(&content, FONTS_HEADING, &table);
    }

    fs::write(readme, content).with_context(|| format!("failed to write {}", readme.display()))?;
    Ok((slug_rows, font_rows))
}
