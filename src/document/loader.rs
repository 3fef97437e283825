//! Document loading and orchestration
//!
//! This module contains the main `load_document()` function that orchestrates
//! the structuring process: the text dump is split into pages, the table of
//! contents is parsed, then every section is structured page by page with its
//! own TOC matcher and merged into one element stream.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::str::FromStr;

use super::io::{read_text_dump, split_pages};
use super::merge::merge_pages;
use super::models::*;
use super::parsing::{Toc, TocMatcher};
use crate::config::Config;

/// An inclusive range of 1-based page numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
}

impl PageRange {
    /// Select the pages of this range, failing if it runs past the end
    fn select<'p, T>(&self, pages: &'p [T]) -> Result<&'p [T]> {
        if self.first == 0 || self.last < self.first {
            bail!(
                "Invalid page range {}-{}: expected 1 <= FIRST <= LAST",
                self.first,
                self.last
            );
        }
        if self.last > pages.len() {
            bail!(
                "Page range {}-{} is out of bounds: the document has {} pages",
                self.first,
                self.last,
                pages.len()
            );
        }
        Ok(&pages[self.first - 1..self.last])
    }
}

impl FromStr for PageRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (first, last) = s.split_once('-').unwrap_or((s, s));
        let first: usize = first
            .trim()
            .parse()
            .with_context(|| format!("Invalid first page in {s:?}"))?;
        let last: usize = last
            .trim()
            .parse()
            .with_context(|| format!("Invalid last page in {s:?}"))?;
        if first == 0 || last < first {
            bail!("Invalid page range {s:?}: expected FIRST-LAST with 1 <= FIRST <= LAST");
        }
        Ok(PageRange { first, last })
    }
}

/// A named run of pages structured with one TOC matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub name: String,
    pub pages: PageRange,
    /// The first page starts with a subheader and a title line
    pub cover: bool,
}

impl FromStr for SectionSpec {
    type Err = anyhow::Error;

    /// Parse `NAME=FIRST-LAST`, optionally followed by `:cover`
    fn from_str(s: &str) -> Result<Self> {
        let Some((name, range)) = s.split_once('=') else {
            bail!("Invalid section {s:?}: expected NAME=FIRST-LAST[:cover]");
        };
        let (range, cover) = match range.strip_suffix(":cover") {
            Some(range) => (range, true),
            None => (range, false),
        };
        if name.trim().is_empty() {
            bail!("Invalid section {s:?}: empty name");
        }
        Ok(SectionSpec {
            name: name.trim().to_string(),
            pages: range.parse()?,
            cover,
        })
    }
}

/// Where to find the parts of the document
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub toc: PageRange,
    pub sections: Vec<SectionSpec>,
}

/// Main document loading function
///
/// This function:
/// 1. Reads and validates the text dump
/// 2. Segments every page into header, content and footer
/// 3. Parses the table of contents
/// 4. Structures each section with a fresh TOC matcher
/// 5. Runs the footnote passes and merges the pages of each section
pub fn load_document(file_path: &Path, options: &LoadOptions, config: &Config) -> Result<Document> {
    let text = read_text_dump(file_path)?;
    let file_size = std::fs::metadata(file_path)?.len();
    let raw_pages = split_pages(&text);
    log::debug!("Read {} pages from {}", raw_pages.len(), file_path.display());

    let toc_pages = options
        .toc
        .select(&raw_pages)
        .context("Failed to locate the table of contents")?
        .iter()
        .enumerate()
        .map(|(offset, raw)| {
            Page::parse_flat(raw)
                .with_context(|| format!("Failed to segment page {}", options.toc.first + offset))
        })
        .collect::<Result<Vec<_>>>()?;
    let toc = Toc::from_pages(&toc_pages).context("Failed to parse the table of contents")?;

    let mut sections = Vec::with_capacity(options.sections.len());
    for spec in &options.sections {
        let section = load_section(&raw_pages, spec, &toc, config)
            .with_context(|| format!("Failed to structure section {:?}", spec.name))?;
        sections.push(section);
    }

    let title = sections
        .iter()
        .find_map(|section| section.title.clone())
        .or_else(|| {
            file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Untitled Document".to_string());
    let footnote_count = sections.iter().map(|section| section.footnotes.len()).sum();

    log::info!(
        "Structured {} sections, {} table of contents entries, {} footnotes",
        sections.len(),
        toc.entries.len(),
        footnote_count
    );

    Ok(Document {
        title,
        metadata: DocumentMetadata {
            file_path: file_path.display().to_string(),
            file_size,
            page_count: raw_pages.len(),
            footnote_count,
        },
        toc: toc.entries,
        sections,
    })
}

fn load_section(raw_pages: &[&str], spec: &SectionSpec, toc: &Toc, config: &Config) -> Result<Section> {
    let flat = config.is_flat_margin(&spec.name);
    let pages = spec
        .pages
        .select(raw_pages)?
        .iter()
        .enumerate()
        .map(|(offset, raw)| {
            let page = if flat {
                Page::parse_flat(raw)
            } else {
                Page::parse(raw)
            };
            page.with_context(|| format!("Failed to segment page {}", spec.pages.first + offset))
        })
        .collect::<Result<Vec<_>>>()?;

    let first_lines = pages
        .first()
        .map(|page| page.content.iter().map(String::as_str))
        .into_iter()
        .flatten();
    let mut matcher = TocMatcher::for_section(&toc.entries, first_lines)
        .with_exceptions(config.parser.heading_exceptions.clone());

    let mut cover = None;
    let mut structured: Vec<StructuredPage> = Vec::with_capacity(pages.len());
    for (offset, page) in pages.iter().enumerate() {
        let number = spec.pages.first + offset;
        log::debug!("Structuring page {number} (margin {})", page.indent());
        if offset == 0 && spec.cover {
            let parsed = CoverPage::parse(page, &mut matcher)
                .with_context(|| format!("Failed to structure cover page {number}"))?;
            cover = Some((parsed.subheader, parsed.title));
            structured.push(parsed.page);
        } else {
            let parsed = StructuredPage::parse_after(page, &mut matcher, structured.last())
                .with_context(|| format!("Failed to structure page {number}"))?;
            structured.push(parsed);
        }
    }
    if matcher.remaining() > 0 {
        log::debug!(
            "Section {:?} stops before table of contents entry {:?}",
            spec.name,
            matcher.next_entry()
        );
    }

    for page in structured.iter_mut() {
        page.reindent_codes();
        page.rework_footnotes();
        page.fix_footnote_refs();
        page.put_footnote_placeholders();
    }
    let merged = merge_pages(structured)?;

    let (subheader, title) = match cover {
        Some((subheader, title)) => (Some(subheader), Some(title)),
        None => (None, None),
    };
    Ok(Section {
        name: spec.name.clone(),
        subheader,
        title,
        elements: merged.elements,
        footnotes: merged.footnotes,
    })
}
