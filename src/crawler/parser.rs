use std::collections::HashSet;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::crawler::models::FieldPair;
use crate::error::ScrapeError;

/// Listings hide the street behind this placeholder when the seller opted
/// out; it must never surface as a real street value.
const STREET_WITHHELD: &str = "Straße nicht freigegeben";

/// Collects the unique detail-page links referenced on one results page.
/// Fragment suffixes are cut before dedup so anchor variants collapse.
pub fn extract_expose_links(html: &str, base_url: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href*=\"/expose/\"]").unwrap();

    let mut links = HashSet::new();

    for el in document.select(&selector) {
        if let Some(href) = el.value().attr("href") {
            let clean = href.split('#').next().unwrap_or(href);
            if clean.is_empty() {
                continue;
            }
            if let Some(path) = clean.strip_prefix('/') {
                links.insert(format!("{}/{}", base_url, path));
            } else {
                links.insert(clean.to_string());
            }
        }
    }

    links
}

/// Reads the total result count from the banner on the first results page,
/// e.g. "1.234 Ergebnisse" -> 1234.
pub fn parse_result_count(html: &str) -> Result<u32, ScrapeError> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("h1.MatchNumber-a225f").unwrap();

    let banner = doc
        .select(&sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::ResultCount("banner element missing".into()))?;

    let re = Regex::new(r"^[0-9][0-9.]*").unwrap();
    let lead = re
        .find(&banner)
        .ok_or_else(|| ScrapeError::ResultCount(format!("no leading count in {:?}", banner)))?;

    lead.as_str()
        .replace('.', "")
        .parse()
        .map_err(|_| ScrapeError::ResultCount(format!("unparsable count in {:?}", banner)))
}

/// Runs the four extraction passes over one detail page, appending whatever
/// pairs each pass yields. A failing metadata pass keeps its partial pairs;
/// the label/value passes cannot fail, an absent block just yields nothing.
pub fn extract_listing_fields(html: &str, url: &str, out: &mut Vec<FieldPair>) {
    let doc = Html::parse_document(html);

    if let Err(e) = process_metadata(&doc, out) {
        warn!(url, error = %e, "metadata pass failed, keeping partial fields");
    }
    process_label_value_block(&doc, "app-estate-object-informations", "p", out);
    process_label_value_block(&doc, "app-price", "sd-cell-col", out);
    process_label_value_block(&doc, "app-energy-certificate", "p", out);
}

/// The summary block: title, headline price and the four positional spans
/// (area, rooms, street, locality).
fn process_metadata(doc: &Html, out: &mut Vec<FieldPair>) -> Result<(), ScrapeError> {
    let meta_sel = Selector::parse("app-objectmeta#aUebersicht").unwrap();
    let meta = match doc.select(&meta_sel).next() {
        Some(el) => el,
        None => return Ok(()),
    };

    let h1_sel = Selector::parse("h1.ng-star-inserted").unwrap();
    let name = meta
        .select(&h1_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::extract("metadata", "title element missing"))?;
    out.push(FieldPair::text("Name", name));

    let strong_sel = Selector::parse("strong").unwrap();
    let price_raw = meta
        .select(&strong_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::extract("metadata", "price element missing"))?;
    let price = normalize_decimal(price_raw.split_whitespace().next().unwrap_or(""));
    if has_digit(&price) {
        out.push(FieldPair::number("Preis", parse_number(&price)?));
    }

    let span_sel = Selector::parse("span").unwrap();
    let spans: Vec<String> = meta.select(&span_sel).take(4).map(element_text).collect();
    if spans.len() < 4 {
        return Err(ScrapeError::extract(
            "metadata",
            format!("expected four summary spans, found {}", spans.len()),
        ));
    }

    let area = normalize_decimal(spans[0].split_whitespace().next().unwrap_or(""));
    if has_digit(&area) {
        out.push(FieldPair::number("Fläche(m²)", parse_number(&area)?));
    }

    if spans[2] != STREET_WITHHELD {
        out.push(FieldPair::text("Straße", spans[2].clone()));
    }

    let rooms = normalize_decimal(&spans[1]);
    if has_digit(&rooms) {
        out.push(FieldPair::number("Zimmer", parse_number(&rooms)?));
    }

    out.push(FieldPair::text("Ort", spans[3].clone()));

    Ok(())
}

/// Reads a container's cells as an alternating label/value sequence. A
/// trailing unpaired label is dropped; a missing container yields nothing.
fn process_label_value_block(doc: &Html, container: &str, cell: &str, out: &mut Vec<FieldPair>) {
    let container_sel = Selector::parse(container).unwrap();
    let block = match doc.select(&container_sel).next() {
        Some(el) => el,
        None => return,
    };

    let cell_sel = Selector::parse(cell).unwrap();
    let cells: Vec<String> = block.select(&cell_sel).map(element_text).collect();

    for pair in cells.chunks_exact(2) {
        out.push(FieldPair::text(pair[0].clone(), pair[1].clone()));
    }
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// German decimal notation: "." is a thousands separator, "," the decimal
/// point.
fn normalize_decimal(s: &str) -> String {
    s.replace('.', "").replace(',', ".")
}

fn parse_number(cleaned: &str) -> Result<f64, ScrapeError> {
    cleaned
        .parse()
        .map_err(|_| ScrapeError::extract("metadata", format!("not a number: {:?}", cleaned)))
}
