//! Reading and writing DrawingML paragraphs (`a:p`) inside a text body.

use crate::xml::{qualify, Element, Node};
use deck_core::types::MAX_LEVEL;
use deck_core::{Alignment, ParagraphRecord, RgbColor};

/// Left margin step per bullet level, in EMU (0.375 in).
const BULLET_INDENT: i64 = 342_900;

const BULLET_CHAR: &str = "\u{2022}";

/// `a:buAutoNum/@type` when the attribute is missing.
const DEFAULT_NUMBERING: &str = "arabicPeriod";

/// Characters written as `a:br` inside a paragraph.
const LINE_BREAKS: &[char] = &['\n', '\u{0B}'];

/// Run properties that belong to one paragraph and are not carried over to
/// paragraphs added past the end of the original text.
const EMPHASIS: &[&str] = &["b", "i", "u", "strike"];

/// `a:rPr` children that must come after `a:latin`.
const AFTER_LATIN: &[&str] = &["ea", "cs", "sym", "hlinkClick", "hlinkMouseOver", "rtl", "extLst"];

/// `a:rPr` children that must come after the fill.
const AFTER_FILL: &[&str] = &[
    "effectLst",
    "effectDag",
    "highlight",
    "uLnTx",
    "uLn",
    "uFillTx",
    "uFill",
    "latin",
    "ea",
    "cs",
    "sym",
    "hlinkClick",
    "hlinkMouseOver",
    "rtl",
    "extLst",
];

const FILLS: &[&str] = &["noFill", "solidFill", "gradFill", "blipFill", "pattFill", "grpFill"];

/// All paragraphs of a `txBody`.
pub fn read_text_body(body: &Element) -> Vec<ParagraphRecord> {
    body.elements()
        .filter(|e| e.local_name() == "p")
        .map(read_paragraph)
        .collect()
}

/// Text of a paragraph; `a:br` becomes `\n`.
pub fn paragraph_text(p: &Element) -> String {
    let mut text = String::new();
    for child in p.elements() {
        match child.local_name() {
            "r" | "fld" => {
                if let Some(t) = child.child("t") {
                    text.push_str(&t.text());
                }
            }
            "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// Read one paragraph with the formatting set on it or on its first run.
pub fn read_paragraph(p: &Element) -> ParagraphRecord {
    let mut record = ParagraphRecord::new(paragraph_text(p));

    if let Some(ppr) = p.child("pPr") {
        record.alignment = ppr.attr("algn").and_then(Alignment::from_ooxml);
        record.level = ppr
            .attr("lvl")
            .and_then(|v| v.parse::<u8>().ok())
            .map(|lvl| lvl.min(MAX_LEVEL));
        let has_bullet = ppr
            .elements()
            .any(|e| matches!(e.local_name(), "buChar" | "buAutoNum" | "buBlip"));
        if has_bullet {
            record.bullet = Some(true);
            record.level = record.level.or(Some(0));
        }
        record.numbering = ppr
            .child("buAutoNum")
            .map(|n| n.attr("type").unwrap_or(DEFAULT_NUMBERING).to_string());
    }

    let first_rpr = p
        .elements()
        .find(|e| e.local_name() == "r")
        .and_then(|r| r.child("rPr"));
    if let Some(rpr) = first_rpr {
        if is_on(rpr.attr("b")) {
            record.bold = Some(true);
        }
        if is_on(rpr.attr("i")) {
            record.italic = Some(true);
        }
        if rpr.attr("u").is_some_and(|u| u != "none") {
            record.underline = Some(true);
        }
        record.font_size = rpr
            .attr("sz")
            .and_then(|v| v.parse::<f64>().ok())
            .map(|sz| sz / 100.0);
        if let Some(fill) = rpr.child("solidFill") {
            record.color = fill
                .child("srgbClr")
                .and_then(|c| c.attr("val"))
                .and_then(|v| v.parse::<RgbColor>().ok());
            record.theme_color = fill
                .child("schemeClr")
                .and_then(|c| c.attr("val"))
                .map(str::to_string);
        }
        record.font_name = rpr
            .child("latin")
            .and_then(|l| l.attr("typeface"))
            .filter(|t| !t.is_empty())
            .map(str::to_string);
    }

    record
}

fn is_on(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

/// Replace the paragraphs of a `txBody`, keeping its body properties and list
/// style. An empty list leaves a single empty paragraph.
///
/// Each new paragraph takes its run template from the original paragraph at
/// the same position. Paragraphs past the original end use the body's first
/// run without emphasis or fill.
pub fn write_text_body(body: &mut Element, paragraphs: &[ParagraphRecord]) {
    let prefix = body
        .elements()
        .find(|e| e.local_name() == "bodyPr")
        .and_then(|e| e.prefix())
        .unwrap_or("a")
        .to_string();
    let templates: Vec<Option<Element>> = body
        .elements()
        .filter(|e| e.local_name() == "p")
        .map(|p| paragraph_template(p).cloned())
        .collect();
    let fallback = body_template(body);
    let template_at = |i: usize| match templates.get(i) {
        Some(own) => own.as_ref(),
        None => fallback.as_ref(),
    };

    body.retain_elements(|e| e.local_name() != "p");
    if body.child("bodyPr").is_none() {
        body.children
            .insert(0, Node::Element(Element::new(qualify(Some(&prefix), "bodyPr"))));
    }

    let mut built: Vec<Element> = paragraphs
        .iter()
        .enumerate()
        .map(|(i, record)| build_paragraph(&prefix, record, template_at(i)))
        .collect();
    if built.is_empty() {
        built.push(build_paragraph(&prefix, &ParagraphRecord::default(), template_at(0)));
    }

    let insert_at = body.position_of(&["extLst"]).unwrap_or(body.children.len());
    body.children
        .splice(insert_at..insert_at, built.into_iter().map(Node::Element));
}

/// Character properties of a paragraph's first run, else of its
/// end-of-paragraph marker.
fn paragraph_template(p: &Element) -> Option<&Element> {
    p.elements()
        .filter(|e| e.local_name() == "r")
        .find_map(|r| r.child("rPr"))
        .or_else(|| p.child("endParaRPr"))
}

/// The first paragraph template in the body, stripped of emphasis and fill.
fn body_template(body: &Element) -> Option<Element> {
    let mut rpr = body
        .elements()
        .filter(|e| e.local_name() == "p")
        .find_map(paragraph_template)?
        .clone();
    for attr in EMPHASIS {
        rpr.remove_attr(attr);
    }
    rpr.retain_elements(|e| !FILLS.contains(&e.local_name()));
    Some(rpr)
}

/// A new text body for a shape that has none. `drawing_prefix` is the
/// DrawingML prefix in scope on the shape.
pub fn new_text_body(shape_prefix: Option<&str>, drawing_prefix: &str) -> Element {
    let name = |local: &str| qualify(Some(drawing_prefix), local);
    Element::new(qualify(shape_prefix, "txBody"))
        .with_child(Element::new(name("bodyPr")))
        .with_child(Element::new(name("lstStyle")))
}

/// Prefix the shape already uses for DrawingML elements, `a` if none.
pub fn drawing_prefix(shape: &Element) -> &str {
    shape
        .child("spPr")
        .and_then(|sp| sp.elements().find_map(|e| e.prefix()))
        .unwrap_or("a")
}

/// Build an `a:p` element for a record.
///
/// `template` is an `a:rPr` whose attributes and children seed every run;
/// explicit record attributes override it.
pub fn build_paragraph(prefix: &str, record: &ParagraphRecord, template: Option<&Element>) -> Element {
    let name = |local: &str| qualify(Some(prefix), local);
    let mut p = Element::new(name("p"));

    if let Some(ppr) = build_paragraph_props(prefix, record) {
        p = p.with_child(ppr);
    }

    let rpr = build_run_props(prefix, record, template);
    if record.text.is_empty() {
        let mut end = Element::new(name("endParaRPr"));
        if let Some(rpr) = rpr {
            end.attributes = rpr.attributes;
            end.children = rpr.children;
        }
        return p.with_child(end);
    }

    for (i, line) in record.text.split(LINE_BREAKS).enumerate() {
        if i > 0 {
            let mut br = Element::new(name("br"));
            if let Some(rpr) = &rpr {
                br = br.with_child(rpr.clone());
            }
            p = p.with_child(br);
        }
        if line.is_empty() {
            continue;
        }
        let mut run = Element::new(name("r"));
        if let Some(rpr) = &rpr {
            run = run.with_child(rpr.clone());
        }
        p = p.with_child(run.with_child(Element::new(name("t")).with_text(line)));
    }

    p
}

fn build_paragraph_props(prefix: &str, record: &ParagraphRecord) -> Option<Element> {
    let name = |local: &str| qualify(Some(prefix), local);
    let mut ppr = Element::new(name("pPr"));

    let listed = record.bullet.or(record.numbering.as_ref().map(|_| true));
    match listed {
        Some(true) => {
            let level = i64::from(record.level.unwrap_or(0));
            ppr.set_attr("marL", ((level + 1) * BULLET_INDENT).to_string());
            ppr.set_attr("indent", (-BULLET_INDENT).to_string());
        }
        Some(false) => {
            ppr.set_attr("indent", "0");
        }
        None => {}
    }
    if let Some(level) = record.level {
        ppr.set_attr("lvl", level.to_string());
    }
    if let Some(alignment) = record.alignment {
        ppr.set_attr("algn", alignment.as_ooxml());
    }

    match (record.bullet, record.numbering.as_deref()) {
        (Some(false), _) => {
            ppr = ppr.with_child(Element::new(name("buNone")));
        }
        (_, Some(scheme)) => {
            ppr = ppr
                .with_child(Element::new(name("buFont")).with_attr("typeface", "+mj-lt"))
                .with_child(Element::new(name("buAutoNum")).with_attr("type", scheme));
        }
        (Some(true), None) => {
            ppr = ppr
                .with_child(Element::new(name("buFont")).with_attr("typeface", "Arial"))
                .with_child(Element::new(name("buChar")).with_attr("char", BULLET_CHAR));
        }
        (None, None) => {}
    }

    if ppr.attributes.is_empty() && ppr.children.is_empty() {
        None
    } else {
        Some(ppr)
    }
}

fn build_run_props(prefix: &str, record: &ParagraphRecord, template: Option<&Element>) -> Option<Element> {
    let name = |local: &str| qualify(Some(prefix), local);
    let mut rpr = match template {
        Some(t) => {
            let mut rpr = t.clone();
            rpr.name = name("rPr");
            rpr
        }
        None => Element::new(name("rPr")),
    };

    if let Some(bold) = record.bold {
        rpr.set_attr("b", if bold { "1" } else { "0" });
    }
    if let Some(italic) = record.italic {
        rpr.set_attr("i", if italic { "1" } else { "0" });
    }
    if let Some(underline) = record.underline {
        rpr.set_attr("u", if underline { "sng" } else { "none" });
    }
    if let Some(size) = record.font_size {
        rpr.set_attr("sz", ((size * 100.0).round() as i64).to_string());
    }

    let fill = match (&record.color, &record.theme_color) {
        (Some(color), _) => Some(Element::new(name("srgbClr")).with_attr("val", color.as_hex())),
        (None, Some(theme)) => Some(Element::new(name("schemeClr")).with_attr("val", theme.as_str())),
        (None, None) => None,
    };
    if let Some(color) = fill {
        rpr.retain_elements(|e| !FILLS.contains(&e.local_name()));
        let at = rpr.position_of(AFTER_FILL).unwrap_or(rpr.children.len());
        rpr.children.insert(
            at,
            Node::Element(Element::new(name("solidFill")).with_child(color)),
        );
    }

    if let Some(font) = &record.font_name {
        rpr.retain_elements(|e| e.local_name() != "latin");
        let at = rpr.position_of(AFTER_LATIN).unwrap_or(rpr.children.len());
        rpr.children.insert(
            at,
            Node::Element(Element::new(name("latin")).with_attr("typeface", font.as_str())),
        );
    }

    if rpr.attributes.is_empty() && rpr.children.is_empty() {
        None
    } else {
        Some(rpr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;

    fn body(xml: &str) -> Element {
        Document::parse_str(xml).unwrap().root
    }

    const BODY: &str = r#"<p:txBody xmlns:a="urn:a" xmlns:p="urn:p"><a:bodyPr wrap="square"/><a:lstStyle/><a:p><a:pPr algn="ctr" lvl="1"><a:buChar char="-"/></a:pPr><a:r><a:rPr lang="en-US" sz="2400" b="1"><a:solidFill><a:srgbClr val="ff0000"/></a:solidFill><a:latin typeface="Calibri"/></a:rPr><a:t>Line one</a:t></a:r><a:br/><a:r><a:t>line two</a:t></a:r></a:p><a:p><a:r><a:rPr u="sng" i="1"><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></a:rPr><a:t>  spaced  </a:t></a:r><a:fld id="x" type="slidenum"><a:t>7</a:t></a:fld></a:p><a:p><a:endParaRPr/></a:p></p:txBody>"#;

    #[test]
    fn test_read_paragraph_formatting() {
        let paragraphs = read_text_body(&body(BODY));
        assert_eq!(paragraphs.len(), 3);

        let first = &paragraphs[0];
        assert_eq!(first.text, "Line one\nline two");
        assert_eq!(first.alignment, Some(Alignment::Center));
        assert_eq!(first.bullet, Some(true));
        assert_eq!(first.level, Some(1));
        assert_eq!(first.bold, Some(true));
        assert_eq!(first.italic, None);
        assert_eq!(first.font_size, Some(24.0));
        assert_eq!(first.color.as_ref().unwrap().as_hex(), "FF0000");
        assert_eq!(first.font_name.as_deref(), Some("Calibri"));

        let second = &paragraphs[1];
        assert_eq!(second.text, "  spaced  7");
        assert_eq!(second.underline, Some(true));
        assert_eq!(second.italic, Some(true));
        assert_eq!(second.theme_color.as_deref(), Some("accent1"));
        assert_eq!(second.bullet, None);

        assert_eq!(paragraphs[2], ParagraphRecord::new(""));
    }

    #[test]
    fn test_write_keeps_body_properties_and_template() {
        let mut el = body(BODY);
        write_text_body(&mut el, &[ParagraphRecord::new("Replaced")]);

        assert_eq!(el.child("bodyPr").unwrap().attr("wrap"), Some("square"));
        assert!(el.child("lstStyle").is_some());

        let paragraphs = read_text_body(&el);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text, "Replaced");
        assert_eq!(paragraphs[0].font_size, Some(24.0));
        assert_eq!(paragraphs[0].font_name.as_deref(), Some("Calibri"));
    }

    #[test]
    fn test_explicit_attributes_override_template() {
        let mut el = body(BODY);
        let record = ParagraphRecord::new("Styled")
            .with_color("00AA00".parse().unwrap())
            .with_alignment(Alignment::Right)
            .with_font_size(18.0);
        write_text_body(&mut el, &[ParagraphRecord { bold: Some(false), ..record }]);

        let read = &read_text_body(&el)[0];
        assert_eq!(read.color.as_ref().unwrap().as_hex(), "00AA00");
        assert_eq!(read.alignment, Some(Alignment::Right));
        assert_eq!(read.font_size, Some(18.0));
        assert_eq!(read.bold, None);

        let rpr = el.path(&["p", "r", "rPr"]).unwrap();
        assert_eq!(rpr.elements().filter(|e| e.local_name() == "solidFill").count(), 1);
        let names: Vec<&str> = rpr.elements().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["solidFill", "latin"]);
    }

    #[test]
    fn test_bullets_and_levels() {
        let mut el = body(BODY);
        write_text_body(
            &mut el,
            &[
                ParagraphRecord::new("Top").with_bullet(0),
                ParagraphRecord::new("Nested").with_bullet(1),
                ParagraphRecord {
                    bullet: Some(false),
                    ..ParagraphRecord::new("Plain")
                },
            ],
        );

        let read = read_text_body(&el);
        assert_eq!(read[0].bullet, Some(true));
        assert_eq!(read[0].level, Some(0));
        assert_eq!(read[1].level, Some(1));
        assert_eq!(read[2].bullet, None);

        let ppr = el.elements().filter(|e| e.local_name() == "p").nth(1).unwrap();
        let ppr = ppr.child("pPr").unwrap();
        assert_eq!(ppr.attr("marL"), Some("685800"));
        assert_eq!(ppr.attr("indent"), Some("-342900"));
    }

    #[test]
    fn test_line_breaks_and_empty_paragraphs() {
        let mut el = body(BODY);
        write_text_body(
            &mut el,
            &[ParagraphRecord::new("a\n\nb"), ParagraphRecord::new("")],
        );
        let read = read_text_body(&el);
        assert_eq!(read[0].text, "a\n\nb");
        assert_eq!(read[1].text, "");
    }

    #[test]
    fn test_empty_replacement_leaves_one_paragraph() {
        let mut el = body(BODY);
        write_text_body(&mut el, &[]);
        let read = read_text_body(&el);
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].text, "");
    }

    #[test]
    fn test_unchanged_records_write_back_unchanged() {
        let mut el = body(BODY);
        let before = read_text_body(&el);
        write_text_body(&mut el, &before);
        assert_eq!(read_text_body(&el), before);
    }

    #[test]
    fn test_formatting_stays_with_its_paragraph() {
        let mut el = body(
            r#"<p:txBody xmlns:a="urn:a" xmlns:p="urn:p"><a:bodyPr/><a:p><a:r><a:rPr sz="2000"/><a:t>one</a:t></a:r></a:p><a:p><a:r><a:rPr sz="2000" b="1"/><a:t>two</a:t></a:r></a:p><a:p><a:r><a:rPr sz="2000" i="1"><a:solidFill><a:srgbClr val="C00000"/></a:solidFill></a:rPr><a:t>three</a:t></a:r></a:p></p:txBody>"#,
        );
        write_text_body(
            &mut el,
            &["first".into(), "second".into(), "third".into(), "fourth".into()],
        );

        let read = read_text_body(&el);
        assert_eq!(read[0].bold, None);
        assert_eq!(read[0].color, None);
        assert_eq!(read[1].bold, Some(true));
        assert_eq!(read[1].italic, None);
        assert_eq!(read[2].italic, Some(true));
        assert_eq!(read[2].color.as_ref().unwrap().as_hex(), "C00000");

        // Added past the end: size carries over, emphasis and fill do not.
        assert_eq!(read[3].font_size, Some(20.0));
        assert_eq!(read[3].bold, None);
        assert_eq!(read[3].color, None);
    }

    #[test]
    fn test_vertical_tab_is_a_line_break() {
        let mut el = body(BODY);
        write_text_body(&mut el, &[ParagraphRecord::new("line one\u{0B}line two")]);

        let bytes = Document::new(el).to_bytes().unwrap();
        assert!(!bytes.contains(&0x0B));
        let reparsed = Document::parse(&bytes).unwrap();
        assert_eq!(read_text_body(&reparsed.root)[0].text, "line one\nline two");
    }

    #[test]
    fn test_numbered_paragraphs_round_trip() {
        let mut el = body(
            r#"<p:txBody xmlns:a="urn:a" xmlns:p="urn:p"><a:bodyPr/><a:p><a:pPr marL="342900" indent="-342900"><a:buFont typeface="+mj-lt"/><a:buAutoNum type="romanUcPeriod"/></a:pPr><a:r><a:t>Step</a:t></a:r></a:p></p:txBody>"#,
        );
        let before = read_text_body(&el);
        assert_eq!(before[0].bullet, Some(true));
        assert_eq!(before[0].numbering.as_deref(), Some("romanUcPeriod"));

        write_text_body(&mut el, &before);
        assert_eq!(read_text_body(&el), before);
        let ppr = el.path(&["p", "pPr"]).unwrap();
        let names: Vec<&str> = ppr.elements().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["buFont", "buAutoNum"]);
        assert_eq!(ppr.child("buAutoNum").unwrap().attr("type"), Some("romanUcPeriod"));

        write_text_body(&mut el, &[ParagraphRecord::new("Next").with_numbering("alphaLcParenR", 1)]);
        let read = &read_text_body(&el)[0];
        assert_eq!(read.numbering.as_deref(), Some("alphaLcParenR"));
        assert_eq!(read.level, Some(1));
        assert_eq!(el.path(&["p", "pPr"]).unwrap().attr("marL"), Some("685800"));
    }

    #[test]
    fn test_new_text_body_uses_shape_prefixes() {
        let shape = body(
            r#"<p:sp xmlns:p="urn:p" xmlns:d="urn:a"><p:nvSpPr/><p:spPr><d:xfrm/></p:spPr></p:sp>"#,
        );
        assert_eq!(drawing_prefix(&shape), "d");

        let tx = new_text_body(shape.prefix(), drawing_prefix(&shape));
        assert_eq!(tx.name, "p:txBody");
        let names: Vec<&str> = tx.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["d:bodyPr", "d:lstStyle"]);

        let bare = body(r#"<p:sp xmlns:p="urn:p"><p:spPr/></p:sp>"#);
        assert_eq!(drawing_prefix(&bare), "a");
    }

    #[test]
    fn test_whitespace_only_text_survives() {
        let mut el = body(BODY);
        write_text_body(&mut el, &[ParagraphRecord::new("   ")]);
        let bytes = Document::new(el).to_bytes().unwrap();
        let reparsed = Document::parse(&bytes).unwrap();
        assert_eq!(read_text_body(&reparsed.root)[0].text, "   ");
    }
}
