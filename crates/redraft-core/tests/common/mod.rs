//! In-memory `.docx` fixtures built part by part.

#![allow(dead_code)]

use redraft_core::package::{relationship_types, OoxmlPackage};
use redraft_core::WmlDocument;

pub const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart""#
);

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:rFonts w:ascii="Calibri"/><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Header"><w:name w:val="header"/><w:basedOn w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Footer"><w:name w:val="footer"/><w:basedOn w:val="Normal"/></w:style></w:styles>"#;

/// Builds a Word package: body paragraphs, a styles part, optional headers,
/// footers, images and charts, each wired through `word/_rels/document.xml.rels`.
#[derive(Default)]
pub struct DocxBuilder {
    body: Vec<String>,
    styles: Option<String>,
    rels: Vec<(String, &'static str, String)>,
    parts: Vec<(String, Vec<u8>)>,
    section_refs: Vec<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default().styles(STYLES)
    }

    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(xml.to_string());
        self
    }

    pub fn without_styles(mut self) -> Self {
        self.styles = None;
        self
    }

    /// Raw body-level markup (`w:p`, `w:tbl`).
    pub fn block(mut self, xml: impl Into<String>) -> Self {
        self.body.push(xml.into());
        self
    }

    pub fn paragraph(self, style: Option<&str>, runs: &[&str]) -> Self {
        let runs: Vec<String> = runs.iter().map(|t| text_run(t)).collect();
        self.block(paragraph(style, &runs))
    }

    pub fn header(self, id: &str, kind: &str, paragraphs: &[String]) -> Self {
        self.story("header", relationship_types::HEADER, id, kind, paragraphs)
    }

    pub fn footer(self, id: &str, kind: &str, paragraphs: &[String]) -> Self {
        self.story("footer", relationship_types::FOOTER, id, kind, paragraphs)
    }

    fn story(mut self, name: &str, rel_type: &'static str, id: &str, kind: &str, paragraphs: &[String]) -> Self {
        let root = if name == "header" { "w:hdr" } else { "w:ftr" };
        let file = format!("{}{}.xml", name, self.parts.len() + 1);
        let xml = format!("<{root} {NAMESPACES}>{}</{root}>", paragraphs.concat());
        self.parts.push((format!("word/{}", file), xml.into_bytes()));
        self.rels.push((id.to_string(), rel_type, file));
        self.section_refs
            .push(format!(r#"<w:{name}Reference w:type="{kind}" r:id="{id}"/>"#));
        self
    }

    pub fn image(mut self, id: &str, file: &str, bytes: &[u8]) -> Self {
        self.parts.push((format!("word/media/{}", file), bytes.to_vec()));
        self.rels
            .push((id.to_string(), relationship_types::IMAGE, format!("media/{}", file)));
        self
    }

    pub fn chart(mut self, id: &str, file: &str, series: &[&str]) -> Self {
        let series: String = series
            .iter()
            .enumerate()
            .map(|(i, name)| {
                format!(
                    r#"<c:ser><c:idx val="{i}"/><c:tx><c:strRef><c:f>Sheet1!$B${}</c:f><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>{name}</c:v></c:pt></c:strCache></c:strRef></c:tx></c:ser>"#,
                    i + 1
                )
            })
            .collect();
        let xml = format!(
            r#"<c:chartSpace {NAMESPACES}><c:chart><c:plotArea><c:barChart>{series}</c:barChart></c:plotArea></c:chart></c:chartSpace>"#
        );
        self.parts.push((format!("word/charts/{}", file), xml.into_bytes()));
        self.rels
            .push((id.to_string(), relationship_types::CHART, format!("charts/{}", file)));
        self
    }

    pub fn build(self) -> WmlDocument {
        let mut package = OoxmlPackage::new();
        package.set_part("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec());
        package.set_part("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec());

        let mut rels = self.rels;
        if let Some(styles) = &self.styles {
            package.set_part("word/styles.xml", styles.as_bytes().to_vec());
            rels.push(("rIdStyles".to_string(), relationship_types::STYLES, "styles.xml".to_string()));
        }

        let rels_xml: String = rels
            .iter()
            .map(|(id, rel_type, target)| format!(r#"<Relationship Id="{id}" Type="{rel_type}" Target="{target}"/>"#))
            .collect();
        package.set_part(
            "word/_rels/document.xml.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels_xml}</Relationships>"#
            )
            .into_bytes(),
        );

        let document = format!(
            "<w:document {NAMESPACES}><w:body>{}<w:sectPr>{}</w:sectPr></w:body></w:document>",
            self.body.concat(),
            self.section_refs.concat()
        );
        package.set_part("word/document.xml", document.into_bytes());

        for (path, bytes) in self.parts {
            package.set_part(&path, bytes);
        }

        WmlDocument::from_package(package).unwrap()
    }
}

pub fn text_run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, text)
}

pub fn image_run(id: &str) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture 1"/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:blipFill><a:blip r:embed="{id}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
    )
}

pub fn chart_run(id: &str) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><wp:docPr id="2" name="Chart 1"/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart r:id="{id}"/></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
    )
}

/// A paragraph from prebuilt run markup.
pub fn paragraph(style: Option<&str>, runs: &[String]) -> String {
    paragraph_with(style, "", runs)
}

/// A paragraph with extra `w:pPr` children after the style reference.
pub fn paragraph_with(style: Option<&str>, properties: &str, runs: &[String]) -> String {
    let style = style
        .map(|s| format!(r#"<w:pStyle w:val="{}"/>"#, s))
        .unwrap_or_default();
    let ppr = if style.is_empty() && properties.is_empty() {
        String::new()
    } else {
        format!("<w:pPr>{}{}</w:pPr>", style, properties)
    };
    format!("<w:p>{}{}</w:p>", ppr, runs.concat())
}

/// One-row table; each cell holds the given runs in a single paragraph.
pub fn table(cells: &[&[&str]]) -> String {
    let cells: String = cells
        .iter()
        .map(|runs| {
            let runs: Vec<String> = runs.iter().map(|t| text_run(t)).collect();
            format!("<w:tc><w:tcPr/>{}</w:tc>", paragraph(None, &runs))
        })
        .collect();
    format!("<w:tbl><w:tblPr/><w:tr>{}</w:tr></w:tbl>", cells)
}

/// Text of every `w:t` in the document body, one entry per run.
pub fn body_run_texts(doc: &WmlDocument) -> Vec<String> {
    use redraft_core::xml::namespaces::W;

    let main = doc.main_document().unwrap();
    let root = main.root().unwrap();
    main.descendants_by_name(root, W::r())
        .map(|run| {
            main.descendants_by_name(run, W::t())
                .map(|t| main.inner_text(t))
                .collect::<String>()
        })
        .collect()
}

pub fn texts(doc: &WmlDocument) -> Vec<String> {
    redraft_core::extract_text(doc)
        .unwrap()
        .into_iter()
        .map(|record| record.text)
        .collect()
}

/// Series names of a chart part, in plot order.
pub fn series_names(doc: &WmlDocument, part: &str) -> Vec<String> {
    use redraft_core::xml::namespaces::C;

    let chart = doc.package().get_xml_part(part).unwrap();
    let root = chart.root().unwrap();
    chart
        .descendants_by_name(root, C::ser())
        .filter_map(|ser| chart.descendants_by_name(ser, C::v()).next())
        .map(|v| chart.inner_text(v))
        .collect()
}
