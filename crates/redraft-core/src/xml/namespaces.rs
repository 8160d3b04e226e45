#![allow(non_snake_case)]

use super::xname::XName;

pub mod W {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    // Document structure
    pub fn document() -> XName { XName::new(NS, "document") }
    pub fn body() -> XName { XName::new(NS, "body") }
    pub fn hdr() -> XName { XName::new(NS, "hdr") }
    pub fn ftr() -> XName { XName::new(NS, "ftr") }
    pub fn sectPr() -> XName { XName::new(NS, "sectPr") }
    pub fn headerReference() -> XName { XName::new(NS, "headerReference") }
    pub fn footerReference() -> XName { XName::new(NS, "footerReference") }

    // Paragraphs and runs
    pub fn p() -> XName { XName::new(NS, "p") }
    pub fn pPr() -> XName { XName::new(NS, "pPr") }
    pub fn pStyle() -> XName { XName::new(NS, "pStyle") }
    pub fn r() -> XName { XName::new(NS, "r") }
    pub fn rPr() -> XName { XName::new(NS, "rPr") }
    pub fn t() -> XName { XName::new(NS, "t") }
    pub fn tab() -> XName { XName::new(NS, "tab") }
    pub fn ptab() -> XName { XName::new(NS, "ptab") }
    pub fn br() -> XName { XName::new(NS, "br") }
    pub fn cr() -> XName { XName::new(NS, "cr") }
    pub fn noBreakHyphen() -> XName { XName::new(NS, "noBreakHyphen") }
    pub fn del() -> XName { XName::new(NS, "del") }
    pub fn txbxContent() -> XName { XName::new(NS, "txbxContent") }

    // Non-text run content
    pub fn drawing() -> XName { XName::new(NS, "drawing") }
    pub fn pict() -> XName { XName::new(NS, "pict") }
    pub fn object() -> XName { XName::new(NS, "object") }

    // Paragraph formatting
    pub fn jc() -> XName { XName::new(NS, "jc") }
    pub fn spacing() -> XName { XName::new(NS, "spacing") }
    pub fn ind() -> XName { XName::new(NS, "ind") }
    pub fn keepNext() -> XName { XName::new(NS, "keepNext") }
    pub fn keepLines() -> XName { XName::new(NS, "keepLines") }
    pub fn pageBreakBefore() -> XName { XName::new(NS, "pageBreakBefore") }

    // Tables
    pub fn tbl() -> XName { XName::new(NS, "tbl") }
    pub fn tr() -> XName { XName::new(NS, "tr") }
    pub fn tc() -> XName { XName::new(NS, "tc") }
    pub fn tcPr() -> XName { XName::new(NS, "tcPr") }

    // Styles part
    pub fn styles() -> XName { XName::new(NS, "styles") }
    pub fn style() -> XName { XName::new(NS, "style") }
    pub fn name() -> XName { XName::new(NS, "name") }
    pub fn basedOn() -> XName { XName::new(NS, "basedOn") }
    pub fn next() -> XName { XName::new(NS, "next") }
    pub fn rFonts() -> XName { XName::new(NS, "rFonts") }
    pub fn sz() -> XName { XName::new(NS, "sz") }

    // Attributes
    pub fn val() -> XName { XName::new(NS, "val") }
    pub fn type_() -> XName { XName::new(NS, "type") }
    pub fn styleId() -> XName { XName::new(NS, "styleId") }
    pub fn default() -> XName { XName::new(NS, "default") }
    pub fn ascii() -> XName { XName::new(NS, "ascii") }
    pub fn before() -> XName { XName::new(NS, "before") }
    pub fn after() -> XName { XName::new(NS, "after") }
    pub fn line() -> XName { XName::new(NS, "line") }
    pub fn lineRule() -> XName { XName::new(NS, "lineRule") }
    pub fn left() -> XName { XName::new(NS, "left") }
    pub fn right() -> XName { XName::new(NS, "right") }
    pub fn start() -> XName { XName::new(NS, "start") }
    pub fn end() -> XName { XName::new(NS, "end") }
    pub fn firstLine() -> XName { XName::new(NS, "firstLine") }
    pub fn hanging() -> XName { XName::new(NS, "hanging") }
}

pub mod R {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    pub fn id() -> XName { XName::new(NS, "id") }
    pub fn embed() -> XName { XName::new(NS, "embed") }
}

pub mod A {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    pub fn blip() -> XName { XName::new(NS, "blip") }
}

pub mod V {
    use super::XName;
    pub const NS: &str = "urn:schemas-microsoft-com:vml";

    pub fn imagedata() -> XName { XName::new(NS, "imagedata") }
}

pub mod C {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

    pub fn chart() -> XName { XName::new(NS, "chart") }
    pub fn ser() -> XName { XName::new(NS, "ser") }
    pub fn tx() -> XName { XName::new(NS, "tx") }
    pub fn strRef() -> XName { XName::new(NS, "strRef") }
    pub fn strCache() -> XName { XName::new(NS, "strCache") }
    pub fn pt() -> XName { XName::new(NS, "pt") }
    pub fn v() -> XName { XName::new(NS, "v") }
}

pub mod XML {
    use super::XName;
    pub const NS: &str = "http://www.w3.org/XML/1998/namespace";

    pub fn space() -> XName { XName::new(NS, "space") }
}

pub mod XMLNS {
    pub const NS: &str = "http://www.w3.org/2000/xmlns/";
}

pub mod PKG_REL {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

    pub fn Relationship() -> XName { XName::new(NS, "Relationship") }
}
