//! XML rendering of annotation documents.
//!
//! The layout is fixed, so elements are written straight from the typed
//! records with two-space indentation and no XML declaration.

use crate::types::{AnnotationDocument, BoundingBox, ImageSize};

const INDENT: &str = "  ";

/// Indenting writer for nested elements with text-only leaves
struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(512),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    fn leaf(&mut self, tag: &str, text: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
        push_escaped(&mut self.buf, text);
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn push_escaped(buf: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            _ => buf.push(c),
        }
    }
}

fn write_bndbox(xml: &mut XmlWriter, bndbox: &BoundingBox) {
    xml.open("bndbox");
    xml.leaf("xmin", &bndbox.xmin.to_string());
    xml.leaf("ymin", &bndbox.ymin.to_string());
    xml.leaf("xmax", &bndbox.xmax.to_string());
    xml.leaf("ymax", &bndbox.ymax.to_string());
    xml.close("bndbox");
}

fn write_size(xml: &mut XmlWriter, size: &ImageSize) {
    xml.open("size");
    xml.leaf("width", &size.width.to_string());
    xml.leaf("height", &size.height.to_string());
    xml.leaf("depth", &size.depth.to_string());
    xml.close("size");
}

/// Render `document` as a pretty-printed `<annotation>` element.
///
/// Children appear as `filename`, one `object` per box in document order,
/// then `size`.
pub fn render_annotation(document: &AnnotationDocument) -> String {
    let mut xml = XmlWriter::new();

    xml.open("annotation");
    xml.leaf("filename", &document.filename);
    for object in &document.objects {
        xml.open("object");
        xml.leaf("name", &object.name);
        write_bndbox(&mut xml, &object.bndbox);
        xml.close("object");
    }
    write_size(&mut xml, &document.size);
    xml.close("annotation");

    xml.finish()
}
