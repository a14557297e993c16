use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::BeitragError;

pub type XmlResult = Result<String, BeitragError>;

fn xml_io(e: std::io::Error) -> BeitragError {
    BeitragError::Xml(format!("XML write error: {e}"))
}

/// Thin wrapper over `quick_xml::Writer`. Text nodes and attribute values
/// are entity-escaped (`& < > " '`) by the underlying event writer.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, BeitragError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(quick_xml::events::BytesDecl::new(
                "1.0",
                Some("UTF-8"),
                None,
            )))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, BeitragError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| BeitragError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, BeitragError> {
        let elem = BytesStart::new(name);
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, BeitragError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, BeitragError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, BeitragError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write a monetary amount with its `Ccy` currency attribute.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<&mut Self, BeitragError> {
        self.start_element_with_attrs(name, &[("Ccy", currency)])?;
        self.writer
            .write_event(Event::Text(BytesText::new(&format_amount(amount))))
            .map_err(xml_io)?;
        self.end_element(name)
    }
}

/// Format a Decimal as a pain.008 amount: commercial rounding to exactly two
/// decimal places, trailing zeros kept (10 → "10.00").
pub fn format_amount(amount: Decimal) -> String {
    let s = amount
        .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_string();
    match s.find('.') {
        Some(dot_pos) => {
            let decimals = s.len() - dot_pos - 1;
            if decimals < 2 {
                format!("{s}{}", "0".repeat(2 - decimals))
            } else {
                s
            }
        }
        None => format!("{s}.00"),
    }
}
