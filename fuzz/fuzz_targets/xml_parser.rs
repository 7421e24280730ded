#![no_main]
use libfuzzer_sys::fuzz_target;
use typedxml::{WriterConfig, XmlParser};

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = XmlParser::new(data).parse() {
        let written = typedxml::xml::write_document(&doc, WriterConfig::compact());
        let _ = typedxml::parse_xml_str(&written);
    }
});
