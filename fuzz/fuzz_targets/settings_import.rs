#![no_main]
use libfuzzer_sys::fuzz_target;
use typedxml::{
    import_settings, DataBundle, Diagnostics, Mapping, MemoryBundle, XmlSettingsAdapter,
};

fuzz_target!(|data: &[u8]| {
    let mut bundle = MemoryBundle::new();
    if bundle.write_data_file("ldapsettings.xml", data, "text/xml").is_err() {
        return;
    }
    let mut locator = Some(XmlSettingsAdapter::new(Mapping::new()));
    let mut diagnostics = Diagnostics::new();
    let _ = import_settings(&mut locator, &bundle, &mut diagnostics);
});
