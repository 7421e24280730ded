use typedxml::{
    export_settings, import_settings, AdapterConfig, DataBundle, Diagnostics, DirectoryBundle,
    Mapping, MemoryBundle, NamedLocator, Outcome, SettingsStore, SkipReason, Value,
    XmlSettingsAdapter,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn ldap_settings() -> Mapping {
    let users: Mapping = [
        ("baseDN", Value::from("ou=users,dc=example,dc=com")),
        ("scope", Value::from(2)),
        (
            "objectClasses",
            Value::from(vec![Value::from("inetOrgPerson"), Value::from("person")]),
        ),
    ]
    .into_iter()
    .collect();
    [
        ("server.uri", Value::from("ldap://127.0.0.1:12345")),
        ("server.ignore_cert", Value::from(false)),
        ("cache.timeout", Value::from(300.0)),
        ("users", Value::Mapping(users)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_export_then_import_into_empty_site() -> TestResult {
    let mut source = NamedLocator::new("pasldap")
        .with("pasldap", XmlSettingsAdapter::new(ldap_settings()));
    let mut bundle = MemoryBundle::new();
    let mut diagnostics = Diagnostics::new();

    let outcome = export_settings(&mut source, &mut bundle, &mut diagnostics)?;
    assert!(matches!(outcome, Outcome::Exported { ref filename, .. } if filename == "ldapsettings.xml"));
    assert_eq!(bundle.mime_type("ldapsettings.xml"), Some("text/xml"));

    let mut target = NamedLocator::new("pasldap")
        .with("pasldap", XmlSettingsAdapter::new(Mapping::new()));
    let outcome = import_settings(&mut target, &bundle, &mut diagnostics)?;
    match outcome {
        Outcome::Imported { keys, .. } => assert_eq!(keys.len(), 4),
        other => return Err(format!("unexpected outcome {other:?}").into()),
    }

    let imported = target.get("pasldap").map(|a| a.settings().clone());
    assert_eq!(imported, Some(ldap_settings()));
    assert!(diagnostics.is_empty());
    Ok(())
}

#[test]
fn test_import_is_a_partial_merge() -> TestResult {
    let mut bundle = MemoryBundle::new();
    bundle.write_data_file(
        "ldapsettings.xml",
        b"<?xml version=\"1.0\"?>\n<object type=\"dict\">\n <element key=\"a\" type=\"int\">10</element>\n</object>\n",
        "text/xml",
    )?;

    let live: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
    let mut locator = Some(XmlSettingsAdapter::new(live));
    let mut diagnostics = Diagnostics::new();
    import_settings(&mut locator, &bundle, &mut diagnostics)?;

    let settings = locator.map(XmlSettingsAdapter::into_settings);
    let expected: Mapping = [("a", 10), ("b", 2)].into_iter().collect();
    assert_eq!(settings, Some(expected));
    Ok(())
}

#[test]
fn test_absent_top_level_entries_leave_settings_alone() -> TestResult {
    let mut bundle = MemoryBundle::new();
    bundle.write_data_file(
        "ldapsettings.xml",
        b"<object type=\"dict\">\
          <element key=\"a\" type=\"bogus\">x</element>\
          <element key=\"b\"/>\
          <element key=\"c\" type=\"string\">new</element>\
          </object>",
        "text/xml",
    )?;

    let live: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
    let mut locator = Some(XmlSettingsAdapter::new(live));
    let mut diagnostics = Diagnostics::new();
    let outcome = import_settings(&mut locator, &bundle, &mut diagnostics)?;
    assert_eq!(
        outcome,
        Outcome::Imported {
            filename: "ldapsettings.xml".to_string(),
            keys: vec!["c".to_string()],
        }
    );
    let settings = locator.map(XmlSettingsAdapter::into_settings);
    let expected: Mapping = [("a", Value::from(1)), ("b", 2.into()), ("c", "new".into())]
        .into_iter()
        .collect();
    assert_eq!(settings, Some(expected));
    Ok(())
}

#[test]
fn test_missing_file_leaves_settings_alone() -> TestResult {
    let dir = tempfile::tempdir()?;
    let bundle = DirectoryBundle::new(dir.path());
    let mut locator = Some(XmlSettingsAdapter::new(ldap_settings()));
    let mut diagnostics = Diagnostics::new();

    let outcome = import_settings(&mut locator, &bundle, &mut diagnostics)?;
    assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingFile));
    assert!(!diagnostics.has_warnings());
    let settings = locator.map(XmlSettingsAdapter::into_settings);
    assert_eq!(settings, Some(ldap_settings()));
    Ok(())
}

#[test]
fn test_directory_bundle_round_trip() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut bundle = DirectoryBundle::new(dir.path().join("profile"));
    let config = AdapterConfig::named("plugin");
    let mut locator = Some(XmlSettingsAdapter::with_config(ldap_settings(), config.clone()));
    let mut diagnostics = Diagnostics::new();

    export_settings(&mut locator, &mut bundle, &mut diagnostics)?;
    let written = std::fs::read_to_string(bundle.path_of("plugin.xml"))?;
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<object type=\"dict\">"));
    assert!(written.contains(" <element key=\"cache.timeout\" type=\"float\">300.0</element>\n"));

    let mut restored = Some(XmlSettingsAdapter::with_config(Mapping::new(), config));
    import_settings(&mut restored, &bundle, &mut diagnostics)?;
    let settings = restored.map(XmlSettingsAdapter::into_settings);
    assert_eq!(settings, Some(ldap_settings()));
    Ok(())
}

#[test]
fn test_malformed_document_is_reported() -> TestResult {
    let mut bundle = MemoryBundle::new();
    bundle.write_data_file("ldapsettings.xml", b"<object type=\"dict\"><element>", "text/xml")?;
    let mut locator = Some(XmlSettingsAdapter::new(ldap_settings()));
    let mut diagnostics = Diagnostics::new();

    let result = import_settings(&mut locator, &bundle, &mut diagnostics);
    assert!(result.is_err());
    let settings = locator.map(XmlSettingsAdapter::into_settings);
    assert_eq!(settings, Some(ldap_settings()));
    Ok(())
}

/// Store that keeps entries in a sorted vector, to show any store works
#[derive(Default)]
struct SortedStore {
    entries: Vec<(String, Value)>,
}

impl SettingsStore for SortedStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&mut self, key: &str, value: Value) {
        match self.entries.binary_search_by(|(k, _)| k.as_str().cmp(key)) {
            Ok(index) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    entry.1 = value;
                }
            }
            Err(index) => self.entries.insert(index, (key.to_string(), value)),
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

#[test]
fn test_custom_store() -> TestResult {
    let mut source = Some(XmlSettingsAdapter::new(ldap_settings()));
    let mut bundle = MemoryBundle::new();
    let mut diagnostics = Diagnostics::new();
    export_settings(&mut source, &mut bundle, &mut diagnostics)?;

    let mut target = Some(XmlSettingsAdapter::new(SortedStore::default()));
    import_settings(&mut target, &bundle, &mut diagnostics)?;
    let snapshot = target.map(|adapter| adapter.settings().snapshot());
    assert_eq!(snapshot, Some(ldap_settings()));
    Ok(())
}
