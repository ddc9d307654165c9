use anyhow::Result;
use tempfile::TempDir;

use antoinette_cli::artifact::{BundleDocument, to_canonical};
use antoinette_cli::config::ConfigRecord;
use antoinette_cli::core::AntoinetteError;
use antoinette_cli::weaver::Bundle;

use crate::common::strings;

const STORED: &str = r#"{
  "bundles": [
    {
      "name": "misty-lake-0412",
      "elm_apps": [
        "CaseBuilder",
        "SearchForm"
      ],
      "templates": [
        "app/views/cases/new.html.erb",
        "app/views/cases/show.html.erb"
      ]
    },
    {
      "name": "cold-moon-0007",
      "elm_apps": [
        "PanelGallery"
      ],
      "templates": [
        "app/views/eurorack_modules/show.html.erb"
      ]
    }
  ],
  "custom_view_paths": [
    "app/content/layouts"
  ],
  "elm_path": "elm",
  "team": "storefront"
}
"#;

#[test]
fn test_stored_document_round_trips_byte_for_byte() -> Result<()> {
    let document = BundleDocument::from_json(STORED)?;

    assert_eq!(document.bundles.len(), 2);
    assert_eq!(document.bundles[0].components, strings(&["CaseBuilder", "SearchForm"]));
    assert_eq!(document.to_json()?, STORED);
    Ok(())
}

#[test]
fn test_record_loaded_from_written_document() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("config/antoinette.json");
    BundleDocument::from_json(STORED)?.write(&path)?;

    let record = ConfigRecord::load(&path)?;

    assert_eq!(record.custom_view_paths, strings(&["app/content/layouts"]));
    assert_eq!(record.effective_elm_path(), "elm");
    assert_eq!(record.extra.get("team"), Some(&serde_json::json!("storefront")));
    Ok(())
}

#[test]
fn test_new_bundles_keep_pass_through_fields() -> Result<()> {
    let record = BundleDocument::from_json(STORED)?.config;
    let bundles = vec![Bundle {
        name: "bundle-001".to_string(),
        components: strings(&["NavSidebar"]),
        templates: strings(&["app/views/home.html.erb"]),
    }];

    let json: serde_json::Value = serde_json::from_str(&to_canonical(bundles, record).to_json()?)?;

    assert_eq!(json["bundles"][0]["elm_apps"], serde_json::json!(["NavSidebar"]));
    assert_eq!(json["team"], "storefront");
    assert_eq!(json["elm_path"], "elm");
    Ok(())
}

#[test]
fn test_bundle_selection_by_source_path() -> Result<()> {
    let document = BundleDocument::from_json(STORED)?;

    let selected = document.bundles_containing(&["app/client/SearchForm.elm"]);

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].name, "misty-lake-0412");
    Ok(())
}

#[test]
fn test_truncated_document_is_rejected() {
    let result = BundleDocument::from_json(&STORED[..STORED.len() / 2]);
    assert!(matches!(result, Err(AntoinetteError::ArtifactParseError { .. })));
}
