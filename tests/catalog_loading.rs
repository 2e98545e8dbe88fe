//! Integration tests for catalog loading

use std::{io::Write, path::PathBuf};

use rusty_money::{Money, iso::THB};
use tempfile::NamedTempFile;
use testresult::TestResult;

use barista::catalog::{CatalogLoader, CatalogState, CatalogUnavailable, DocumentSource};

fn fixture(name: &str) -> DocumentSource {
    DocumentSource::File(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name))
}

#[tokio::test]
async fn bundled_fixtures_load() -> TestResult {
    let loader = CatalogLoader::new(fixture("menu.json"), fixture("menu-options.json"), THB);

    let catalog = loader.load().await?;

    assert_eq!(catalog.categories().len(), 4);
    assert_eq!(catalog.currency(), THB);

    let soda = catalog.drink_types_for("โซดา (Soda)");
    assert_eq!(soda.first().map(|option| *option.price()), Some(Money::from_minor(3000, THB)));

    assert!(catalog.strength_options_for("กาแฟ (Coffee)").is_some());
    assert!(catalog.strength_options_for("ชา (Tea)").is_none());

    Ok(())
}

#[tokio::test]
async fn malformed_options_document_fails_without_panicking() -> TestResult {
    let mut options = NamedTempFile::new()?;
    write!(options, r#"{{ "drinkTypes": "#)?;

    let loader = CatalogLoader::new(
        fixture("menu.json"),
        DocumentSource::File(options.path().to_path_buf()),
        THB,
    );

    let state = loader.load_state().await;

    assert!(matches!(state, CatalogState::Failed(_)));
    assert!(matches!(state.require(), Err(CatalogUnavailable::Failed(_))));

    Ok(())
}

#[tokio::test]
async fn missing_menu_document_fails() -> TestResult {
    let loader = CatalogLoader::new(
        fixture("no-such-menu.json"),
        fixture("menu-options.json"),
        THB,
    );

    let state = loader.load_state().await;

    assert!(!state.is_ready());
    assert!(state.catalog().is_none());

    Ok(())
}

#[tokio::test]
async fn negative_prices_are_rejected() -> TestResult {
    let mut options = NamedTempFile::new()?;
    write!(
        options,
        r#"{{
            "drinkTypes": {{ "regular": [{{ "name": "ร้อน", "price": -5 }}], "soda": [] }},
            "sweetness": [],
            "toppings": [],
            "coffeeStrength": []
        }}"#
    )?;

    let loader = CatalogLoader::new(
        fixture("menu.json"),
        DocumentSource::File(options.path().to_path_buf()),
        THB,
    );

    assert!(loader.load().await.is_err());

    Ok(())
}
