use std::io::Write;

use club_packages::forms::gift::GiftType;
use club_packages::models::definition::PackageDefinition;

fn write_definition(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_full_definition() {
    let file = write_definition(
        r#"
discount_all_percentage: 10
specific_discount:
  title: New arrivals
  percentage: 25.5
gift:
  description: Free coffee
  count: 5
vip_experience_ids: [1, 3]
duration_months: 6
"#,
    );

    let definition = PackageDefinition::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(definition.resume_id(), Ok(None));
    assert_eq!(
        definition
            .experience_ids()
            .unwrap()
            .iter()
            .map(|id| id.get())
            .collect::<Vec<_>>(),
        vec![1, 3]
    );

    let discounts = definition.discounts_form();
    assert_eq!(discounts.discount_all_percentage, "10");
    assert!(discounts.specific_enabled);
    assert_eq!(discounts.specific_percentage, "25.5");

    let gift = definition.gift_form();
    assert_eq!(gift.gift_type, GiftType::Count);
    assert_eq!(gift.count_threshold, "5");
    assert!(gift.amount_threshold.is_empty());

    assert_eq!(definition.review_form().duration_months, Some(6));
}

#[test]
fn amount_threshold_wins_over_count() {
    let file = write_definition(
        r#"
resume_package_id: 42
discount_all_percentage: 15
gift:
  description: Gift card
  amount: 1000000
  count: 5
duration_months: 12
"#,
    );

    let definition = PackageDefinition::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(definition.resume_id().unwrap().map(|id| id.get()), Some(42));
    assert!(definition.specific_discount.is_none());
    assert!(!definition.discounts_form().specific_enabled);
    assert_eq!(definition.gift_form().gift_type, GiftType::Amount);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    assert!(PackageDefinition::load(path.to_str().unwrap()).is_err());
}
