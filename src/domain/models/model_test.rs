use super::ModelSelector;
use super::MODEL_CATALOG;

#[test]
fn it_defaults_to_first_catalog_entry() {
    let selector = ModelSelector::default();
    assert_eq!(selector.active().id, MODEL_CATALOG[0].id);
}

#[test]
fn it_falls_back_on_unknown_tier() {
    let selector = ModelSelector::from_tier("definitely/not-a-model");
    assert_eq!(selector.active().id, MODEL_CATALOG[0].id);
}

#[test]
fn it_restores_from_tier() {
    let selector = ModelSelector::from_tier(MODEL_CATALOG[2].id);
    assert_eq!(selector.active().id, MODEL_CATALOG[2].id);
}

#[test]
fn it_selects_by_id() {
    let mut selector = ModelSelector::default();
    let model = selector.select(MODEL_CATALOG[1].id).unwrap();
    assert_eq!(model.name, MODEL_CATALOG[1].name);
    assert_eq!(selector.active().id, MODEL_CATALOG[1].id);
}

#[test]
fn it_selects_by_index() {
    let mut selector = ModelSelector::default();
    let model = selector.select("3").unwrap();
    assert_eq!(model.id, MODEL_CATALOG[2].id);
}

#[test]
fn it_rejects_out_of_bounds_index() {
    let mut selector = ModelSelector::default();
    let res = selector.select("9");
    assert!(res.is_err());
    assert_eq!(selector.active().id, MODEL_CATALOG[0].id);
}

#[test]
fn it_rejects_unknown_name() {
    let mut selector = ModelSelector::default();
    let res = selector.select("nope/nothing");
    assert!(res.is_err());
}
