use doel::{Attributes, FixedZone};
use pretty_assertions::assert_eq;

fn sample() -> Attributes {
    Attributes::from_json(
        r#"{
            "devicetracker_zone_name": "Home",
            "devicetracker_zone": "home",
            "place_type": "restaurant",
            "place_category": "food",
            "street": "Main St",
            "street_number": "123",
            "city": "Fort Lee"
        }"#,
    )
    .unwrap()
}

async fn label(expr: &str) -> String {
    doel::eval(expr, &sample(), &FixedZone(true)).await
}

#[tokio::test]
async fn test_single_option() {
    assert_eq!(label("zone_name").await, "Home");
}

#[tokio::test]
async fn test_deny_list_with_title_case() {
    assert_eq!(label("place_type(-, unclassified)").await, "Restaurant");
}

#[tokio::test]
async fn test_street_number_then_street() {
    assert_eq!(label("street_number, street").await, "123 Main St");
}

#[tokio::test]
async fn test_street_number_then_city() {
    assert_eq!(label("street_number, city").await, "123, Fort Lee");
}

#[tokio::test]
async fn test_unmapped_option_takes_fallback() {
    assert_eq!(label("missing_option[zone_name]").await, "Home");
}

#[tokio::test]
async fn test_allow_list_rejects() {
    assert_eq!(label("zone_name(away)").await, "");
}

fn fort_lee_snapshot() -> Attributes {
    Attributes::from_json(
        r#"{
            "devicetracker_id": "device_tracker.test_iphone",
            "devicetracker_zone_name": "not_home",
            "devicetracker_zone": "not_home",
            "direction_of_travel": "towards home",
            "distance_from_home_km": 23.899,
            "place_type": "house",
            "place_name": "Roy Spiegel MSW",
            "street_number": "1",
            "street": "Bridge Plaza North",
            "city": "Fort Lee",
            "neighbourhood": "Koreatown",
            "city_clean": "Fort Lee",
            "state_province": "New Jersey",
            "state_abbr": "NJ",
            "county": "Bergen County",
            "country": "United States",
            "country_code": "US",
            "postal_code": "07024",
            "place_name_no_dupe": "Roy Spiegel MSW"
        }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_flat_list_out_of_zone() {
    let attrs = fort_lee_snapshot();
    let zone = doel::TrackerZone::from_store(&attrs);
    let out = doel::eval(
        "name_no_dupe, category(-, place), type(-, yes), neighborhood, house_number, street",
        &attrs,
        &zone,
    )
    .await;
    assert_eq!(out, "Roy Spiegel MSW, House, Koreatown, 1 Bridge Plaza North");
}

#[tokio::test]
async fn test_nested_fallbacks_out_of_zone() {
    let attrs = fort_lee_snapshot();
    let expr = "zone_name[driving, name_no_dupe[type(-, unclassified, category(-, highway))\
                [category(-, highway)], house_number, route_number(type(+, motorway, trunk))\
                [street[route_number]], neighborhood(type(house))], city_clean[county], state_abbr]";
    let out = doel::eval(expr, &attrs, &FixedZone(false)).await;
    assert_eq!(out, "Roy Spiegel MSW, Fort Lee, NJ");
}

#[tokio::test]
async fn test_nested_fallbacks_without_place_name() {
    let mut attrs = fort_lee_snapshot();
    attrs.clear("place_name_no_dupe");
    let expr = "zone_name[name_no_dupe[type(-, unclassified)[category], house_number, \
                street, neighborhood(type(house))], city_clean[county], state_abbr]";
    let out = doel::eval(expr, &attrs, &FixedZone(false)).await;
    assert_eq!(out, "House, 1 Bridge Plaza North, Koreatown, Fort Lee, NJ");
}

#[tokio::test]
async fn test_number_values_render() {
    let attrs = fort_lee_snapshot();
    let out = doel::eval("distance_km, direction_of_travel", &attrs, &FixedZone(false)).await;
    assert_eq!(out, "23.899, towards home");
}
